//! `shelfwise-advisory` — the recommendation rules engine.
//!
//! Pure decision logic: a snapshot of product records plus an explicit
//! reference date go in, an ordered list of recommendations comes out.
//! No I/O, no clocks, no mutation; everything here is deterministic.

pub mod engine;
pub mod policy;
pub mod recommendation;

pub use engine::{Evaluation, SkippedProduct, evaluate};
pub use policy::AdvisoryPolicy;
pub use recommendation::{ActionPayload, Priority, Recommendation, RecommendationType};
