//! `shelfwise-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! strongly-typed identifiers, the domain error model, and the product record
//! that advisory runs read.

pub mod error;
pub mod id;
pub mod money;
pub mod product;

pub use error::{DomainError, DomainResult};
pub use id::{ProductId, RunId};
pub use money::Money;
pub use product::{Product, SalesVelocity};
