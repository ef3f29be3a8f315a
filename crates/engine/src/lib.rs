//! `shelfwise-engine` — approval gateway, action executor, and orchestrator.
//!
//! This crate owns the commit-on-approval protocol: recommendations flow in
//! presentation order through the gateway, and only approved ones reach the
//! executor, which applies exactly one store mutation or supplier
//! notification each.

pub mod executor;
pub mod gateway;
pub mod orchestrator;
pub mod report;


pub use executor::{ActionExecutor, ExecutionError};
pub use gateway::{ApprovalGateway, ApprovalRequest, ChannelGateway, Decision, ScriptedGateway};
pub use orchestrator::{AdvisoryRun, RunError};
pub use report::{ActionOutcome, OutcomeStatus, RunReport};
