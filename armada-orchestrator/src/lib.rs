//! Armada Orchestrator
//!
//! The fan-out/poll/aggregate engine. Given a target application, it:
//! - resolves the target's deployment groups through a [`DeployBackend`]
//! - optionally announces the run (chat message + APM deployment marker)
//! - sequentially creates one deployment per group and polls each to a
//!   terminal state
//! - aggregates failed groups into a [`FailureReport`] and delivers the
//!   final outcome notification
//!
//! Backend errors abort the run; individual `Failed` deployments are
//! recorded and the fan-out continues; notifier errors are logged and
//! swallowed. Time is injected through the [`Sleeper`] trait so tests run
//! without real delays.
//!
//! [`DeployBackend`]: armada_core::backend::DeployBackend
//! [`FailureReport`]: armada_core::domain::run::FailureReport

mod clock;
mod config;
mod poll;
mod run;
#[cfg(test)]
mod testutil;

pub use clock::{Sleeper, TokioSleeper};
pub use config::{NotifyPolicy, OrchestratorConfig};
pub use poll::poll_until_terminal;
pub use run::{Orchestrator, RunError, RunReport};
