//! Armada Core
//!
//! Core types and abstractions for the Armada deployment trigger.
//!
//! This crate contains:
//! - Domain types: Core business entities (DeploymentTarget, Deployment, etc.)
//! - Ports: Trait seams the orchestrator consumes (`DeployBackend`, `Notifier`)
//!   together with their error taxonomies

pub mod backend;
pub mod domain;
pub mod notify;
