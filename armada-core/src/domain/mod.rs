//! Domain types shared across the workspace

pub mod deployment;
pub mod run;
pub mod target;
