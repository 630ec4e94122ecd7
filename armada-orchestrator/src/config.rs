//! Orchestrator configuration
//!
//! Makes the per-target notification policy and the poll cadence explicit
//! instead of hardcoding them next to the run loop.

use std::time::Duration;

/// Which notifications fire for the target being deployed
///
/// Policy is per-event: the start announcement (chat message plus APM
/// marker), the success alert, and the failure alert are gated
/// independently. Failure alerts default to on so a bad rollout is never
/// silent unless explicitly configured to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotifyPolicy {
    /// Announce the run when it starts (chat + APM marker)
    pub notify_on_start: bool,
    /// Send a success alert when every group succeeds
    pub notify_on_success: bool,
    /// Send a failure alert when any group fails
    pub notify_on_failure: bool,
}

impl Default for NotifyPolicy {
    fn default() -> Self {
        Self {
            notify_on_start: false,
            notify_on_success: false,
            notify_on_failure: true,
        }
    }
}

impl NotifyPolicy {
    /// Policy that never notifies
    pub fn silent() -> Self {
        Self {
            notify_on_start: false,
            notify_on_success: false,
            notify_on_failure: false,
        }
    }

    /// Policy that notifies on every event
    pub fn all() -> Self {
        Self {
            notify_on_start: true,
            notify_on_success: true,
            notify_on_failure: true,
        }
    }
}

/// Orchestrator configuration
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Fixed interval between status polls
    pub poll_interval: Duration,
    /// Notification policy for the target being deployed
    pub policy: NotifyPolicy,
}

impl OrchestratorConfig {
    /// Creates a configuration with the given policy and a 2s poll interval
    pub fn new(policy: NotifyPolicy) -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
            policy,
        }
    }

    /// Overrides the poll interval
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.poll_interval.is_zero() {
            return Err("poll_interval must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self::new(NotifyPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OrchestratorConfig::default();
        assert_eq!(config.poll_interval, Duration::from_secs(2));
        assert!(!config.policy.notify_on_start);
        assert!(config.policy.notify_on_failure);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config =
            OrchestratorConfig::default().with_poll_interval(Duration::from_secs(0));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_policy_presets() {
        assert!(!NotifyPolicy::silent().notify_on_failure);
        assert!(NotifyPolicy::all().notify_on_start);
        assert!(NotifyPolicy::all().notify_on_success);
    }
}
