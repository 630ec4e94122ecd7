//! Armada Clients
//!
//! Concrete implementations of the core ports:
//! - [`CodeDeployBackend`]: AWS CodeDeploy implementation of
//!   [`DeployBackend`](armada_core::backend::DeployBackend)
//! - [`AlertNotifier`]: chat-webhook + APM deployment-marker implementation
//!   of [`Notifier`](armada_core::notify::Notifier)
//!
//! One backend client and one outbound HTTP client suffice for a run's
//! lifetime; both are cheap clones around connection pools.

mod apm;
mod chat;
mod codedeploy;
mod notifier;

pub use apm::ApmClient;
pub use chat::{AlertField, ChatMessage, ChatWebhook};
pub use codedeploy::CodeDeployBackend;
pub use notifier::AlertNotifier;
