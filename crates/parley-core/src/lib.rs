//! Parley Core
//!
//! Shared foundation for the parley service: the common error type,
//! configuration loading and validation, and logging setup.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{AgentSettings, LlmSettings, ServerSettings, ServiceConfig};
pub use error::{CoreError, Result};
pub use logging::init_logging;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exports_accessible() {
        let config = ServiceConfig::default();
        assert!(config.validate().is_ok());
    }
}
