//! Common utilities and types for the Epic Cash VPN site

pub mod error;
pub mod logging;

// Re-export commonly used types
pub use error::{Result, SiteError};
pub use logging::{
    init_default_logging, init_dev_logging, init_logging, init_prod_logging, LogFormat,
    LoggingConfig,
};
