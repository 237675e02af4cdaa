pub mod config;
pub mod error;
pub mod logging;
pub mod result;

pub use config::{AppConfig, LoggingConfig};
pub use error::ListError;
pub use logging::init_tracing;
pub use result::ListResult;
