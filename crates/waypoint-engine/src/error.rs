//! Error types for the engine binary.
//!
//! [`EngineError`] covers the startup steps that can fail. Once the tick
//! loop is running nothing is fatal.

/// Startup failure of the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: waypoint_core::ConfigError,
    },

    /// The content catalog failed validation.
    #[error("catalog error: {source}")]
    Catalog {
        /// The underlying catalog error.
        #[from]
        source: waypoint_catalog::CatalogError,
    },
}
