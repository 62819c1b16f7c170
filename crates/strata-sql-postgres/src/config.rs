//! Database configuration.

/// Execution mode, injected at configuration time.
///
/// Development mode re-raises execution failures as errors; every other
/// mode reports them through an explicit status the caller must check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Development: execution failures become hard errors.
    Development,
    /// Production-like: execution failures are logged and returned as a
    /// non-success status.
    #[default]
    Production,
}

/// Connection configuration for a read/write pool pair.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Write-capable connection URL.
    pub write_url: String,
    /// Read-only connection URL; falls back to the write URL when absent.
    pub read_url: Option<String>,
    /// Maximum connections per pool.
    pub max_connections: u32,
    /// Execution mode.
    pub mode: ExecutionMode,
}

impl DatabaseConfig {
    /// Creates a configuration with a single write-capable URL.
    #[must_use]
    pub fn new(write_url: impl Into<String>) -> Self {
        Self {
            write_url: write_url.into(),
            read_url: None,
            max_connections: 5,
            mode: ExecutionMode::default(),
        }
    }

    /// Sets a separate read-only URL (e.g. a replica endpoint).
    #[must_use]
    pub fn read_url(mut self, url: impl Into<String>) -> Self {
        self.read_url = Some(url.into());
        self
    }

    /// Sets the maximum connections per pool.
    #[must_use]
    pub const fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the execution mode.
    #[must_use]
    pub const fn mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DatabaseConfig::new("postgres://localhost/app");
        assert!(config.read_url.is_none());
        assert_eq!(config.mode, ExecutionMode::Production);
    }

    #[test]
    fn test_builder_chain() {
        let config = DatabaseConfig::new("postgres://primary/app")
            .read_url("postgres://replica/app")
            .max_connections(10)
            .mode(ExecutionMode::Development);
        assert_eq!(config.read_url.as_deref(), Some("postgres://replica/app"));
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.mode, ExecutionMode::Development);
    }
}
