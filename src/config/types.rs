// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::path::PathBuf;

use crate::logger::AccessLogFormat;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub files: FilesConfig,
    pub logging: LoggingConfig,
}

/// Listener and runtime settings
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// `[host]:port`, empty host means all interfaces
    pub listen_addr: String,
    #[serde(default)]
    pub workers: Option<usize>,
}

/// What gets served
#[derive(Debug, Deserialize, Clone)]
pub struct FilesConfig {
    pub root: PathBuf,
    /// Served for directory requests ending in `/`
    pub index_file: String,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    #[serde(default)]
    pub access_log_format: AccessLogFormat,
    /// Access/info log file (stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file (stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}
