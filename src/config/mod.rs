// Configuration module entry point
// Layers defaults, an optional TOML file, FILESERVE_* environment variables
// and command line flags, in that order of precedence.

mod listen;
mod types;

use std::net::SocketAddr;
use std::path::Path;

pub use listen::parse_listen_addr;
pub use types::{Config, FilesConfig, LoggingConfig, ServerConfig};

use crate::cli::Cli;
use crate::error::StartupError;

pub const DEFAULT_LISTEN_ADDR: &str = ":5000";
pub const DEFAULT_ROOT: &str = "./static";
pub const DEFAULT_INDEX_FILE: &str = "index.html";
const ENV_PREFIX: &str = "FILESERVE";

impl Config {
    /// Load configuration for the given command line
    pub fn load(cli: &Cli) -> Result<Self, config::ConfigError> {
        Self::load_from(cli.config.as_deref(), cli)
    }

    /// Load configuration, reading `config_file` (TOML) when given
    pub fn load_from(config_file: Option<&Path>, cli: &Cli) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("server.listen_addr", DEFAULT_LISTEN_ADDR)?
            .set_default("files.root", DEFAULT_ROOT)?
            .set_default("files.index_file", DEFAULT_INDEX_FILE)?
            .set_default("logging.access_log", false)?
            .set_default("logging.access_log_format", "common")?;

        if let Some(path) = config_file {
            builder = builder.add_source(
                config::File::new(&path.to_string_lossy(), config::FileFormat::Toml)
                    .required(true),
            );
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.listen_addr", cli.listen_addr.clone())?
            .set_override_option("server.workers", cli.workers)?
            .set_override_option(
                "files.root",
                cli.root.as_ref().map(|p| p.to_string_lossy().into_owned()),
            )?
            .set_override_option("logging.access_log", cli.access_log.then_some(true))?
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        let index = Path::new(&self.files.index_file);
        if self.files.index_file.is_empty()
            || index.components().count() != 1
            || index.file_name().is_none()
        {
            return Err(config::ConfigError::Message(format!(
                "files.index_file must be a plain file name, got '{}'",
                self.files.index_file
            )));
        }
        if self.server.workers == Some(0) {
            return Err(config::ConfigError::Message(
                "server.workers must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, StartupError> {
        parse_listen_addr(&self.server.listen_addr)
    }
}
