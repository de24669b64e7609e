//! Runtime configuration merged from command-line flags, an optional RON
//! config file and built-in defaults, in that order of precedence.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use engine_logging::LogDestination;
use explorer_core::ViewSettings;
use explorer_engine::FetchSettings;
use log::LevelFilter;
use serde::Deserialize;

const APP_DIR_NAME: &str = "launch-explorer";
const CONFIG_FILENAME: &str = "config.ron";

#[derive(Debug, Parser)]
#[command(
    name = "launch-explorer",
    version,
    about = "Browse SpaceX launches, filter by mission, and dive into mission details"
)]
pub struct Args {
    /// RON config file (defaults to <config dir>/launch-explorer/config.ron if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Launch query endpoint
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Directory holding persisted favorites
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Launches per page
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Page numbers shown on each side of the current page
    #[arg(long)]
    pub page_radius: Option<usize>,

    /// Quiet interval before search text is applied, in milliseconds
    #[arg(long)]
    pub debounce_ms: Option<u64>,

    /// Where log output goes: file, terminal, both or off
    #[arg(long)]
    pub log: Option<String>,

    /// Log file path when logging to a file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(long, short)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    endpoint: Option<String>,
    data_dir: Option<PathBuf>,
    page_size: Option<usize>,
    page_radius: Option<usize>,
    debounce_ms: Option<u64>,
    request_timeout_secs: Option<u64>,
    log: Option<String>,
    log_file: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("unknown log destination {0:?} (expected file, terminal, both or off)")]
    LogDestination(String),
    #[error("page size must be at least 1")]
    PageSize,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub fetch: FetchSettings,
    pub view: ViewSettings,
    pub data_dir: PathBuf,
    pub log_destination: LogDestination,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
}

impl AppConfig {
    pub fn resolve(args: Args) -> Result<Self, ConfigError> {
        let file = match args.config.clone().or_else(default_config_path) {
            Some(path) => load_file(&path)?,
            None => FileConfig::default(),
        };
        Self::merge(args, file)
    }

    fn merge(args: Args, file: FileConfig) -> Result<Self, ConfigError> {
        let defaults = ViewSettings::default();
        let mut fetch = FetchSettings::default();
        if let Some(endpoint) = args.endpoint.or(file.endpoint) {
            fetch.endpoint = endpoint;
        }
        if let Some(secs) = file.request_timeout_secs {
            fetch.request_timeout = Duration::from_secs(secs);
        }

        let page_size = args
            .page_size
            .or(file.page_size)
            .unwrap_or(defaults.page_size);
        if page_size == 0 {
            return Err(ConfigError::PageSize);
        }
        let view = ViewSettings {
            page_size,
            page_radius: args
                .page_radius
                .or(file.page_radius)
                .unwrap_or(defaults.page_radius),
            search_debounce: args
                .debounce_ms
                .or(file.debounce_ms)
                .map(Duration::from_millis)
                .unwrap_or(defaults.search_debounce),
        };

        let log_destination = match args.log.or(file.log) {
            Some(name) => {
                LogDestination::parse(&name).ok_or(ConfigError::LogDestination(name))?
            }
            None => LogDestination::default(),
        };

        Ok(Self {
            fetch,
            view,
            data_dir: args
                .data_dir
                .or(file.data_dir)
                .unwrap_or_else(default_data_dir),
            log_destination,
            log_file: args
                .log_file
                .or(file.log_file)
                .unwrap_or_else(engine_logging::default_log_path),
            log_level: if args.verbose {
                LevelFilter::Debug
            } else {
                LevelFilter::Info
            },
        })
    }
}

fn load_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILENAME))
        .filter(|path| path.is_file())
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(".launch-explorer"))
}
