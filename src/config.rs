//! Command line and environment configuration
//!
//! The tool keeps the original command line: flags may appear anywhere,
//! the first other argument is the metadata source and the next one is the
//! documentation root. Everything else comes from environment variables.

use std::path::{Path, PathBuf};
use log::LevelFilter;
use crate::constants::{
    APPLEDOCS_FLAG, DEFAULT_APPLEDOCS_DIR, DEFAULT_NOTIFICATION_TYPE, ENV_APPLEDOCS_DIR,
    ENV_DEBUG_TYPE, ENV_LOG_FILE, ENV_LOG_LEVEL, ENV_NOTIFICATION_TYPE, LANGUAGE_DIR, USAGE,
};
use crate::error::{DocFixError, DocFixResult};

/// Everything a documentation run needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub metadata_path: PathBuf,
    /// Root of the documentation tree, the directory holding `en`
    pub docs_root: PathBuf,
    pub merge_external: bool,
    /// Only process this fully-qualified type
    pub only_type: Option<String>,
    pub notification_type: String,
    pub appledocs_dir: PathBuf,
    pub log_level: LevelFilter,
    pub log_file: Option<PathBuf>,
}

impl RunConfig {
    /// `<docs_root>/en`, where the per-namespace directories live
    pub fn language_root(&self) -> PathBuf {
        self.docs_root.join(LANGUAGE_DIR)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Run(RunConfig),
}

/// Parse arguments (without the program name) and environment overrides.
///
/// `env` looks up a variable; empty values count as unset.
pub fn parse_args<F>(args: &[String], env: F) -> DocFixResult<Command>
where
    F: Fn(&str) -> Option<String>,
{
    let mut merge_external = false;
    let mut lib: Option<&str> = None;
    let mut dir: Option<&str> = None;

    for arg in args {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            APPLEDOCS_FLAG => merge_external = true,
            other if lib.is_none() => lib = Some(other),
            other => dir = Some(other),
        }
    }

    let (Some(lib), Some(dir)) = (lib, dir) else {
        return Err(DocFixError::Usage {
            message: USAGE.to_string(),
        });
    };

    let env = |key: &str| env(key).filter(|v| !v.is_empty());
    let docs_root = PathBuf::from(dir);
    let appledocs_dir = env(ENV_APPLEDOCS_DIR)
        .map(PathBuf::from)
        .unwrap_or_else(|| docs_root.join(DEFAULT_APPLEDOCS_DIR));

    Ok(Command::Run(RunConfig {
        metadata_path: PathBuf::from(lib),
        merge_external,
        only_type: env(ENV_DEBUG_TYPE),
        notification_type: env(ENV_NOTIFICATION_TYPE)
            .unwrap_or_else(|| DEFAULT_NOTIFICATION_TYPE.to_string()),
        appledocs_dir,
        log_level: parse_level(env(ENV_LOG_LEVEL).as_deref()),
        log_file: env(ENV_LOG_FILE).map(PathBuf::from),
        docs_root,
    }))
}

/// Log level from its name, `info` when absent or unknown
pub fn parse_level(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|v| v.trim().parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info)
}

/// The documentation root must have an `en` directory directly under it
pub fn check_layout(docs_root: &Path) -> DocFixResult<()> {
    if docs_root.join(LANGUAGE_DIR).is_dir() {
        Ok(())
    } else {
        Err(DocFixError::Layout {
            root: docs_root.to_path_buf(),
        })
    }
}
