//! File logging setup.
//!
//! The terminal belongs to the UI, so log output goes to a file. A
//! `config/log4rs.yaml` in the workspace takes over completely when present;
//! otherwise a single file appender is built from `LogSettings`.

use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use log::LevelFilter;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

use crate::console::config::LogSettings;

pub const LEVEL_ENV: &str = "DEXTER_LOG";
const YAML_CONFIG: &str = "config/log4rs.yaml";
const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} {l:<5} {t} - {m}{n}";

/// Resolves the effective level: `DEXTER_LOG` wins over the settings file.
pub fn resolve_level(settings: &LogSettings, env_value: Option<&str>) -> LevelFilter {
    env_value
        .and_then(|value| LevelFilter::from_str(value.trim()).ok())
        .or_else(|| LevelFilter::from_str(settings.level.trim()).ok())
        .unwrap_or(LevelFilter::Info)
}

/// Resolves the log file path against the workspace root.
pub fn resolve_file(settings: &LogSettings, workspace_root: &Path) -> PathBuf {
    if settings.file.is_absolute() {
        settings.file.clone()
    } else {
        workspace_root.join(&settings.file)
    }
}

/// Installs the global logger. Returns the file being written to, if known.
pub fn init(settings: &LogSettings, workspace_root: &Path) -> Result<Option<PathBuf>> {
    let yaml = workspace_root.join(YAML_CONFIG);
    if yaml.is_file() {
        log4rs::init_file(&yaml, Default::default())
            .with_context(|| format!("Failed to load logging config: {}", yaml.display()))?;
        return Ok(None);
    }

    let level = resolve_level(settings, env::var(LEVEL_ENV).ok().as_deref());
    let path = resolve_file(settings, workspace_root);
    let appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;
    let config = Config::builder()
        .appender(Appender::builder().build("file", Box::new(appender)))
        .build(Root::builder().appender("file").build(level))
        .context("Failed to build logging config")?;
    log4rs::init_config(config).context("Failed to install logger")?;
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, "debug", LevelFilter::Debug)]
    #[case(Some("warn"), "debug", LevelFilter::Warn)]
    #[case(Some("nonsense"), "error", LevelFilter::Error)]
    #[case(None, "also nonsense", LevelFilter::Info)]
    fn level_resolution(
        #[case] env_value: Option<&str>,
        #[case] configured: &str,
        #[case] expected: LevelFilter,
    ) {
        let settings = LogSettings {
            level: configured.to_string(),
            ..LogSettings::default()
        };
        assert_eq!(resolve_level(&settings, env_value), expected);
    }

    #[rstest]
    fn relative_log_file_lands_in_workspace() {
        let settings = LogSettings::default();
        assert_eq!(
            resolve_file(&settings, Path::new("/work")),
            PathBuf::from("/work/dexter.log")
        );
    }
}
