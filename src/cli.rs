//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for ipinfo using clap's derive macros.

use std::path::Path;

use clap::{Parser, Subcommand};

use crate::config::StaticConfig;
use crate::errors::{IpinfoError, Result};

/// ipinfo - IP address geolocation lookup service
#[derive(Parser, Debug)]
#[command(name = "ipinfo")]
#[command(version)]
#[command(about = "IP address geolocation lookup service", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    /// Directory containing the GeoLite2 .mmdb files
    #[arg(long, short = 'd')]
    pub data_dir: Option<String>,

    /// Locale used for place names (e.g. en, de, zh-CN)
    #[arg(long, short = 'l')]
    pub locale: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate example configuration file
    ///
    /// Prints to stdout when no output path is given.
    GenerateConfig {
        /// Output path
        output: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// 命令行参数覆盖文件/环境变量配置
    pub fn apply_overrides(&self, config: &mut StaticConfig) {
        if let Some(dir) = &self.data_dir {
            config.geoip.directory = dir.clone();
        }
        if let Some(locale) = &self.locale {
            config.geoip.locale = locale.clone();
        }
    }
}

/// Write the sample config to `output`, or return it for stdout when `None`
pub fn generate_config(output: Option<&str>, force: bool) -> Result<Option<String>> {
    let Some(path) = output else {
        return Ok(Some(StaticConfig::generate_sample_config()));
    };

    if Path::new(path).exists() && !force {
        return Err(IpinfoError::file_operation(format!(
            "{} already exists, use --force to overwrite",
            path
        )));
    }

    StaticConfig::default().save_to_file(path)?;
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_server_flags() {
        let cli = Cli::parse_from(["ipinfo", "--data-dir", "/srv/geoip", "--locale", "de"]);
        assert!(cli.command.is_none());

        let mut config = StaticConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.geoip.directory, "/srv/geoip");
        assert_eq!(config.geoip.locale, "de");
    }

    #[test]
    fn test_overrides_keep_unset_fields() {
        let cli = Cli::parse_from(["ipinfo"]);
        let mut config = StaticConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config, StaticConfig::default());
    }

    #[test]
    fn test_parse_generate_config() {
        let cli = Cli::parse_from(["ipinfo", "generate-config", "out.toml", "--force"]);
        match cli.command {
            Some(Commands::GenerateConfig { output, force }) => {
                assert_eq!(output.as_deref(), Some("out.toml"));
                assert!(force);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_generate_config_to_stdout() {
        let sample = generate_config(None, false).unwrap().unwrap();
        assert!(sample.contains("[server]"));
    }

    #[test]
    fn test_generate_config_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let path = path.to_str().unwrap();

        assert!(generate_config(Some(path), false).unwrap().is_none());
        assert!(generate_config(Some(path), false).is_err());
        assert!(generate_config(Some(path), true).is_ok());
    }
}
