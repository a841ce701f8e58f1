use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{IpinfoError, Result};

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 环境变量前缀，例如 `IPINFO__GEOIP__LOCALE=de`
pub const ENV_PREFIX: &str = "IPINFO";

/// Locale identifiers carried by GeoLite2 name tables.
pub const SUPPORTED_LOCALES: [&str; 8] = ["de", "en", "es", "fr", "ja", "pt-BR", "ru", "zh-CN"];

/// 静态配置（从 TOML 加载，启动时使用）
///
/// 包含：
/// - server: 监听地址、端口、worker 数量
/// - geoip: 数据库目录、文件名、语言
/// - logging: 日志配置
/// - metrics: 指标导出路径
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub geoip: GeoIpConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > config.toml > 默认值
    /// ENV 前缀：IPINFO，分隔符：__
    /// 示例：IPINFO__SERVER__PORT=9999
    ///
    /// 加载失败时打印错误并回退到默认值。
    pub fn load(path: Option<&str>) -> Self {
        let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

        match Self::try_load(path) {
            Ok(config) => {
                if Path::new(path).exists() {
                    eprintln!("[INFO] Configuration loaded from: {}", path);
                }
                config
            }
            Err(e) => {
                eprintln!("[ERROR] Failed to load config: {}", e);
                Self::default()
            }
        }
    }

    /// 加载配置，错误向上返回
    pub fn try_load(path: &str) -> Result<Self> {
        use config::{Config, Environment, File};

        let settings = Config::builder()
            // 1. 从 TOML 文件加载（可选）
            .add_source(File::with_name(path).required(false))
            // 2. 从环境变量覆盖
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize::<StaticConfig>()?)
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
}

/// GeoIP 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeoIpConfig {
    /// 存放 .mmdb 文件的目录
    #[serde(default = "default_geoip_directory")]
    pub directory: String,
    /// 城市库文件名（必需）
    #[serde(default = "default_city_file")]
    pub city_file: String,
    /// ASN 库文件名（可选，打不开时只记录警告）
    #[serde(default = "default_asn_file")]
    pub asn_file: String,
    /// 名称使用的语言，例如 "en"、"de"、"zh-CN"
    #[serde(default = "default_locale")]
    pub locale: String,
}

impl GeoIpConfig {
    pub fn city_path(&self) -> PathBuf {
        Path::new(&self.directory).join(&self.city_file)
    }

    pub fn asn_path(&self) -> PathBuf {
        Path::new(&self.directory).join(&self.asn_file)
    }

    /// Whether GeoLite2 ships names for the configured locale
    pub fn is_supported_locale(&self) -> bool {
        SUPPORTED_LOCALES.contains(&self.locale.as_str())
    }

    pub fn validate(&self) -> Result<()> {
        if self.city_file.trim().is_empty() {
            return Err(IpinfoError::config("geoip.city_file must not be empty"));
        }
        if self.locale.trim().is_empty() {
            return Err(IpinfoError::config("geoip.locale must not be empty"));
        }
        Ok(())
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_log_file")]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

/// 指标导出配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_path")]
    pub path: String,
}

// ============================================================
// Default value functions for static config
// ============================================================

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_geoip_directory() -> String {
    ".".to_string()
}

fn default_city_file() -> String {
    "GeoLite2-City.mmdb".to_string()
}

fn default_asn_file() -> String {
    "GeoLite2-ASN.mmdb".to_string()
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_log_file() -> Option<String> {
    None
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
        }
    }
}

impl Default for GeoIpConfig {
    fn default() -> Self {
        Self {
            directory: default_geoip_directory(),
            city_file: default_city_file(),
            asn_file: default_asn_file(),
            locale: default_locale(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: default_log_file(),
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            path: default_metrics_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = StaticConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.geoip.locale, "en");
        assert_eq!(config.geoip.city_file, "GeoLite2-City.mmdb");
        assert_eq!(config.geoip.asn_file, "GeoLite2-ASN.mmdb");
        assert_eq!(config.metrics.path, "/metrics");
    }

    #[test]
    fn test_geoip_paths_join_directory() {
        let geoip = GeoIpConfig {
            directory: "/var/lib/geoip".to_string(),
            ..Default::default()
        };
        assert_eq!(
            geoip.city_path(),
            PathBuf::from("/var/lib/geoip/GeoLite2-City.mmdb")
        );
        assert_eq!(
            geoip.asn_path(),
            PathBuf::from("/var/lib/geoip/GeoLite2-ASN.mmdb")
        );
    }

    #[test]
    fn test_supported_locale() {
        let mut geoip = GeoIpConfig::default();
        assert!(geoip.is_supported_locale());
        geoip.locale = "zh-CN".to_string();
        assert!(geoip.is_supported_locale());
        geoip.locale = "xx".to_string();
        assert!(!geoip.is_supported_locale());
    }

    #[test]
    fn test_validate_rejects_empty_locale() {
        let geoip = GeoIpConfig {
            locale: " ".to_string(),
            ..Default::default()
        };
        assert!(geoip.validate().is_err());
        assert!(GeoIpConfig::default().validate().is_ok());
    }

    #[test]
    fn test_try_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ipinfo.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[server]\nport = 9999\n\n[geoip]\ndirectory = \"/data\"\nlocale = \"de\""
        )
        .unwrap();

        let config = StaticConfig::try_load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.server.port, 9999);
        assert_eq!(config.geoip.directory, "/data");
        assert_eq!(config.geoip.locale, "de");
        // 未写的字段保持默认值
        assert_eq!(config.geoip.city_file, "GeoLite2-City.mmdb");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_sample_config_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = StaticConfig::default();
        config.geoip.locale = "fr".to_string();
        config.save_to_file(&path).unwrap();

        let loaded = StaticConfig::try_load(path.to_str().unwrap()).unwrap();
        assert_eq!(loaded.geoip.locale, "fr");

        let sample = StaticConfig::generate_sample_config();
        assert!(sample.contains("[geoip]"));
        assert!(sample.contains("GeoLite2-City.mmdb"));
    }
}
