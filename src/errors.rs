use std::fmt;

#[derive(Debug, Clone)]
pub enum IpinfoError {
    DatabaseOpen(String),
    DatabaseLookup(String),
    AddressNotFound(String),
    Config(String),
    FileOperation(String),
    Serialization(String),
}

impl IpinfoError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            IpinfoError::DatabaseOpen(_) => "E001",
            IpinfoError::DatabaseLookup(_) => "E002",
            IpinfoError::AddressNotFound(_) => "E003",
            IpinfoError::Config(_) => "E004",
            IpinfoError::FileOperation(_) => "E005",
            IpinfoError::Serialization(_) => "E006",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            IpinfoError::DatabaseOpen(_) => "Database Open Error",
            IpinfoError::DatabaseLookup(_) => "Database Lookup Error",
            IpinfoError::AddressNotFound(_) => "Address Not Found",
            IpinfoError::Config(_) => "Configuration Error",
            IpinfoError::FileOperation(_) => "File Operation Error",
            IpinfoError::Serialization(_) => "Serialization Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            IpinfoError::DatabaseOpen(msg) => msg,
            IpinfoError::DatabaseLookup(msg) => msg,
            IpinfoError::AddressNotFound(msg) => msg,
            IpinfoError::Config(msg) => msg,
            IpinfoError::FileOperation(msg) => msg,
            IpinfoError::Serialization(msg) => msg,
        }
    }

    /// 格式化为彩色输出（用于 Server 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// Misses are expected for private or unrouted ranges
    pub fn is_not_found(&self) -> bool {
        matches!(self, IpinfoError::AddressNotFound(_))
    }
}

impl fmt::Display for IpinfoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for IpinfoError {}

// 便捷的构造函数
impl IpinfoError {
    pub fn database_open<T: Into<String>>(msg: T) -> Self {
        IpinfoError::DatabaseOpen(msg.into())
    }

    pub fn database_lookup<T: Into<String>>(msg: T) -> Self {
        IpinfoError::DatabaseLookup(msg.into())
    }

    pub fn address_not_found<T: Into<String>>(msg: T) -> Self {
        IpinfoError::AddressNotFound(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        IpinfoError::Config(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        IpinfoError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        IpinfoError::Serialization(msg.into())
    }
}

impl From<maxminddb::MaxMindDbError> for IpinfoError {
    fn from(err: maxminddb::MaxMindDbError) -> Self {
        IpinfoError::DatabaseLookup(err.to_string())
    }
}

impl From<std::io::Error> for IpinfoError {
    fn from(err: std::io::Error) -> Self {
        IpinfoError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for IpinfoError {
    fn from(err: serde_json::Error) -> Self {
        IpinfoError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for IpinfoError {
    fn from(err: config::ConfigError) -> Self {
        IpinfoError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for IpinfoError {
    fn from(err: toml::ser::Error) -> Self {
        IpinfoError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, IpinfoError>;
