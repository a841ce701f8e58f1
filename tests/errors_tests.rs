use ipinfo::errors::{IpinfoError, Result};
use std::error::Error;

#[cfg(test)]
mod error_creation_tests {
    use super::*;

    #[test]
    fn test_database_open_error() {
        let error = IpinfoError::database_open("/data/GeoLite2-City.mmdb: 没有那个文件");

        assert!(matches!(error, IpinfoError::DatabaseOpen(_)));
        assert_eq!(error.code(), "E001");
        assert!(error.to_string().contains("Database Open Error"));
        assert!(error.to_string().contains("GeoLite2-City.mmdb"));
    }

    #[test]
    fn test_database_lookup_error() {
        let error = IpinfoError::database_lookup("invalid node");

        assert!(matches!(error, IpinfoError::DatabaseLookup(_)));
        assert_eq!(error.code(), "E002");
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_address_not_found_error() {
        let error = IpinfoError::address_not_found("10.0.0.1");

        assert!(error.is_not_found());
        assert_eq!(error.code(), "E003");
        assert_eq!(error.message(), "10.0.0.1");
    }

    #[test]
    fn test_codes_are_distinct() {
        let errors = [
            IpinfoError::database_open(""),
            IpinfoError::database_lookup(""),
            IpinfoError::address_not_found(""),
            IpinfoError::config(""),
            IpinfoError::file_operation(""),
            IpinfoError::serialization(""),
        ];
        let mut codes: Vec<_> = errors.iter().map(|e| e.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }
}

#[cfg(test)]
mod error_conversion_tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "文件未找到");
        let error: IpinfoError = io_error.into();

        assert!(matches!(error, IpinfoError::FileOperation(_)));
        assert!(error.to_string().contains("文件未找到"));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        // 创建一个无效的 JSON 来触发错误
        let json_error = serde_json::from_str::<serde_json::Value>("{invalid json").unwrap_err();
        let error: IpinfoError = json_error.into();

        assert!(matches!(error, IpinfoError::Serialization(_)));
    }

    #[test]
    fn test_config_error_conversion() {
        let config_error = config::ConfigError::Message("bad value".to_string());
        let error: IpinfoError = config_error.into();

        assert!(matches!(error, IpinfoError::Config(_)));
        assert!(error.message().contains("bad value"));
    }
}

#[cfg(test)]
mod error_format_tests {
    use super::*;

    #[test]
    fn test_format_simple() {
        let error = IpinfoError::config("geoip.locale must not be empty");
        assert_eq!(
            error.format_simple(),
            "Configuration Error: geoip.locale must not be empty"
        );
    }

    #[test]
    fn test_format_colored_contains_code() {
        let error = IpinfoError::file_operation("permission denied");
        let output = error.format_colored();

        assert!(output.contains("E005"));
        assert!(output.contains("permission denied"));
    }

    #[test]
    fn test_error_trait_implementation() {
        let error = IpinfoError::serialization("测试错误");

        let error_trait: &dyn Error = &error;
        assert!(!error_trait.to_string().is_empty());
        assert!(error_trait.source().is_none());
    }

    #[test]
    fn test_send_sync_traits() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<IpinfoError>();
        assert_sync::<IpinfoError>();
    }

    #[test]
    fn test_result_propagation() {
        fn open() -> Result<u32> {
            Err(IpinfoError::database_open("missing"))
        }

        fn start() -> Result<u32> {
            let value = open()?;
            Ok(value + 1)
        }

        assert!(matches!(start(), Err(IpinfoError::DatabaseOpen(_))));
    }
}
