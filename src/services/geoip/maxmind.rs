//! MaxMind GeoLite2 数据库实现
//!
//! 同一个类型同时服务城市库与 ASN 库，按调用的 trait 解码对应记录。

use std::net::IpAddr;
use std::path::Path;
use std::sync::Arc;

use maxminddb::{Reader, geoip2};
use tracing::trace;

use super::provider::{AsnLookup, CityLookup};
use super::records::{AsnRecord, CityRecord};
use crate::errors::{IpinfoError, Result};

/// MaxMind 数据库句柄（Reader 为 Send + Sync，可并发只读）
pub struct MaxMindDatabase {
    reader: Arc<Reader<Vec<u8>>>,
    name: String,
}

impl MaxMindDatabase {
    /// 从文件路径打开数据库
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = Reader::open_readfile(path).map_err(|e| {
            IpinfoError::database_open(format!("{}: {}", path.display(), e))
        })?;

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("maxmind")
            .to_string();

        trace!(
            "Opened {} ({})",
            name, reader.metadata.database_type
        );

        Ok(Self {
            reader: Arc::new(reader),
            name,
        })
    }

    fn not_found(&self, ip: IpAddr) -> IpinfoError {
        IpinfoError::address_not_found(format!("{} not found in {}", ip, self.name))
    }
}

impl CityLookup for MaxMindDatabase {
    fn lookup_city(&self, ip: IpAddr) -> Result<CityRecord> {
        let result = self.reader.lookup(ip)?;
        let city: geoip2::City = result.decode()?.ok_or_else(|| self.not_found(ip))?;

        Ok(CityRecord::from(&city))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl AsnLookup for MaxMindDatabase {
    fn lookup_asn(&self, ip: IpAddr) -> Result<AsnRecord> {
        let result = self.reader.lookup(ip)?;
        let asn: geoip2::Asn = result.decode()?.ok_or_else(|| self.not_found(ip))?;

        Ok(AsnRecord::from(&asn))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
