//! GeoIP 查询抽象层
//!
//! 统一的数据库查询接口：
//! 1. 城市库必须能打开，否则启动失败
//! 2. ASN 库打不开时只记录警告，整个进程生命周期内都不查询 ASN

use std::net::IpAddr;
use std::sync::Arc;

use tracing::{info, warn};

use super::maxmind::MaxMindDatabase;
use super::records::{AsnRecord, CityRecord};
use crate::config::GeoIpConfig;
use crate::errors::Result;

/// 城市库查询 trait
pub trait CityLookup: Send + Sync {
    /// 查询 IP 地址所在城市；未收录时返回 `AddressNotFound`
    fn lookup_city(&self, ip: IpAddr) -> Result<CityRecord>;

    /// 获取 provider 名称（用于日志）
    fn name(&self) -> &str;
}

/// ASN 库查询 trait
pub trait AsnLookup: Send + Sync {
    /// 查询 IP 地址所属自治系统；未收录时返回 `AddressNotFound`
    fn lookup_asn(&self, ip: IpAddr) -> Result<AsnRecord>;

    fn name(&self) -> &str;
}

/// 进程级只读数据库句柄
///
/// 启动时创建一次，之后在所有 worker 间共享，不再修改。
#[derive(Clone)]
pub struct GeoIpDatabases {
    city: Arc<dyn CityLookup>,
    asn: Option<Arc<dyn AsnLookup>>,
}

impl GeoIpDatabases {
    pub fn new(city: Arc<dyn CityLookup>, asn: Option<Arc<dyn AsnLookup>>) -> Self {
        Self { city, asn }
    }

    /// 根据 GeoIpConfig 打开数据库
    pub fn open(config: &GeoIpConfig) -> Result<Self> {
        let city_path = config.city_path();
        let city = MaxMindDatabase::open(&city_path)?;
        info!("GeoIP: Using City database at {}", city_path.display());

        let asn_path = config.asn_path();
        let asn: Option<Arc<dyn AsnLookup>> = match MaxMindDatabase::open(&asn_path) {
            Ok(db) => {
                info!("GeoIP: Using ASN database at {}", asn_path.display());
                Some(Arc::new(db))
            }
            Err(e) => {
                warn!(
                    "Unable to open ASN database at {}: {}, lookups will not have ASN or Organization info",
                    asn_path.display(),
                    e
                );
                None
            }
        };

        Ok(Self::new(Arc::new(city), asn))
    }

    pub fn city(&self) -> &dyn CityLookup {
        self.city.as_ref()
    }

    pub fn asn(&self) -> Option<&dyn AsnLookup> {
        self.asn.as_deref()
    }

    pub fn has_asn(&self) -> bool {
        self.asn.is_some()
    }
}

impl std::fmt::Debug for GeoIpDatabases {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeoIpDatabases")
            .field("city", &self.city.name())
            .field("asn", &self.asn.as_ref().map(|a| a.name()))
            .finish()
    }
}
