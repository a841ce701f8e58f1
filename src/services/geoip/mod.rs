//! GeoIP 数据库模块
//!
//! 提供 IP 地址地理位置与 ASN 查询功能：
//! - 城市库（必需）：GeoLite2-City.mmdb
//! - ASN 库（可选）：GeoLite2-ASN.mmdb

mod maxmind;
mod provider;
mod records;

pub use maxmind::MaxMindDatabase;
pub use provider::{AsnLookup, CityLookup, GeoIpDatabases};
pub use records::{AsnRecord, CityRecord, LocalizedNames, Place};
