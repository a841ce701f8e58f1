//! Lookup response model
//!
//! Field order here is the JSON field order on the wire.

use std::net::IpAddr;

use serde::{Deserialize, Serialize};

use super::geoip::{AsnRecord, CityRecord, LocalizedNames, Place};

/// A code paired with its locale-resolved display name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeName {
    pub code: String,
    pub name: String,
}

/// Geographic coordinates; `0.0, 0.0` doubles as "unknown"
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// 查询结果（每个请求新建，序列化一次后丢弃）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LookupResult {
    pub ip: String,
    pub city: String,
    pub region: String,
    pub country: CodeName,
    pub continent: CodeName,
    pub location: Location,
    pub postal: String,
    pub asn: u32,
    pub organization: String,
}

/// Fields derived from the city dataset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CityFacts {
    pub city: String,
    pub region: String,
    pub country: CodeName,
    pub continent: CodeName,
    pub location: Location,
    pub postal: String,
}

/// Fields derived from the ASN dataset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkFacts {
    pub asn: u32,
    pub organization: String,
}

fn name_for(names: &LocalizedNames, locale: &str) -> String {
    names.get(locale).cloned().unwrap_or_default()
}

fn code_name(place: &Place, locale: &str) -> CodeName {
    CodeName {
        code: place.code.clone().unwrap_or_default(),
        name: name_for(&place.names, locale),
    }
}

impl CityFacts {
    /// Resolve names with `locale`; a locale the record has no name for yields `""`.
    /// Region comes from the first subdivision only.
    pub fn from_record(record: &CityRecord, locale: &str) -> Self {
        Self {
            city: name_for(&record.city, locale),
            region: record
                .subdivisions
                .first()
                .map(|names| name_for(names, locale))
                .unwrap_or_default(),
            country: code_name(&record.country, locale),
            continent: code_name(&record.continent, locale),
            location: Location {
                latitude: record.latitude.unwrap_or_default(),
                longitude: record.longitude.unwrap_or_default(),
            },
            postal: record.postal.clone().unwrap_or_default(),
        }
    }
}

impl From<&AsnRecord> for NetworkFacts {
    fn from(record: &AsnRecord) -> Self {
        Self {
            asn: record.number.unwrap_or_default(),
            organization: record.organization.clone().unwrap_or_default(),
        }
    }
}

impl LookupResult {
    /// Assemble the response; an absent group collapses to zero values.
    pub fn assemble(ip: IpAddr, city: Option<CityFacts>, network: Option<NetworkFacts>) -> Self {
        let city = city.unwrap_or_default();
        let network = network.unwrap_or_default();

        Self {
            ip: ip.to_string(),
            city: city.city,
            region: city.region,
            country: city.country,
            continent: city.continent,
            location: city.location,
            postal: city.postal,
            asn: network.asn,
            organization: network.organization,
        }
    }
}
