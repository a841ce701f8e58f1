//! Owned lookup records
//!
//! maxminddb hands out records borrowing from the reader buffer; these
//! owned copies decouple the lookup pipeline from the database backend.

use std::collections::BTreeMap;

use maxminddb::geoip2;

/// Locale identifier → display name, e.g. `"de" → "Kalifornien"`
pub type LocalizedNames = BTreeMap<String, String>;

/// A coded geographic entity (country or continent)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Place {
    pub code: Option<String>,
    pub names: LocalizedNames,
}

/// 城市库查询结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CityRecord {
    pub city: LocalizedNames,
    /// 行政区划，从大到小排列
    pub subdivisions: Vec<LocalizedNames>,
    pub country: Place,
    pub continent: Place,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub postal: Option<String>,
}

/// ASN 库查询结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AsnRecord {
    pub number: Option<u32>,
    pub organization: Option<String>,
}

/// Flatten the fixed GeoLite2 name table into a locale-keyed map
pub fn localized_names(names: &geoip2::Names<'_>) -> LocalizedNames {
    [
        ("de", names.german),
        ("en", names.english),
        ("es", names.spanish),
        ("fr", names.french),
        ("ja", names.japanese),
        ("pt-BR", names.brazilian_portuguese),
        ("ru", names.russian),
        ("zh-CN", names.simplified_chinese),
    ]
    .into_iter()
    .filter_map(|(locale, name)| name.map(|n| (locale.to_string(), n.to_string())))
    .collect()
}

impl From<&geoip2::City<'_>> for CityRecord {
    fn from(city: &geoip2::City<'_>) -> Self {
        Self {
            city: localized_names(&city.city.names),
            subdivisions: city
                .subdivisions
                .iter()
                .map(|s| localized_names(&s.names))
                .collect(),
            country: Place {
                code: city.country.iso_code.map(String::from),
                names: localized_names(&city.country.names),
            },
            continent: Place {
                code: city.continent.code.map(String::from),
                names: localized_names(&city.continent.names),
            },
            latitude: city.location.latitude,
            longitude: city.location.longitude,
            postal: city.postal.code.map(String::from),
        }
    }
}

impl From<&geoip2::Asn<'_>> for AsnRecord {
    fn from(asn: &geoip2::Asn<'_>) -> Self {
        Self {
            number: asn.autonomous_system_number,
            organization: asn.autonomous_system_organization.map(String::from),
        }
    }
}
