#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! City and crime-type catalogs for the crime rate predictor.
//!
//! The integer code of every catalog entry is fed directly to the trained
//! regression model, so variant order and discriminants are fixed. Names
//! are matched exactly (case-sensitive) against the display strings.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString, IntoStaticStr};

/// Year the base population table was recorded in.
pub const REFERENCE_YEAR: i32 = 2011;

/// Years offered to interactive callers. The engine itself accepts any year.
pub const YEAR_OPTIONS: RangeInclusive<i32> = 2000..=2050;

/// Errors returned by catalog lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReferenceError {
    /// No city has this display name.
    #[error("Unknown city: '{name}'")]
    UnknownCity {
        /// The name that failed to resolve.
        name: String,
    },

    /// No crime type has this display name.
    #[error("Unknown crime type: '{name}'")]
    UnknownCrimeType {
        /// The name that failed to resolve.
        name: String,
    },

    /// City code outside `0..=18`.
    #[error("Unknown city code: {code}")]
    UnknownCityCode {
        /// The out-of-range code.
        code: u8,
    },

    /// Crime type code outside `0..=9`.
    #[error("Unknown crime type code: {code}")]
    UnknownCrimeTypeCode {
        /// The out-of-range code.
        code: u8,
    },
}

/// Metropolitan cities covered by the trained model.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum City {
    #[strum(to_string = "Ahmedabad")]
    Ahmedabad = 0,
    #[strum(to_string = "Bengaluru")]
    Bengaluru = 1,
    #[strum(to_string = "Chennai")]
    Chennai = 2,
    #[strum(to_string = "Coimbatore")]
    Coimbatore = 3,
    #[strum(to_string = "Delhi")]
    Delhi = 4,
    #[strum(to_string = "Ghaziabad")]
    Ghaziabad = 5,
    #[strum(to_string = "Hyderabad")]
    Hyderabad = 6,
    #[strum(to_string = "Indore")]
    Indore = 7,
    #[strum(to_string = "Jaipur")]
    Jaipur = 8,
    #[strum(to_string = "Kanpur")]
    Kanpur = 9,
    #[strum(to_string = "Kochi")]
    Kochi = 10,
    #[strum(to_string = "Kolkata")]
    Kolkata = 11,
    #[strum(to_string = "Kozhikode")]
    Kozhikode = 12,
    #[strum(to_string = "Lucknow")]
    Lucknow = 13,
    #[strum(to_string = "Mumbai")]
    Mumbai = 14,
    #[strum(to_string = "Nagpur")]
    Nagpur = 15,
    #[strum(to_string = "Patna")]
    Patna = 16,
    #[strum(to_string = "Pune")]
    Pune = 17,
    #[strum(to_string = "Surat")]
    Surat = 18,
}

impl City {
    /// Returns the model input code for this city.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Looks up a city by its model input code.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::UnknownCityCode`] if `code` is not in the
    /// catalog.
    pub fn from_code(code: u8) -> Result<Self, ReferenceError> {
        Self::all()
            .get(usize::from(code))
            .copied()
            .ok_or(ReferenceError::UnknownCityCode { code })
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Returns the 2011 population in lakhs.
    #[must_use]
    pub const fn base_population_lakhs(self) -> f64 {
        match self {
            Self::Ahmedabad => 63.50,
            Self::Bengaluru => 85.00,
            Self::Chennai => 87.00,
            Self::Coimbatore => 21.50,
            Self::Delhi => 163.10,
            Self::Ghaziabad => 23.60,
            Self::Hyderabad => 77.50,
            Self::Indore => 21.70,
            Self::Jaipur => 30.70,
            Self::Kanpur => 29.20,
            Self::Kochi => 21.20,
            Self::Kolkata => 141.10,
            Self::Kozhikode => 20.30,
            Self::Lucknow => 29.00,
            Self::Mumbai => 184.10,
            Self::Nagpur => 25.00,
            Self::Patna => 20.50,
            Self::Pune => 50.50,
            Self::Surat => 45.80,
        }
    }

    /// Returns all variants in code order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Ahmedabad,
            Self::Bengaluru,
            Self::Chennai,
            Self::Coimbatore,
            Self::Delhi,
            Self::Ghaziabad,
            Self::Hyderabad,
            Self::Indore,
            Self::Jaipur,
            Self::Kanpur,
            Self::Kochi,
            Self::Kolkata,
            Self::Kozhikode,
            Self::Lucknow,
            Self::Mumbai,
            Self::Nagpur,
            Self::Patna,
            Self::Pune,
            Self::Surat,
        ]
    }
}

/// Crime categories the model was trained on.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum CrimeType {
    #[strum(to_string = "Crime Committed by Juveniles")]
    CommittedByJuveniles = 0,
    #[strum(to_string = "Crime against SC")]
    AgainstScheduledCastes = 1,
    #[strum(to_string = "Crime against ST")]
    AgainstScheduledTribes = 2,
    #[strum(to_string = "Crime against Senior Citizen")]
    AgainstSeniorCitizens = 3,
    #[strum(to_string = "Crime against children")]
    AgainstChildren = 4,
    #[strum(to_string = "Crime against women")]
    AgainstWomen = 5,
    #[strum(to_string = "Cyber Crimes")]
    CyberCrimes = 6,
    #[strum(to_string = "Economic Offences")]
    EconomicOffences = 7,
    #[strum(to_string = "Kidnapping")]
    Kidnapping = 8,
    #[strum(to_string = "Murder")]
    Murder = 9,
}

impl CrimeType {
    /// Returns the model input code for this crime type.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Looks up a crime type by its model input code.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::UnknownCrimeTypeCode`] if `code` is not in
    /// the catalog.
    pub fn from_code(code: u8) -> Result<Self, ReferenceError> {
        Self::all()
            .get(usize::from(code))
            .copied()
            .ok_or(ReferenceError::UnknownCrimeTypeCode { code })
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Returns all variants in code order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::CommittedByJuveniles,
            Self::AgainstScheduledCastes,
            Self::AgainstScheduledTribes,
            Self::AgainstSeniorCitizens,
            Self::AgainstChildren,
            Self::AgainstWomen,
            Self::CyberCrimes,
            Self::EconomicOffences,
            Self::Kidnapping,
            Self::Murder,
        ]
    }
}

/// Resolves a city display name to its code.
///
/// # Errors
///
/// Returns [`ReferenceError::UnknownCity`] if no city has exactly this name.
pub fn resolve_city(name: &str) -> Result<u8, ReferenceError> {
    name.parse::<City>()
        .map(City::code)
        .map_err(|_| ReferenceError::UnknownCity {
            name: name.to_string(),
        })
}

/// Resolves a crime type display name to its code.
///
/// # Errors
///
/// Returns [`ReferenceError::UnknownCrimeType`] if no crime type has exactly
/// this name.
pub fn resolve_crime_type(name: &str) -> Result<u8, ReferenceError> {
    name.parse::<CrimeType>()
        .map(CrimeType::code)
        .map_err(|_| ReferenceError::UnknownCrimeType {
            name: name.to_string(),
        })
}

/// Returns the 2011 population (lakhs) of the city with the given code.
///
/// # Errors
///
/// Returns [`ReferenceError::UnknownCityCode`] if the code is out of range.
pub fn base_population(city_code: u8) -> Result<f64, ReferenceError> {
    City::from_code(city_code).map(City::base_population_lakhs)
}

/// Returns the display name of the city with the given code.
///
/// # Errors
///
/// Returns [`ReferenceError::UnknownCityCode`] if the code is out of range.
pub fn city_name(code: u8) -> Result<&'static str, ReferenceError> {
    City::from_code(code).map(City::name)
}

/// Returns the display name of the crime type with the given code.
///
/// # Errors
///
/// Returns [`ReferenceError::UnknownCrimeTypeCode`] if the code is out of
/// range.
pub fn crime_type_name(code: u8) -> Result<&'static str, ReferenceError> {
    CrimeType::from_code(code).map(CrimeType::name)
}

/// A catalog row as listed to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    /// Model input code.
    pub code: u8,
    /// Display name.
    pub name: String,
    /// 2011 population in lakhs, cities only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_population_lakhs: Option<f64>,
}

impl From<City> for CatalogEntry {
    fn from(city: City) -> Self {
        Self {
            code: city.code(),
            name: city.name().to_string(),
            base_population_lakhs: Some(city.base_population_lakhs()),
        }
    }
}

impl From<CrimeType> for CatalogEntry {
    fn from(crime_type: CrimeType) -> Self {
        Self {
            code: crime_type.code(),
            name: crime_type.name().to_string(),
            base_population_lakhs: None,
        }
    }
}

/// Returns the city catalog in code order.
#[must_use]
pub fn city_catalog() -> Vec<CatalogEntry> {
    City::all().iter().copied().map(CatalogEntry::from).collect()
}

/// Returns the crime-type catalog in code order.
#[must_use]
pub fn crime_type_catalog() -> Vec<CatalogEntry> {
    CrimeType::all()
        .iter()
        .copied()
        .map(CatalogEntry::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_codes_match_positions() {
        assert_eq!(City::all().len(), 19);
        for (idx, city) in City::all().iter().enumerate() {
            assert_eq!(usize::from(city.code()), idx, "{city:?} out of position");
        }
    }

    #[test]
    fn crime_type_codes_match_positions() {
        assert_eq!(CrimeType::all().len(), 10);
        for (idx, crime_type) in CrimeType::all().iter().enumerate() {
            assert_eq!(usize::from(crime_type.code()), idx);
        }
    }

    #[test]
    fn resolves_every_catalog_name() {
        for city in City::all() {
            assert_eq!(resolve_city(city.name()).unwrap(), city.code());
            assert_eq!(city_name(city.code()).unwrap(), city.name());
        }
        for crime_type in CrimeType::all() {
            assert_eq!(
                resolve_crime_type(crime_type.name()).unwrap(),
                crime_type.code()
            );
            assert_eq!(crime_type_name(crime_type.code()).unwrap(), crime_type.name());
        }
    }

    #[test]
    fn display_names_are_verbatim() {
        assert_eq!(City::Ahmedabad.to_string(), "Ahmedabad");
        assert_eq!(city_name(18).unwrap(), "Surat");
        assert_eq!(crime_type_name(0).unwrap(), "Crime Committed by Juveniles");
        assert_eq!(crime_type_name(1).unwrap(), "Crime against SC");
        assert_eq!(crime_type_name(4).unwrap(), "Crime against children");
        assert_eq!(crime_type_name(9).unwrap(), "Murder");
    }

    #[test]
    fn lookups_are_case_sensitive() {
        assert_eq!(
            resolve_city("mumbai"),
            Err(ReferenceError::UnknownCity {
                name: "mumbai".to_string()
            })
        );
        assert!(resolve_crime_type("murder").is_err());
        assert!(resolve_city(" Mumbai").is_err());
        assert!(resolve_city("").is_err());
    }

    #[test]
    fn base_population_table() {
        assert!((base_population(0).unwrap() - 63.50).abs() < f64::EPSILON);
        assert!((base_population(4).unwrap() - 163.10).abs() < f64::EPSILON);
        assert!((base_population(14).unwrap() - 184.10).abs() < f64::EPSILON);
        assert!((base_population(18).unwrap() - 45.80).abs() < f64::EPSILON);
    }

    #[test]
    fn out_of_range_codes_fail() {
        assert_eq!(
            base_population(19),
            Err(ReferenceError::UnknownCityCode { code: 19 })
        );
        assert_eq!(
            crime_type_name(10),
            Err(ReferenceError::UnknownCrimeTypeCode { code: 10 })
        );
        assert!(city_name(u8::MAX).is_err());
    }

    #[test]
    fn catalog_entries_serialize_camel_case() {
        let json = serde_json::to_value(CatalogEntry::from(City::Pune)).unwrap();
        assert_eq!(json["code"], 17);
        assert_eq!(json["name"], "Pune");
        assert!(json.get("basePopulationLakhs").is_some());

        let json = serde_json::to_value(CatalogEntry::from(CrimeType::Kidnapping)).unwrap();
        assert!(json.get("basePopulationLakhs").is_none());
    }
}
