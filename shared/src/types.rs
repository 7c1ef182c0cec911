//! Common types used across the platform

use std::fmt;
use std::str::FromStr;

use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Mean earth radius used for great-circle distances
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Supported languages
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
    Mr,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::Hi, Language::Mr];

    /// Catalog code (`en`, `hi`, `mr`)
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Mr => "mr",
        }
    }

    /// Language name handed to the model as the target output language
    pub fn prompt_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "Hindi",
            Language::Mr => "Marathi",
        }
    }

    /// Name shown in the language picker, in the language itself
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "हिन्दी",
            Language::Mr => "मराठी",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported language: {0}")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    /// Accepts codes or English names, case-insensitive; region tags
    /// (`hi-IN`, `mr_IN`) are ignored.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        let primary = normalized.split(['-', '_']).next().unwrap_or("");
        match primary {
            "en" | "english" => Ok(Language::En),
            "hi" | "hindi" => Ok(Language::Hi),
            "mr" | "marathi" => Ok(Language::Mr),
            _ => Err(UnknownLanguage(value.to_string())),
        }
    }
}

/// GPS coordinates in decimal degrees
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Haversine distance in kilometres
    pub fn distance_km(&self, other: &GeoCoordinates) -> f64 {
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();
        let a = (d_lat / 2.0).sin().powi(2)
            + self.latitude.to_radians().cos()
                * other.latitude.to_radians().cos()
                * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }
}

/// Locations with a weather record on the dashboard
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Location {
    #[default]
    Delhi,
    Mumbai,
    Bangalore,
}

impl Location {
    pub const ALL: [Location; 3] = [Location::Delhi, Location::Mumbai, Location::Bangalore];

    pub fn name(&self) -> &'static str {
        match self {
            Location::Delhi => "Delhi",
            Location::Mumbai => "Mumbai",
            Location::Bangalore => "Bangalore",
        }
    }

    pub fn coordinates(&self) -> GeoCoordinates {
        match self {
            Location::Delhi => GeoCoordinates::new(28.7041, 77.1025),
            Location::Mumbai => GeoCoordinates::new(19.0760, 72.8777),
            Location::Bangalore => GeoCoordinates::new(12.9716, 77.5946),
        }
    }

    /// Catalog key of the localized city name
    pub fn city_key(&self) -> &'static str {
        match self {
            Location::Delhi => "weather.cities.delhi",
            Location::Mumbai => "weather.cities.mumbai",
            Location::Bangalore => "weather.cities.bangalore",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown location: {0}")]
pub struct UnknownLocation(pub String);

impl FromStr for Location {
    type Err = UnknownLocation;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Location::ALL
            .into_iter()
            .find(|loc| loc.name().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownLocation(value.to_string()))
    }
}

/// Location whose fixed coordinates are closest to `position`
pub fn nearest_location(position: &GeoCoordinates) -> Location {
    Location::ALL
        .into_iter()
        .map(|loc| (loc, position.distance_km(&loc.coordinates())))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(loc, _)| loc)
        .unwrap_or_default()
}

/// Errors produced while parsing a data URI
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataUriError {
    #[error("data URI must start with 'data:'")]
    MissingScheme,
    #[error("data URI must be base64 encoded")]
    NotBase64,
    #[error("data URI is missing a MIME type")]
    MissingMimeType,
    #[error("data URI payload is empty")]
    EmptyPayload,
    #[error("data URI payload is not valid base64")]
    InvalidPayload,
}

/// A `data:<mime>;base64,<payload>` URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    pub mime_type: String,
    pub data: String,
}

impl DataUri {
    pub fn parse(uri: &str) -> Result<Self, DataUriError> {
        let rest = uri.strip_prefix("data:").ok_or(DataUriError::MissingScheme)?;
        let (header, payload) = rest.split_once(',').ok_or(DataUriError::NotBase64)?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or(DataUriError::NotBase64)?;
        if mime_type.is_empty() {
            return Err(DataUriError::MissingMimeType);
        }
        if payload.is_empty() {
            return Err(DataUriError::EmptyPayload);
        }
        general_purpose::STANDARD
            .decode(payload)
            .map_err(|_| DataUriError::InvalidPayload)?;

        Ok(Self {
            mime_type: mime_type.to_string(),
            data: payload.to_string(),
        })
    }

    /// Encode raw bytes as a data URI
    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.to_string(),
            data: general_purpose::STANDARD.encode(bytes),
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.mime_type, self.data)
    }
}
