use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(OfferId);
id_newtype!(CommentId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CityName {
    Paris,
    Cologne,
    Brussels,
    Amsterdam,
    Hamburg,
    Dusseldorf,
}

/// Cities in the order they are offered for browsing. The first entry is the
/// default active city.
pub const CITIES: [CityName; 6] = [
    CityName::Paris,
    CityName::Cologne,
    CityName::Brussels,
    CityName::Amsterdam,
    CityName::Hamburg,
    CityName::Dusseldorf,
];

impl CityName {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Paris => "Paris",
            Self::Cologne => "Cologne",
            Self::Brussels => "Brussels",
            Self::Amsterdam => "Amsterdam",
            Self::Hamburg => "Hamburg",
            Self::Dusseldorf => "Dusseldorf",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        CITIES
            .into_iter()
            .find(|city| city.as_str().eq_ignore_ascii_case(raw.trim()))
    }
}

impl fmt::Display for CityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub zoom: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: CityName,
    pub location: Location,
}

const DEFAULT_CITY_ZOOM: u8 = 13;

impl City {
    /// Map centre used when a city is selected before any of its offers are known.
    pub fn default_for(name: CityName) -> Self {
        let (latitude, longitude) = match name {
            CityName::Paris => (48.85661, 2.351499),
            CityName::Cologne => (50.938361, 6.959974),
            CityName::Brussels => (50.846557, 4.351697),
            CityName::Amsterdam => (52.37454, 4.897976),
            CityName::Hamburg => (53.550341, 10.000654),
            CityName::Dusseldorf => (51.225402, 6.776314),
        };
        Self {
            name,
            location: Location {
                latitude,
                longitude,
                zoom: DEFAULT_CITY_ZOOM,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Host {
    pub name: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub is_pro: bool,
}

/// A rentable listing. Detail-only fields decode to empty defaults when the
/// payload comes from a list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: OfferId,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub price: f64,
    pub rating: f64,
    pub is_premium: bool,
    pub is_favorite: bool,
    pub city: City,
    pub location: Location,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_image: Option<String>,
    #[serde(default)]
    pub bedrooms: u32,
    #[serde(default)]
    pub max_adults: u32,
    #[serde(default)]
    pub goods: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<Host>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentAuthor {
    pub name: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub is_pro: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub date: DateTime<Utc>,
    pub user: CommentAuthor,
    pub comment: String,
    pub rating: u8,
}

/// Map-marker projection of an offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub title: String,
    pub lat: f64,
    pub long: f64,
}

impl From<&Offer> for Point {
    fn from(offer: &Offer) -> Self {
        Self {
            title: offer.title.clone(),
            lat: offer.location.latitude,
            long: offer.location.longitude,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationStatus {
    #[default]
    Unknown,
    NoAuth,
    Auth,
}

impl AuthorizationStatus {
    pub fn is_authorized(self) -> bool {
        self == Self::Auth
    }
}

impl From<bool> for AuthorizationStatus {
    fn from(authorized: bool) -> Self {
        if authorized {
            Self::Auth
        } else {
            Self::NoAuth
        }
    }
}
