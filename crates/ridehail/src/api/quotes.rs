//! Quote search and retrieval.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::client::Client;
use crate::clock::Clock;
use crate::error::Error;
use crate::rest::ApiRequest;
use crate::rest::endpoints::{self, QUOTES};
use crate::types::QuoteListId;

/// A place given by coordinates and a human-readable address.
///
/// Coordinates travel as decimal strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geolocation {
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub latitude: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub longitude: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub display_address: String,
}

impl Geolocation {
    pub fn new(
        latitude: impl Into<String>,
        longitude: impl Into<String>,
        display_address: impl Into<String>,
    ) -> Self {
        Self {
            latitude: latitude.into(),
            longitude: longitude.into(),
            display_address: display_address.into(),
        }
    }
}

/// Request body for a quote search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteSearch {
    pub origin: Geolocation,
    pub destination: Geolocation,
    /// Local pickup time; empty means as soon as possible.
    pub local_time_of_pickup: String,
}

impl QuoteSearch {
    /// Search for an immediate pickup.
    pub fn asap(origin: Geolocation, destination: Geolocation) -> Self {
        Self {
            origin,
            destination,
            local_time_of_pickup: String::new(),
        }
    }

    /// Search for a pickup at a given local time (e.g. `2026-10-20T09:30`).
    pub fn at(origin: Geolocation, destination: Geolocation, pickup: impl Into<String>) -> Self {
        Self {
            origin,
            destination,
            local_time_of_pickup: pickup.into(),
        }
    }
}

/// Quotes returned by a search, plus what the area can currently serve.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotesList {
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub availability: Availability,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub quotes: Vec<Quote>,
    /// `PROGRESSING` while fleets are still answering, `COMPLETED` afterwards.
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub status: String,
    /// Seconds the list stays valid.
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub validity: i64,
}

impl QuotesList {
    /// Identifier to retrieve this list again.
    pub fn list_id(&self) -> Result<QuoteListId, Error> {
        QuoteListId::new(self.id.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Availability {
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub vehicles: AvailableVehicles,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvailableVehicles {
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub classes: Vec<String>,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub types: Vec<String>,
}

/// A single priced offer from a fleet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Quote {
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub price: QuotePrice,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub pick_up_type: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub quote_type: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub source: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub fleet: Fleet,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub vehicle: QuoteVehicle,
}

/// Prices are in minor currency units.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotePrice {
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub currency_code: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub high: i64,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub low: i64,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub net: NetPrice,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetPrice {
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub high: i64,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub low: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fleet {
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub rating: FleetRating,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub logo_url: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub terms_conditions_url: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub phone_number: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub capabilities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetRating {
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub count: i64,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteVehicle {
    /// Estimated time to arrival.
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub qta: Qta,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub class: String,
    #[serde(
        rename = "type",
        deserialize_with = "crate::de::null_as_default"
    )]
    pub kind: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub passenger_capacity: u32,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub luggage_capacity: u32,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Qta {
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub high_minutes: u32,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub low_minutes: u32,
}

impl<C: Clock> Client<C> {
    /// Search quotes between two places.
    #[instrument(
        skip(self, search),
        fields(
            origin = %search.origin.display_address,
            destination = %search.destination.display_address
        )
    )]
    pub async fn search_quotes(&self, search: &QuoteSearch) -> Result<QuotesList, Error> {
        debug!("Searching quotes");

        let request = ApiRequest::post(self.url(QUOTES), StatusCode::CREATED).json(search)?;
        let list: QuotesList = self.send_authed(request).await?.into_result()?;

        debug!(id = %list.id, quotes = list.quotes.len(), "Quote search accepted");
        Ok(list)
    }

    /// Retrieve a quote list produced by an earlier search.
    #[instrument(skip(self), fields(%id))]
    pub async fn quote_list(&self, id: &QuoteListId) -> Result<QuotesList, Error> {
        debug!("Retrieving quote list");

        let request = ApiRequest::get(self.url(&endpoints::quote_list(id)), StatusCode::OK);
        self.send_authed(request).await?.into_result()
    }
}
