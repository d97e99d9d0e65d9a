//! Booking creation, lookup and cancellation.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::client::Client;
use crate::clock::Clock;
use crate::error::{Error, InvalidInputError};
use crate::rest::ApiRequest;
use crate::rest::endpoints::{self, BOOKINGS};
use crate::types::{BookingId, QuoteId};

fn is_zero(n: &u32) -> bool {
    *n == 0
}

/// Request body to book a quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingRequest {
    pub quote_id: QuoteId,
    pub passengers: Passengers,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub train_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_trip_id: Option<String>,
}

impl BookingRequest {
    /// Book `quote_id` for a single passenger.
    pub fn new(quote_id: QuoteId, passenger: PassengerDetails, luggage: u32) -> Self {
        Self {
            quote_id,
            passengers: Passengers {
                additional_passengers: 0,
                passenger_details: vec![passenger],
                luggage: Luggage { total: luggage },
            },
            flight_number: None,
            train_number: None,
            comments: None,
            partner_trip_id: None,
        }
    }

    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = Some(comments.into());
        self
    }

    pub fn with_flight_number(mut self, flight: impl Into<String>) -> Self {
        self.flight_number = Some(flight.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Passengers {
    #[serde(
        skip_serializing_if = "is_zero",
        deserialize_with = "crate::de::null_as_default"
    )]
    pub additional_passengers: u32,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub passenger_details: Vec<PassengerDetails>,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub luggage: Luggage,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassengerDetails {
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub first_name: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub last_name: String,
    #[serde(
        skip_serializing_if = "String::is_empty",
        deserialize_with = "crate::de::null_as_default"
    )]
    pub email: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub phone_number: String,
    #[serde(
        skip_serializing_if = "String::is_empty",
        deserialize_with = "crate::de::null_as_default"
    )]
    pub locale: String,
}

impl PassengerDetails {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone_number: phone_number.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Luggage {
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub total: u32,
}

/// Full state of a booking as reported by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingDetails {
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub passengers: Passengers,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub partner_traveller_id: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub state_details: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub origin: Place,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub destination: Place,
    pub date_scheduled: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub quote: BookedQuote,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub fare: Fare,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub external_trip_id: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub display_trip_id: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub fleet_info: FleetInfo,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub vehicle: BookedVehicle,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub partner_trip_id: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub comments: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub flight_number: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub train_number: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub date_booked: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub meeting_point: MeetingPoint,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub agent: Agent,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub cost_center_reference: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub cancelled_by: CancelledBy,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub follow_code: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub meta: BTreeMap<String, serde_json::Value>,
    pub train_time: Option<DateTime<Utc>>,
}

impl BookingDetails {
    /// Identifier to look the booking up or cancel it.
    pub fn booking_id(&self) -> Result<BookingId, Error> {
        BookingId::new(self.id.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Position {
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub latitude: f64,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Place {
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub display_address: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub position: Position,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub place_id: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub poi_type: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub timezone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookedQuote {
    #[serde(
        rename = "type",
        deserialize_with = "crate::de::null_as_default"
    )]
    pub kind: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub total: i64,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub currency: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub gratuity_percent: i64,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub breakdown: Vec<FareComponent>,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub vehicle_class: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub qta_high_minutes: u32,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub qta_low_minutes: u32,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub vehicle_attributes: VehicleAttributes,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub source: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub high_price: i64,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub low_price: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fare {
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub total: i64,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub currency: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub gratuity_percent: i64,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub breakdown: Vec<FareComponent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FareComponent {
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub value: i64,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleAttributes {
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub passenger_capacity: u32,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub luggage_capacity: u32,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub hybrid: bool,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub electric: bool,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub child_seat: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetInfo {
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub fleet_id: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub logo_url: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub phone_number: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub terms_conditions_url: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookedVehicle {
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub vehicle_class: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub vehicle_license_plate: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub driver: Driver,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub attributes: VehicleAttributes,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Driver {
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub first_name: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub last_name: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub phone_number: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub photo_url: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub license_number: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeetingPoint {
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub position: Position,
    #[serde(
        rename = "type",
        deserialize_with = "crate::de::null_as_default"
    )]
    pub kind: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub instructions: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub note: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Agent {
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub user_id: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub user_name: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub organisation_id: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub organisation_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CancelledBy {
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub first_name: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub last_name: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub email: String,
}

/// Why a booking is being cancelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CancelReason {
    #[default]
    OtherUserReason,
    DriverDidntShowUp,
    EtaTooLong,
    DriverIsLate,
    CanNotFindVehicle,
    NotNeededAnymore,
    AskedByDriverToCancel,
    FoundBetterPrice,
    NotClearMeetingInstructions,
    CouldNotContactCarrier,
}

impl CancelReason {
    pub const ALL: [CancelReason; 10] = [
        CancelReason::OtherUserReason,
        CancelReason::DriverDidntShowUp,
        CancelReason::EtaTooLong,
        CancelReason::DriverIsLate,
        CancelReason::CanNotFindVehicle,
        CancelReason::NotNeededAnymore,
        CancelReason::AskedByDriverToCancel,
        CancelReason::FoundBetterPrice,
        CancelReason::NotClearMeetingInstructions,
        CancelReason::CouldNotContactCarrier,
    ];

    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            CancelReason::OtherUserReason => "OTHER_USER_REASON",
            CancelReason::DriverDidntShowUp => "DRIVER_DIDNT_SHOW_UP",
            CancelReason::EtaTooLong => "ETA_TOO_LONG",
            CancelReason::DriverIsLate => "DRIVER_IS_LATE",
            CancelReason::CanNotFindVehicle => "CAN_NOT_FIND_VEHICLE",
            CancelReason::NotNeededAnymore => "NOT_NEEDED_ANYMORE",
            CancelReason::AskedByDriverToCancel => "ASKED_BY_DRIVER_TO_CANCEL",
            CancelReason::FoundBetterPrice => "FOUND_BETTER_PRICE",
            CancelReason::NotClearMeetingInstructions => "NOT_CLEAR_MEETING_INSTRUCTIONS",
            CancelReason::CouldNotContactCarrier => "COULD_NOT_CONTACT_CARRIER",
        }
    }
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CancelReason {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase().replace('-', "_");
        CancelReason::ALL
            .into_iter()
            .find(|reason| reason.as_str() == wanted)
            .ok_or_else(|| {
                InvalidInputError::CancelReason {
                    value: s.to_string(),
                }
                .into()
            })
    }
}

/// Request body for a cancellation.
#[derive(Debug, Serialize)]
struct CancelBookingRequest {
    reason: CancelReason,
}

impl<C: Clock> Client<C> {
    /// Book a previously quoted trip.
    #[instrument(skip(self, request), fields(quote_id = %request.quote_id))]
    pub async fn create_booking(
        &self,
        request: &BookingRequest,
    ) -> Result<BookingDetails, Error> {
        info!("Creating booking");

        let request = ApiRequest::post(self.url(BOOKINGS), StatusCode::CREATED).json(request)?;
        let booking: BookingDetails = self.send_authed(request).await?.into_result()?;

        debug!(id = %booking.id, status = %booking.status, "Booking created");
        Ok(booking)
    }

    /// Fetch the current state of a booking.
    #[instrument(skip(self), fields(%id))]
    pub async fn booking(&self, id: &BookingId) -> Result<BookingDetails, Error> {
        debug!("Getting booking details");

        let request = ApiRequest::get(self.url(&endpoints::booking(id)), StatusCode::OK);
        self.send_authed(request).await?.into_result()
    }

    /// Cancel a booking. The service answers `204 No Content` on success.
    #[instrument(skip(self), fields(%id, %reason))]
    pub async fn cancel_booking(
        &self,
        id: &BookingId,
        reason: CancelReason,
    ) -> Result<(), Error> {
        info!("Cancelling booking");

        let url = self.url(&endpoints::cancel_booking(id));
        let request = ApiRequest::post(url, StatusCode::NO_CONTENT)
            .json(&CancelBookingRequest { reason })?;
        self.send_authed_no_content(request).await?.into_result()
    }
}
