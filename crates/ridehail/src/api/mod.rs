//! Resource operations and their payloads.
//!
//! Each operation is a method on [`Client`](crate::Client) that names its
//! path, its success status and its success shape; the request layer does
//! the rest.

mod bookings;
mod quotes;
mod webhooks;

pub use bookings::{
    Agent, BookedQuote, BookedVehicle, BookingDetails, BookingRequest, CancelReason, CancelledBy,
    Driver, Fare, FareComponent, FleetInfo, Luggage, MeetingPoint, PassengerDetails, Passengers,
    Place, Position, VehicleAttributes,
};
pub use quotes::{
    Availability, AvailableVehicles, Fleet, FleetRating, Geolocation, NetPrice, Qta, Quote,
    QuotePrice, QuoteSearch, QuoteVehicle, QuotesList,
};
pub use webhooks::{WebhookRegistration, WebhookSubscription};
