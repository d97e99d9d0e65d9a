//! Subcommand implementations.

pub mod bookings;
pub mod demo;
pub mod quotes;
pub mod token;
pub mod webhooks;
