//! Parking session request definitions.

use std::num::NonZeroU32;

use crate::domain::{account, location, quote, rate_option, ticket, vehicle};

/// What parking sessions are taken for.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Target {
    /// [`vehicle::LicensePlate`] of the parked vehicle.
    pub license_plate: vehicle::LicensePlate,

    /// ID of the location to park in.
    pub location_id: location::Id,

    /// ID of the rate option to park with.
    pub rate_option_id: rate_option::Id,
}

/// Duration of a parking session, in days.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Duration {
    /// Number of days.
    pub days: NonZeroU32,
}

impl Duration {
    /// Creates a new [`Duration`] of the provided number of `days`.
    #[must_use]
    pub const fn days(days: NonZeroU32) -> Self {
        Self { days }
    }
}

/// Request for creating a new parking session.
///
/// Built right before submission and never changed afterwards.
#[derive(Clone, Debug)]
pub struct Request {
    /// What the session is taken for.
    pub target: Target,

    /// How long the session lasts.
    pub duration: Duration,

    /// When the session starts.
    pub start_time: ticket::StartDateTime,

    /// ID of the [`Quote`] obtained for this session.
    ///
    /// [`Quote`]: crate::domain::Quote
    pub quote_id: quote::Id,

    /// ID of the account the session is billed to.
    pub account_id: account::Id,
}
