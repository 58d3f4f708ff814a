//! [`Query`] collection related to the parking account.

use common::operations::By;

use crate::domain::account;
#[cfg(doc)]
use crate::Query;

use super::ParkingQuery;

/// Queries the ID of the user's (single) parking account.
///
/// Resolved once and memoized by the [`Parking`] provider.
///
/// [`Parking`]: crate::infra::Parking
pub type Id = ParkingQuery<By<account::Id, ()>>;
