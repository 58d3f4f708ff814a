//! [`Query`] collection related to text messages.

use common::operations::By;

use crate::domain::text;
#[cfg(doc)]
use crate::Query;

use super::TextingQuery;

/// Queries the delivery [`text::Status`] of a sent message by its
/// [`text::Id`].
pub type Status = TextingQuery<By<text::Status, text::Id>>;

/// Queries the remaining [`text::Quota`] of the caller's API key.
pub type Quota = TextingQuery<By<text::Quota, ()>>;
