//! [`Quote`] definitions.

use common::Money;
use derive_more::{AsRef, Display, From, Into};
use serde::{Deserialize, Serialize};

use crate::domain::{account, session};

/// Priced estimate of a prospective parking session.
///
/// Required before submitting a [`session::Request`].
#[derive(Clone, Debug, Deserialize, Display, Eq, PartialEq)]
#[display("`Quote(id: {id})` for {cost}")]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// ID of this [`Quote`].
    #[serde(rename = "quoteId")]
    pub id: Id,

    /// Total cost of the session this [`Quote`] is made for.
    #[serde(rename = "totalCost")]
    pub cost: Money,
}

impl Quote {
    /// Indicates whether the quoted session costs nothing.
    #[must_use]
    pub fn is_free(&self) -> bool {
        self.cost.is_zero()
    }
}

/// ID of a [`Quote`].
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[as_ref(str)]
pub struct Id(#[serde(deserialize_with = "super::string_or_number")] String);

/// Request for a [`Quote`].
#[derive(Clone, Debug)]
pub struct Request {
    /// ID of the account the session would be billed to.
    pub account_id: account::Id,

    /// What the session would be taken for.
    pub target: session::Target,

    /// How long the session would last.
    pub duration: session::Duration,
}
