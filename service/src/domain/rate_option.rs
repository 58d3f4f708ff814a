//! [`RateOption`] definitions.

use derive_more::{AsRef, Display, From, Into};
use serde::{Deserialize, Serialize};

/// Rate option a parking session is billed with.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct RateOption {
    /// [`Kind`] of this [`RateOption`].
    #[serde(rename = "type")]
    pub kind: Kind,
}

/// ID of a [`RateOption`].
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

/// Kind of a [`RateOption`], as named by the provider.
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, From, PartialEq)]
#[as_ref(str)]
pub struct Kind(String);
