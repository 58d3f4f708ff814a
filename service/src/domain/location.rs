//! Parking location definitions.

use derive_more::{AsRef, Display, From, Into};
use serde::{Deserialize, Serialize};

/// ID of a parking location.
///
/// Most of the time, this is a zip code of the parking zone.
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
