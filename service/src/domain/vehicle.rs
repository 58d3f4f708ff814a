//! [`Vehicle`] definitions.

use derive_more::{AsRef, Display, From, Into};
use serde::{Deserialize, Serialize};

/// Vehicle a parking session is taken for.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    /// ID of this [`Vehicle`].
    pub id: Id,

    /// [`LicensePlate`] of this [`Vehicle`].
    pub license_plate: LicensePlate,

    /// [`Kind`] of this [`Vehicle`].
    #[serde(rename = "type")]
    pub kind: Kind,
}

/// ID of a [`Vehicle`].
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, From, PartialEq)]
#[as_ref(str)]
pub struct Id(#[serde(deserialize_with = "super::string_or_number")] String);

/// License plate number of a [`Vehicle`].
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
pub struct LicensePlate(String);

/// Kind of a [`Vehicle`] (`Car`, `Motorcycle`, etc.).
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, From, PartialEq)]
#[as_ref(str)]
pub struct Kind(String);
