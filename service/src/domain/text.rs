//! Text message (SMS) definitions.

use derive_more::{AsRef, Display, From, Into};
use serde::Deserialize;

/// ID of a sent text message.
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, From, Into, PartialEq)]
#[as_ref(str)]
pub struct Id(#[serde(deserialize_with = "super::string_or_number")] String);

/// Phone number a text message is sent to.
#[derive(AsRef, Clone, Debug, Display, Eq, From, Into, PartialEq)]
#[as_ref(str)]
pub struct Number(String);

/// Text message to be sent.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Message {
    /// [`Number`] to send this [`Message`] to.
    pub number: Number,

    /// Content of this [`Message`].
    pub body: String,
}

/// Delivery status of a sent text message, as named by the provider.
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, From, PartialEq)]
#[as_ref(str)]
pub struct Status(String);

impl Status {
    /// [`Status`] of a delivered text message.
    pub const DELIVERED: &'static str = "DELIVERED";

    /// [`Status`] used when nothing has been observed yet.
    pub const UNKNOWN: &'static str = "UNKNOWN";

    /// Returns the [`Status`] used when nothing has been observed yet.
    #[must_use]
    pub fn unknown() -> Self {
        Self(Self::UNKNOWN.to_owned())
    }

    /// Indicates whether this [`Status`] means the message was received.
    #[must_use]
    pub fn is_delivered(&self) -> bool {
        self.0 == Self::DELIVERED
    }
}

/// Number of text messages that still can be sent.
#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, From, Into, PartialEq,
)]
pub struct Quota(i64);

/// Result of waiting for a text message delivery.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Delivery {
    /// Indicator whether the message has been received.
    pub received: bool,

    /// Last observed [`Status`] of the message.
    pub status: Status,
}
