//! [`Ticket`] definitions.

use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, From};
use serde::Deserialize;

#[cfg(doc)]
use common::DateTime;

use crate::domain::{location, RateOption, Vehicle};

/// Parking session (ticket) as reported by the provider.
///
/// Read-only: it's never modified on this side.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// ID of this [`Ticket`].
    #[serde(rename = "parkingSessionId")]
    pub id: Id,

    /// ID of the location this [`Ticket`] is valid in.
    pub location_id: location::Id,

    /// [`DateTime`] when this [`Ticket`] starts.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub start_time: StartDateTime,

    /// [`DateTime`] when this [`Ticket`] expires.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub expire_time: ExpirationDateTime,

    /// [`Vehicle`] this [`Ticket`] is taken for.
    pub vehicle: Vehicle,

    /// [`RateOption`] this [`Ticket`] is billed with.
    pub rate_option: RateOption,
}

/// ID of a [`Ticket`].
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, From, PartialEq)]
#[as_ref(str)]
pub struct Id(#[serde(deserialize_with = "super::string_or_number")] String);

/// [`DateTime`] when a [`Ticket`] starts.
pub type StartDateTime = DateTimeOf<(Ticket, unit::Start)>;

/// [`DateTime`] when a [`Ticket`] expires.
pub type ExpirationDateTime = DateTimeOf<(Ticket, unit::Expiration)>;

#[cfg(test)]
mod tests {
    use common::DateTime;

    use super::Ticket;

    #[test]
    fn deserializes_provider_payload() {
        let ticket: Ticket = serde_json::from_value(serde_json::json!({
            "parkingSessionId": "158925745",
            "locationId": "75017",
            "startTime": "2023-03-16T21:41:52+00:00",
            "expireTime": "2023-03-17T21:41:52+00:00",
            "vehicle": {
                "id": 71_226_511,
                "licensePlate": "AB123CD",
                "type": "Car",
            },
            "rateOption": {"type": "RES"},
            "isExtendable": false,
        }))
        .unwrap();

        assert_eq!(ticket.id.as_ref(), "158925745");
        assert_eq!(ticket.location_id.as_ref(), "75017");
        assert_eq!(
            ticket.start_time,
            DateTime::from_rfc3339("2023-03-16T21:41:52Z")
                .unwrap()
                .coerce(),
        );
        assert_eq!(ticket.vehicle.id.as_ref(), "71226511");
        assert_eq!(ticket.vehicle.license_plate.as_ref(), "AB123CD");
        assert_eq!(ticket.vehicle.kind.as_ref(), "Car");
        assert_eq!(ticket.rate_option.kind.as_ref(), "RES");
    }
}
