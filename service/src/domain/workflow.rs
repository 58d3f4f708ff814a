//! Definitions of the asynchronous workflow creating a parking session.

use derive_more::{AsRef, Display};
use serde::Deserialize;

/// Handle of a submitted session workflow.
///
/// Path of the workflow status resource, relative to the API root.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str)]
pub struct Handle(String);

impl Handle {
    /// Creates a new [`Handle`] out of the `location` the provider pointed
    /// to, stripping the provided `api_root` from it.
    #[must_use]
    pub fn new(location: &str, api_root: &str) -> Self {
        let api_root = api_root.trim_end_matches('/');
        let path = location.strip_prefix(api_root).unwrap_or(location);
        Self(path.trim_start_matches('/').to_owned())
    }
}

/// Single record of the workflow status feed.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Type discriminator of this [`Event`].
    #[serde(rename = "$type", default)]
    pub kind: String,

    /// Reason of a failure, reported by failure [`Event`]s.
    #[serde(default)]
    pub failure_reason: Option<String>,
}

impl Event {
    /// Part of the [`Event::kind`] of a successfully created session.
    pub const SESSION_CREATED: &'static str = "FreeParkingSessionCreated";

    /// Part of the [`Event::kind`] of a failed session creation.
    pub const START_PARKING_FAILED: &'static str = "StartParkingFailed";

    /// Returns the [`Outcome`] this [`Event`] terminates the workflow with,
    /// if any.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        if self.kind.contains(Self::SESSION_CREATED) {
            Some(Outcome::Created)
        } else if self.kind.contains(Self::START_PARKING_FAILED) {
            Some(Outcome::Failed {
                reason: self.failure_reason.clone(),
            })
        } else {
            None
        }
    }
}

/// Terminal outcome of a session workflow.
#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub enum Outcome {
    /// Session has been created.
    #[display("session created")]
    Created,

    /// Session creation failed.
    #[display(
        "session creation failed: {}",
        reason.as_deref().unwrap_or("unknown reason")
    )]
    Failed {
        /// Reason reported by the provider.
        reason: Option<String>,
    },
}

impl Outcome {
    /// Resolves the [`Outcome`] of a workflow from a single status feed
    /// response.
    ///
    /// A success [`Event`] wins over anything else in the same response.
    /// [`None`] means the workflow is still pending.
    #[must_use]
    pub fn resolve(events: &[Event]) -> Option<Self> {
        let mut failure = None;
        for outcome in events.iter().filter_map(Event::outcome) {
            match outcome {
                Self::Created => return Some(Self::Created),
                Self::Failed { .. } => {
                    _ = failure.get_or_insert(outcome);
                }
            }
        }
        failure
    }
}

#[cfg(test)]
mod tests {
    use super::{Event, Handle, Outcome};

    fn event(kind: &str, reason: Option<&str>) -> Event {
        Event {
            kind: kind.to_owned(),
            failure_reason: reason.map(ToOwned::to_owned),
        }
    }

    #[test]
    fn handle_strips_api_root() {
        let root = "https://consumer.paybyphoneapis.com";

        assert_eq!(
            Handle::new(
                "https://consumer.paybyphoneapis.com/events/workflow/abc",
                root,
            )
            .as_ref(),
            "events/workflow/abc",
        );
        assert_eq!(
            Handle::new("/events/workflow/abc", root).as_ref(),
            "events/workflow/abc",
        );
        assert_eq!(
            Handle::new("events/workflow/abc", "http://127.0.0.1:8080/")
                .as_ref(),
            "events/workflow/abc",
        );
    }

    #[test]
    fn success_wins_over_failure() {
        let events = [
            event("PayByPhone.StartParkingFailed, Events", Some("Nope")),
            event("PayByPhone.FreeParkingSessionCreated, Events", None),
        ];

        assert_eq!(Outcome::resolve(&events), Some(Outcome::Created));
    }

    #[test]
    fn failure_carries_reason() {
        let events = [
            event("PayByPhone.ParkingRequested", None),
            event("PayByPhone.StartParkingFailed", Some("Quota exceeded")),
            event("PayByPhone.StartParkingFailed", Some("Second reason")),
        ];

        assert_eq!(
            Outcome::resolve(&events),
            Some(Outcome::Failed {
                reason: Some("Quota exceeded".to_owned()),
            }),
        );
    }

    #[test]
    fn pending_without_terminal_events() {
        assert_eq!(Outcome::resolve(&[]), None);
        assert_eq!(
            Outcome::resolve(&[
                event("PayByPhone.ParkingRequested", None),
                event("", None),
            ]),
            None,
        );
    }

    #[test]
    fn deserializes_events() {
        let events: Vec<Event> = serde_json::from_value(serde_json::json!([
            {"$type": "PayByPhone.StartParkingFailed", "failureReason": "Bad"},
            {"noType": true},
        ]))
        .unwrap();

        assert_eq!(
            events,
            [
                event("PayByPhone.StartParkingFailed", Some("Bad")),
                event("", None),
            ],
        );
    }
}
