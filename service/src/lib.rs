//! Service contains the business logic of booking free parking sessions.
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod infra;
pub mod query;
pub mod text;

use common::poll;

#[cfg(doc)]
use infra::{Parking, Texting};

pub use self::{command::Command, query::Query, text::Text};

use crate::domain::{session, text as txt};

/// [`Service`] configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// [`session::Target`] every parking session is taken for.
    pub target: session::Target,

    /// [`poll::Policy`] of waiting for a session workflow to resolve.
    pub workflow: poll::Policy,

    /// [`poll::Policy`] of waiting for a text message to be delivered.
    pub delivery: poll::Policy,
}

/// Domain service.
#[derive(Debug)]
pub struct Service<P, T> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Parking`] provider of this [`Service`].
    parking: P,

    /// [`Texting`] provider of this [`Service`].
    texting: T,
}

impl<P, T> Service<P, T> {
    /// Creates a new [`Service`] with the provided parameters.
    #[must_use]
    pub fn new(config: Config, parking: P, texting: T) -> Self {
        Self {
            config,
            parking,
            texting,
        }
    }

    /// Returns [`Config`] of this [`Service`].
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Parking`] provider of this [`Service`].
    #[must_use]
    pub fn parking(&self) -> &P {
        &self.parking
    }

    /// Returns mutable [`Parking`] provider of this [`Service`].
    #[must_use]
    pub fn parking_mut(&mut self) -> &mut P {
        &mut self.parking
    }

    /// Returns [`Texting`] provider of this [`Service`].
    #[must_use]
    pub fn texting(&self) -> &T {
        &self.texting
    }

    /// Returns a [`Text`] handle of the sent text message with the provided
    /// ID.
    #[must_use]
    pub fn text(&self, id: txt::Id) -> Text<'_, P, T> {
        Text::new(id, self)
    }
}
