//! [`Texting`] provider implementations.

pub mod textbelt;

use derive_more::{Display, Error as StdError, From};

pub use self::textbelt::Textbelt;

/// Operation of a text messaging provider.
pub use common::Handler as Texting;

/// [`Texting`] provider error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// [`Textbelt`] error.
    Textbelt(textbelt::Error),
}
