//! [`Parking`] provider implementations.

pub mod paybyphone;

use derive_more::{Display, Error as StdError, From};

pub use self::paybyphone::PayByPhone;

/// Operation of a parking provider.
pub use common::Handler as Parking;

/// [`Parking`] provider error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// [`PayByPhone`] error.
    PayByPhone(paybyphone::Error),
}
