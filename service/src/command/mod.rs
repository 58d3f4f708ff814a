//! [`Command`] definition.

pub mod reserve_session;
pub mod send_text;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{reserve_session::ReserveSession, send_text::SendText};
