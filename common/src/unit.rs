//! Markers distinguishing [`DateTimeOf`]s of the same owner.
//!
//! [`DateTimeOf`]: crate::DateTimeOf

/// Marker of the moment something begins.
#[derive(Clone, Copy, Debug)]
pub struct Start;

/// Marker of the moment something ends.
#[derive(Clone, Copy, Debug)]
pub struct Expiration;
