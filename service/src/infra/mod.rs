//! Infrastructure layer.

pub mod parking;
pub mod texting;

pub use self::{
    parking::{Parking, PayByPhone},
    texting::{Textbelt, Texting},
};
