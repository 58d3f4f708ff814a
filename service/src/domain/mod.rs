//! Domain definitions.

pub mod account;
pub mod location;
pub mod quote;
pub mod rate_option;
pub mod session;
pub mod text;
pub mod ticket;
pub mod vehicle;
pub mod workflow;

use serde::{Deserialize, Deserializer};

pub use self::{
    quote::Quote, rate_option::RateOption, ticket::Ticket, vehicle::Vehicle,
};

/// Deserializes an identifier sent either as a JSON string or a JSON number.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        String(String),
        Unsigned(u64),
        Signed(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::String(s) => s,
        Raw::Unsigned(n) => n.to_string(),
        Raw::Signed(n) => n.to_string(),
    })
}
