//! [`Money`]-related definitions.

use std::fmt;

use derive_more::{AsRef, Display, From};
use rust_decimal::{prelude::ToPrimitive as _, Decimal};

/// Amount of money in some [`Currency`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Money {
    /// Amount of this [`Money`].
    pub amount: Decimal,

    /// [`Currency`] of this amount.
    pub currency: Currency,
}

impl Money {
    /// Indicates whether this [`Money`] amounts to nothing, whatever its
    /// [`Currency`] is.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { amount, currency } = self;
        match amount.is_integer().then(|| amount.to_i128()).flatten() {
            Some(int) => write!(f, "{int}{currency}"),
            None => write!(f, "{amount}{currency}"),
        }
    }
}

/// Currency of a [`Money`] amount, as named by whoever reported it (usually
/// an ISO 4217 code like `EUR`).
#[derive(AsRef, Clone, Debug, Display, Eq, From, PartialEq)]
#[as_ref(str)]
#[cfg_attr(
    feature = "serde",
    derive(::serde::Deserialize, ::serde::Serialize),
    serde(transparent)
)]
pub struct Currency(String);

#[cfg(feature = "serde")]
mod serde {
    //! Module providing integration with [`serde`] crate.

    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::{Currency, Money};

    /// Wire shape of [`Money`]: `{"amount": 0, "currency": "EUR"}`.
    #[derive(Deserialize, Serialize)]
    struct Repr {
        amount: Decimal,
        currency: Currency,
    }

    impl Serialize for Money {
        fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
            Repr {
                amount: self.amount,
                currency: self.currency.clone(),
            }
            .serialize(s)
        }
    }

    impl<'de> Deserialize<'de> for Money {
        fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
            let Repr { amount, currency } = Repr::deserialize(d)?;
            Ok(Self { amount, currency })
        }
    }
}
