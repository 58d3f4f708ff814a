//! [`Query`] definition.

pub mod account;
pub mod text;
pub mod ticket;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    infra::{parking, texting, Parking, Texting},
    Service,
};

/// [`Query`] of the [`Service`].
pub use common::Handler as Query;

/// [`Query`] [`Select`]ing a `T`ype from a [`Parking`] provider.
#[derive(Clone, Copy, Debug)]
#[expect(clippy::module_name_repetitions, reason = "more readable")]
pub struct ParkingQuery<T>(T);

impl<W, B> ParkingQuery<By<W, B>> {
    /// Creates a new [`ParkingQuery`] selecting a `W` by the provided `B`.
    #[must_use]
    pub fn by(by: B) -> Self {
        Self(By::new(by))
    }
}

impl<P, T, W, B> Query<ParkingQuery<By<W, B>>> for Service<P, T>
where
    P: Parking<Select<By<W, B>>, Ok = W, Err = Traced<parking::Error>>,
{
    type Ok = W;
    type Err = Traced<parking::Error>;

    async fn execute(
        &self,
        ParkingQuery(by): ParkingQuery<By<W, B>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.parking()
            .execute(Select(by))
            .await
            .map_err(tracerr::wrap!())
    }
}

/// [`Query`] [`Select`]ing a `T`ype from a [`Texting`] provider.
#[derive(Clone, Copy, Debug)]
#[expect(clippy::module_name_repetitions, reason = "more readable")]
pub struct TextingQuery<T>(T);

impl<W, B> TextingQuery<By<W, B>> {
    /// Creates a new [`TextingQuery`] selecting a `W` by the provided `B`.
    #[must_use]
    pub fn by(by: B) -> Self {
        Self(By::new(by))
    }
}

impl<P, T, W, B> Query<TextingQuery<By<W, B>>> for Service<P, T>
where
    T: Texting<Select<By<W, B>>, Ok = W, Err = Traced<texting::Error>>,
{
    type Ok = W;
    type Err = Traced<texting::Error>;

    async fn execute(
        &self,
        TextingQuery(by): TextingQuery<By<W, B>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.texting()
            .execute(Select(by))
            .await
            .map_err(tracerr::wrap!())
    }
}
