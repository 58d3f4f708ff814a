//! [`Query`] collection related to [`Ticket`]s.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{account, Ticket},
    infra::{parking, Parking},
    Service,
};

use super::Query;

/// Queries the [`Ticket`]s currently held by the user's parking account.
#[derive(Clone, Copy, Debug)]
pub struct Current;

impl<P, T> Query<Current> for Service<P, T>
where
    P: Parking<
            Select<By<account::Id, ()>>,
            Ok = account::Id,
            Err = Traced<parking::Error>,
        > + Parking<
            Select<By<Vec<Ticket>, account::Id>>,
            Ok = Vec<Ticket>,
            Err = Traced<parking::Error>,
        >,
{
    type Ok = Vec<Ticket>;
    type Err = Traced<parking::Error>;

    async fn execute(&self, _: Current) -> Result<Self::Ok, Self::Err> {
        let account_id = self
            .parking()
            .execute(Select(By::<account::Id, _>::new(())))
            .await
            .map_err(tracerr::wrap!())?;
        self.parking()
            .execute(Select(By::<Vec<Ticket>, _>::new(account_id)))
            .await
            .map_err(tracerr::wrap!())
    }
}
