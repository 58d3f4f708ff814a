//! [`Command`] for reserving a free parking session.

use std::ops::ControlFlow;

use common::{
    operations::{By, Insert, Select},
    poll::Polled,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{account, quote, session, ticket, workflow, Quote, Ticket},
    infra::{parking, Parking},
    Service,
};

use super::Command;

/// [`Command`] for reserving a free parking session.
///
/// Goes through the whole session workflow:
/// 1. quotes the session, refusing to go on unless it's free;
/// 2. submits the session;
/// 3. polls the submitted workflow until it resolves;
/// 4. re-fetches the current [`Ticket`]s, whatever the workflow outcome is.
#[derive(Clone, Copy, Debug)]
pub struct ReserveSession {
    /// [`session::Duration`] of the session.
    pub duration: session::Duration,

    /// When the session starts.
    pub start_time: ticket::StartDateTime,
}

/// Output of [`ReserveSession`] [`Command`].
#[derive(Clone, Debug)]
pub struct Output {
    /// [`Quote`] the session has been submitted with.
    pub quote: Quote,

    /// [`workflow::Handle`] of the submitted session.
    pub workflow: workflow::Handle,

    /// [`workflow::Outcome`] of the submitted session.
    pub outcome: workflow::Outcome,

    /// [`Ticket`]s held once the workflow resolved.
    pub tickets: Vec<Ticket>,
}

impl<P, T> Command<ReserveSession> for Service<P, T>
where
    P: Parking<
            Select<By<account::Id, ()>>,
            Ok = account::Id,
            Err = Traced<parking::Error>,
        > + Parking<
            Select<By<Quote, quote::Request>>,
            Ok = Quote,
            Err = Traced<parking::Error>,
        > + Parking<
            Insert<session::Request>,
            Ok = workflow::Handle,
            Err = Traced<parking::Error>,
        > + Parking<
            Select<By<Vec<workflow::Event>, workflow::Handle>>,
            Ok = Vec<workflow::Event>,
            Err = Traced<parking::Error>,
        > + Parking<
            Select<By<Vec<Ticket>, account::Id>>,
            Ok = Vec<Ticket>,
            Err = Traced<parking::Error>,
        >,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: ReserveSession,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ReserveSession {
            duration,
            start_time,
        } = cmd;
        let target = &self.config().target;

        let account_id = self
            .parking()
            .execute(Select(By::<account::Id, _>::new(())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let quote = self
            .parking()
            .execute(Select(By::<Quote, _>::new(quote::Request {
                account_id: account_id.clone(),
                target: target.clone(),
                duration,
            })))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        log::info!("got {quote}");
        if !quote.is_free() {
            return Err(tracerr::new!(E::NonFreeQuote(quote)));
        }

        let handle = self
            .parking()
            .execute(Insert(session::Request {
                target: target.clone(),
                duration,
                start_time,
                quote_id: quote.id.clone(),
                account_id: account_id.clone(),
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        log::debug!("session submitted, workflow is at `{handle}`");

        let parking = self.parking();
        let polled = self
            .config()
            .workflow
            .run(|attempt| {
                let handle = handle.clone();
                async move {
                    log::debug!("waiting for the session workflow ({attempt})");
                    let events = parking
                        .execute(Select(
                            By::<Vec<workflow::Event>, _>::new(handle),
                        ))
                        .await?;
                    Ok::<_, Traced<parking::Error>>(
                        workflow::Outcome::resolve(&events)
                            .map_or(ControlFlow::Continue(()), |o| {
                                ControlFlow::Break(o)
                            }),
                    )
                }
            })
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let outcome = match polled {
            Polled::Resolved(outcome) => outcome,
            Polled::Exhausted { attempts, .. } => {
                return Err(tracerr::new!(E::WorkflowUnresolved { attempts }));
            }
        };
        match &outcome {
            workflow::Outcome::Created => log::info!("{outcome}"),
            workflow::Outcome::Failed { .. } => log::warn!("{outcome}"),
        }

        let tickets = self
            .parking()
            .execute(Select(By::<Vec<Ticket>, _>::new(account_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(Output {
            quote,
            workflow: handle,
            outcome,
            tickets,
        })
    }
}

/// Error of [`ReserveSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Parking`] provider error.
    #[display("`Parking` operation failed: {_0}")]
    #[from]
    Parking(parking::Error),

    /// [`Quote`] is not free, so the configured rate option is wrong.
    #[display("{_0} is not free, refusing to submit the session")]
    NonFreeQuote(#[error(not(source))] Quote),

    /// Session workflow didn't resolve in the allowed number of attempts.
    #[display("Session workflow unresolved after {attempts} attempts")]
    WorkflowUnresolved {
        /// Number of performed polling attempts.
        attempts: u32,
    },
}
