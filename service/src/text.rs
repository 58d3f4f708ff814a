//! [`Text`] handle definitions.

use std::ops::ControlFlow;

use common::poll::Polled;
use tracerr::Traced;

use crate::{
    domain::text,
    infra::texting,
    query::{self, Query},
    Service,
};

/// Handle of a sent text message.
///
/// Borrows the [`Service`] it was sent with to look its delivery up.
#[derive(Debug)]
pub struct Text<'s, P, T> {
    /// ID of the text message.
    id: text::Id,

    /// [`Service`] the text message was sent with.
    service: &'s Service<P, T>,
}

impl<'s, P, T> Text<'s, P, T> {
    /// Creates a new [`Text`] handle.
    pub(crate) fn new(id: text::Id, service: &'s Service<P, T>) -> Self {
        Self { id, service }
    }

    /// Returns ID of the text message.
    #[must_use]
    pub fn id(&self) -> &text::Id {
        &self.id
    }
}

impl<P, T> Text<'_, P, T>
where
    Service<P, T>: Query<
        query::text::Status,
        Ok = text::Status,
        Err = Traced<texting::Error>,
    >,
{
    /// Returns the current delivery [`text::Status`] of the message.
    ///
    /// # Errors
    ///
    /// If the [`texting`] provider fails.
    pub async fn status(&self) -> Result<text::Status, Traced<texting::Error>> {
        self.service
            .execute(query::text::Status::by(self.id.clone()))
            .await
            .map_err(tracerr::wrap!())
    }

    /// Indicates whether the message has been received.
    ///
    /// # Errors
    ///
    /// If the [`texting`] provider fails.
    pub async fn received(&self) -> Result<bool, Traced<texting::Error>> {
        self.status().await.map(|s| s.is_delivered())
    }

    /// Waits for the message to be received, as long as the delivery
    /// [`poll::Policy`] of the [`Service`] allows.
    ///
    /// Running out of time is not an error: the returned [`text::Delivery`]
    /// is simply not received then.
    ///
    /// # Errors
    ///
    /// If the [`texting`] provider fails.
    ///
    /// [`poll::Policy`]: common::poll::Policy
    pub async fn wait_until_received(
        &self,
    ) -> Result<text::Delivery, Traced<texting::Error>> {
        let polled = self
            .service
            .config()
            .delivery
            .run(|_| async move {
                let status = self.status().await?;
                Ok::<_, Traced<texting::Error>>(if status.is_delivered() {
                    ControlFlow::Break(status)
                } else {
                    ControlFlow::Continue(status)
                })
            })
            .await
            .map_err(tracerr::wrap!())?;

        Ok(match polled {
            Polled::Resolved(status) => text::Delivery {
                received: true,
                status,
            },
            Polled::Exhausted { last, .. } => text::Delivery {
                received: false,
                status: last.unwrap_or_else(text::Status::unknown),
            },
        })
    }
}
