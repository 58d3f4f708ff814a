//! [`Command`] for sending a text message.

use common::operations::Insert;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::text,
    infra::{texting, Texting},
    Service, Text,
};

use super::Command;

/// [`Command`] for sending a text message.
///
/// Executed on a [`Service`] reference, so that the returned [`Text`] handle
/// may borrow it to follow the delivery of the sent message. As [`Service`]
/// itself executes other [`Command`]s, call it as
/// `Command::execute(&&service, cmd)`.
#[derive(Clone, Debug)]
pub struct SendText {
    /// [`text::Number`] to send the message to.
    pub number: text::Number,

    /// Content of the message.
    pub body: String,
}

impl<'s, P, T> Command<SendText> for &'s Service<P, T>
where
    T: Texting<
        Insert<text::Message>,
        Ok = text::Id,
        Err = Traced<texting::Error>,
    >,
{
    type Ok = Text<'s, P, T>;
    type Err = ExecutionError;

    async fn execute(&self, cmd: SendText) -> Result<Self::Ok, Self::Err> {
        let SendText { number, body } = cmd;

        log::info!("sending text message to `{number}`");
        let id = self
            .texting()
            .execute(Insert(text::Message { number, body }))
            .await
            .map_err(tracerr::wrap!())?;
        Ok((*self).text(id))
    }
}

/// Error of [`SendText`] [`Command`] execution.
pub type ExecutionError = Traced<texting::Error>;
