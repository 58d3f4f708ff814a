//! Human-readable report of parking [`Ticket`]s.

use std::fmt;

use service::domain::Ticket;
use time::{
    format_description::BorrowedFormatItem, macros::format_description,
    UtcOffset,
};

/// Format of the date and time in a report.
const DATE_TIME: &[BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute] [day]/[month]/[year]");

/// Report of the currently held [`Ticket`]s.
///
/// Renders date and time in the provided [`UtcOffset`].
#[derive(Clone, Copy, Debug)]
pub struct Tickets<'t> {
    /// [`Ticket`]s to report.
    tickets: &'t [Ticket],

    /// [`UtcOffset`] to render date and time in.
    offset: UtcOffset,
}

impl<'t> Tickets<'t> {
    /// Creates a new [`Tickets`] report.
    #[must_use]
    pub fn new(tickets: &'t [Ticket], offset: UtcOffset) -> Self {
        Self { tickets, offset }
    }

    /// Renders the provided date and time in the report's offset.
    fn date_time<Of: ?Sized>(
        &self,
        dt: common::DateTimeOf<Of>,
    ) -> Result<String, fmt::Error> {
        dt.to_offset(self.offset)
            .format(DATE_TIME)
            .map_err(|_| fmt::Error)
    }
}

impl fmt::Display for Tickets<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tickets.is_empty() {
            return write!(f, "Current tickets: []");
        }

        write!(f, "Current tickets:")?;
        for t in self.tickets {
            write!(
                f,
                "\n  - Ticket ID: {}\
                 \n    Location: {}\
                 \n    Start: {}\
                 \n    End: {}\
                 \n    Vehicle:\
                 \n      ID: {}\
                 \n      License plate: {}\
                 \n      Type: {}\
                 \n    Rate: {}",
                t.id,
                t.location_id,
                self.date_time(t.start_time)?,
                self.date_time(t.expire_time)?,
                t.vehicle.id,
                t.vehicle.license_plate,
                t.vehicle.kind,
                t.rate_option.kind,
            )?;
        }
        Ok(())
    }
}
