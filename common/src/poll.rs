//! Bounded polling of remote state.

use std::{future::Future, num::NonZeroU32, ops::ControlFlow, time::Duration};

use tokio::time::{self, Instant};

/// Policy of repeatedly polling something until it resolves.
///
/// Without both [`Policy::max_attempts`] and [`Policy::timeout`] polling
/// never gives up.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Policy {
    /// Pause between two consecutive attempts.
    pub interval: Duration,

    /// Maximum number of attempts, if any.
    pub max_attempts: Option<NonZeroU32>,

    /// Wall-clock budget of the whole polling, if any.
    ///
    /// No new attempt is started once it elapses.
    pub timeout: Option<Duration>,
}

/// Result of polling with a [`Policy`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Polled<B, C> {
    /// Polled state resolved into a final value.
    Resolved(B),

    /// [`Policy`] gave up before the state resolved.
    Exhausted {
        /// Number of attempts performed.
        attempts: u32,

        /// Last pending state observed, if any attempt was performed.
        last: Option<C>,
    },
}

impl Policy {
    /// Polls with the provided `attempt` until it breaks, fails, or this
    /// [`Policy`] is exhausted.
    ///
    /// `attempt` receives the 1-based number of the attempt. A
    /// [`ControlFlow::Continue`] carries the pending state observed by it.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by `attempt` as is.
    pub async fn run<F, Fut, B, C, E>(
        &self,
        mut attempt: F,
    ) -> Result<Polled<B, C>, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<ControlFlow<B, C>, E>>,
    {
        let started = Instant::now();
        let mut attempts = 0;
        let mut last = None;

        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Ok(Polled::Exhausted { attempts, last });
        }

        loop {
            attempts += 1;
            match attempt(attempts).await? {
                ControlFlow::Break(b) => return Ok(Polled::Resolved(b)),
                ControlFlow::Continue(c) => last = Some(c),
            }

            if self.max_attempts.is_some_and(|max| attempts >= max.get()) {
                return Ok(Polled::Exhausted { attempts, last });
            }

            // Never sleep past the deadline.
            let pause = match self.timeout {
                Some(t) => {
                    let left = t.saturating_sub(started.elapsed());
                    if left.is_zero() {
                        return Ok(Polled::Exhausted { attempts, last });
                    }
                    self.interval.min(left)
                }
                None => self.interval,
            };
            if !pause.is_zero() {
                time::sleep(pause).await;
            }
            if self.timeout.is_some_and(|t| started.elapsed() >= t) {
                return Ok(Polled::Exhausted { attempts, last });
            }
        }
    }
}
