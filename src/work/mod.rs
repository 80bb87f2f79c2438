//! Work: cooperative time-sliced scheduling on the host's thread.
//!
//! A [`RoundRobin`] owns a set of [`WorkPlace`] slots. Each slot holds at most
//! one [`Worker`] with an appointment time. The host calls
//! [`RoundRobin::tick`] (or [`RoundRobin::run_slice`]) from its event loop;
//! every due worker gets one step per round and tells the scheduler whether it
//! wants to continue and after how long.
//!
//! Nothing here is thread-safe. Workers run on the thread that ticks.

mod clock;
mod command;
mod fault;
mod place;
mod round_robin;

pub use clock::{Clock, ManualClock, SystemClock};
pub use command::WorkCommand;
pub use fault::{RecoverableKind, WorkFault};
pub use place::{WorkPlace, WorkerStatus};
pub use round_robin::{RoundRobin, SchedulerOptions, TickReport};

use std::time::Duration;


/// Outcome of one worker step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Run again after the given delay
    Continue(Duration),
    /// Done; the slot becomes free
    Finished,
}

impl Step {
    /// Continue as soon as possible.
    pub const NOW: Step = Step::Continue(Duration::ZERO);
}

/// A unit of incremental work.
///
/// Stopping a slot drops its worker, so cleanup belongs in `Drop`.
pub trait Worker {
    fn step(&mut self) -> Result<Step, WorkFault>;
}

/// Worker backed by a closure. See [`from_fn`].
pub struct FromFn<F>(F);

/// Wrap a closure as a [`Worker`].
pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: FnMut() -> Result<Step, WorkFault>,
{
    FromFn(f)
}

impl<F> Worker for FromFn<F>
where
    F: FnMut() -> Result<Step, WorkFault>,
{
    fn step(&mut self) -> Result<Step, WorkFault> {
        (self.0)()
    }
}
