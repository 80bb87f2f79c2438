//! The cooperative scheduler.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

use smol_str::SmolStr;

use super::clock::{Clock, SystemClock};
use super::fault::WorkFault;
use super::place::{Phase, Slot, WorkPlace};
use super::{Step, Worker};

/// Scheduler tuning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerOptions {
    /// How long [`RoundRobin::run_slice`] keeps running rounds
    pub time_slice: Duration,
    /// Upper bound on [`TickReport::next_wait`]
    pub max_wait: Duration,
    /// Round cap for one slice, so a fixed clock can't spin forever
    pub max_rounds: usize,
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        Self {
            time_slice: Duration::from_millis(50),
            max_wait: Duration::from_millis(100),
            max_rounds: 256,
        }
    }
}

/// What a round did and when the host should come back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// Worker steps executed
    pub ran: usize,
    /// Time until the earliest appointment, capped at `max_wait`.
    /// `None` when nothing is scheduled.
    pub next_wait: Option<Duration>,
}

impl TickReport {
    pub fn is_idle(&self) -> bool {
        self.next_wait.is_none()
    }
}

pub(super) type SlotRef = Rc<RefCell<Slot>>;

pub(super) struct Shared {
    options: SchedulerOptions,
    clock: Rc<dyn Clock>,
    pending: RefCell<Vec<SlotRef>>,
    next_seq: Cell<u64>,
}

impl Shared {
    pub(super) fn now(&self) -> Instant {
        self.clock.now()
    }

    pub(super) fn next_seq(&self) -> u64 {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        seq
    }

    pub(super) fn enlist(&self, slot: &SlotRef) {
        let mut pending = self.pending.borrow_mut();
        if !pending.iter().any(|s| Rc::ptr_eq(s, slot)) {
            pending.push(Rc::clone(slot));
        }
    }

    pub(super) fn delist(&self, slot: &SlotRef) {
        self.pending.borrow_mut().retain(|s| !Rc::ptr_eq(s, slot));
    }

    /// Step one slot if it is still due. Returns whether a step ran.
    fn run_slot(&self, slot: &SlotRef, now: Instant) -> Result<bool, WorkFault> {
        let (mut worker, generation, label) = {
            let mut s = slot.borrow_mut();
            match s.phase {
                Phase::Queued(at) if at <= now => {}
                _ => return Ok(false),
            }
            let Some(worker) = s.worker.take() else {
                s.phase = Phase::Free;
                drop(s);
                self.delist(slot);
                return Ok(false);
            };
            s.phase = Phase::Running;
            (worker, s.generation, s.label.clone())
        };

        tracing::trace!(slot = %label, "worker step");
        let result = worker.step();
        let after = self.clock.now();

        // Anything dropped here runs after the slot borrow is released.
        let mut discarded: Option<Box<dyn Worker>> = None;
        let mut fault = None;
        let finished = {
            let mut s = slot.borrow_mut();
            if s.generation != generation {
                // Stopped or replaced during the step.
                discarded = Some(worker);
                s.phase == Phase::Free
            } else {
                match result {
                    Ok(Step::Continue(wait)) => {
                        if s.phase == Phase::Running {
                            s.phase = Phase::Queued(after + wait);
                            s.seq = self.next_seq();
                        }
                        s.worker = Some(worker);
                        false
                    }
                    Ok(Step::Finished) => {
                        s.phase = Phase::Free;
                        discarded = Some(worker);
                        true
                    }
                    Err(err) => {
                        s.phase = Phase::Free;
                        s.generation += 1;
                        discarded = Some(worker);
                        fault = Some(err);
                        true
                    }
                }
            }
        };
        drop(discarded);

        if finished {
            self.delist(slot);
        }

        match fault {
            Some(fault) if fault.is_recoverable() => {
                tracing::warn!(slot = %label, %fault, "worker stopped after recoverable fault");
                Ok(true)
            }
            Some(fault) => {
                tracing::error!(slot = %label, %fault, "worker failed");
                Err(fault)
            }
            None => Ok(true),
        }
    }

    fn next_wait(&self, now: Instant) -> Option<Duration> {
        self.pending
            .borrow()
            .iter()
            .filter_map(|slot| match slot.borrow().phase {
                Phase::Queued(at) => Some(at.saturating_duration_since(now)),
                _ => None,
            })
            .min()
            .map(|wait| wait.min(self.options.max_wait))
    }
}

/// Single-threaded round-robin scheduler.
///
/// Slots are created with [`RoundRobin::workplace`]. Each [`tick`](Self::tick)
/// steps every due slot once, earliest appointment first and ties broken by
/// arming order, so a worker that keeps continuing goes to the back of the
/// line. The host drives the scheduler from its event loop and sleeps for
/// [`TickReport::next_wait`] in between.
#[derive(Clone)]
pub struct RoundRobin {
    shared: Rc<Shared>,
}

impl Default for RoundRobin {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundRobin {
    pub fn new() -> Self {
        Self::with_options(SchedulerOptions::default(), Rc::new(SystemClock))
    }

    pub fn with_clock(clock: Rc<dyn Clock>) -> Self {
        Self::with_options(SchedulerOptions::default(), clock)
    }

    pub fn with_options(options: SchedulerOptions, clock: Rc<dyn Clock>) -> Self {
        Self {
            shared: Rc::new(Shared {
                options,
                clock,
                pending: RefCell::new(Vec::new()),
                next_seq: Cell::new(0),
            }),
        }
    }

    pub fn options(&self) -> &SchedulerOptions {
        &self.shared.options
    }

    pub fn now(&self) -> Instant {
        self.shared.now()
    }

    /// Create a new, free work slot bound to this scheduler.
    pub fn workplace(&self, label: impl Into<SmolStr>) -> WorkPlace {
        WorkPlace::new(Rc::clone(&self.shared), label.into())
    }

    /// Number of slots holding a queued, running or paused worker.
    pub fn pending_count(&self) -> usize {
        self.shared.pending.borrow().len()
    }

    /// Run one round: every slot due now is stepped once.
    ///
    /// A fatal fault stops its slot and is returned immediately; the rest
    /// of the round is skipped and runs on the next tick.
    pub fn tick(&self) -> Result<TickReport, WorkFault> {
        let now = self.shared.now();
        let mut due: Vec<(Instant, u64, SlotRef)> = self
            .shared
            .pending
            .borrow()
            .iter()
            .filter_map(|slot| {
                let s = slot.borrow();
                match s.phase {
                    Phase::Queued(at) if at <= now => Some((at, s.seq, Rc::clone(slot))),
                    _ => None,
                }
            })
            .collect();
        due.sort_by_key(|(at, seq, _)| (*at, *seq));

        let mut ran = 0;
        for (_, _, slot) in &due {
            if self.shared.run_slot(slot, now)? {
                ran += 1;
            }
        }

        Ok(TickReport {
            ran,
            next_wait: self.shared.next_wait(self.shared.now()),
        })
    }

    /// Run rounds until the time slice is used up or nothing is due.
    pub fn run_slice(&self) -> Result<TickReport, WorkFault> {
        let started = self.shared.now();
        let mut total = TickReport::default();
        for _ in 0..self.shared.options.max_rounds {
            let report = self.tick()?;
            total.ran += report.ran;
            total.next_wait = report.next_wait;
            if report.ran == 0
                || self.shared.now().saturating_duration_since(started)
                    >= self.shared.options.time_slice
            {
                break;
            }
        }
        Ok(total)
    }

    /// Tick until a round runs nothing, at most `max_rounds` times.
    /// Returns the number of steps run.
    pub fn run_until_idle(&self, max_rounds: usize) -> Result<usize, WorkFault> {
        let mut ran = 0;
        for _ in 0..max_rounds {
            let report = self.tick()?;
            if report.ran == 0 {
                break;
            }
            ran += report.ran;
        }
        Ok(ran)
    }
}
