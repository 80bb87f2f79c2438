//! Work slots: one pending worker each.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use smol_str::SmolStr;
use uuid::Uuid;

use super::Worker;
use super::command::WorkCommand;
use super::round_robin::{Shared, SlotRef};

/// Externally visible slot state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkerStatus {
    /// No worker
    Free,
    /// Waiting for its appointment
    Queued,
    /// Inside a step right now
    Running,
    /// Holding a worker with no appointment
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Phase {
    Free,
    Queued(Instant),
    Running,
    Paused,
}

pub(super) struct Slot {
    pub(super) label: SmolStr,
    pub(super) worker: Option<Box<dyn Worker>>,
    pub(super) phase: Phase,
    /// Arming order, for fairness between equal appointments.
    pub(super) seq: u64,
    /// Bumped whenever the worker is discarded, so a step that was in
    /// flight at the time doesn't put it back.
    pub(super) generation: u64,
}

/// A slot in a [`RoundRobin`](super::RoundRobin) holding at most one worker.
///
/// Queueing replaces whatever was there. Dropping the `WorkPlace` stops it.
pub struct WorkPlace {
    shared: Rc<Shared>,
    slot: SlotRef,
}

impl WorkPlace {
    pub(super) fn new(shared: Rc<Shared>, label: SmolStr) -> Self {
        Self {
            shared,
            slot: Rc::new(RefCell::new(Slot {
                label,
                worker: None,
                phase: Phase::Free,
                seq: 0,
                generation: 0,
            })),
        }
    }

    pub fn label(&self) -> SmolStr {
        self.slot.borrow().label.clone()
    }

    /// Replace any pending worker with `worker`, due after `delay`.
    pub fn queue(&self, worker: impl Worker + 'static, delay: Duration) {
        self.queue_boxed(Box::new(worker), delay);
    }

    pub fn queue_boxed(&self, worker: Box<dyn Worker>, delay: Duration) {
        self.stop();
        let at = self.shared.now() + delay;
        {
            let mut s = self.slot.borrow_mut();
            s.worker = Some(worker);
            s.phase = Phase::Queued(at);
            s.seq = self.shared.next_seq();
            tracing::debug!(slot = %s.label, ?delay, "worker queued");
        }
        self.shared.enlist(&self.slot);
    }

    /// Discard the worker and cancel its appointment. A step that is in
    /// flight finishes, but the worker is not rescheduled.
    pub fn stop(&self) {
        let discarded = {
            let mut s = self.slot.borrow_mut();
            if s.phase == Phase::Free && s.worker.is_none() {
                return;
            }
            s.generation += 1;
            s.phase = Phase::Free;
            tracing::debug!(slot = %s.label, "worker stopped");
            s.worker.take()
        };
        self.shared.delist(&self.slot);
        drop(discarded);
    }

    /// Re-arm the current worker. Returns `false` when the slot is free.
    pub fn start(&self, delay: Duration) -> bool {
        {
            let mut s = self.slot.borrow_mut();
            if s.worker.is_none() && s.phase != Phase::Running {
                return false;
            }
            s.phase = Phase::Queued(self.shared.now() + delay);
            s.seq = self.shared.next_seq();
        }
        self.shared.enlist(&self.slot);
        true
    }

    /// Drop the appointment but keep the worker.
    pub fn pause(&self) -> bool {
        let mut s = self.slot.borrow_mut();
        match s.phase {
            Phase::Queued(_) | Phase::Running => {
                s.phase = Phase::Paused;
                true
            }
            Phase::Paused => true,
            Phase::Free => false,
        }
    }

    /// Route a host command by id. Returns `false` for unknown ids.
    pub fn execute(&self, command: Uuid) -> bool {
        match WorkCommand::from_id(command) {
            Some(WorkCommand::Play) => {
                self.start(Duration::ZERO);
                true
            }
            Some(WorkCommand::Pause) => {
                self.pause();
                true
            }
            Some(WorkCommand::Stop) => {
                self.stop();
                true
            }
            None => false,
        }
    }

    pub fn status(&self) -> WorkerStatus {
        match self.slot.borrow().phase {
            Phase::Free => WorkerStatus::Free,
            Phase::Queued(_) => WorkerStatus::Queued,
            Phase::Running => WorkerStatus::Running,
            Phase::Paused => WorkerStatus::Paused,
        }
    }

    /// When the worker is due; `None` when it isn't scheduled.
    pub fn appointment(&self) -> Option<Instant> {
        match self.slot.borrow().phase {
            Phase::Queued(at) => Some(at),
            _ => None,
        }
    }

    pub fn is_free(&self) -> bool {
        self.status() == WorkerStatus::Free
    }
}

impl Drop for WorkPlace {
    fn drop(&mut self) {
        self.stop();
    }
}
