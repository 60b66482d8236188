//! Deferred work for the lifecycle manager.
//!
//! The manager never holds closures. It hands a [`Task`] value to a
//! [`Scheduler`] and gets it back through `EffectManager::fire` when the
//! timer elapses. The browser front-end backs the trait with
//! `setTimeout`/`setInterval`; [`TimerQueue`] backs it with a virtual clock so
//! ordering and cancellation can be asserted without waiting on wall time.

use crate::element::{ElementId, ElementKind};
use fnv::FnvHashMap;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(pub u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Task {
    /// Spawn one element, if the population is still on `generation`.
    Spawn { kind: ElementKind, generation: u64 },
    /// Remove an element whose lifetime elapsed.
    Retire { kind: ElementKind, id: ElementId },
    /// End a population's run window.
    Expire { kind: ElementKind, generation: u64 },
    ScrollToReveal,
    RevealLine { index: usize },
    ResizeSettled,
    SettleCard { press: u64 },
}

pub trait Scheduler {
    /// Current time in milliseconds on this scheduler's clock.
    fn now_ms(&self) -> f64;
    fn schedule_once(&mut self, delay_ms: u32, task: Task) -> TimerHandle;
    fn schedule_repeating(&mut self, period_ms: u32, task: Task) -> TimerHandle;
    /// Cancelling a handle that already fired or was never issued is a no-op.
    fn cancel(&mut self, handle: TimerHandle);
}

#[derive(Clone, Debug)]
struct Armed {
    task: Task,
    period_ms: Option<u32>,
}

/// Virtual-clock scheduler. Time only moves through [`TimerQueue::pop_due`]
/// and [`TimerQueue::settle`].
#[derive(Debug, Default)]
pub struct TimerQueue {
    now_ms: u64,
    next_handle: u64,
    next_seq: u64,
    // (due, seq, handle); seq keeps insertion order among equal due times
    heap: BinaryHeap<Reverse<(u64, u64, TimerHandle)>>,
    armed: FnvHashMap<TimerHandle, Armed>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> u64 {
        self.now_ms
    }

    /// Number of live timers, one-shot and repeating.
    pub fn pending(&self) -> usize {
        self.armed.len()
    }

    pub fn active_repeating(&self) -> usize {
        self.armed.values().filter(|a| a.period_ms.is_some()).count()
    }

    pub fn is_armed(&self, handle: TimerHandle) -> bool {
        self.armed.contains_key(&handle)
    }

    /// Pop the earliest task due at or before `until`, moving the clock to its
    /// due time. Repeating timers are re-armed one period later.
    pub fn pop_due(&mut self, until: u64) -> Option<Task> {
        loop {
            let Reverse((due, _, handle)) = *self.heap.peek()?;
            if due > until {
                return None;
            }
            self.heap.pop();
            let (task, period_ms) = match self.armed.get(&handle) {
                Some(armed) => (armed.task.clone(), armed.period_ms),
                None => continue, // cancelled
            };
            match period_ms {
                Some(period) => self.push(due + period.max(1) as u64, handle),
                None => {
                    self.armed.remove(&handle);
                }
            }
            self.now_ms = self.now_ms.max(due);
            return Some(task);
        }
    }

    /// Move the clock forward once every due task has been drained.
    pub fn settle(&mut self, until: u64) {
        self.now_ms = self.now_ms.max(until);
    }

    fn arm(&mut self, delay_ms: u32, task: Task, period_ms: Option<u32>) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.armed.insert(handle, Armed { task, period_ms });
        self.push(self.now_ms + delay_ms as u64, handle);
        handle
    }

    fn push(&mut self, due: u64, handle: TimerHandle) {
        self.heap.push(Reverse((due, self.next_seq, handle)));
        self.next_seq += 1;
    }
}

impl Scheduler for TimerQueue {
    fn now_ms(&self) -> f64 {
        self.now_ms as f64
    }

    fn schedule_once(&mut self, delay_ms: u32, task: Task) -> TimerHandle {
        self.arm(delay_ms, task, None)
    }

    fn schedule_repeating(&mut self, period_ms: u32, task: Task) -> TimerHandle {
        self.arm(period_ms.max(1), task, Some(period_ms))
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.armed.remove(&handle);
    }
}
