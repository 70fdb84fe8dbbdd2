use std::collections::BTreeMap;
use std::time::Duration;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// Who owns a timer. `Scene` timers die on every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Scene,
    Session,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TimerTask {
    TypeStep,
    DismissToast,
    Process(u32),
}

#[derive(Debug, Clone)]
struct Pending {
    scope: Scope,
    task: TimerTask,
}

/// Virtual-clock timer queue. Time only moves when the host says so.
#[derive(Debug, Default)]
pub struct Timers {
    now: Duration,
    seq: u64,
    queue: BTreeMap<(Duration, u64), Pending>,
    deadlines: FxHashMap<u64, Duration>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule(&mut self, delay: Duration, scope: Scope, task: TimerTask) -> TimerHandle {
        let id = self.seq;
        self.seq += 1;
        let due = self.now + delay;
        self.queue.insert((due, id), Pending { scope, task });
        self.deadlines.insert(id, due);
        TimerHandle(id)
    }

    /// `false` when the timer already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.deadlines.remove(&handle.0) {
            Some(due) => self.queue.remove(&(due, handle.0)).is_some(),
            None => false,
        }
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.deadlines.contains_key(&handle.0)
    }

    /// Cancels every timer of `scope`, returning how many were dropped.
    pub fn sweep(&mut self, scope: Scope) -> usize {
        let doomed: Vec<(Duration, u64)> = self.queue.iter()
            .filter(|(_, p)| p.scope == scope)
            .map(|(k, _)| *k)
            .collect();
        for key in &doomed {
            self.queue.remove(key);
            self.deadlines.remove(&key.1);
        }
        doomed.len()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Time left until the earliest pending timer.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.keys().next().map(|(due, _)| due.saturating_sub(self.now))
    }

    /// Pops the earliest timer due at or before `until`, moving the clock to its deadline.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerHandle, TimerTask)> {
        let (&(due, id), _) = self.queue.iter().next()?;
        if due > until {
            return None;
        }
        let pending = self.queue.remove(&(due, id))?;
        self.deadlines.remove(&id);
        if due > self.now {
            self.now = due;
        }
        Some((TimerHandle(id), pending.task))
    }

    pub fn advance_to(&mut self, t: Duration) {
        if t > self.now {
            self.now = t;
        }
    }
}
