//! Timeout and interval primitives.
//!
//! Timers are plain data: the queue stores the event each timer should
//! deliver, and the owner polls due events against its clock. An interval
//! that is polled late fires once and is re-armed one period after the
//! poll, the same coalescing a throttled host timer exhibits.

/// Handle for clearing a pending timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// Minimum interval period, so a zero period cannot spin a poll loop.
const MIN_PERIOD_MS: f64 = 1.0;

#[derive(Clone, Debug)]
struct Entry<E> {
    handle: TimerHandle,
    due_ms: f64,
    period_ms: Option<f64>,
    event: E,
}

#[derive(Clone, Debug)]
pub struct TimerQueue<E> {
    entries: Vec<Entry<E>>,
    next_id: u64,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }
}

impl<E: Clone> TimerQueue<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` once, `delay_ms` after `now_ms`.
    pub fn set_timeout(&mut self, now_ms: f64, delay_ms: f64, event: E) -> TimerHandle {
        self.insert(now_ms + delay_ms.max(0.0), None, event)
    }

    /// Deliver `event` every `period_ms` starting one period after `now_ms`.
    pub fn set_interval(&mut self, now_ms: f64, period_ms: f64, event: E) -> TimerHandle {
        let period_ms = period_ms.max(MIN_PERIOD_MS);
        self.insert(now_ms + period_ms, Some(period_ms), event)
    }

    /// Cancel a timer. Returns false when it already fired or was cleared.
    pub fn clear(&mut self, handle: TimerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.handle != handle);
        self.entries.len() != before
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.entries.iter().any(|entry| entry.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Earliest due time among pending timers.
    pub fn next_due(&self) -> Option<f64> {
        self.entries
            .iter()
            .map(|entry| entry.due_ms)
            .min_by(f64::total_cmp)
    }

    /// Take the earliest timer due at `now_ms`. Ties go to the timer that
    /// was created first.
    pub fn pop_due(&mut self, now_ms: f64) -> Option<(TimerHandle, E)> {
        let position = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due_ms <= now_ms)
            .min_by(|(_, a), (_, b)| a.due_ms.total_cmp(&b.due_ms).then(a.handle.cmp(&b.handle)))
            .map(|(position, _)| position)?;

        let entry = &self.entries[position];
        let fired = (entry.handle, entry.event.clone());
        let period_ms = entry.period_ms;
        match period_ms {
            Some(period_ms) => self.entries[position].due_ms = now_ms + period_ms,
            None => {
                self.entries.swap_remove(position);
            }
        }
        Some(fired)
    }

    fn insert(&mut self, due_ms: f64, period_ms: Option<f64>, event: E) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            handle,
            due_ms,
            period_ms,
            event,
        });
        handle
    }
}
