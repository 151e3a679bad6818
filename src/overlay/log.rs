//! Event log: a bounded, timed-eviction append log.
//!
//! New entries queue up and are drained into the visible list one per
//! cadence tick. Each visible entry expires on its own timer; the visible
//! list additionally never exceeds the configured length (in pause mode by
//! delaying dequeues, otherwise by evicting the oldest).

use std::collections::VecDeque;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub text: String,
    /// Accent color hint for the render layer, e.g. `#f04`.
    pub accent: Option<&'static str>,
    /// Per-entry lifetime override.
    pub lifetime: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct VisibleEntry {
    pub entry: LogEntry,
    expires: Instant,
}

pub struct EventLog {
    queue: VecDeque<LogEntry>,
    visible: VecDeque<VisibleEntry>,
    length: usize,
    lifetime: Duration,
    delay: Duration,
    pause_when_full: bool,
    next_dequeue: Instant,
}

impl EventLog {
    pub fn new(
        length: usize,
        lifetime: Duration,
        delay: Duration,
        pause_when_full: bool,
        now: Instant,
    ) -> Self {
        Self {
            queue: VecDeque::new(),
            visible: VecDeque::new(),
            length,
            lifetime,
            delay,
            pause_when_full,
            next_dequeue: now,
        }
    }

    pub fn push(
        &mut self,
        text: impl Into<String>,
        accent: Option<&'static str>,
        lifetime: Option<Duration>,
    ) {
        self.queue.push_back(LogEntry {
            text: text.into(),
            accent,
            lifetime,
        });
    }

    pub fn visible(&self) -> impl Iterator<Item = &LogEntry> {
        self.visible.iter().map(|v| &v.entry)
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn queued_len(&self) -> usize {
        self.queue.len()
    }

    /// Advance timers: expire visible entries, then drain the queue at the
    /// configured cadence.
    pub fn tick(&mut self, now: Instant) {
        self.visible.retain(|v| v.expires > now);

        loop {
            if now < self.next_dequeue {
                break;
            }
            if self.queue.is_empty() {
                self.next_dequeue = now + self.delay;
                break;
            }
            if self.pause_when_full && self.visible.len() >= self.length {
                // Hold the queue; retry once capacity frees up.
                self.next_dequeue = now + self.delay;
                break;
            }
            self.next_dequeue += self.delay;

            if let Some(entry) = self.queue.pop_front() {
                let lifetime = entry.lifetime.unwrap_or(self.lifetime);
                self.visible.push_back(VisibleEntry {
                    entry,
                    expires: now + lifetime,
                });
                while self.visible.len() > self.length {
                    self.visible.pop_front();
                }
            }
        }
    }
}
