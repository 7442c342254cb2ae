// Scheduled tasks driven by the session clock, never by real time.

use std::time::Duration;

#[derive(Clone, Debug)]
struct Repeat {
    every: Duration,
    /// Inclusive; the last occurrence may land exactly here.
    until: Duration,
}

#[derive(Clone, Debug)]
struct ScheduledTask<T> {
    payload: T,
    next_at: Duration,
    repeat: Option<Repeat>,
}

#[derive(Clone, Debug)]
pub struct Timeline<T> {
    tasks: Vec<ScheduledTask<T>>,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self { tasks: Vec::new() }
    }
}

impl<T: Clone> Timeline<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `payload` once at `at`.
    pub fn once(&mut self, at: Duration, payload: T) {
        self.tasks.push(ScheduledTask {
            payload,
            next_at: at,
            repeat: None,
        });
    }

    /// Fire `payload` at `first_at`, then every `every`, while not past `until`.
    /// A zero interval is treated as a single occurrence.
    pub fn every(&mut self, first_at: Duration, every: Duration, until: Duration, payload: T) {
        if first_at > until {
            return;
        }
        let repeat = (!every.is_zero()).then_some(Repeat { every, until });
        self.tasks.push(ScheduledTask {
            payload,
            next_at: first_at,
            repeat,
        });
    }

    /// Collect every occurrence due at or before `now`, task by task in the
    /// order they were scheduled.
    pub fn advance(&mut self, now: Duration, out: &mut Vec<T>) {
        self.tasks.retain_mut(|task| {
            while task.next_at <= now {
                out.push(task.payload.clone());
                match &task.repeat {
                    Some(r) => {
                        task.next_at += r.every;
                        if task.next_at > r.until {
                            return false;
                        }
                    }
                    None => return false,
                }
            }
            true
        });
    }

    pub fn is_idle(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Whether any unfinished task carries a payload matching `pred`.
    pub fn contains(&self, pred: impl Fn(&T) -> bool) -> bool {
        self.tasks.iter().any(|t| pred(&t.payload))
    }
}
