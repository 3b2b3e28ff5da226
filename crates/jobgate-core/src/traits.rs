use chrono::{DateTime, Utc};

/// Source of "now" for evaluation and record timestamps.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Allocates the numeric part of human-facing decision ids.
///
/// Implementations decide whether numbers are unique. Callers needing
/// uniqueness across processes must back this with their own sequencing
/// authority (database sequence, counter service).
pub trait SequenceSource {
    fn next_sequence(&self, year: i32) -> u32;
}

impl<S: SequenceSource + ?Sized> SequenceSource for &S {
    fn next_sequence(&self, year: i32) -> u32 {
        (**self).next_sequence(year)
    }
}
