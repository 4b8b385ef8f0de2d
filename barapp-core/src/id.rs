//! Record id generation.
//!
//! The default scheme uses the wall-clock time in milliseconds since the
//! Unix epoch, rendered as a decimal string. Two ids drawn in the same
//! millisecond would collide, so the generator never hands out a value less
//! than or equal to the previous one.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Produces ids for newly created records.
///
/// Successive calls should yield distinct, non-empty ids. Inserts give up
/// after a bounded number of unusable draws.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Millisecond timestamp ids, strictly increasing within one process.
#[derive(Debug, Default)]
pub struct TimestampIds {
    last: AtomicI64,
}

impl TimestampIds {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_after(&self, now: i64) -> i64 {
        let mut last = self.last.load(Ordering::SeqCst);
        loop {
            let candidate = now.max(last + 1);
            match self
                .last
                .compare_exchange(last, candidate, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return candidate,
                Err(actual) => last = actual,
            }
        }
    }
}

impl IdGenerator for TimestampIds {
    fn next_id(&self) -> String {
        self.next_after(Utc::now().timestamp_millis()).to_string()
    }
}

/// Random UUID (v4) ids.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Which id generator new records get.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdScheme {
    #[default]
    Timestamp,
    Uuid,
}

impl IdScheme {
    pub fn generator(&self) -> Arc<dyn IdGenerator> {
        match self {
            IdScheme::Timestamp => Arc::new(TimestampIds::new()),
            IdScheme::Uuid => Arc::new(UuidIds),
        }
    }
}

impl fmt::Display for IdScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdScheme::Timestamp => write!(f, "timestamp"),
            IdScheme::Uuid => write!(f, "uuid"),
        }
    }
}

impl FromStr for IdScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "timestamp" => Ok(IdScheme::Timestamp),
            "uuid" => Ok(IdScheme::Uuid),
            _ => Err(format!(
                "Invalid id scheme: {}. Use timestamp or uuid",
                s
            )),
        }
    }
}
