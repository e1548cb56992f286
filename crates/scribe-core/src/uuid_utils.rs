//! UUID v7 note identifiers.
//!
//! A note id is the hyphenated text of a UUIDv7: 48 bits of Unix
//! milliseconds taken from the clock, followed by version/variant bits
//! and 74 random bits. Ids sort by creation time and are unique with
//! overwhelming probability without any coordination.
//!
//! Ids are opaque everywhere else. Documents written by other tools may
//! carry ids in any format and are handled the same way.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use uuid::{Builder, Uuid};

use crate::traits::{Clock, IdGenerator};

/// Build a UUIDv7 from a millisecond timestamp and 10 random bytes.
pub fn v7_from_parts(millis: u64, random: &[u8; 10]) -> Uuid {
    Builder::from_unix_timestamp_millis(millis, random).into_uuid()
}

/// Id generator combining the caller's timestamp with a random source.
pub struct RandomIds<R: RngCore + Send = StdRng> {
    rng: Mutex<R>,
}

impl RandomIds<StdRng> {
    /// Generator seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Generator with a fixed seed, for reproducible ids.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: RngCore + Send> RandomIds<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl<R: RngCore + Send> IdGenerator for RandomIds<R> {
    fn next_id(&self, now: DateTime<Utc>) -> String {
        let mut random = [0u8; 10];
        match self.rng.lock() {
            Ok(mut rng) => rng.fill_bytes(&mut random),
            // A panic mid-fill leaves the rng usable.
            Err(poisoned) => poisoned.into_inner().fill_bytes(&mut random),
        }
        let millis = now.timestamp_millis().max(0) as u64;
        v7_from_parts(millis, &random).to_string()
    }
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
