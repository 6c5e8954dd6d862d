use std::ops::RangeInclusive;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Source of randomness and time for synthesized content.
pub struct Sampler {
    rng: Mutex<StdRng>,
    clock: Arc<dyn Clock>,
}

impl Sampler {
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn seeded(seed: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            clock,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn between(&self, range: RangeInclusive<u32>) -> u32 {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_range(range)
    }

    /// A millisecond-precision instant within `max_age` before now.
    pub fn recent(&self, max_age: Duration) -> DateTime<Utc> {
        let span = max_age.num_milliseconds().max(1);
        let back = {
            let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
            rng.gen_range(0..span)
        };
        self.now() - Duration::milliseconds(back)
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl std::fmt::Debug for Sampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sampler").field("now", &self.now()).finish()
    }
}
