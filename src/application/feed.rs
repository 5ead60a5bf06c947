use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::order::{Order, OrderStatus};
use crate::domain::ports::OrderFeed;

pub const DEFAULT_NUMBERS: RangeInclusive<u32> = 1000..=9999;
pub const DEFAULT_RETURN_PROBABILITY: f64 = 0.15;

/// Synthesizes orders with a uniformly random number and status.
pub struct RandomOrderFeed {
    rng: StdRng,
    numbers: RangeInclusive<u32>,
    return_probability: f64,
}

impl RandomOrderFeed {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            numbers: DEFAULT_NUMBERS,
            return_probability: DEFAULT_RETURN_PROBABILITY,
        }
    }

    pub fn with_numbers(mut self, numbers: RangeInclusive<u32>) -> Self {
        self.numbers = numbers;
        self
    }

    pub fn with_return_probability(mut self, probability: f64) -> Self {
        self.return_probability = probability.clamp(0.0, 1.0);
        self
    }
}

impl OrderFeed for RandomOrderFeed {
    fn next_order(&mut self, statuses: &[OrderStatus]) -> Option<Order> {
        if statuses.is_empty() || self.numbers.is_empty() {
            return None;
        }
        let number = self.rng.gen_range(self.numbers.clone());
        let status = statuses[self.rng.gen_range(0..statuses.len())];
        let is_return = self.rng.gen_bool(self.return_probability);
        Some(Order::new(number, status, is_return))
    }
}
