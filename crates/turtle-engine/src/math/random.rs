use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform pseudo-random numbers.
///
/// Seeded from the OS by default; [`set_seed`](Self::set_seed) makes a run
/// reproducible.
#[derive(Debug, Clone)]
pub struct Random {
    rng: StdRng,
}

impl Default for Random {
    fn default() -> Self {
        Self { rng: StdRng::from_entropy() }
    }
}

impl Random {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    pub fn set_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Real number in `[0, 1)`.
    pub fn random(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }

    /// Integer in `[0, max)`; `0` when `max <= 0`.
    pub fn random_below(&mut self, max: i32) -> i32 {
        if max <= 0 {
            return 0;
        }
        self.rng.gen_range(0..max)
    }

    /// Integer in `[min, max)`; `min` when the range is empty.
    pub fn random_range(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_stay_in_range() {
        let mut r = Random::with_seed(7);
        for _ in 0..1000 {
            let f = r.random();
            assert!((0.0..1.0).contains(&f));
            assert!((0..10).contains(&r.random_below(10)));
            assert!((-5..5).contains(&r.random_range(-5, 5)));
        }
    }

    #[test]
    fn same_seed_repeats_sequence() {
        let mut a = Random::with_seed(42);
        let mut b = Random::new();
        b.set_seed(42);
        let xs: Vec<i32> = (0..16).map(|_| a.random_below(1000)).collect();
        let ys: Vec<i32> = (0..16).map(|_| b.random_below(1000)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn empty_ranges_collapse() {
        let mut r = Random::with_seed(1);
        assert_eq!(r.random_below(0), 0);
        assert_eq!(r.random_below(-3), 0);
        assert_eq!(r.random_range(4, 4), 4);
        assert_eq!(r.random_range(9, 2), 9);
    }
}
