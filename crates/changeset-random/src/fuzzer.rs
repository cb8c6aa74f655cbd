use rand::{rngs::OsRng, Rng, RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

/// A seeded source of random draws for generating test scenarios.
///
/// Uses the xoshiro256** PRNG so a failing scenario can be replayed from
/// its seed.
///
/// # Examples
///
/// ```
/// use changeset_random::Fuzzer;
///
/// let mut a = Fuzzer::from_u64(7);
/// let mut b = Fuzzer::from_u64(7);
/// assert_eq!(a.random_int(0, 1000), b.random_int(0, 1000));
///
/// let choices = ["x", "y", "z"];
/// assert!(choices.contains(a.pick(&choices)));
/// ```
pub struct Fuzzer {
    /// The seed used to initialize the PRNG.
    pub seed: [u8; 32],
    rng: Xoshiro256StarStar,
}

impl Fuzzer {
    /// Create a fuzzer with an optional seed; `None` draws one from `OsRng`.
    pub fn new(seed: Option<[u8; 32]>) -> Self {
        let seed = seed.unwrap_or_else(|| {
            let mut bytes = [0u8; 32];
            OsRng.fill_bytes(&mut bytes);
            bytes
        });
        Self {
            seed,
            rng: Xoshiro256StarStar::from_seed(seed),
        }
    }

    /// Create a fuzzer from a short numeric seed.
    pub fn from_u64(seed: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&seed.to_le_bytes());
        Self::new(Some(bytes))
    }

    /// Random integer in `[min, max]`.
    pub fn random_int(&mut self, min: i64, max: i64) -> i64 {
        self.rng.gen_range(min..=max)
    }

    /// Random index in `[0, bound)`.
    ///
    /// # Panics
    ///
    /// Panics if `bound` is zero.
    pub fn random_index(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound)
    }

    /// Random boolean that is `true` with the given probability.
    pub fn random_bool(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability)
    }

    /// Pick a random element from a non-empty slice.
    pub fn pick<'a, T>(&mut self, elements: &'a [T]) -> &'a T {
        let idx = self.rng.gen_range(0..elements.len());
        &elements[idx]
    }

    /// Run `callback` `times` times and collect the results.
    pub fn repeat<T, F>(&mut self, times: usize, mut callback: F) -> Vec<T>
    where
        F: FnMut(&mut Self) -> T,
    {
        (0..times).map(|_| callback(self)).collect()
    }
}
