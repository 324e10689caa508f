//! Xorshift PRNG: deterministic under a fixed seed, no dependencies.

pub struct Rng(u32);

impl Rng {
    #[must_use]
    pub const fn new(seed: u32) -> Self {
        // xorshift has a single absorbing state at zero
        if seed == 0 {
            Self(0x9E37_79B9)
        } else {
            Self(seed)
        }
    }

    pub fn next(&mut self) -> u32 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 17;
        self.0 ^= self.0 << 5;
        self.0
    }

    /// Uniform-ish value in `0..max`. `max` must be non-zero.
    pub fn range(&mut self, max: u32) -> u32 {
        self.next() % max
    }

    pub fn coin(&mut self) -> bool {
        self.next() & 1 == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_under_fixed_seed() {
        let mut a = Rng::new(0xCAFE_BABE);
        let mut b = Rng::new(0xCAFE_BABE);
        for _ in 0..64 {
            assert_eq!(a.next(), b.next());
        }
    }

    #[test]
    fn zero_seed_does_not_stick() {
        let mut rng = Rng::new(0);
        assert_ne!(rng.next(), 0);
        assert_ne!(rng.next(), rng.next());
    }

    #[test]
    fn range_stays_in_bounds() {
        let mut rng = Rng::new(7);
        for _ in 0..256 {
            assert!(rng.range(55) < 55);
        }
    }
}
