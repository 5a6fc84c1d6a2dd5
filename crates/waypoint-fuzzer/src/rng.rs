//! Per-walk random source.
//!
//! A 64-bit linear congruential generator, `state = state * M + C` with
//! wrapping arithmetic. Each walk gets its own generator seeded from
//! `(session_seed + iteration)`. Same seed -> same walks, always.

use rand::RngCore;

const MULTIPLIER: u64 = 6364136223846793005;
const INCREMENT: u64 = 1442695040888963407;

/// Deterministic random source driving one walk's decisions.
///
/// Two generators built with the same seed produce identical sequences,
/// which is what makes a session replayable from its recorded seed.
#[derive(Debug, Clone)]
pub struct WalkRng {
    state: u64,
}

impl WalkRng {
    pub fn new(seed: u64) -> WalkRng {
        WalkRng { state: seed }
    }

    /// Create a deterministic generator for one walk of a session, from the
    /// session seed and the walk's iteration index. Walks draw disjoint
    /// streams whether they run sequentially or in parallel.
    pub fn for_walk(session_seed: u64, iteration: u64) -> WalkRng {
        WalkRng::new(session_seed.wrapping_add(iteration))
    }

    /// Advances the generator and returns the new state.
    pub fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(INCREMENT);
        self.state
    }

    /// Uniform index into a collection of `len` elements. `len` must be
    /// non-zero.
    pub fn pick_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "pick_index needs a non-empty collection");
        (self.next_u64() % len as u64) as usize
    }

    /// Coin flip landing heads with probability `p`.
    ///
    /// Out-of-range probabilities clamp: `p <= 0` is always tails and draws
    /// nothing, `p >= 1` is always heads and draws nothing.
    pub fn coin(&mut self, p: f64) -> bool {
        if p <= 0.0 {
            return false;
        }
        if p >= 1.0 {
            return true;
        }
        let threshold = (p * u64::MAX as f64) as u64;
        self.next_u64() <= threshold
    }
}

impl RngCore for WalkRng {
    fn next_u32(&mut self) -> u32 {
        (WalkRng::next_u64(self) >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        WalkRng::next_u64(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = WalkRng::next_u64(self).to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
