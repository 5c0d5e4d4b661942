// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use crate::fixed64::Fixed64;

const STATE_WORDS: usize = 624;
const SHIFT_WORDS: usize = 397;
const MATRIX_A: u32 = 0x9908_b0df;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7fff_ffff;
const DEFAULT_SEED: u32 = 5489;
const ARRAY_SEED: u32 = 19_650_218;

/// Seeded MT19937 generator for deterministic timelines.
///
/// * Not cryptographically secure; use only for gameplay/state simulation.
/// * Identical seeds yield identical sequences on every platform and build.
/// * Draws take `&mut self`. Share an instance across threads only behind
///   external synchronization; prefer one generator per simulation.
#[derive(Clone)]
pub struct DeterministicRandom {
    state: [u32; STATE_WORDS],
    index: usize,
}

impl core::fmt::Debug for DeterministicRandom {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DeterministicRandom")
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl Default for DeterministicRandom {
    /// Generator seeded with the reference default seed `5489`.
    fn default() -> Self {
        Self::from_seed(DEFAULT_SEED)
    }
}

impl DeterministicRandom {
    /// Constructs a generator from a single 32-bit seed.
    pub fn from_seed(seed: u32) -> Self {
        let mut state = [0u32; STATE_WORDS];
        state[0] = seed;
        for i in 1..STATE_WORDS {
            let prev = state[i - 1];
            state[i] = 1_812_433_253u32
                .wrapping_mul(prev ^ (prev >> 30))
                .wrapping_add(i as u32);
        }
        Self {
            state,
            index: STATE_WORDS,
        }
    }

    /// Constructs a generator from a seed array, mixing every key word into
    /// the whole state.
    ///
    /// The key is not validated; an empty key seeds exactly like `[0]`.
    pub fn from_seed_array(key: &[u32]) -> Self {
        let key: &[u32] = if key.is_empty() { &[0] } else { key };
        let mut rng = Self::from_seed(ARRAY_SEED);
        let mt = &mut rng.state;

        let mut i = 1usize;
        let mut j = 0usize;
        for _ in 0..STATE_WORDS.max(key.len()) {
            let prev = mt[i - 1];
            mt[i] = (mt[i] ^ (prev ^ (prev >> 30)).wrapping_mul(1_664_525))
                .wrapping_add(key[j])
                .wrapping_add(j as u32);
            i += 1;
            j += 1;
            if i >= STATE_WORDS {
                mt[0] = mt[STATE_WORDS - 1];
                i = 1;
            }
            if j >= key.len() {
                j = 0;
            }
        }
        for _ in 0..STATE_WORDS - 1 {
            let prev = mt[i - 1];
            mt[i] = (mt[i] ^ (prev ^ (prev >> 30)).wrapping_mul(1_566_083_941))
                .wrapping_sub(i as u32);
            i += 1;
            if i >= STATE_WORDS {
                mt[0] = mt[STATE_WORDS - 1];
                i = 1;
            }
        }
        // guarantees a non-zero state
        mt[0] = UPPER_MASK;
        rng
    }

    fn twist(&mut self) {
        let mt = &mut self.state;
        for k in 0..STATE_WORDS {
            let y = (mt[k] & UPPER_MASK) | (mt[(k + 1) % STATE_WORDS] & LOWER_MASK);
            let mag = if y & 1 == 0 { 0 } else { MATRIX_A };
            mt[k] = mt[(k + SHIFT_WORDS) % STATE_WORDS] ^ (y >> 1) ^ mag;
        }
        self.index = 0;
    }

    /// Next tempered 32-bit word.
    pub fn next_u32(&mut self) -> u32 {
        if self.index >= STATE_WORDS {
            self.twist();
        }
        let mut y = self.state[self.index];
        self.index += 1;

        y ^= y >> 11;
        y ^= (y << 7) & 0x9d2c_5680;
        y ^= (y << 15) & 0xefc6_0000;
        y ^ (y >> 18)
    }

    /// Next non-negative 31-bit integer (the high 31 bits of a word).
    pub fn next_i31(&mut self) -> i32 {
        (self.next_u32() >> 1) as i32
    }

    /// Next value uniformly in `[0, 1)`: `next_i31 / 2^31`, which is exact
    /// in Q31.32.
    pub fn next_fixed(&mut self) -> Fixed64 {
        Fixed64::from_raw(i64::from(self.next_i31()) << 1)
    }

    /// Integer in the half-open range `[min, max)`.
    ///
    /// Reversed bounds are swapped; an empty range returns `min`. Uses
    /// `min + next_i31 % span`, which carries a small modulo bias for spans
    /// that do not divide 2^31.
    pub fn range_i32(&mut self, min: i32, max: i32) -> i32 {
        let (min, max) = if min > max { (max, min) } else { (min, max) };
        if min == max {
            return min;
        }
        let span = i64::from(max) - i64::from(min);
        let offset = i64::from(self.next_i31()) % span;
        (i64::from(min) + offset) as i32
    }

    /// Fixed-point value in `[min, max]` at 1/1000 resolution.
    ///
    /// Both bounds are scaled to thousandths (truncated toward zero), an
    /// integer `k` is drawn as `floor((max_m - min_m + 1) · next_fixed) +
    /// min_m`, and the result is `k / 1000` rounded half away from zero,
    /// clamped to `[min, max]`. Reversed bounds are swapped.
    pub fn range_fixed(&mut self, min: Fixed64, max: Fixed64) -> Fixed64 {
        let (min, max) = if min > max { (max, min) } else { (min, max) };
        let min_m = to_thousandths(min);
        let span = i128::from(to_thousandths(max) - min_m + 1);
        let draw = i128::from(self.next_fixed().raw());
        // `draw` < 2^32, so the product is exact and `>>` floors.
        let k = ((span * draw) >> 32) as i64 + min_m;
        from_thousandths(k).clamp(min, max)
    }
}

/// `k / 1000` at full Q31.32 precision. `|k| < 2^42`, so the shifted
/// numerator fits comfortably in `i128`.
fn from_thousandths(k: i64) -> Fixed64 {
    let magnitude = ((i128::from(k.unsigned_abs()) << 32) + 500) / 1000;
    let raw = magnitude as i64;
    Fixed64::from_raw(if k < 0 { -raw } else { raw })
}

/// `value · 1000`, truncated toward zero.
fn to_thousandths(value: Fixed64) -> i64 {
    let scaled = i128::from(value.raw()) * 1000;
    let magnitude = (scaled.unsigned_abs() >> 32) as i64;
    if scaled < 0 {
        -magnitude
    } else {
        magnitude
    }
}
