//! # Value Noise Implementation
//!
//! Deterministic fractal value noise plus a sequential random stream.
//!
//! ## Two Kinds of Randomness
//!
//! - **Noise fields** (`noise1d`, `noise2d`) are pure functions of the
//!   coordinates and the seed. Sampling order does not matter.
//! - **The stream** (`next_int`, `next_float`, `next_float_range`) is
//!   sequential. Every value depends on every call that came before it.
//!
//! ## Determinism Guarantee
//!
//! Given the same `WorldSeed` and the same ordered sequence of stream calls,
//! this implementation produces **exactly** the same values on any platform.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The number every generated world grows from.
///
/// A seed only names a world; [`NoiseGenerator`] turns it into a noise
/// field and numbered random streams.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WorldSeed(u64);

impl WorldSeed {
    /// Wraps a raw seed.
    #[inline]
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Returns the raw seed value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl Default for WorldSeed {
    fn default() -> Self {
        Self(42)
    }
}

/// Stream id of the main sequential stream.
const MAIN_STREAM: u64 = 0;
/// Stream id reserved for the lattice salt. Fork purposes must not use it.
const SALT_STREAM: u64 = u64::MAX;
/// Lattice salts lie in `0..SALT_RANGE`, small enough that
/// `x + y * 57 + salt` stays well-distributed.
const SALT_RANGE: i32 = 0x0010_0000;

/// The ChaCha stream `id` of `seed`.
///
/// Streams of one seed share a key and never overlap, so each generation
/// concern can own one without perturbing the others.
fn chacha_stream(seed: WorldSeed, id: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed.value());
    rng.set_stream(id);
    rng
}

/// Lattice offset folded into every noise hash for `seed`.
fn lattice_salt(seed: WorldSeed) -> i32 {
    chacha_stream(seed, SALT_STREAM).gen_range(0..SALT_RANGE)
}

/// Seeded value-noise generator with an attached random stream.
///
/// # Example
///
/// ```rust
/// use tessera_world::noise::{NoiseGenerator, WorldSeed};
///
/// let mut noise = NoiseGenerator::new(WorldSeed::new(42));
///
/// let height = noise.noise1d(12.0 * 0.008, 1.0, 3, 0.4);
/// assert!((-1.0..=1.0).contains(&height));
///
/// let radius = noise.next_int(3, 8);
/// assert!((3..8).contains(&radius));
/// ```
pub struct NoiseGenerator {
    /// Seed this generator (and its noise field) was built from.
    seed: WorldSeed,
    /// Offset folded into every lattice hash.
    salt: i32,
    /// Sequential stream.
    stream: ChaCha8Rng,
}

impl NoiseGenerator {
    /// Creates a generator whose noise field and stream both derive from `seed`.
    #[must_use]
    pub fn new(seed: WorldSeed) -> Self {
        Self {
            seed,
            salt: lattice_salt(seed),
            stream: chacha_stream(seed, MAIN_STREAM),
        }
    }

    /// Resets the generator to the start of `seed`'s stream.
    pub fn initialize(&mut self, seed: WorldSeed) {
        *self = Self::new(seed);
    }

    /// Returns the seed this generator was built from.
    #[inline]
    #[must_use]
    pub const fn seed(&self) -> WorldSeed {
        self.seed
    }

    /// Creates a side generator for one generation concern.
    ///
    /// The fork samples the **same** noise field as `self` but draws from
    /// ChaCha stream `purpose` of the seed instead of the main stream 0.
    /// Drawing from the fork never perturbs the parent stream, and two
    /// forks with the same purpose replay the same values.
    ///
    /// `purpose` must be non-zero and below `u64::MAX`; both are reserved.
    #[must_use]
    pub fn fork(&self, purpose: u64) -> Self {
        debug_assert!(purpose != MAIN_STREAM && purpose != SALT_STREAM, "reserved stream {purpose}");
        Self { seed: self.seed, salt: self.salt, stream: chacha_stream(self.seed, purpose) }
    }

    // =========================================================================
    // Noise fields
    // =========================================================================

    /// Fractal 1D value noise.
    ///
    /// # Arguments
    ///
    /// * `x` - Sample coordinate
    /// * `frequency` - Base frequency, doubled per octave
    /// * `octaves` - Number of noise layers
    /// * `persistence` - Amplitude decay per octave
    ///
    /// # Returns
    ///
    /// A value in the range [-1, 1].
    #[must_use]
    pub fn noise1d(&self, x: f64, frequency: f64, octaves: u32, persistence: f64) -> f64 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = frequency;
        let mut max_amplitude = 0.0;

        for _ in 0..octaves {
            total += self.interpolated1d(x * frequency) * amplitude;
            max_amplitude += amplitude;
            amplitude *= persistence;
            frequency *= 2.0;
        }

        if max_amplitude > 0.0 {
            total / max_amplitude
        } else {
            0.0
        }
    }

    /// Fractal 2D value noise.
    ///
    /// Same octave scheme as [`noise1d`](Self::noise1d), sampled over a
    /// 2D lattice.
    #[must_use]
    pub fn noise2d(&self, x: f64, y: f64, frequency: f64, octaves: u32, persistence: f64) -> f64 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = frequency;
        let mut max_amplitude = 0.0;

        for _ in 0..octaves {
            total += self.interpolated2d(x * frequency, y * frequency) * amplitude;
            max_amplitude += amplitude;
            amplitude *= persistence;
            frequency *= 2.0;
        }

        if max_amplitude > 0.0 {
            total / max_amplitude
        } else {
            0.0
        }
    }

    #[inline]
    fn interpolated1d(&self, x: f64) -> f64 {
        let cell = lattice_floor(x);
        let t = fade(x - f64::from(cell));

        let a = lattice(cell.wrapping_add(self.salt));
        let b = lattice(cell.wrapping_add(1).wrapping_add(self.salt));
        lerp(a, b, t)
    }

    #[inline]
    fn interpolated2d(&self, x: f64, y: f64) -> f64 {
        let cx = lattice_floor(x);
        let cy = lattice_floor(y);
        let tx = fade(x - f64::from(cx));
        let ty = fade(y - f64::from(cy));

        let corner = |dx: i32, dy: i32| {
            let n = cx
                .wrapping_add(dx)
                .wrapping_add(cy.wrapping_add(dy).wrapping_mul(57))
                .wrapping_add(self.salt);
            lattice(n)
        };

        let top = lerp(corner(0, 0), corner(1, 0), tx);
        let bottom = lerp(corner(0, 1), corner(1, 1), tx);
        lerp(top, bottom, ty)
    }

    // =========================================================================
    // Sequential stream
    // =========================================================================

    /// Draws an integer in the half-open range `[min, max)`.
    ///
    /// Returns `min` when the range is empty.
    pub fn next_int(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.stream.gen_range(min..max)
    }

    /// Draws a float in `[0, 1)`.
    pub fn next_float(&mut self) -> f64 {
        self.stream.gen::<f64>()
    }

    /// Draws a float in `[min, max)`.
    pub fn next_float_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_float() * (max - min)
    }
}

/// Integer lattice hash mapped to `(-1, 1]`.
#[inline]
fn lattice(n: i32) -> f64 {
    let n = n.wrapping_shl(13) ^ n;
    let m = n
        .wrapping_mul(n.wrapping_mul(n).wrapping_mul(15_731).wrapping_add(789_221))
        .wrapping_add(1_376_312_589)
        & 0x7fff_ffff;
    1.0 - f64::from(m) / 1_073_741_824.0
}

/// Quintic fade curve `6t^5 - 15t^4 + 10t^3`.
#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[inline]
#[allow(clippy::cast_possible_truncation)]
fn lattice_floor(x: f64) -> i32 {
    x.floor() as i32
}
