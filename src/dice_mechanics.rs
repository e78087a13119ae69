//! Sources of die faces.
//!
//! A trial is two calls to [`DieSource::roll_die`]. Three sources are provided:
//!
//! - [`UniformDie`]: any infallible `rand` generator, sampled with
//!   `random_range(1..=6)` (unbiased uniform integer sampling).
//! - [`FallibleDie`]: a `TryRngCore` such as `OsRng`. Words are mapped to faces
//!   by rejection sampling, and generator errors surface as
//!   [`Error::RandomnessSourceFailure`].
//! - [`PairEnumeration`]: walks all 36 ordered pairs in order, forever.

use rand::rngs::{OsRng, SmallRng};
use rand::{Rng, SeedableRng, TryRngCore};

use crate::constants::{FACES, NUM_PAIRS};
use crate::error::{Error, Result};

/// Produces die faces in 1..=6.
pub trait DieSource {
    fn roll_die(&mut self) -> Result<u8>;
}

impl<S: DieSource + ?Sized> DieSource for &mut S {
    #[inline(always)]
    fn roll_die(&mut self) -> Result<u8> {
        (**self).roll_die()
    }
}

/// Reject faces a custom source may produce outside 1..=6.
#[inline(always)]
fn checked_face(face: u8) -> Result<u8> {
    if (1..=FACES).contains(&face) {
        Ok(face)
    } else {
        Err(Error::RandomnessSourceFailure(format!(
            "die face {face} outside 1..={FACES}"
        )))
    }
}

/// Roll one trial: two independent faces, first die first.
#[inline(always)]
pub fn roll_pair<S: DieSource + ?Sized>(source: &mut S) -> Result<(u8, u8)> {
    let d1 = checked_face(source.roll_die()?)?;
    let d2 = checked_face(source.roll_die()?)?;
    Ok((d1, d2))
}

// ── rand generators ─────────────────────────────────────────────────

/// Die backed by an infallible `rand` generator.
#[derive(Clone, Debug)]
pub struct UniformDie<R> {
    rng: R,
}

impl<R: Rng> UniformDie<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl UniformDie<SmallRng> {
    /// `SmallRng` seeded from a `u64`, the generator used by every seeded run.
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> DieSource for UniformDie<R> {
    #[inline(always)]
    fn roll_die(&mut self) -> Result<u8> {
        Ok(self.rng.random_range(1..=FACES))
    }
}

/// Largest multiple of 6 not exceeding `u32::MAX`; words at or above it are redrawn.
const REJECTION_LIMIT: u32 = u32::MAX - u32::MAX % FACES as u32;

/// Die backed by a generator that can fail.
#[derive(Debug)]
pub struct FallibleDie<R> {
    rng: R,
}

impl<R: TryRngCore> FallibleDie<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl FallibleDie<OsRng> {
    /// Operating-system entropy. Unseeded, so runs are not reproducible.
    pub fn os() -> Self {
        Self::new(OsRng)
    }
}

impl<R: TryRngCore> DieSource for FallibleDie<R> {
    fn roll_die(&mut self) -> Result<u8> {
        loop {
            let word = self
                .rng
                .try_next_u32()
                .map_err(|e| Error::RandomnessSourceFailure(e.to_string()))?;
            if word < REJECTION_LIMIT {
                return Ok((word % FACES as u32) as u8 + 1);
            }
        }
    }
}

// ── Deterministic enumeration ───────────────────────────────────────

/// Cycles through (1,1), (1,2), .., (1,6), (2,1), .., (6,6) and starts over.
///
/// Every block of 36 trials contains each ordered pair exactly once, so a run
/// whose length is a multiple of 36 reproduces the analytical table exactly.
#[derive(Clone, Debug, Default)]
pub struct PairEnumeration {
    /// Current pair, 0..36.
    pair: u32,
    /// Whether the next draw is the second die of `pair`.
    second: bool,
}

impl PairEnumeration {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DieSource for PairEnumeration {
    #[inline(always)]
    fn roll_die(&mut self) -> Result<u8> {
        let faces = FACES as u32;
        if self.second {
            let face = (self.pair % faces) as u8 + 1;
            self.second = false;
            self.pair = (self.pair + 1) % NUM_PAIRS;
            Ok(face)
        } else {
            self.second = true;
            Ok((self.pair / faces) as u8 + 1)
        }
    }
}
