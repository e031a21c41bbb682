// ── Generation RNG ──
//
// One pseudo-random stream per generation run, shared by every generator
// through `&mut`. Timestamps are computed from a fixed reference time so
// the same seed yields byte-identical output.

use std::ops::RangeInclusive;

use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::distributions::uniform::SampleUniform;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Reference time used when none is configured: 2026-01-01T00:00:00Z.
pub const DEFAULT_REFERENCE_UNIX: i64 = 1_767_225_600;

const UPPER_ALNUM: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const DIGITS: &[u8] = b"0123456789";

/// Returns the default reference time.
pub fn default_reference_time() -> DateTime<Utc> {
    Utc.timestamp_opt(DEFAULT_REFERENCE_UNIX, 0)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}

/// Seeded random state threaded through every generator.
#[derive(Debug, Clone)]
pub struct GenerationRng {
    rng: StdRng,
    reference_time: DateTime<Utc>,
}

impl GenerationRng {
    /// Deterministic stream for `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            reference_time: default_reference_time(),
        }
    }

    /// Seeded when `seed` is set, otherwise drawn from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self {
                rng: StdRng::from_entropy(),
                reference_time: default_reference_time(),
            },
        }
    }

    pub fn with_reference_time(mut self, reference_time: DateTime<Utc>) -> Self {
        self.reference_time = reference_time;
        self
    }

    /// The instant every "N minutes ago" timestamp is measured from.
    pub fn reference_time(&self) -> DateTime<Utc> {
        self.reference_time
    }

    // ── Primitive draws ──────────────────────────────────────────────

    /// `true` with the given probability.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability.clamp(0.0, 1.0))
    }

    /// Uniform draw from an inclusive range.
    pub fn range<T>(&mut self, range: RangeInclusive<T>) -> T
    where
        T: SampleUniform + PartialOrd,
    {
        self.rng.gen_range(range)
    }

    /// Uniform pick from a slice; `None` when empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    /// Weighted pick from a slice; `None` when empty or all weights are zero.
    pub fn pick_weighted<'a, T, F>(&mut self, items: &'a [T], weight: F) -> Option<&'a T>
    where
        F: Fn(&T) -> u32,
    {
        items.choose_weighted(&mut self.rng, weight).ok()
    }

    // ── Formatted draws ──────────────────────────────────────────────

    /// Upper-case letters and digits.
    pub fn alphanumeric(&mut self, len: usize) -> String {
        self.from_charset(UPPER_ALNUM, len)
    }

    pub fn digits(&mut self, len: usize) -> String {
        self.from_charset(DIGITS, len)
    }

    /// `count` lower-case hex octets joined by `:`.
    pub fn hex_octets(&mut self, count: usize) -> String {
        (0..count)
            .map(|_| format!("{:02x}", self.rng.gen_range(0..=u8::MAX)))
            .collect::<Vec<_>>()
            .join(":")
    }

    // ── Time draws ───────────────────────────────────────────────────

    pub fn minutes_ago(&mut self, range: RangeInclusive<i64>) -> DateTime<Utc> {
        let minutes = self.range(range);
        self.before(Duration::minutes(minutes))
    }

    pub fn hours_ago(&mut self, range: RangeInclusive<i64>) -> DateTime<Utc> {
        let hours = self.range(range);
        self.before(Duration::hours(hours))
    }

    pub fn days_ago(&mut self, range: RangeInclusive<i64>) -> DateTime<Utc> {
        let days = self.range(range);
        self.before(Duration::days(days))
    }

    // ── Private helpers ──────────────────────────────────────────────

    /// Saturates at the earliest representable instant.
    fn before(&self, offset: Duration) -> DateTime<Utc> {
        self.reference_time
            .checked_sub_signed(offset)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    fn from_charset(&mut self, charset: &[u8], len: usize) -> String {
        (0..len)
            .filter_map(|_| charset.choose(&mut self.rng).map(|&b| char::from(b)))
            .collect()
    }
}

/// RFC 3339 with a `Z` suffix and second precision, as the Dashboard API emits.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}
