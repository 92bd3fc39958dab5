//! Seeded random source.
//!
//! Every draw in the engine goes through a [`SeededSource`]: the seed, the
//! `StdRng` stream derived from it, and the rejection-sampling budget
//! (`max_retries`). Identical seeds give identical draw sequences.
//!
//! Callers normally own a source and pass `&mut` down. A process-wide default
//! lives behind [`global`]; code that depends on a particular seed must hold
//! its lock across the whole reseed-then-generate sequence (see
//! [`with_global`]).

use crate::error::GenError;
use crate::predicate::Pred;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, OnceLock};

pub const DEFAULT_MAX_RETRIES: u32 = 100;

/// A `[min, max]` interval with a selection weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedRange<T> {
    pub min: T,
    pub max: T,
    pub weight: f64,
}

impl<T> WeightedRange<T> {
    pub fn new(min: T, max: T, weight: f64) -> Self {
        Self { min, max, weight }
    }
}

/// Length of a generated string: exact, or drawn uniformly from `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringLength {
    Exact(usize),
    Between(usize, usize),
}

impl StringLength {
    /// Exact length from a signed request; negative lengths are rejected.
    pub fn exact(len: i64) -> Result<Self, GenError> {
        usize::try_from(len)
            .map(StringLength::Exact)
            .map_err(|_| GenError::InvalidArgument(format!("string length must be >= 0, got {len}")))
    }

    pub fn between(min: usize, max: usize) -> Result<Self, GenError> {
        if min > max {
            return Err(GenError::InvalidArgument(format!(
                "string min length {min} exceeds max length {max}"
            )));
        }
        Ok(StringLength::Between(min, max))
    }

    /// Upper bound on the produced length.
    pub fn max_len(&self) -> usize {
        match *self {
            StringLength::Exact(n) => n,
            StringLength::Between(_, max) => max,
        }
    }
}

impl Default for StringLength {
    fn default() -> Self {
        StringLength::Between(1, 20)
    }
}

#[derive(Debug, Clone)]
pub struct SeededSource {
    seed: u64,
    rng: StdRng,
    max_retries: u32,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Seed from the wall clock.
    pub fn from_time() -> Self {
        Self::new(time_seed())
    }

    /// Set the seed and restart the stream from it. `None` leaves the
    /// source untouched.
    pub fn reseed(&mut self, seed: Option<u64>) {
        if let Some(seed) = seed {
            self.seed = seed;
            self.rng = StdRng::seed_from_u64(seed);
        }
    }

    pub fn current_seed(&self) -> u64 {
        self.seed
    }

    /// Restart the stream from the current seed.
    pub fn refresh(&mut self) {
        self.rng = StdRng::seed_from_u64(self.seed);
    }

    pub fn set_max_retries(&mut self, max_retries: u32) {
        self.max_retries = max_retries;
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Raw stream, for callers that need a draw the source does not offer.
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    // ─── Primitive draws ─────────────────────────────────────────────

    /// Uniform integer in `[min, max]`.
    pub fn integer(&mut self, min: i64, max: i64, pred: Option<&Pred<i64>>) -> Result<i64, GenError> {
        if min > max {
            return Err(GenError::InvalidArgument(format!(
                "integer min {min} exceeds max {max}"
            )));
        }
        self.draw_until("integer", pred, |src| Ok(src.rng.gen_range(min..=max)))
    }

    /// Uniform float in `[min, max]`; reversed bounds are swapped.
    pub fn float(&mut self, min: f64, max: f64, pred: Option<&Pred<f64>>) -> Result<f64, GenError> {
        check_finite(min, max)?;
        let (lo, hi) = if min > max { (max, min) } else { (min, max) };
        self.draw_until("float", pred, |src| Ok(src.unit_interp(lo, hi)))
    }

    /// True with probability `p`. `p >= 1` is always true, `p <= 0` (or NaN)
    /// always false.
    pub fn boolean(&mut self, p: f64) -> bool {
        if p.is_nan() || p <= 0.0 {
            false
        } else if p >= 1.0 {
            true
        } else {
            self.rng.gen_bool(p)
        }
    }

    /// Uniform pick from `items`.
    pub fn choice<T: Clone>(&mut self, items: &[T]) -> Result<T, GenError> {
        if items.is_empty() {
            return Err(GenError::EmptyDomain("choice from an empty list".into()));
        }
        let idx = self.rng.gen_range(0..items.len());
        Ok(items[idx].clone())
    }

    /// Random string over `charset`.
    pub fn string(&mut self, length: StringLength, charset: &[char]) -> Result<String, GenError> {
        if charset.is_empty() && length.max_len() > 0 {
            return Err(GenError::EmptyDomain("string charset is empty".into()));
        }
        let len = match length {
            StringLength::Exact(n) => n,
            StringLength::Between(min, max) => {
                if min > max {
                    return Err(GenError::InvalidArgument(format!(
                        "string min length {min} exceeds max length {max}"
                    )));
                }
                self.rng.gen_range(min..=max)
            }
        };
        Ok((0..len)
            .map(|_| charset[self.rng.gen_range(0..charset.len())])
            .collect())
    }

    /// Pick a range by normalized weight, then draw uniformly inside it.
    /// With a predicate, the two-stage draw is retried as a whole.
    pub fn weighted_integer(
        &mut self,
        ranges: &[WeightedRange<i64>],
        pred: Option<&Pred<i64>>,
    ) -> Result<i64, GenError> {
        check_weights(ranges)?;
        if let Some(r) = ranges.iter().find(|r| r.min > r.max) {
            return Err(GenError::InvalidArgument(format!(
                "weighted range min {} exceeds max {}",
                r.min, r.max
            )));
        }
        self.draw_until("weighted integer", pred, |src| {
            let r = src.pick_range(ranges);
            Ok(src.rng.gen_range(r.min..=r.max))
        })
    }

    pub fn weighted_float(
        &mut self,
        ranges: &[WeightedRange<f64>],
        pred: Option<&Pred<f64>>,
    ) -> Result<f64, GenError> {
        check_weights(ranges)?;
        for r in ranges {
            check_finite(r.min, r.max)?;
        }
        self.draw_until("weighted float", pred, |src| {
            let r = src.pick_range(ranges);
            let (lo, hi) = if r.min > r.max { (r.max, r.min) } else { (r.min, r.max) };
            Ok(src.unit_interp(lo, hi))
        })
    }

    // ─── Rejection sampling ──────────────────────────────────────────

    /// Draw once without a predicate; with one, draw up to `max_retries`
    /// times until it holds.
    pub(crate) fn draw_until<T>(
        &mut self,
        what: &str,
        pred: Option<&Pred<T>>,
        mut draw: impl FnMut(&mut Self) -> Result<T, GenError>,
    ) -> Result<T, GenError> {
        let Some(pred) = pred else {
            return draw(self);
        };
        for _ in 0..self.max_retries {
            let candidate = draw(self)?;
            if pred.evaluate(&candidate) {
                return Ok(candidate);
            }
        }
        Err(GenError::exhausted(what, self.max_retries))
    }

    fn pick_range<'a, T>(&mut self, ranges: &'a [WeightedRange<T>]) -> &'a WeightedRange<T> {
        self.pick_weighted(ranges, |r| r.weight)
    }

    /// Weighted pick over a non-empty slice of positively weighted items.
    pub(crate) fn pick_weighted<'a, T>(&mut self, items: &'a [T], weight: impl Fn(&T) -> f64) -> &'a T {
        let total_weight: f64 = items.iter().map(&weight).sum();
        let mut pick = self.rng.gen::<f64>() * total_weight;
        for item in items {
            pick -= weight(item);
            if pick <= 0.0 {
                return item;
            }
        }
        &items[items.len() - 1]
    }

    /// `lo + u * (hi - lo)` without overflowing when the span exceeds `f64::MAX`.
    fn unit_interp(&mut self, lo: f64, hi: f64) -> f64 {
        let u: f64 = self.rng.gen();
        (lo * (1.0 - u) + hi * u).clamp(lo, hi)
    }
}

impl Default for SeededSource {
    fn default() -> Self {
        Self::from_time()
    }
}

pub(crate) fn check_weights<T>(ranges: &[WeightedRange<T>]) -> Result<(), GenError> {
    if ranges.is_empty() {
        return Err(GenError::EmptyDomain("no weighted ranges".into()));
    }
    if let Some(r) = ranges.iter().find(|r| !(r.weight.is_finite() && r.weight > 0.0)) {
        return Err(GenError::InvalidArgument(format!(
            "range weight must be positive and finite, got {}",
            r.weight
        )));
    }
    Ok(())
}

pub(crate) fn check_finite(min: f64, max: f64) -> Result<(), GenError> {
    if !min.is_finite() || !max.is_finite() {
        return Err(GenError::InvalidArgument(format!(
            "float bounds must be finite, got [{min}, {max}]"
        )));
    }
    Ok(())
}

fn time_seed() -> u64 {
    let now = chrono::Utc::now();
    now.timestamp_nanos_opt()
        .map_or(now.timestamp() as u64, |nanos| nanos as u64)
}

// ─── Process-wide default ────────────────────────────────────────────

static GLOBAL: OnceLock<Mutex<SeededSource>> = OnceLock::new();

/// The process-wide default source, seeded from the clock on first use.
pub fn global() -> &'static Mutex<SeededSource> {
    GLOBAL.get_or_init(|| Mutex::new(SeededSource::from_time()))
}

/// Run `f` with exclusive access to the default source.
pub fn with_global<R>(f: impl FnOnce(&mut SeededSource) -> R) -> R {
    let mut guard = global().lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    f(&mut guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_draws() {
        let mut a = SeededSource::new(42);
        let mut b = SeededSource::new(42);
        for _ in 0..20 {
            assert_eq!(a.integer(0, 1000, None).unwrap(), b.integer(0, 1000, None).unwrap());
        }
    }

    #[test]
    fn refresh_restarts_stream() {
        let mut src = SeededSource::new(7);
        let first: Vec<i64> = (0..5).map(|_| src.integer(0, 100, None).unwrap()).collect();
        src.refresh();
        let again: Vec<i64> = (0..5).map(|_| src.integer(0, 100, None).unwrap()).collect();
        assert_eq!(first, again);
    }

    #[test]
    fn reseed_none_is_noop() {
        let mut src = SeededSource::new(7);
        src.reseed(None);
        assert_eq!(src.current_seed(), 7);
        src.reseed(Some(9));
        assert_eq!(src.current_seed(), 9);
    }

    #[test]
    fn integer_rejects_reversed_bounds() {
        let mut src = SeededSource::new(1);
        let err = src.integer(5, 1, None).unwrap_err();
        assert!(matches!(err, GenError::InvalidArgument(_)));
    }

    #[test]
    fn float_swaps_reversed_bounds() {
        let mut src = SeededSource::new(1);
        for _ in 0..100 {
            let x = src.float(1.0, 0.0, None).unwrap();
            assert!((0.0..=1.0).contains(&x));
        }
    }

    #[test]
    fn float_rejects_non_finite_bounds() {
        let mut src = SeededSource::new(1);
        assert!(src.float(0.0, f64::INFINITY, None).is_err());
        assert!(src.float(f64::NAN, 1.0, None).is_err());
    }

    #[test]
    fn float_handles_full_span() {
        let mut src = SeededSource::new(1);
        let x = src.float(f64::MIN, f64::MAX, None).unwrap();
        assert!(x.is_finite());
    }

    #[test]
    fn boolean_degenerate_probabilities() {
        let mut src = SeededSource::new(3);
        for _ in 0..50 {
            assert!(src.boolean(1.0));
            assert!(src.boolean(2.0));
            assert!(!src.boolean(0.0));
            assert!(!src.boolean(-1.0));
            assert!(!src.boolean(f64::NAN));
        }
    }

    #[test]
    fn empty_choice_fails() {
        let mut src = SeededSource::new(3);
        let empty: [i64; 0] = [];
        assert!(matches!(src.choice(&empty), Err(GenError::EmptyDomain(_))));
    }

    #[test]
    fn string_exact_and_range_lengths() {
        let mut src = SeededSource::new(5);
        let charset: Vec<char> = "abc".chars().collect();
        let s = src.string(StringLength::Exact(8), &charset).unwrap();
        assert_eq!(s.len(), 8);
        assert!(s.chars().all(|c| charset.contains(&c)));

        for _ in 0..50 {
            let s = src.string(StringLength::Between(2, 4), &charset).unwrap();
            assert!((2..=4).contains(&s.len()));
        }
        assert_eq!(src.string(StringLength::Exact(0), &[]).unwrap(), "");
    }

    #[test]
    fn string_length_validation() {
        assert!(StringLength::exact(-1).is_err());
        assert!(StringLength::between(5, 2).is_err());
        let mut src = SeededSource::new(5);
        assert!(matches!(
            src.string(StringLength::Exact(3), &[]),
            Err(GenError::EmptyDomain(_))
        ));
    }

    #[test]
    fn predicate_exhaustion_reports_budget() {
        let mut src = SeededSource::new(11);
        src.set_max_retries(5);
        let never = Pred::new(|_: &i64| false);
        let err = src.integer(0, 10, Some(&never)).unwrap_err();
        assert_eq!(err.to_string(), "no valid integer found after 5 attempts");
    }

    #[test]
    fn zero_budget_fails_immediately_with_predicate() {
        let mut src = SeededSource::new(11);
        src.set_max_retries(0);
        let always = Pred::new(|_: &i64| true);
        assert!(src.integer(0, 10, Some(&always)).is_err());
        // Without a predicate a single draw is still made.
        assert!(src.integer(0, 10, None).is_ok());
    }

    #[test]
    fn weighted_ranges_validated() {
        let mut src = SeededSource::new(1);
        assert!(matches!(
            src.weighted_integer(&[], None),
            Err(GenError::EmptyDomain(_))
        ));
        assert!(src
            .weighted_integer(&[WeightedRange::new(0, 10, 0.0)], None)
            .is_err());
        assert!(src
            .weighted_float(&[WeightedRange::new(0.0, 1.0, f64::NAN)], None)
            .is_err());
    }

    #[test]
    fn weighted_integer_respects_weights() {
        let mut src = SeededSource::new(42);
        let ranges = [WeightedRange::new(0, 10, 0.9), WeightedRange::new(90, 100, 0.1)];
        let low = (0..1000)
            .filter(|_| src.weighted_integer(&ranges, None).unwrap() <= 10)
            .count();
        assert!((800..=1000).contains(&low), "low-range count {low}");
    }

    #[test]
    fn with_global_holds_lock_across_sequence() {
        let (a, b) = with_global(|src| {
            src.reseed(Some(123));
            let a = src.integer(0, 1_000_000, None).unwrap();
            src.refresh();
            let b = src.integer(0, 1_000_000, None).unwrap();
            (a, b)
        });
        assert_eq!(a, b);
    }
}
