/// Per-window next-character distributions and inverse-CDF sampling.

use rustc_hash::FxHashMap;

/// Character returned by [`sample_next`] when no cumulative probability
/// exceeds the draw. A normalized distribution only hits it for draws within
/// [`CUMULATIVE_TOLERANCE`] of its final cumulative probability.
pub const FALLBACK_CHAR: char = ' ';

/// Rounding slack allowed on a normalized distribution's final cumulative
/// probability.
pub const CUMULATIVE_TOLERANCE: f64 = 1e-9;

/// One distinct character observed to follow a window.
#[derive(Debug, Clone, PartialEq)]
pub struct CharObservation {
    pub character: char,
    pub count: u64,
    /// `count / total`, set by [`normalize`].
    pub probability: f64,
    /// Prefix sum of `probability` in insertion order, set by [`normalize`].
    pub cumulative_probability: f64,
}

impl CharObservation {
    fn first(character: char) -> Self {
        Self {
            character,
            count: 1,
            probability: 0.0,
            cumulative_probability: 0.0,
        }
    }
}

/// Ordered set of observations for a single window.
///
/// Entries keep first-occurrence order; a side index from character to
/// position makes repeat observations constant time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowDistribution {
    entries: Vec<CharObservation>,
    index: FxHashMap<char, usize>,
}

impl WindowDistribution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of `character` following this window.
    ///
    /// Bumps the existing entry's count, or appends a new entry with count 1.
    pub fn observe(&mut self, character: char) {
        match self.index.get(&character) {
            Some(&pos) => self.entries[pos].count += 1,
            None => {
                self.index.insert(character, self.entries.len());
                self.entries.push(CharObservation::first(character));
            }
        }
    }

    /// Entries in first-occurrence order.
    pub fn entries(&self) -> &[CharObservation] {
        &self.entries
    }

    pub fn get(&self, character: char) -> Option<&CharObservation> {
        self.index.get(&character).map(|&pos| &self.entries[pos])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all observation counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.count).sum()
    }
}

/// Compute `probability` and `cumulative_probability` for every entry from
/// the counts alone, leaving entry order untouched.
///
/// Recomputes from scratch each call, so repeated calls without new
/// observations produce bit-identical values.
pub fn normalize(distribution: &mut WindowDistribution) {
    let total = distribution.total();
    if total == 0 {
        return;
    }

    let mut cumulative = 0.0;
    for entry in &mut distribution.entries {
        entry.probability = entry.count as f64 / total as f64;
        cumulative += entry.probability;
        entry.cumulative_probability = cumulative;
    }
}

/// Inverse-CDF draw: the first entry whose cumulative probability strictly
/// exceeds `random_fraction` (expected in `[0, 1)`).
///
/// Falls back to [`FALLBACK_CHAR`] if nothing qualifies.
pub fn sample_next(distribution: &WindowDistribution, random_fraction: f64) -> char {
    distribution
        .entries
        .iter()
        .find(|entry| entry.cumulative_probability > random_fraction)
        .map(|entry| entry.character)
        .unwrap_or_else(|| {
            let last_cp = distribution
                .entries
                .last()
                .map_or(0.0, |e| e.cumulative_probability);
            debug_assert!(
                distribution.is_empty() || random_fraction >= last_cp - CUMULATIVE_TOLERANCE,
                "sampler fallback reached for draw {} (last cp {})",
                random_fraction,
                last_cp
            );
            log::warn!(
                "no cumulative probability exceeds draw {}; emitting fallback",
                random_fraction
            );
            FALLBACK_CHAR
        })
}
