/// Character-level Markov model: training and text generation.

use rand::Rng;
use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use std::fmt;
use thiserror::Error;

use crate::core::corpus::CharSource;
use crate::core::distribution::{normalize, sample_next, WindowDistribution};

#[derive(Debug, Error)]
pub enum MarkovError {
    #[error("window length must be at least 1 (got {0})")]
    InvalidWindowLength(usize),
    #[error("corpus too short: need {required} characters for the first window, found {found}")]
    InsufficientCorpus { required: usize, found: usize },
    #[error("corpus read error: {0}")]
    CorpusRead(#[from] std::io::Error),
}

/// A trained character model: fixed window length plus the
/// window → next-character distribution table.
///
/// Populated only by [`LanguageModel::train`], which builds the table from
/// empty and normalizes every distribution before returning it.
#[derive(Debug, Clone)]
pub struct LanguageModel {
    window_length: usize,
    windows: FxHashMap<String, WindowDistribution>,
}

impl LanguageModel {
    /// Create an empty model. `window_length` must be positive.
    pub fn new(window_length: usize) -> Result<Self, MarkovError> {
        if window_length == 0 {
            return Err(MarkovError::InvalidWindowLength(window_length));
        }
        Ok(Self {
            window_length,
            windows: FxHashMap::default(),
        })
    }

    /// Train a fresh model from a corpus stream.
    ///
    /// Slides a `window_length`-character window across the stream, counting
    /// which character follows each window, then normalizes every
    /// distribution. On error no model is returned.
    pub fn train<S: CharSource + ?Sized>(
        window_length: usize,
        source: &mut S,
    ) -> Result<Self, MarkovError> {
        let mut model = Self::new(window_length)?;
        log::debug!("training with window length {}", window_length);

        let mut window: VecDeque<char> = VecDeque::with_capacity(window_length + 1);
        while window.len() < window_length {
            match source.read_char()? {
                Some(c) => window.push_back(c),
                None => {
                    return Err(MarkovError::InsufficientCorpus {
                        required: window_length,
                        found: window.len(),
                    })
                }
            }
        }

        let mut key: String = window.iter().collect();
        let mut observed = 0usize;
        while source.has_more()? {
            let next = match source.read_char()? {
                Some(c) => c,
                None => break,
            };

            model.windows.entry(key).or_default().observe(next);
            observed += 1;

            // Slide window
            window.push_back(next);
            window.pop_front();
            key = window.iter().collect();
        }

        for distribution in model.windows.values_mut() {
            normalize(distribution);
        }

        log::info!(
            "model trained: {} windows, {} transitions from {} observations",
            model.windows.len(),
            model.transition_count(),
            observed
        );
        Ok(model)
    }

    pub fn window_length(&self) -> usize {
        self.window_length
    }

    /// Number of distinct windows seen during training.
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Distribution for a window, if it was observed during training.
    pub fn distribution(&self, window: &str) -> Option<&WindowDistribution> {
        self.windows.get(window)
    }

    /// All windows and their distributions, in no particular order.
    pub fn windows(&self) -> impl Iterator<Item = (&str, &WindowDistribution)> {
        self.windows.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Total number of distinct (window, next character) pairs.
    pub fn transition_count(&self) -> usize {
        self.windows.values().map(WindowDistribution::len).sum()
    }
}

/// Extend `seed_text` by up to `target_length` sampled characters.
///
/// Returns the seed unchanged when it is shorter than the window length.
/// Stops early, without error, as soon as the trailing window has no
/// distribution in the model.
pub fn generate<R: Rng>(
    model: &LanguageModel,
    seed_text: &str,
    target_length: usize,
    rng: &mut R,
) -> String {
    let window_length = model.window_length;
    let mut chars: Vec<char> = seed_text.chars().collect();
    if chars.len() < window_length {
        return seed_text.to_string();
    }

    let mut text = String::from(seed_text);
    text.reserve(target_length);
    let mut window: String = chars[chars.len() - window_length..].iter().collect();

    for step in 0..target_length {
        let distribution = match model.windows.get(&window) {
            Some(d) => d,
            None => {
                log::debug!(
                    "unknown window {:?} after {} of {} characters; stopping",
                    window,
                    step,
                    target_length
                );
                break;
            }
        };

        let next = sample_next(distribution, rng.gen::<f64>());
        text.push(next);
        chars.push(next);
        window = chars[chars.len() - window_length..].iter().collect();
    }

    text
}

impl fmt::Display for LanguageModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.windows.keys().collect();
        keys.sort();
        for key in keys {
            write!(f, "{:?} :", key)?;
            for entry in self.windows[key].entries() {
                write!(
                    f,
                    " ({:?} {} {:.4} {:.4})",
                    entry.character, entry.count, entry.probability, entry.cumulative_probability
                )?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
