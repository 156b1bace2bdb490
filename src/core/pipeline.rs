/// The engine: a language model bundled with the RNG that drives generation.
///
/// Wires together corpus loading, training, and seeded sampling.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use thiserror::Error;

use crate::core::corpus::{CharSource, ReaderSource, StrSource};
use crate::core::markov::{self, LanguageModel, MarkovError};
use crate::schema::config::{ConfigError, ModelConfig};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("markov error: {0}")]
    Markov(#[from] MarkovError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Top-level text generator. Built via `MarkovEngine::builder()`.
///
/// The RNG mode (seeded or entropy) is fixed at build time and advances on
/// every draw, so a seeded engine replays the same outputs for the same
/// sequence of calls.
pub struct MarkovEngine {
    model: LanguageModel,
    rng: StdRng,
    seed: Option<u64>,
}

/// Builder for constructing a `MarkovEngine`.
pub struct MarkovEngineBuilder {
    window_length: usize,
    seed: Option<u64>,
}

impl MarkovEngine {
    pub fn builder() -> MarkovEngineBuilder {
        let defaults = ModelConfig::default();
        MarkovEngineBuilder {
            window_length: defaults.window_length,
            seed: defaults.seed,
        }
    }

    /// Train on a corpus stream, replacing any previously learned model.
    pub fn train<S: CharSource + ?Sized>(&mut self, source: &mut S) -> Result<(), EngineError> {
        self.model = LanguageModel::train(self.model.window_length(), source)?;
        Ok(())
    }

    /// Train on an in-memory corpus.
    pub fn train_str(&mut self, corpus: &str) -> Result<(), EngineError> {
        self.train(&mut StrSource::new(corpus))
    }

    /// Train on a UTF-8 corpus file, streamed from disk.
    pub fn train_file(&mut self, path: &Path) -> Result<(), EngineError> {
        let mut source = ReaderSource::open(path)?;
        self.train(&mut source)
    }

    /// Extend `seed_text` by up to `target_length` characters.
    pub fn generate(&mut self, seed_text: &str, target_length: usize) -> String {
        markov::generate(&self.model, seed_text, target_length, &mut self.rng)
    }

    pub fn model(&self) -> &LanguageModel {
        &self.model
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl MarkovEngineBuilder {
    pub fn window_length(mut self, window_length: usize) -> Self {
        self.window_length = window_length;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_config(mut self, config: &ModelConfig) -> Self {
        self.window_length = config.window_length;
        self.seed = config.seed;
        self
    }

    /// Load settings from a RON config file.
    pub fn config_file(self, path: &Path) -> Result<Self, EngineError> {
        let config = ModelConfig::load_from_ron(path)?;
        Ok(self.with_config(&config))
    }

    pub fn build(self) -> Result<MarkovEngine, EngineError> {
        let model = LanguageModel::new(self.window_length)?;
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        log::debug!(
            "engine built: window length {}, seed {:?}",
            self.window_length,
            self.seed
        );
        Ok(MarkovEngine {
            model,
            rng,
            seed: self.seed,
        })
    }
}
