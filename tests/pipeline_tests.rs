/// Engine integration tests for config loading and seeded generation.

use char_markov::core::markov::MarkovError;
use char_markov::core::pipeline::{EngineError, MarkovEngine};
use std::path::Path;

const CORPUS_PATH: &str = "tests/fixtures/test_corpus.txt";

#[test]
fn config_file_drives_engine() {
    let mut engine = MarkovEngine::builder()
        .config_file(Path::new("tests/fixtures/window4.ron"))
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(engine.model().window_length(), 4);
    assert_eq!(engine.seed(), Some(2024));

    engine.train_file(Path::new(CORPUS_PATH)).unwrap();
    let text = engine.generate("The ", 120);
    assert!(text.starts_with("The "));
}

#[test]
fn seeded_engines_reproduce_output() {
    let run = || {
        let mut engine = MarkovEngine::builder()
            .window_length(3)
            .seed(42)
            .build()
            .unwrap();
        engine.train_file(Path::new(CORPUS_PATH)).unwrap();
        (engine.generate("the", 250), engine.generate("and", 250))
    };
    assert_eq!(run(), run());
}

#[test]
fn unseeded_engine_generates() {
    let mut engine = MarkovEngine::builder().window_length(2).build().unwrap();
    engine.train_file(Path::new(CORPUS_PATH)).unwrap();
    assert_eq!(engine.seed(), None);
    let text = engine.generate("th", 60);
    assert!(text.starts_with("th"));
}

#[test]
fn missing_corpus_is_io_error() {
    let mut engine = MarkovEngine::builder().build().unwrap();
    let err = engine
        .train_file(Path::new("tests/fixtures/no_such_corpus.txt"))
        .unwrap_err();
    assert!(matches!(err, EngineError::Io(_)));
}

#[test]
fn invalid_utf8_corpus_is_read_error() {
    let path = std::env::temp_dir().join("char_markov_invalid_utf8.txt");
    std::fs::write(&path, [b'a', b'b', b'c', 0xC0, b'd']).unwrap();

    let mut engine = MarkovEngine::builder().window_length(2).build().unwrap();
    let err = engine.train_file(&path).unwrap_err();
    assert!(matches!(err, EngineError::Markov(MarkovError::CorpusRead(_))));

    std::fs::remove_file(&path).ok();
}

#[test]
fn dump_lists_windows() {
    let mut engine = MarkovEngine::builder()
        .window_length(3)
        .seed(1)
        .build()
        .unwrap();
    engine.train_str("abcabcabc").unwrap();
    let dump = engine.model().to_string();
    assert_eq!(
        dump,
        "\"abc\" : ('a' 2 1.0000 1.0000)\n\
         \"bca\" : ('b' 2 1.0000 1.0000)\n\
         \"cab\" : ('c' 2 1.0000 1.0000)\n"
    );
}
