/// Corpus Trainer: trains a character model from a text corpus and prints
/// generated text.
///
/// Usage: corpus_trainer --input <file.txt> --prompt <text> [--length <n>]
///        [--window <n>] [--seed <n>] [--config <model.ron>] [--dump]
use char_markov::core::pipeline::MarkovEngine;
use std::env;
use std::path::Path;
use std::process;

const USAGE: &str = "Usage: corpus_trainer --input <file.txt> --prompt <text> [--length <n>] \
                     [--window <n>] [--seed <n>] [--config <model.ron>] [--dump]";

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut input = None;
    let mut prompt = None;
    let mut config = None;
    let mut window = None;
    let mut seed = None;
    let mut length = 200usize;
    let mut dump = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => input = Some(take_value(&args, &mut i, "--input")),
            "--prompt" => prompt = Some(take_value(&args, &mut i, "--prompt")),
            "--config" => config = Some(take_value(&args, &mut i, "--config")),
            "--window" => window = Some(parse_number(&args, &mut i, "--window")),
            "--seed" => seed = Some(parse_number(&args, &mut i, "--seed")),
            "--length" => length = parse_number::<usize>(&args, &mut i, "--length"),
            "--dump" => dump = true,
            "--help" | "-h" => {
                println!("{}", USAGE);
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let input_path = input.unwrap_or_else(|| {
        eprintln!("Error: --input is required");
        eprintln!("{}", USAGE);
        process::exit(1);
    });

    let prompt = prompt.unwrap_or_else(|| {
        eprintln!("Error: --prompt is required");
        eprintln!("{}", USAGE);
        process::exit(1);
    });

    let mut builder = MarkovEngine::builder();
    if let Some(path) = config {
        builder = builder.config_file(Path::new(&path)).unwrap_or_else(|e| {
            eprintln!("Error loading config '{}': {}", path, e);
            process::exit(1);
        });
    }
    if let Some(window) = window {
        builder = builder.window_length(window);
    }
    if let Some(seed) = seed {
        builder = builder.seed(seed);
    }

    let mut engine = builder.build().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    println!(
        "Training window-{} model from '{}'...",
        engine.model().window_length(),
        input_path
    );
    engine
        .train_file(Path::new(&input_path))
        .unwrap_or_else(|e| {
            eprintln!("Error training on '{}': {}", input_path, e);
            process::exit(1);
        });

    println!(
        "Model trained: {} unique windows, {} transitions",
        engine.model().len(),
        engine.model().transition_count()
    );

    if dump {
        print!("{}", engine.model());
    }

    println!("{}", engine.generate(&prompt, length));
}

fn take_value(args: &[String], i: &mut usize, flag: &str) -> String {
    *i += 1;
    args.get(*i).cloned().unwrap_or_else(|| {
        eprintln!("Error: {} requires a value", flag);
        process::exit(1);
    })
}

fn parse_number<T: std::str::FromStr>(args: &[String], i: &mut usize, flag: &str) -> T {
    let raw = take_value(args, i, flag);
    raw.parse().unwrap_or_else(|_| {
        eprintln!("Error: {} must be a non-negative integer (got '{}')", flag, raw);
        process::exit(1);
    })
}
