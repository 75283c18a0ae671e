use ringsim::cli;
use ringsim::headless::{run_headless_match, HeadlessMatchConfig};

fn main() {
    let args = cli::parse_args();

    let mut config = match args.config {
        Some(path) => match HeadlessMatchConfig::load_from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config from {:?}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => HeadlessMatchConfig::default(),
    };

    // CLI flags override the config file.
    if let Some(seed) = args.seed {
        config.random_seed = Some(seed);
    }
    if let Some(output) = args.output {
        config.output_path = Some(output.to_string_lossy().into_owned());
    }
    if let Some(difficulty) = args.difficulty {
        config.difficulty = difficulty;
    }
    if let Some(max_ticks) = args.max_ticks {
        config.max_ticks = max_ticks;
    }

    if let Err(e) = run_headless_match(config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
