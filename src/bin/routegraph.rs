use std::{env, process};

use routegraph::{
    Navigator, RouteGraphError, SearchBudget, SeedDataset,
    cli::handle_command,
    client::CommandLineConfig,
    persistence::{GraphOrigin, load_or_seed},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        println!("{}", CommandLineConfig::help());
        return;
    }
    let arg_refs: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
    let config = match CommandLineConfig::from_args(&arg_refs) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(2);
        }
    };

    let navigator = match open_navigator(&config) {
        Ok(nav) => nav,
        Err(err) => {
            eprintln!("{err}");
            process::exit(2);
        }
    };

    if let Err(err) = run_command(&navigator, &config) {
        eprintln!("command failed: {err}");
        process::exit(1);
    }
}

fn open_navigator(config: &CommandLineConfig) -> Result<Navigator, RouteGraphError> {
    let seed = match config.seed.as_deref() {
        Some(path) => SeedDataset::from_json_file(path)?,
        None => SeedDataset::builtin(),
    };
    let restored = load_or_seed(&config.database, &seed)?;
    if restored.origin == GraphOrigin::Seed {
        info!(database = %config.database, "starting from seed dataset");
    }
    let budget = SearchBudget {
        max_paths: config.max_paths,
        max_expansions: None,
    };
    Ok(Navigator::with_budget(restored.graph, budget))
}

fn run_command(navigator: &Navigator, config: &CommandLineConfig) -> Result<(), RouteGraphError> {
    let output = handle_command(navigator, &config.command, &config.command_args)?;
    if output.mutated {
        navigator.save(&config.database)?;
    }
    println!("{}", output.json);
    Ok(())
}
