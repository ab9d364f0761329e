// orders-etl binary entry point
//
// Loads config (file + environment), initializes tracing, runs the
// pipeline. Exit code is 0 only on a fully successful run; a handled load
// failure still exits non-zero so automation can observe it.

use clap::Parser;
use std::path::PathBuf;
use tracing::error;

#[derive(Parser, Debug)]
#[command(name = "orders-etl", about = "Clean and partition an orders dataset")]
struct Cli {
    /// Path to a TOML config file (overrides the default lookup locations)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the input dataset path from config
    #[arg(long)]
    input: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(1);
        }
    };

    orders_etl::init::init_tracing(&config.logging);

    if let Err(err) = orders_etl::run(&config) {
        error!(error = %format!("{err:#}"), "pipeline failed");
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<orders_etl_config::PipelineConfig> {
    let mut config = match cli.config.as_ref() {
        Some(path) => orders_etl_config::load_from_file_path(path)?,
        None => orders_etl_config::load_config()?,
    };

    if let Some(input) = cli.input.as_ref() {
        config.input.path = input.display().to_string();
        config.validate()?;
    }

    Ok(config)
}
