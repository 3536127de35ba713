//! persona-ranker: rank document sections by relevance to a persona and
//! a job-to-be-done

use clap::Parser;
use log::{error, warn};
use persona_ranker::cli::{Cli, Commands, ConfigAction};
use persona_ranker::config::Config;
use persona_ranker::output::console;
use persona_ranker::pipeline::{self, CancelFlag};
use persona_ranker::Result;
use std::path::Path;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

async fn run_command(command: Commands, mut config: Config) -> Result<()> {
    match command {
        Commands::Rank {
            input_dir,
            output_dir,
            model,
            backend,
            persona_weight,
            job_weight,
            top,
            no_color,
        } => {
            if let Some(input_dir) = input_dir {
                config.paths.input_dir = input_dir;
            }
            if let Some(output_dir) = output_dir {
                config.paths.output_dir = output_dir;
            }
            if let Some(model) = model {
                config.embedding.model = model;
            }
            if let Some(backend) = backend {
                config.embedding.backend = backend;
            }
            if let Some(weight) = persona_weight {
                config.scoring.persona_weight = weight;
            }
            if let Some(weight) = job_weight {
                config.scoring.job_weight = weight;
            }
            if let Some(top) = top {
                config.output.top_results = top;
            }
            if no_color {
                config.output.color_output = false;
            }
            if !config.output.color_output {
                colored::control::set_override(false);
            }

            let cancel = CancelFlag::new();
            let watcher = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    warn!("Interrupt received, stopping at the next safe point");
                    watcher.cancel();
                }
            });

            let summary = pipeline::run(&config, &cancel).await?;
            console::print_summary(&summary, config.output.top_results);
            Ok(())
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                println!("# {}", Config::config_path().display());
                println!("{}", config.to_toml()?);
                Ok(())
            }
            ConfigAction::Reset => {
                Config::default().save()?;
                println!("Configuration reset: {}", Config::config_path().display());
                Ok(())
            }
        },
    }
}
