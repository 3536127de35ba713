//! CLI interface for the persona ranker

use crate::config::EmbeddingBackend;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "persona-ranker")]
#[command(about = "Rank document sections by relevance to a persona and a job-to-be-done")]
#[command(
    long_about = "Segments a document set into titled sections, models the persona and the \
                  job-to-be-done, and ranks every section by a weighted blend of embedding \
                  similarities with a human-readable reasoning per result"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the ranking pipeline over the input directory
    Rank {
        /// Directory holding documents/, the persona file and the job file
        #[arg(short, long)]
        input_dir: Option<PathBuf>,

        /// Directory the result file is written into
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Embedding model id or local path (model2vec backend)
        #[arg(short, long)]
        model: Option<String>,

        /// Embedding backend: model2vec or hashed
        #[arg(short, long)]
        backend: Option<EmbeddingBackend>,

        /// Weight of the persona similarity in the blended score
        #[arg(long)]
        persona_weight: Option<f32>,

        /// Weight of the job similarity in the blended score
        #[arg(long)]
        job_weight: Option<f32>,

        /// Rows shown in the console summary
        #[arg(short, long)]
        top: Option<usize>,

        /// Disable colored console output
        #[arg(long)]
        no_color: bool,
    },

    /// Show or reset the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the active configuration
    Show,

    /// Reset the configuration file to defaults
    Reset,
}
