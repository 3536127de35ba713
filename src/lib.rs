//! Persona-driven document section ranking
//!
//! Extracts page text from a document set, segments it into titled
//! sections, models a persona and a job-to-be-done, and ranks every
//! section by a weighted blend of embedding similarities with a
//! templated reasoning string per result.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod pipeline;
pub mod processing;

pub use config::Config;
pub use error::{PersonaRankerError, Result};
