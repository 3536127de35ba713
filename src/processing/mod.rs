//! Core processing module
//! Section segmentation, persona/job modeling, embeddings, scoring and ranking

pub mod embedder;
pub mod explain;
pub mod job;
pub mod persona;
pub mod ranker;
pub mod scoring;
pub mod section;
pub mod segmenter;
