//! Input processing module
//! Handles input layout validation, file detection and page extraction

pub mod extractor;
pub mod file_detector;
pub mod manager;
