//! Output boundary: the result file and the console summary

pub mod console;
pub mod writer;
