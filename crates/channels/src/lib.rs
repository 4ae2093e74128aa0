//! Operator surface implementations for deskhand.

pub mod cli;

pub use cli::CliChannel;
