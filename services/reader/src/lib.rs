pub mod adapters;
pub mod cli;
pub mod config;
pub mod error;
pub mod reader;
pub mod terminal;
