// Crate root library declaration and module exports.
pub mod assembler;
pub mod classifier;
pub mod cli;
pub mod client;
pub mod collector;
pub mod config;
pub mod context;
pub mod model;
