pub mod config;
pub mod engine;
pub mod io;
pub mod metrics;
pub mod parse;
