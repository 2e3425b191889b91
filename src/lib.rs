pub mod app;
pub mod cli;
pub mod constants;
pub mod errors;
pub mod graph;
pub mod managers;
pub mod services;
pub mod utils;
