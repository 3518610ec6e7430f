pub mod browser;
pub mod error;
pub mod logger;
pub mod models;
pub mod parser;
pub mod state;
pub mod types;
pub mod workflow;
pub mod writer;
