pub mod assets;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod llm;
pub mod server;

pub use error::{Error, Result};
