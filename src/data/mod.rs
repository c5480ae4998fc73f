mod config;
mod manifest;

pub use config::*;
pub use manifest::*;
