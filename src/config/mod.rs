mod config;

pub use config::{CONFIG, Config, DEFAULT_API_URL};
