mod loader;
mod paths;
mod types;

pub use types::{Config, DEFAULT_API_TIMEOUT_MS};
