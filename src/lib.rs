pub mod cli;
pub mod config;
pub mod generator;
pub mod llm;
pub mod server;
pub mod session;

// Re-export commonly used types
pub use config::Config;
pub use server::launch;
