pub mod config;
pub mod logging;

// Core modules
pub mod assets;
pub mod course;
pub mod credential;
pub mod error;
pub mod executor;
pub mod layout;
pub mod lecture;
pub mod outcome;
pub mod provider;
pub mod retriever;
pub mod scheduler;
