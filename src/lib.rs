//! NVMP Remover - removes Fallout New Vegas Multiplayer leftovers
//!
//! This crate provides functionality for:
//! - Locating the game install, profile folders and mod-manager folders
//! - Finding NVMP-named files and folders under them
//! - Stripping NVMP lines from load lists and ini files
//! - Moving matches into a timestamped backup folder, or deleting them

pub mod cli;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod locator;
pub mod matcher;
pub mod paths;
pub mod remover;
pub mod scanner;

// Re-export commonly used types
pub use config::Config;
pub use error::{RemoverError, Result};
pub use matcher::Matcher;
