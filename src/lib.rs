//! # App Checker
//!
//! A command-line tool for browsing local app folders and checking them
//! against their Confluence pages.
//!
//! This library provides functionality to:
//! - Load configuration from `.env`, a TOML file, and the environment
//! - Fetch Confluence pages and resolve the people responsible for an app
//! - Scan the apps folder and drive the interactive menu
//!
//! ## Modules
//!
//! - [`confluence`] - Confluence REST client and role resolution
//! - [`markup`] - Role lookup inside page markup
//! - [`config`] - Settings loading and validation
//! - [`folders`] - App folder discovery
//! - [`menu`] - Menu pages and transitions
//! - [`checks`] - App configuration checks
//! - [`validation`] - Input validation utilities
//! - [`paths`] - XDG-compliant path resolution
//! - [`error`] - Error formatting utilities
//! - [`errors`] - Structured error types
//! - [`constants`] - Application constants

pub mod app;
pub mod app_deps;
pub mod checks;
pub mod cli;
pub mod config;
pub mod confluence;
pub mod constants;
pub mod error;
pub mod errors;
pub mod folders;
pub mod markup;
pub mod menu;
pub mod paths;
pub mod validation;
