//! The `quire` command-line tool.
//!
//! Validates and inspects a content directory of front-matter Markdown.
//!
//! # Key Abstractions
//!
//! - [`QuireCli`]: the application, parameterized over a config provider
//! - [`QuireConfig`]: file/env/default configuration loaded with `confyg`

#![doc = include_str!("../README.md")]

pub mod app;
pub mod cli;
pub mod config;
pub mod config_handlers;
pub mod content_handlers;

pub use app::QuireCli;
pub use cli::{BaseCommand, CliArgs, ConfigAction, ConfigCommand};
pub use config::QuireConfig;
