//! CLI module - Command-line interface for bloggr
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// bloggr - a small blog of users and their posts
#[derive(Parser)]
#[command(name = "bloggr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the default locations
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server (default)
    Serve,

    /// Apply migrations and insert example data into an empty database
    Seed,

    /// List all users
    #[command(alias = "u")]
    Users,

    /// List posts, optionally only those of one user
    #[command(alias = "p")]
    Posts {
        /// Only show posts owned by this user ID
        #[arg(long)]
        user: Option<i32>,
    },
}

pub use commands::*;
