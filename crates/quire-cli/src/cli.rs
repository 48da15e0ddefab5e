//! CLI argument parsing and command definitions.

use clap::{Parser, Subcommand};

// ============================================================================
// CLI argument types
// ============================================================================

/// Check and inspect front-matter Markdown content.
#[derive(Parser, Debug)]
#[command(name = "quire", author, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "QUIRE_CONFIG")]
    pub config: Option<String>,

    /// Content directory (overrides `content.path` from config).
    #[arg(long, global = true)]
    pub content: Option<String>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<BaseCommand>,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum BaseCommand {
    /// Parse every document and report malformed front matter.
    Check,

    /// List documents.
    List {
        /// Include drafts.
        #[arg(long)]
        drafts: bool,

        /// Order newest first instead of by path.
        #[arg(long)]
        by_date: bool,

        /// Only documents carrying this tag.
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// Print one document's metadata and body.
    Show {
        /// Document id or path relative to the content directory.
        key: String,

        /// Emit JSON instead of front matter + body.
        #[arg(long)]
        json: bool,

        /// Print only the section under this heading.
        #[arg(short, long)]
        section: Option<String>,
    },

    /// List tags with the documents using them.
    Tags,

    /// Print version information.
    Version,

    /// Configuration operations.
    Config(ConfigCommand),
}

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Get a configuration value by dotted key.
    Get {
        /// Dotted key (e.g., "content.path").
        key: String,
    },

    /// Set a configuration value by dotted key.
    Set {
        /// Dotted key (e.g., "content.path").
        key: String,

        /// Value to set.
        value: String,
    },

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to XDG config path).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },

    /// Export configuration as environment variables.
    Export {
        /// Format as Docker --env flags.
        #[arg(long)]
        docker_env: bool,
    },
}

// ============================================================================
// Tests
// ============================================================================
