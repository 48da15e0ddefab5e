//! QuireCli application.
//!
//! Holds the loaded configuration and dispatches parsed commands to the
//! handlers.

use crate::cli::{BaseCommand, CliArgs};
use crate::config::QuireConfig;
use crate::config_handlers;
use crate::content_handlers::{self, ListOptions, ShowOptions};
use quire_core::Result;
use quire_core::traits::ConfigProvider;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// ============================================================================
// QuireCli
// ============================================================================

/// CLI application parameterized over a config provider.
pub struct QuireCli<C: ConfigProvider> {
    name: String,
    config: Arc<C>,
    version: String,
}

impl QuireCli<QuireConfig> {
    /// Create from CLI args, loading config from file/env and applying
    /// the `--content` override.
    pub fn from_args(name: impl Into<String>, args: &CliArgs) -> Result<Self> {
        let mut config = QuireConfig::load(args.config.as_deref())?;
        if let Some(content) = &args.content {
            config = config.with_content_path(content.clone());
        }
        Ok(Self::new(name, config))
    }
}

impl<C: ConfigProvider> QuireCli<C> {
    pub fn new(name: impl Into<String>, config: C) -> Self {
        Self {
            name: name.into(),
            config: Arc::new(config),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Override the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// Install the tracing subscriber.
    ///
    /// `RUST_LOG` wins when set; otherwise `--quiet` means `warn`,
    /// `--verbose` means `debug`, and the default is `info`.
    pub fn init_logging(&self, verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        };

        // A subscriber may already be installed (tests).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Run the CLI with the given arguments.
    pub async fn run(&self, args: CliArgs) -> Result<()> {
        self.init_logging(args.verbose, args.quiet);
        tracing::debug!(project = self.config.project_name(), "starting");

        match args.command {
            Some(BaseCommand::Check) => content_handlers::handle_check(&*self.config).await,
            Some(BaseCommand::List {
                drafts,
                by_date,
                tag,
            }) => {
                let options = ListOptions {
                    drafts,
                    by_date,
                    tag,
                };
                content_handlers::handle_list(&*self.config, options).await
            }
            Some(BaseCommand::Show { key, json, section }) => {
                let options = ShowOptions { key, json, section };
                content_handlers::handle_show(&*self.config, options).await
            }
            Some(BaseCommand::Tags) => content_handlers::handle_tags(&*self.config).await,
            Some(BaseCommand::Version) => {
                println!("{} {}", self.name, self.version);
                Ok(())
            }
            Some(BaseCommand::Config(config_cmd)) => {
                config_handlers::handle_config_command(args.config.as_deref(), config_cmd.command)
            }
            None => {
                println!("{} {}: use --help for usage", self.name, self.version);
                Ok(())
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CliArgs;
    use clap::Parser;
    use std::path::PathBuf;

    #[derive(Clone)]
    struct TestConfig {
        base: PathBuf,
    }

    impl ConfigProvider for TestConfig {
        fn project_name(&self) -> &str {
            "test-app"
        }

        fn base_path(&self) -> Result<PathBuf> {
            Ok(self.base.clone())
        }

        fn content_dir(&self) -> Result<PathBuf> {
            Ok(self.base.join("content"))
        }
    }

    fn test_config() -> TestConfig {
        TestConfig {
            base: PathBuf::from("/tmp/quire-test"),
        }
    }

    fn site() -> (tempfile::TempDir, TestConfig) {
        let dir = tempfile::TempDir::new().unwrap();
        let content = dir.path().join("content");
        std::fs::create_dir_all(&content).unwrap();
        std::fs::write(
            content.join("about.md"),
            "+++\ntitle = \"About\"\n+++\nHello.\n",
        )
        .unwrap();
        let config = TestConfig {
            base: dir.path().to_path_buf(),
        };
        (dir, config)
    }

    #[test]
    fn test_quire_cli_new() {
        let cli = QuireCli::new("my-app", test_config());
        assert_eq!(cli.name, "my-app");
        assert_eq!(cli.config().project_name(), "test-app");
        assert_eq!(cli.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_quire_cli_with_version() {
        let cli = QuireCli::new("my-app", test_config()).with_version("1.2.3");
        assert_eq!(cli.version, "1.2.3");
    }

    #[test]
    fn test_from_args_content_override() {
        let _lock = crate::config::tests::env_lock();
        let args = CliArgs::parse_from([
            "quire",
            "--config",
            "/nonexistent/config.toml",
            "--content",
            "/srv/pages",
        ]);
        let cli = QuireCli::from_args("quire", &args).unwrap();
        assert_eq!(
            cli.config().content_dir().unwrap(),
            PathBuf::from("/srv/pages")
        );
    }

    #[tokio::test]
    async fn test_run_version_command() {
        let cli = QuireCli::new("test-app", test_config()).with_version("0.1.0");
        let args = CliArgs::parse_from(["quire", "version"]);
        assert!(cli.run(args).await.is_ok());
    }

    #[tokio::test]
    async fn test_run_no_command() {
        let cli = QuireCli::new("test-app", test_config());
        let args = CliArgs::parse_from(["quire"]);
        assert!(cli.run(args).await.is_ok());
    }

    #[tokio::test]
    async fn test_run_content_commands() {
        let (_dir, config) = site();
        let cli = QuireCli::new("test-app", config);

        for argv in [
            vec!["quire", "check"],
            vec!["quire", "list", "--by-date"],
            vec!["quire", "show", "about", "--json"],
            vec!["quire", "tags"],
        ] {
            let args = CliArgs::parse_from(argv.clone());
            assert!(cli.run(args).await.is_ok(), "{argv:?}");
        }
    }

    #[tokio::test]
    async fn test_run_check_missing_content_dir() {
        let cli = QuireCli::new("test-app", test_config());
        let args = CliArgs::parse_from(["quire", "-q", "check"]);
        assert!(cli.run(args).await.unwrap_err().is_not_found());
    }
}
