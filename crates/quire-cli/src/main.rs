use clap::Parser;
use quire_cli::{CliArgs, QuireCli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let cli = QuireCli::from_args("quire", &args)?;
    cli.run(args).await?;
    Ok(())
}
