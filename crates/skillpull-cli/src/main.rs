mod cli;
mod config;
mod service;

use anyhow::Result;
use clap::Parser;
use cli::Args;
use config::Config;
use service::SkillPullService;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = Config::load()?;

    // Create and run the requested command
    let service = SkillPullService::new(&config, &args)?;
    service.run(args.command).await
}
