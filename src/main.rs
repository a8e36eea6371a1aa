use clap::Parser;
use color_eyre::Result;
use tracing_subscriber::EnvFilter;

use moodgarden::cli::{Cli, Commands};
use moodgarden::{Config, KvStore, Profile, ProfileStore};

fn main() -> Result<()> {
    // Set up error reporting with color-eyre
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Determine profile: --dev flag enables dev mode, otherwise use prod
    let profile = if cli.dev { Profile::Dev } else { Profile::Prod };

    // Load configuration with the determined profile
    let config = Config::load_with_profile(profile)?;

    // Open key-value storage; --storage may point at an alternate store
    let storage_path = match &cli.storage {
        Some(path) => moodgarden::utils::expand_path(path),
        None => config.get_storage_path(),
    };
    let kv = KvStore::new(
        storage_path
            .to_str()
            .ok_or_else(|| color_eyre::eyre::eyre!("Storage path contains invalid UTF-8"))?,
    )?;
    let mut store = ProfileStore::new(kv)?;

    // No subcommand shows today's entries at a glance
    let command = cli.command.unwrap_or(Commands::Today);
    moodgarden::cli::run(command, &mut store, &config)?;

    Ok(())
}
