use sigrelay::core::config::{Config, ConfigError, ConfigPaths};
use sigrelay::core::host::HostState;
use sigrelay::flags::Flags;
use sigrelay::relay::Relay;
use std::env;
use std::path::Path;
use tracing_subscriber::EnvFilter;

static HOST: HostState = HostState::new();

fn main() -> Result<(), sigrelay::error::RelayError> {
    let mut flags = Flags::new();
    let args: Vec<String> = env::args().skip(1).collect();
    flags.parse(&args)?;

    if flags.is_set("help") {
        flags.print_help();
        return Ok(());
    }

    if flags.is_set("version") {
        println!("sigrelay {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let default_level = if flags.is_set("debug") { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match flags.get_value("config") {
        Some(path) => {
            if !Path::new(path).exists() {
                return Err(ConfigError::ConfigFileNotFound(path.clone()).into());
            }
            Config::with_paths(ConfigPaths::with_rc(path))
        }
        None => Config::new()?,
    };
    config.load()?;
    config.apply_flags(&flags)?;
    tracing::debug!(?config, "configuration resolved");

    let mut relay = Relay::new(config, flags, &HOST);
    relay.run()
}
