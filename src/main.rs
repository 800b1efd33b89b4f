mod auth;
mod cli_messages;
mod config;
mod consts;
mod environment;
mod error_classifier;
mod events;
mod logging;
mod login;
mod session;
mod ui;
mod workers;

use crate::config::{Config, get_config_path};
use crate::consts::cli_consts::auth::SIMULATED_LATENCY_MS;
use crate::environment::Environment;
use crate::session::{run_headless_mode, run_tui_mode, setup_session};
use crate::ui::UIConfig;
use crate::ui::dashboard::{DashboardSource, SampleData};
use clap::{Parser, Subcommand};
use std::error::Error;
use std::time::Duration;

/// Environment variable consulted when `--environment` is not given.
const ENVIRONMENT_VAR: &str = "PROPDECK_ENVIRONMENT";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Property operations console
struct Args {
    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the console: splash, login, then the property dashboards
    Start {
        /// Auth backend: simulated, local, staging or production
        #[arg(long, value_name = "ENV")]
        environment: Option<String>,

        /// Property to select when the dashboards open
        #[arg(long, value_name = "NAME")]
        property: Option<String>,

        /// Paint a solid background behind every screen
        #[arg(long = "with-background", action = clap::ArgAction::SetTrue)]
        with_background: bool,

        /// Latency of the simulated auth backend, in milliseconds
        #[arg(long, value_name = "MS", default_value_t = SIMULATED_LATENCY_MS)]
        latency_ms: u64,
    },
    /// Sign in without the TUI, reading phone and OTP from stdin
    Login {
        /// Auth backend: simulated, local, staging or production
        #[arg(long, value_name = "ENV")]
        environment: Option<String>,

        /// Latency of the simulated auth backend, in milliseconds
        #[arg(long, value_name = "MS", default_value_t = SIMULATED_LATENCY_MS)]
        latency_ms: u64,
    },
    /// List the properties in the network
    Properties,
    /// Save the property selected when the dashboards open
    SetProperty {
        /// Property name, case-insensitive
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Delete the configuration file
    ResetConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    logging::init_max_level();

    let config_path = get_config_path()?;
    let args = Args::parse();
    match args.command {
        Command::Start {
            environment,
            property,
            with_background,
            latency_ms,
        } => {
            let config = Config::load_or_default(&config_path)?;
            let env = resolve_environment(
                environment.as_deref(),
                std::env::var(ENVIRONMENT_VAR).ok(),
                &config,
            )?;

            let default_property = property.or(config.default_property.clone());
            if let Some(name) = &default_property {
                if canonical_property(&SampleData, name).is_none() {
                    cli_messages::print_unknown_property(name);
                }
            }

            let ui_config = UIConfig::new(
                with_background || config.with_background_color,
                default_property,
            );
            let session = setup_session(env, Duration::from_millis(latency_ms))?;
            run_tui_mode(session, ui_config).await
        }
        Command::Login {
            environment,
            latency_ms,
        } => {
            let config = Config::load_or_default(&config_path)?;
            let env = resolve_environment(
                environment.as_deref(),
                std::env::var(ENVIRONMENT_VAR).ok(),
                &config,
            )?;
            let session = setup_session(env, Duration::from_millis(latency_ms))?;
            let auth = run_headless_mode(session).await?;
            log::debug!("Headless session {:?}", auth);
            Ok(())
        }
        Command::Properties => {
            let config = Config::load_or_default(&config_path)?;
            let default = config
                .default_property
                .as_deref()
                .and_then(|name| canonical_property(&SampleData, name));
            for property in SampleData.properties() {
                if Some(*property) == default {
                    println!("{} (default)", property);
                } else {
                    println!("{}", property);
                }
            }
            Ok(())
        }
        Command::SetProperty { name } => {
            let property = canonical_property(&SampleData, &name)
                .ok_or_else(|| format!("Unknown property: {}", name))?;
            let mut config = Config::load_or_default(&config_path)?;
            config.default_property = Some(property.to_string());
            config
                .save(&config_path)
                .map_err(|e| format!("Failed to save config: {}", e))?;
            cli_messages::print_default_property_saved(property);
            Ok(())
        }
        Command::ResetConfig => {
            println!("Clearing configuration file...");
            Config::clear(&config_path).map_err(Into::into)
        }
    }
}

/// Resolves the auth backend: flag, then environment variable, then config.
fn resolve_environment(
    flag: Option<&str>,
    env_var: Option<String>,
    config: &Config,
) -> Result<Environment, Box<dyn Error>> {
    if let Some(value) = flag {
        return value
            .parse::<Environment>()
            .map_err(|_| format!("Unknown environment: {}", value).into());
    }
    if let Some(value) = env_var.filter(|v| !v.trim().is_empty()) {
        return value
            .parse::<Environment>()
            .map_err(|_| format!("Unknown {} value: {}", ENVIRONMENT_VAR, value).into());
    }
    Ok(config.environment().unwrap_or_default())
}

/// The known spelling of `name`, matched case-insensitively.
fn canonical_property(source: &dyn DashboardSource, name: &str) -> Option<&'static str> {
    source
        .properties()
        .iter()
        .copied()
        .find(|p| p.eq_ignore_ascii_case(name.trim()))
}
