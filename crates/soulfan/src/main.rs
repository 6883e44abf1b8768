// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Soulfan - AI personas with Walrus-hosted sites and on-chain registration.
//!
//! This is the binary entry point for the Soulfan service.

mod serve;
mod shutdown;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use soulfan_chain::MnemonicWallets;
use soulfan_config::SoulfanConfig;
use soulfan_core::{PersonaWallets, TokenId};

/// Soulfan - AI personas with Walrus-hosted sites and on-chain registration.
#[derive(Parser, Debug)]
#[command(name = "soulfan", version, about, long_about = None)]
struct Cli {
    /// Configuration file to load instead of the XDG lookup.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP API and chat clients.
    Serve,
    /// Print the persona wallet derived for a token id.
    Address {
        /// Registry token id.
        token_id: u64,
    },
    /// Validate and print the effective configuration, secrets redacted.
    Config,
}

fn load_config(path: Option<&PathBuf>) -> Option<SoulfanConfig> {
    let loaded = match path {
        Some(path) => soulfan_config::load_and_validate_path(path),
        None => soulfan_config::load_and_validate(),
    };
    match loaded {
        Ok(config) => Some(config),
        Err(errors) => {
            soulfan_config::render_errors(&errors);
            None
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let Some(config) = load_config(cli.config.as_ref()) else {
        return ExitCode::FAILURE;
    };

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Address { token_id }) => MnemonicWallets::from_config(&config.chain)
            .and_then(|wallets| wallets.address_for(TokenId(token_id)))
            .map(|address| println!("{address}")),
        Some(Commands::Config) => {
            match toml::to_string_pretty(&config.redacted()) {
                Ok(rendered) => print!("{rendered}"),
                Err(e) => {
                    eprintln!("error: failed to render configuration: {e}");
                    return ExitCode::FAILURE;
                }
            }
            Ok(())
        }
        None => {
            println!("soulfan: use --help for available commands");
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn address_takes_token_id() {
        let cli = Cli::try_parse_from(["soulfan", "address", "7"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Address { token_id: 7 })));
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::try_parse_from(["soulfan", "serve", "--config", "/etc/soulfan.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/etc/soulfan.toml")));
        assert!(matches!(cli.command, Some(Commands::Serve)));
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config = soulfan_config::load_and_validate_str("").expect("defaults should be valid");
        assert_eq!(config.server.port, SoulfanConfig::default().server.port);
    }
}
