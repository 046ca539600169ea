// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! restdto command line.
//!
//! Usage:
//!   restdto generate [--out-dir <dir>]   # Write the fixture TypeScript client
//!   restdto check <file|->               # Run the guards over a JSON document
//!   restdto serve                        # Run the REST surface
//!   restdto config                       # Print the effective configuration

use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{error, info};
use restdto::api::rest::run_server;
use restdto::config::Settings;
use restdto::dto::Dto;
use restdto::message::fixtures::{is_test1_message, is_test_message, FixtureMessage};
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::exit;

#[derive(Parser)]
#[command(name = "restdto", about = "Typed REST DTO messages and TypeScript client generation")]
struct Cli {
    /// Path to a configuration file
    #[arg(long, env = "RESTDTO_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the TypeScript client for the fixture messages
    Generate {
        /// Overrides dto.output_dir
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Run the message guards over a JSON document ("-" reads stdin)
    Check { input: String },
    /// Serve the REST API
    Serve,
    /// Print the effective configuration as TOML
    Config,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::new(cli.config.as_deref()).unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {}", err);
        exit(1);
    });

    env_logger::Builder::from_env(Env::default().default_filter_or(settings.log.level.as_str()))
        .init();

    match cli.command {
        Command::Generate { out_dir } => {
            let dir = out_dir.unwrap_or_else(|| PathBuf::from(&settings.dto.output_dir));
            let mut dto = fixture_registry(&dir, &settings);
            match dto.generate() {
                Ok(paths) => {
                    for path in paths {
                        println!("{}", path.display());
                    }
                }
                Err(e) => {
                    error!("Generation failed: {}", e);
                    exit(1);
                }
            }
        }
        Command::Check { input } => {
            let value = read_json(&input).unwrap_or_else(|e| {
                error!("Failed to read {}: {}", input, e);
                exit(1);
            });
            println!("is_test_message: {}", is_test_message(&value));
            println!("is_test1_message: {}", is_test1_message(&value));
            match FixtureMessage::classify(&value) {
                Ok(message) => println!("classified: {}", message.full_name()),
                Err(e) => println!("rejected: {}", e),
            }
        }
        Command::Serve => {
            let dir = PathBuf::from(&settings.dto.output_dir);
            let dto = fixture_registry(&dir, &settings);
            run_server(settings.rest.clone(), dto).await?;
            info!("REST server finished.");
        }
        Command::Config => match settings.to_toml() {
            Ok(rendered) => print!("{}", rendered),
            Err(e) => {
                error!("{}", e);
                exit(1);
            }
        },
    }
    Ok(())
}

fn fixture_registry(dir: &Path, settings: &Settings) -> Dto {
    Dto::fixtures(dir, &settings.dto.client_file).unwrap_or_else(|e| {
        error!("Failed to build message registry: {}", e);
        exit(1);
    })
}

fn read_json(input: &str) -> Result<Value, Box<dyn std::error::Error>> {
    let mut raw = String::new();
    if input == "-" {
        std::io::stdin().read_to_string(&mut raw)?;
    } else {
        raw = std::fs::read_to_string(input)?;
    }
    Ok(serde_json::from_str(&raw)?)
}
