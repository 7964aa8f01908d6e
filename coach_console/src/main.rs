// Legend for various fix-this comments:
//   * "TODO" - bug or missing crucial feature.
//   * "Improvement potential" - missing nice-to-have feature or an opportunity
//       to make code better or faster.

#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

mod client_main;
mod tui;

use anyhow::Context;
use clap::{ArgMatches, Command, arg};
use coach_chess::config::ClientConfig;
use coach_chess::event::PlayMode;


fn main() -> anyhow::Result<()> {
    // The board occupies the terminal, so only warnings are shown by default.
    env_logger::Builder::new()
        .target(env_logger::Target::Stderr)
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let config_args = [
        arg!(--"config" <file> "Path to the configuration file: yaml-serialized ClientConfig.")
            .required(false),
        arg!(--"server" <url> "Server URL, e.g. http://127.0.0.1:5000").required(false),
        arg!(--"mode" <mode> "Play against the server AI or another human")
            .value_parser(["ai", "human"])
            .required(false),
        arg!(--"no-coach" "Start with coach messages turned off."),
    ];
    let matches = Command::new("Coach chess")
        .version(clap::crate_version!())
        .about("Terminal client for the coach chess server")
        .subcommand_required(true)
        .subcommand(Command::new("client").about("Play").args(config_args.clone()))
        .subcommand(
            Command::new("print-config")
                .about("Print the effective configuration and exit")
                .args(config_args),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("client", sub_matches)) => client_main::run(make_config(sub_matches)?),
        Some(("print-config", sub_matches)) => {
            print!("{}", serde_yaml::to_string(&make_config(sub_matches)?)?);
            Ok(())
        }
        _ => unreachable!("Exhausted list of subcommands and subcommand_required prevents `None`"),
    }
}

fn make_config(matches: &ArgMatches) -> anyhow::Result<ClientConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(filename) => read_config_file(filename)?,
        None => ClientConfig::default(),
    };
    if let Some(server) = matches.get_one::<String>("server") {
        config.server_url = server.clone();
    }
    if let Some(mode) = matches.get_one::<String>("mode") {
        config.mode = parse_mode(mode)?;
    }
    if matches.get_flag("no-coach") {
        config.coach_enabled = false;
    }
    Ok(config)
}

fn read_config_file(filename: &str) -> anyhow::Result<ClientConfig> {
    let contents = std::fs::read_to_string(filename)
        .with_context(|| format!("Reading config file '{filename}'"))?;
    serde_yaml::from_str(&contents).with_context(|| format!("Parsing config file '{filename}'"))
}

pub fn parse_mode(mode: &str) -> anyhow::Result<PlayMode> {
    match mode {
        "ai" => Ok(PlayMode::Ai),
        "human" => Ok(PlayMode::Human),
        _ => anyhow::bail!("Unknown mode: '{mode}'"),
    }
}
