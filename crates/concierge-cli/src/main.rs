//! `concierge`: chat with the spreadsheet-driven concierge from a terminal

mod app;
mod chat;
mod input;
mod render;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use concierge_source::ConciergeConfig;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn cli() -> Command {
    Command::new("concierge")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Spreadsheet-driven concierge menu with ticket filing")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Directory holding the ticket snapshot"),
        )
        .subcommand(
            Command::new("chat")
                .about("Start an interactive session (default)")
                .arg(
                    Arg::new("menu")
                        .long("menu")
                        .value_parser(value_parser!(PathBuf))
                        .help("Read the menu grid from a JSON file instead of Google Sheets"),
                ),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse a JSON grid and print the resulting menu tree")
                .arg(
                    Arg::new("file")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Grid file: {\"values\": [[...], ...]} or a bare array of rows"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output the tree as JSON"),
                ),
        )
        .subcommand(
            Command::new("tickets")
                .about("List tickets filed so far")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output the raw snapshot"),
                ),
        )
}

/// Logs go to stderr so they never interleave with the chat on stdout
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let json = std::env::var("CONCIERGE_LOG_JSON").is_ok_and(|v| v == "1" || v == "true");
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn load_config(matches: &ArgMatches) -> anyhow::Result<ConciergeConfig> {
    let mut config = ConciergeConfig::load(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
    if let Some(dir) = matches.get_one::<PathBuf>("data-dir") {
        config = config.with_data_dir(dir);
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let matches = cli().get_matches();
    let config = load_config(&matches)?;

    match matches.subcommand() {
        Some(("parse", args)) => {
            let Some(file) = args.get_one::<PathBuf>("file") else {
                anyhow::bail!("missing grid file");
            };
            app::parse(file, args.get_flag("json")).await
        }
        Some(("tickets", args)) => app::tickets(&config, args.get_flag("json")),
        Some(("chat", args)) => {
            let menu = args.get_one::<PathBuf>("menu").map(PathBuf::as_path);
            app::chat(&config, menu).await
        }
        None => app::chat(&config, None).await,
        Some((other, _)) => anyhow::bail!("unknown command {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        cli().debug_assert();
    }

    #[test]
    fn global_flags_reach_subcommands() {
        let matches = cli()
            .try_get_matches_from(["concierge", "tickets", "--data-dir", "/tmp/x", "--json"])
            .unwrap();
        let config = load_config(&matches).unwrap();
        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/x"));
        let (name, args) = matches.subcommand().unwrap();
        assert_eq!(name, "tickets");
        assert!(args.get_flag("json"));
    }
}
