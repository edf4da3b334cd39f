use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use shelfwise_config::{Config, ConfigManager};
use std::path::PathBuf;

mod commands;
mod logging;
mod tui_mode;

use commands::Session;

fn build_cli() -> Command {
    Command::new("shelfwise")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Personal book tracker backed by the Open Library catalog")
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .value_name("DIR")
                .help("Directory holding the library files")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Path to the configuration file")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .subcommand(Command::new("tui").about("Open the terminal interface (default)"))
        .subcommand(
            Command::new("search")
                .about("Search the catalog")
                .arg(Arg::new("query").required(true).num_args(1..).value_name("QUERY").help("Title or author"))
                .arg(page_arg()),
        )
        .subcommand(
            Command::new("add")
                .about("Search the catalog and add one result to your library")
                .arg(Arg::new("query").required(true).num_args(1..).value_name("QUERY").help("Title or author"))
                .arg(
                    Arg::new("pick")
                        .long("pick")
                        .required(true)
                        .value_name("N")
                        .help("Result number to add, as shown by `search`")
                        .value_parser(value_parser!(usize)),
                )
                .arg(page_arg()),
        )
        .subcommand(
            Command::new("list")
                .about("List the books in your library")
                .arg(
                    Arg::new("finished")
                        .short('f')
                        .long("finished")
                        .help("Show only finished books")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("remove")
                .about("Remove a book from your library")
                .arg(key_arg()),
        )
        .subcommand(
            Command::new("status")
                .about("Set the reading status of a book")
                .arg(key_arg())
                .arg(
                    Arg::new("status")
                        .required(true)
                        .value_name("STATUS")
                        .value_parser(["owned", "started", "finished"]),
                ),
        )
        .subcommand(
            Command::new("rate")
                .about("Rate a book from 0 (unrated) to 5 stars")
                .arg(key_arg())
                .arg(
                    Arg::new("stars")
                        .required(true)
                        .value_name("STARS")
                        .value_parser(value_parser!(u8).range(0..=5)),
                ),
        )
        .subcommand(
            Command::new("summary")
                .about("Show the summary of a book, fetching it if needed")
                .arg(key_arg()),
        )
        .subcommand(Command::new("stats").about("Show library statistics"))
        .subcommand(
            Command::new("export")
                .about("Export the library as JSON")
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("FILE")
                        .help("Output file (stdout when omitted)")
                        .value_parser(value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Manage the configuration file")
                .subcommand_required(true)
                .subcommand(Command::new("init").about("Write the default configuration if none exists"))
                .subcommand(Command::new("show").about("Print the effective configuration"))
                .subcommand(Command::new("path").about("Print the configuration file path")),
        )
}

fn page_arg() -> Arg {
    Arg::new("page")
        .short('p')
        .long("page")
        .value_name("N")
        .help("Result page")
        .default_value("1")
        .value_parser(value_parser!(u32).range(1..))
}

fn key_arg() -> Arg {
    Arg::new("key")
        .required(true)
        .value_name("KEY")
        .help("Book key (/works/OL45883W) or work id (OL45883W)")
}

fn query(matches: &ArgMatches) -> String {
    matches
        .get_many::<String>("query")
        .map(|words| words.cloned().collect::<Vec<_>>().join(" "))
        .unwrap_or_default()
}

fn config_manager(matches: &ArgMatches) -> Result<ConfigManager> {
    let manager = match matches.get_one::<PathBuf>("config") {
        Some(path) => ConfigManager::with_file(path.clone()),
        None => ConfigManager::new(),
    };
    manager.context("Failed to locate the configuration file")
}

fn data_dir(matches: &ArgMatches, config: &Config) -> Result<PathBuf> {
    match matches.get_one::<PathBuf>("data-dir") {
        Some(dir) => Ok(dir.clone()),
        None => ConfigManager::data_dir(config).context("Failed to resolve the data directory"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = build_cli().get_matches();
    let manager = config_manager(&matches)?;

    if let Some(("config", sub)) = matches.subcommand() {
        logging::init_stderr(&Config::default());
        return commands::config(&manager, sub);
    }

    let config = manager
        .load_with_env_overrides()
        .with_context(|| format!("Failed to load {}", manager.config_path().display()))?;
    let data_dir = data_dir(&matches, &config)?;

    let subcommand = matches.subcommand().unwrap_or(("tui", &matches));
    if subcommand.0 == "tui" {
        let log_file = logging::init_file(&config, &data_dir)?;
        log::info!("Logging to {}", log_file.display());
    } else {
        logging::init_stderr(&config);
    }

    let session = Session::open(config, data_dir)?;
    match subcommand {
        ("search", sub) => {
            let page = sub.get_one::<u32>("page").copied().unwrap_or(1);
            commands::search(&session, &query(sub), page).await
        }
        ("add", sub) => {
            let page = sub.get_one::<u32>("page").copied().unwrap_or(1);
            let pick = sub.get_one::<usize>("pick").copied().unwrap_or(1);
            commands::add(&session, &query(sub), page, pick).await
        }
        ("list", sub) => commands::list(&session, sub.get_flag("finished")),
        ("remove", sub) => commands::remove(&session, required(sub, "key")?),
        ("status", sub) => commands::set_status(&session, required(sub, "key")?, required(sub, "status")?),
        ("rate", sub) => {
            let stars = sub.get_one::<u8>("stars").copied().unwrap_or(0);
            commands::rate(&session, required(sub, "key")?, stars)
        }
        ("summary", sub) => commands::summary(&session, required(sub, "key")?).await,
        ("stats", _) => commands::stats(&session),
        ("export", sub) => commands::export(&session, sub.get_one::<PathBuf>("output")),
        _ => tui_mode::run(session).await,
    }
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| anyhow::anyhow!("Missing argument: {name}"))
}
