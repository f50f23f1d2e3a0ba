use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use nextstep_catalog::EventCategory;
use nextstep_tracker::{BadgeFilter, LogConfig, LogNotifier, ToastBoard, Tracker, TrackerConfig};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::Action;

fn cli() -> Command {
    Command::new("nextstep")
        .version(nextstep_tracker::VERSION)
        .about("Track civic event completions and earned badges")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Profile directory holding the progress records"),
        )
        .arg(
            Arg::new("catalog")
                .long("catalog")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Badge and event catalog (JSON or YAML)"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines"),
        )
        .subcommand(
            Command::new("badges")
                .about("Show the badge grid")
                .arg(
                    Arg::new("filter")
                        .long("filter")
                        .default_value("all")
                        .value_parser(value_parser!(BadgeFilter))
                        .help("all, earned, locked or a badge category"),
                ),
        )
        .subcommand(
            Command::new("events")
                .about("List events")
                .arg(
                    Arg::new("category")
                        .long("category")
                        .value_parser(value_parser!(EventCategory))
                        .help("Only events in this category"),
                ),
        )
        .subcommand(
            Command::new("event")
                .about("Show one event")
                .arg(Arg::new("id").required(true).help("Event id, e.g. event-4")),
        )
        .subcommand(
            Command::new("complete")
                .about("Mark an event completed")
                .arg(Arg::new("id").required(true).help("Event id")),
        )
        .subcommand(
            Command::new("uncomplete")
                .about("Reverse an event completion")
                .arg(Arg::new("id").required(true).help("Event id")),
        )
        .subcommand(Command::new("stats").about("Show profile statistics"))
        .subcommand(Command::new("activity").about("Show completed events, newest first"))
        .subcommand(Command::new("reset").about("Clear all progress (logout)"))
}

/// Config file plus command-line overrides
fn resolve_config(matches: &ArgMatches) -> anyhow::Result<TrackerConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => TrackerConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => TrackerConfig::default(),
    };
    if let Some(dir) = matches.get_one::<PathBuf>("data-dir") {
        config = config.with_data_dir(dir);
    }
    if let Some(path) = matches.get_one::<PathBuf>("catalog") {
        config = config.with_catalog(path);
    }
    if matches.get_flag("log-json") {
        config = config.with_json_logs(true);
    }
    config.validate()?;
    Ok(config)
}

fn init_tracing(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&log.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    if log.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();
    let config = resolve_config(&matches)?;
    init_tracing(&config.log);
    tracing::debug!(
        backend = ?config.storage.backend,
        data_dir = %config.storage.data_dir.display(),
        "configuration resolved"
    );

    let action = Action::from_matches(&matches)?;
    let catalog = config.load_catalog().context("loading catalog")?;
    let storage = config.storage.open();
    let board = ToastBoard::with_lifetime(config.notifications.lifetime());
    let tracker = Tracker::new(&catalog, storage, (&board, LogNotifier));

    let mut out = std::io::stdout().lock();
    commands::run(&tracker, &board, action, &mut out)?;
    out.flush()?;
    Ok(())
}
