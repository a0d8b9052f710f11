use std::convert::Infallible;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;

use hoplite_core::RouteKey;
use hoplite_daemon::config::DaemonConfig;
use hoplite_daemon::feed::{self, FeedCommand};
use hoplite_daemon::policy::RulePolicy;
use hoplite_daemon::show;
use hoplite_redist::{InstalledRoutes, Redistributor, UpdateSender};

#[derive(Parser)]
#[command(name = "hoplited", about = "Route redistribution daemon")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log in JSON format
    #[arg(long)]
    json: bool,
}

/// Installed-route view for the standalone binary. The best-path table is
/// not wired in yet, so every lookup misses and eviction never fires.
struct NoInstalledRoutes;

impl InstalledRoutes for NoInstalledRoutes {
    type Route = Infallible;

    fn find_installed(&self, _key: &RouteKey) -> Option<Infallible> {
        None
    }

    fn uninstall(&mut self, route: Infallible) {
        match route {}
    }
}

/// Logs each triggered flood in place of a real update scheduler.
struct LogUpdates;

impl UpdateSender for LogUpdates {
    fn send_update(&mut self, key: &RouteKey) {
        tracing::info!(key = %key, "update flood triggered");
    }
}

fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match DaemonConfig::load(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("failed to load config from {}: {e}", path.display());
                std::process::exit(1);
            }
        },
        None => DaemonConfig::default(),
    };

    // Initialize logging
    let format = if cli.json {
        "json"
    } else {
        config.logging.format.as_str()
    };
    match format {
        "json" => hoplite_daemon::logging::init_json(),
        "text" => hoplite_daemon::logging::init(),
        unknown => {
            eprintln!("unknown log format {unknown:?}, expected \"text\" or \"json\"");
            std::process::exit(1);
        }
    }

    let policy = match RulePolicy::compile(&config.redistribute) {
        Ok(p) => p,
        Err(e) => {
            tracing::error!("failed to compile redistribution policy: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!(rules = policy.rule_count(), "redistribution policy loaded");

    let mut redist = Redistributor::new(policy);
    let mut installed = NoInstalledRoutes;
    let mut updates = LogUpdates;

    // Drive the table from stdin, one event per line
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!("feed read failed: {e}");
                break;
            }
        };

        let command = match feed::parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                tracing::warn!(line = %line, "dropped feed line: {e}");
                continue;
            }
        };

        match command {
            FeedCommand::Add(candidate) => {
                if let Err(e) = redist.announce(&candidate, &mut installed, &mut updates) {
                    tracing::warn!(key = %candidate.key, "export dropped: {e}");
                }
            }
            FeedCommand::Del(key) => {
                redist.withdraw(&key);
            }
            FeedCommand::Show => {
                let rendered = show::render_table(redist.table());
                if stdout
                    .write_all(rendered.as_bytes())
                    .and_then(|()| stdout.flush())
                    .is_err()
                {
                    break;
                }
            }
        }
    }

    tracing::info!(population = redist.table().len(), "feed closed, shutting down");
}
