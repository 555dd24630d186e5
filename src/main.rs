mod config;
mod fetch;
mod render;

use anyhow::Result;
use chrono::{Duration, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use mantel_core::{feed::FEED_TYPE, parse_feed, refresh_feed, InstanceMap, RequestWindow};
use tracing_subscriber::EnvFilter;

/// Default agenda window, relative to now
const PAST_DAYS: i64 = 7;
const FUTURE_DAYS: i64 = 30;

#[derive(Parser)]
#[command(name = "mantel")]
#[command(about = "Aggregate iCalendar feeds into a dashboard-style agenda")]
struct Cli {
    /// Path to config.toml (defaults to ~/.config/mantel/config.toml)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show upcoming events from all configured feeds
    Agenda {
        /// Window start as an ISO 8601 date or timestamp
        /// (e.g. "2026-08-01" or "2026-08-01T00:00:00Z")
        #[arg(long)]
        from: Option<String>,

        /// Window end as an ISO 8601 date or timestamp
        #[arg(long)]
        to: Option<String>,

        /// Print instances as JSON instead of the agenda view
        #[arg(long)]
        json: bool,

        /// Keep refreshing on the configured interval
        #[arg(short, long, conflicts_with = "json")]
        watch: bool,
    },
    /// List configured feeds
    Feeds,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Agenda {
            from,
            to,
            json,
            watch,
        } => cmd_agenda(&cfg, from, to, json, watch).await,
        Commands::Feeds => cmd_feeds(&cfg),
    }
}

async fn cmd_agenda(
    cfg: &config::Config,
    from: Option<String>,
    to: Option<String>,
    json: bool,
    watch: bool,
) -> Result<()> {
    if cfg.feeds.is_empty() {
        anyhow::bail!("No feeds configured. Add a [feeds.<name>] section to config.toml");
    }

    let timezone = display_timezone(cfg)?;

    if watch {
        let mut interval =
            tokio::time::interval(std::time::Duration::from_secs(cfg.refresh_interval_secs.max(1)));
        loop {
            interval.tick().await;
            let accumulated = refresh_all(cfg, from.as_deref(), to.as_deref()).await;
            print!("\x1b[2J\x1b[H");
            render::print_agenda(&accumulated.sorted(), timezone);
        }
    }

    let accumulated = refresh_all(cfg, from.as_deref(), to.as_deref()).await;
    if json {
        println!("{}", serde_json::to_string_pretty(&accumulated.sorted())?);
    } else {
        render::print_agenda(&accumulated.sorted(), timezone);
    }
    Ok(())
}

/// Refresh every configured feed once and merge the results.
///
/// Feed failures are reported per feed and never abort the run; a broken
/// feed simply contributes nothing this round.
async fn refresh_all(cfg: &config::Config, from: Option<&str>, to: Option<&str>) -> InstanceMap {
    let now = Utc::now();
    let window = match (from, to) {
        (Some(from), Some(to)) => RequestWindow::from_iso(from, to),
        _ => Some(RequestWindow {
            start: now - Duration::days(PAST_DAYS),
            end: now + Duration::days(FUTURE_DAYS),
        }),
    };

    tracing::debug!(feeds = cfg.feeds.len(), "starting refresh round");

    let mut accumulated = InstanceMap::new();
    for (name, entry) in &cfg.feeds {
        let feed = entry.to_feed_config(name);

        let parsed = match fetch::fetch_document(&entry.source).await {
            Ok(content) => parse_feed(&content),
            Err(err) => {
                tracing::warn!(feed = %name, error = %format!("{err:#}"), "feed fetch failed");
                if !feed.hide_errors {
                    let error = mantel_core::FeedError::Fetch {
                        feed: name.clone(),
                        message: format!("{err:#}"),
                    };
                    eprintln!("{FEED_TYPE}: {error}");
                }
                continue;
            }
        };

        let refresh = refresh_feed(&feed, &parsed, window.as_ref(), now);
        if let Some(error) = &refresh.error {
            if !feed.hide_errors {
                eprintln!("{FEED_TYPE}: {error}");
            }
        }
        accumulated.merge(refresh.instances);
    }

    tracing::debug!(instances = accumulated.len(), "refresh round merged");
    accumulated
}

fn cmd_feeds(cfg: &config::Config) -> Result<()> {
    if cfg.feeds.is_empty() {
        println!("No feeds configured.");
        return Ok(());
    }
    for (name, entry) in &cfg.feeds {
        println!("{} ({}): {}", name, entry.color, entry.source);
    }
    Ok(())
}

fn display_timezone(cfg: &config::Config) -> Result<Option<Tz>> {
    match &cfg.timezone {
        Some(name) => {
            let tz = name
                .parse::<Tz>()
                .map_err(|_| anyhow::anyhow!("Unknown timezone in config: {name}"))?;
            Ok(Some(tz))
        }
        None => Ok(None),
    }
}
