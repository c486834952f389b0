use anyhow::Context;
use clap::{Parser, Subcommand};
use media_monitor::{MediaMonitor, MonitorConfig, Period};
use serde::Serialize;
use std::env;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "AI news monitor for Dutch media", long_about = None)]
struct Cli {
    /// JSON configuration file; built-in defaults are used when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan all feeds and store the AI articles found
    Scan {
        #[arg(long, default_value_t = 24)]
        hours: u32,
    },
    /// Trending AI topics for a period
    Trends {
        #[arg(long, value_enum, default_value_t = Period::Week)]
        period: Period,
        #[arg(long, default_value_t = 3)]
        min_mentions: usize,
        /// Restrict to these topic labels
        #[arg(long = "category")]
        categories: Vec<String>,
    },
    /// Experts quoted in recent coverage
    Experts {
        #[arg(long)]
        topic: Option<String>,
        #[arg(long, value_enum, default_value_t = Period::Month)]
        period: Period,
        #[arg(long, default_value_t = 2)]
        min_quotes: usize,
    },
    /// Podcast topic suggestions
    Suggest {
        #[arg(long = "focus")]
        focus_areas: Vec<String>,
    },
    /// Weekly overview of trends, experts and suggestions
    Report,
    /// Fetch and analyze a single article
    Fetch { url: String },
    /// Article store statistics
    Stats,
    /// Delete stored articles older than the given number of days
    Cleanup {
        #[arg(long, default_value_t = 90)]
        days: u32,
    },
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn non_empty(values: &[String]) -> Option<&[String]> {
    (!values.is_empty()).then_some(values)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => MonitorConfig::from_json_file(path),
        None => MonitorConfig::default(),
    };
    if let Ok(database_url) = env::var("DATABASE_URL") {
        config.database_url = database_url;
    }

    info!("Using article store at {}", config.database_url);

    let monitor = MediaMonitor::new(&config).await.map_err(|e| {
        error!("Failed to initialize the media monitor: {}", e);
        e
    })?;

    match cli.command {
        Command::Scan { hours } => print_json(&monitor.scan(hours).await)?,
        Command::Trends {
            period,
            min_mentions,
            categories,
        } => {
            let topics = monitor
                .trending_topics(period, min_mentions, non_empty(&categories))
                .await
                .context("trend analysis failed")?;
            print_json(&topics)?;
        }
        Command::Experts {
            topic,
            period,
            min_quotes,
        } => {
            let experts = monitor
                .identify_experts(topic.as_deref(), period, min_quotes)
                .await
                .context("expert lookup failed")?;
            print_json(&experts)?;
        }
        Command::Suggest { focus_areas } => {
            let suggestions = monitor
                .topic_suggestions(non_empty(&focus_areas))
                .await
                .context("topic suggestions failed")?;
            print_json(&suggestions)?;
        }
        Command::Report => {
            let report = monitor.weekly_report().await.context("weekly report failed")?;
            print_json(&report)?;
        }
        Command::Fetch { url } => print_json(&monitor.fetch_article(&url).await)?,
        Command::Stats => print_json(&monitor.store_info().await?)?,
        Command::Cleanup { days } => {
            let deleted = monitor.cleanup(days).await?;
            print_json(&serde_json::json!({ "deleted": deleted, "days": days }))?;
        }
    }

    Ok(())
}
