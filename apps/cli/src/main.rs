use std::{sync::Arc, time::Duration};

use almanac_core::{
    DEFAULT_LIST_LIMIT, DateKey, EventQuery, HistoryApi, HistoryWidget, HttpHistoryApi, ListQuery,
    LoadOutcome, Panel, WidgetConfig,
    config::{BASE_URL_ENV, DEFAULT_BASE_URL, REFRESH_SECS_ENV, SESSION_ENV, parse_refresh_secs},
    format_event_list, format_panel, format_share, run_auto_refresh,
};
use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::broadcast;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "almanac")]
#[command(about = "Mountaineering history for today, any day, or at random")]
struct Cli {
    /// Base URL of the club site
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    /// Value of the site's `session` cookie (the API requires a logged-in user)
    #[arg(long, env = SESSION_ENV, hide_env_values = true, global = true)]
    session: Option<String>,

    /// Seconds between refreshes in `watch` mode
    #[arg(long, env = REFRESH_SECS_ENV, value_parser = parse_refresh_secs, global = true)]
    refresh_secs: Option<Duration>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show today's event
    Today,
    /// Show the event for a day of the year
    Date {
        /// Day in MM-DD form
        date: DateKey,
    },
    /// Show a random event
    Random,
    /// List featured events
    Featured,
    /// List events of one category (first_ascent, tragedy, rescue, ...)
    Category {
        category: String,
        #[arg(short, long, default_value_t = DEFAULT_LIST_LIMIT)]
        limit: u32,
    },
    /// Search events
    Search {
        query: String,
        #[arg(short, long, default_value_t = DEFAULT_LIST_LIMIT)]
        limit: u32,
    },
    /// Print share text for today's event, or for `--date`
    Share {
        #[arg(short, long)]
        date: Option<DateKey>,
    },
    /// Print the address of the full history page
    More,
    /// Keep showing today's event, refreshing periodically, until Ctrl-C
    Watch,
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn print_header() {
    println!(
        "\n{}  {}\n",
        style("almanac").cyan().bold(),
        style("Na današnji dan").dim()
    );
    println!("{}", style("─".repeat(60)).dim());
}

/// Run one load with a spinner and print the resulting panel
async fn show(widget: &HistoryWidget<HttpHistoryApi>, query: EventQuery) -> Result<()> {
    let spinner = create_spinner(&format!("Loading {} event...", query.name()));
    let outcome = widget.load(query).await;
    spinner.finish_and_clear();

    print_panel(widget);

    match outcome {
        LoadOutcome::Failed { reason } => {
            eprintln!("{} {}", style("Error:").red().bold(), reason);
            std::process::exit(1);
        }
        LoadOutcome::Rendered { .. } | LoadOutcome::Empty | LoadOutcome::Skipped => Ok(()),
    }
}

fn print_panel(widget: &HistoryWidget<HttpHistoryApi>) {
    let panel = widget.panel();
    let text = format_panel(&panel, widget.likes().unwrap_or(0));
    match panel {
        Panel::Content(_) => println!("{}", text),
        Panel::Empty => println!("{}", style(text.trim_end()).yellow()),
        Panel::Error => println!("{}", style(text.trim_end()).red()),
        Panel::Loading => println!("{}", style(text.trim_end()).dim()),
    }
}

async fn list(api: &HttpHistoryApi, query: ListQuery) -> Result<()> {
    let spinner = create_spinner(&format!("Loading {}...", query.name()));
    let list = api.fetch_events(&query).await;
    spinner.finish_and_clear();

    let list = list?;
    if !list.success {
        let reason = list.error.unwrap_or_else(|| "request was not successful".to_string());
        eprintln!("{} {}", style("Error:").red().bold(), reason);
        std::process::exit(1);
    }

    if list.events.is_empty() {
        println!("{}", style("Ni zadetkov.").yellow());
    } else {
        println!("{}", format_event_list(&list.events));
    }

    let shown = list.events.len() as u64;
    match list.count {
        Some(total) if total > shown => println!(
            "{}",
            style(format!("Prikazanih {shown} od {total}")).dim()
        ),
        _ => {}
    }
    Ok(())
}

async fn watch(widget: Arc<HistoryWidget<HttpHistoryApi>>, period: Duration) -> Result<()> {
    let (stop, shutdown) = broadcast::channel(1);
    let mut panels = widget.subscribe();
    let refresher = tokio::spawn(run_auto_refresh(Arc::clone(&widget), period, shutdown));

    println!(
        "{} every {} {}",
        style("Refreshing").dim(),
        style(format!("{}s", period.as_secs())).cyan(),
        style("(Ctrl-C to stop)").dim()
    );

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = panels.changed() => {
                if changed.is_err() {
                    break;
                }
                let loading = panels.borrow_and_update().is_loading();
                if !loading {
                    println!("{}", style("─".repeat(60)).dim());
                    print_panel(&widget);
                }
            }
        }
    }

    let _ = stop.send(());
    refresher.await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = WidgetConfig::new(&cli.base_url)?.with_session_cookie(cli.session);
    if let Some(period) = cli.refresh_secs {
        config = config.with_refresh_interval(period);
    }

    let api = HttpHistoryApi::new(&config)?;
    let widget = Arc::new(HistoryWidget::new(api, config.base_url.clone()));

    print_header();

    match cli.command {
        Command::Today => show(&widget, EventQuery::Today).await,
        Command::Date { date } => show(&widget, EventQuery::date(date)).await,
        Command::Random => show(&widget, EventQuery::Random).await,
        Command::Featured => list(widget.api(), ListQuery::Featured).await,
        Command::Category { category, limit } => {
            list(widget.api(), ListQuery::Category { category, limit }).await
        }
        Command::Search { query, limit } => {
            list(widget.api(), ListQuery::Search { query, limit }).await
        }
        Command::Share { date } => {
            let query = date.map(EventQuery::date).unwrap_or(EventQuery::Today);
            show(&widget, query).await?;
            if let Some(payload) = widget.share() {
                println!("{}", style("─".repeat(60)).dim());
                println!("{}", format_share(&payload));
            }
            Ok(())
        }
        Command::More => {
            println!("{}", style(config.history_page_url()).cyan());
            Ok(())
        }
        Command::Watch => watch(widget, config.refresh_interval).await,
    }
}
