mod command;
mod render;
mod terminal_title;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use prometheus::{Encoder, Registry, TextEncoder};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use popcorn_core::{
    is_active_query, load_config, metrics, validate_config, DisplayTitleSink, Key, KeyOutcome,
    KeyValueStore, MovieBrowser, MovieCatalog, OmdbClient, SanitizedConfig, SqliteKeyValueStore,
    WatchedCollection,
};

use command::{Command, HELP};
use terminal_title::TerminalTitle;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Logs go to stderr so they never interleave with rendered output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config_path = std::env::var("POPCORN_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("popcorn.toml"));

    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;
    validate_config(&config).context("Configuration validation failed")?;
    info!(
        "Configuration loaded: {}",
        serde_json::to_string(&SanitizedConfig::from(&config)).unwrap_or_default()
    );

    let registry = Registry::new();
    for metric in metrics::all_metrics() {
        registry
            .register(metric)
            .context("Failed to register metrics")?;
    }

    let catalog: Arc<dyn MovieCatalog> =
        Arc::new(OmdbClient::new(&config.catalog).context("Failed to create OMDb client")?);

    let store: Arc<dyn KeyValueStore> = Arc::new(
        SqliteKeyValueStore::new(&config.storage.path).context("Failed to open storage")?,
    );
    let watched = WatchedCollection::load(store).context("Failed to load watched list")?;
    info!("Storage initialized at {:?}", config.storage.path);

    let title_sink = Arc::new(TerminalTitle);
    let mut browser = MovieBrowser::new(
        catalog,
        watched,
        title_sink.clone(),
        config.display.default_title.clone(),
    );
    title_sink.set_label(&config.display.default_title);

    println!("{}", HELP);
    println!("{}", render::stats(&browser.statistics()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        if command == Command::Quit {
            break;
        }
        if let Err(e) = execute(&mut browser, &registry, command).await {
            println!("error: {}", e);
        }
    }

    browser.shutdown().await;
    info!("Goodbye");
    Ok(())
}

async fn execute(browser: &mut MovieBrowser, registry: &Registry, command: Command) -> Result<()> {
    match command {
        Command::Search(text) => {
            browser.set_query(&text).await;
            browser.wait_idle().await;
            if is_active_query(&text) {
                println!("{}", render::search(&browser.search_state().await));
            } else {
                println!("Search cleared");
            }
        }
        Command::Open(target) => {
            let id = resolve_result(browser, &target).await;
            match browser.select_movie(&id).await {
                Some(_) => {
                    browser.wait_idle().await;
                    if let Some(view) = browser.detail_view().await {
                        println!("{}", render::detail(&view));
                    }
                }
                None => println!("Closed {}", id),
            }
        }
        Command::Close => browser.close_movie().await,
        Command::Rate(rating) => {
            browser.rate(rating)?;
            if let Some(view) = browser.detail_view().await {
                println!("{}", render::detail(&view));
            }
        }
        Command::Add => {
            let entry = browser.add_selected_to_watched().await?;
            println!("Added {} ({})", entry.title, entry.year);
            println!("{}", render::stats(&browser.statistics()));
        }
        Command::Remove(id) => {
            if browser.remove_watched(&id)? {
                println!("Removed {}", id);
            } else {
                println!("{} is not in your watched list", id);
            }
        }
        Command::Watched => {
            println!("{}", render::stats(&browser.statistics()));
            println!("{}", render::watched(browser.watched().entries()));
        }
        Command::Stats => println!("{}", render::stats(&browser.statistics())),
        Command::Key(name) => match browser.handle_key(&Key::parse(&name), false).await {
            KeyOutcome::FocusSearch => println!("Search cleared"),
            KeyOutcome::ClosedDetail => println!("Closed"),
            KeyOutcome::Ignored => {}
        },
        Command::Metrics => {
            let mut buffer = Vec::new();
            TextEncoder::new()
                .encode(&registry.gather(), &mut buffer)
                .context("Failed to encode metrics")?;
            println!("{}", String::from_utf8_lossy(&buffer));
        }
        Command::Help => println!("{}", HELP),
        Command::Quit => {}
    }
    Ok(())
}

/// Map a 1-based result position to its id; anything else is taken as an id.
async fn resolve_result(browser: &MovieBrowser, target: &str) -> String {
    if let Ok(position) = target.parse::<usize>() {
        let state = browser.search_state().await;
        if let Some(item) = position.checked_sub(1).and_then(|i| state.results.get(i)) {
            return item.id.clone();
        }
    }
    target.to_string()
}
