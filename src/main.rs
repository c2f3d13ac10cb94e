//! searxng-client: command line front end for a SearXNG instance

use anyhow::{Context as _, Result};
use clap::{Args, Parser, Subcommand};
use searxng_client::autocomplete::{AutocompleteClient, Debouncer, SuggestionEvent};
use searxng_client::config::{self, ClientSettings, StorageKind};
use searxng_client::locales::Messages;
use searxng_client::navigation::{self, Disposition, SearchAction};
use searxng_client::network::HttpClient;
use searxng_client::preferences::{
    language_name, unknown_categories, PreferenceKey, PreferenceStore, Preferences, SafeSearch,
    CATEGORIES, LANGUAGES,
};
use searxng_client::render::{Palette, Renderer};
use searxng_client::search::{SearchClient, SearchOptions};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Search a SearXNG instance from the terminal.
#[derive(Parser)]
#[command(name = "searxng-client", version, about)]
struct Cli {
    /// Path to a YAML settings file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Preference storage: sync, local, memory or none.
    #[arg(long)]
    storage: Option<StorageKind>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a search and print the results.
    Search(SearchArgs),

    /// Print autocomplete suggestions for partial input.
    Suggest {
        text: Vec<String>,
        /// Format as address-bar entries.
        #[arg(long)]
        omnibox: bool,
    },

    /// Print the results page URL to open in a browser.
    Open {
        query: Vec<String>,
        #[arg(long, default_value = "currentTab")]
        disposition: Disposition,
    },

    /// Show or change stored preferences.
    #[command(subcommand)]
    Prefs(PrefsCommand),

    /// Type queries line by line with live suggestions; an empty line searches.
    Interactive,
}

#[derive(Args)]
struct SearchArgs {
    query: Vec<String>,
    #[arg(long)]
    backend: Option<String>,
    #[arg(short, long)]
    page: Option<u32>,
    #[arg(short, long)]
    language: Option<String>,
    #[arg(long)]
    categories: Option<String>,
    #[arg(long)]
    safe_search: Option<SafeSearch>,
    /// Print the normalized response as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum PrefsCommand {
    /// Print every preference and the accepted languages and categories.
    Show,
    /// Print one preference.
    Get { key: PreferenceKey },
    /// Store one preference.
    Set { key: PreferenceKey, value: String },
    /// Restore all defaults.
    Reset,
}

struct App {
    settings: ClientSettings,
    store: PreferenceStore,
    http: HttpClient,
}

impl App {
    fn renderer(&self, prefs: &Preferences) -> Renderer {
        let palette = if std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none() {
            Palette::for_theme(prefs.theme.apply())
        } else {
            Palette::plain()
        };
        Renderer::new(
            palette,
            Messages::for_language(&prefs.language),
            self.settings.ui.max_results,
        )
    }

    fn search_client(&self) -> SearchClient {
        SearchClient::new(self.http.clone()).with_tracker_removal(self.settings.ui.strip_tracking)
    }

    fn autocomplete(&self, prefs: &Preferences) -> AutocompleteClient {
        AutocompleteClient::new(self.http.clone(), &prefs.backend, &self.settings.autocomplete)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("searxng_client=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    // Load settings; --storage overrides the file
    let mut settings = config::load(cli.config)?;
    if let Some(kind) = cli.storage {
        settings.storage.kind = kind;
    }
    // Initialize storage and the shared HTTP client
    let store = PreferenceStore::from_settings(&settings.storage);
    let http = HttpClient::with_settings(&settings.outgoing)?;
    debug!("searxng-client v{} using {} storage", searxng_client::VERSION, store.backend_name());

    let app = App {
        settings,
        store,
        http,
    };

    match cli.command {
        Command::Search(args) => run_search(&app, args).await,
        Command::Suggest { text, omnibox } => run_suggest(&app, &text.join(" "), omnibox).await,
        Command::Open { query, disposition } => run_open(&app, &query.join(" "), disposition).await,
        Command::Prefs(cmd) => run_prefs(&app, cmd).await,
        Command::Interactive => run_interactive(&app).await,
    }
}

async fn run_search(app: &App, args: SearchArgs) -> Result<()> {
    let prefs = app.store.load_or_default().await;
    let options = SearchOptions {
        backend: args.backend,
        language: args.language,
        page: args.page,
        categories: args.categories,
        safe_search: args.safe_search,
    };
    let query = args.query.join(" ");

    let renderer = app.renderer(&prefs);
    match navigation::submit(&app.search_client(), &query, &prefs, &options).await? {
        None => {}
        Some(SearchAction::Navigate(nav)) => println!("{}", nav.url),
        Some(SearchAction::Display(response)) if args.json => {
            println!("{}", serde_json::to_string_pretty(&response)?)
        }
        Some(SearchAction::Display(response)) => print!("{}", renderer.response(&response)),
    }
    Ok(())
}

async fn run_suggest(app: &App, text: &str, omnibox: bool) -> Result<()> {
    let prefs = app.store.load_or_default().await;
    let suggestions = app.autocomplete(&prefs).fetch(text).await;

    if omnibox {
        let messages = Messages::for_language(&prefs.language);
        let brand = app.settings.ui.brand.as_str();
        let entries = navigation::omnibox_suggestions(suggestions, |s| {
            messages.format("suggestionPrefix", &[("brand", brand), ("suggestion", s)])
        });
        for entry in entries {
            println!("{}\t{}", entry.content, entry.description);
        }
    } else {
        print!("{}", app.renderer(&prefs).suggestions(&suggestions));
    }
    Ok(())
}

async fn run_open(app: &App, query: &str, disposition: Disposition) -> Result<()> {
    let prefs = app.store.load_or_default().await;
    let nav = navigation::navigate(query, &prefs, disposition)?;
    println!("{}", serde_json::to_string(&nav)?);
    Ok(())
}

async fn run_prefs(app: &App, cmd: PrefsCommand) -> Result<()> {
    match cmd {
        PrefsCommand::Show => {
            let prefs = app.store.load().await?;
            for key in PreferenceKey::ALL {
                println!("{} = {}", key, prefs.value(key));
            }
            println!();
            let languages: Vec<String> = LANGUAGES
                .iter()
                .map(|(code, name)| format!("{} ({})", code, name))
                .collect();
            println!("languages: {}", languages.join(", "));
            println!("categories: {}", CATEGORIES.join(", "));
        }
        PrefsCommand::Get { key } => println!("{}", app.store.get(key).await?),
        PrefsCommand::Set { key, value } => {
            if key == PreferenceKey::Categories {
                for unknown in unknown_categories(&value) {
                    warn!("Unknown category {}, expected one of: {}", unknown, CATEGORIES.join(", "));
                }
            }
            let trimmed = value.trim();
            if key == PreferenceKey::Language && !trimmed.is_empty() && language_name(trimmed).is_none() {
                warn!("Language {} is not in the settings catalog", trimmed);
            }
            let value = key.parse_value(&value)?;
            app.store.set(key, value).await?;
            let prefs = app.store.load().await?;
            println!("{}", Messages::for_language(&prefs.language).get("settingsSaved"));
        }
        PrefsCommand::Reset => {
            app.store.reset().await?;
            println!("{}", Messages::for_language("en").get("settingsReset"));
        }
    }
    Ok(())
}

async fn run_interactive(app: &App) -> Result<()> {
    let prefs = app.store.load_or_default().await;
    let renderer = app.renderer(&prefs);
    let search = app.search_client();
    let autocomplete = Arc::new(app.autocomplete(&prefs));
    let (debouncer, mut events) = Debouncer::new(
        autocomplete,
        Duration::from_millis(app.settings.autocomplete.debounce_ms),
        app.settings.autocomplete.min_length,
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut current = String::new();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line.context("failed to read input")? {
                    None => break,
                    // An empty line submits what was typed so far
                    Some(line) if line.trim().is_empty() => {
                        debouncer.dismiss();
                        if current.trim().is_empty() {
                            continue;
                        }
                        eprintln!("{}", renderer.messages().get("searching"));
                        let response = search.search(current.trim(), &prefs, &SearchOptions::default()).await;
                        print!("{}", renderer.response(&response));
                        current.clear();
                    }
                    Some(line) => {
                        current = line;
                        debouncer.input(&current);
                    }
                }
            }
            Some(event) = events.recv() => {
                if let SuggestionEvent::Show { suggestions, .. } = event {
                    print!("{}", renderer.suggestions(&suggestions));
                }
            }
        }
    }
    Ok(())
}
