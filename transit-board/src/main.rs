use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use transit_board::board::{KNOWN_PRODUCTS, ModeFilter};
use transit_board::cache::{CachedSource, SearchCacheConfig};
use transit_board::domain::{Route, Station};
use transit_board::preferences::{DEFAULT_FILE_NAME, FavoriteOutcome, Preferences, PreferencesStore};
use transit_board::refresh::{BoardClosed, BoardConfig, BoardHandle, BoardSnapshot, Coordinator};
use transit_board::source::JourneySource;
use transit_board::vbb::{MockSource, VbbClient, VbbConfig};
use transit_board::view::{clean_station_name, render_detail, render_header, render_list};

/// Shortest query sent to station search.
const MIN_QUERY_CHARS: usize = 2;

const HELP: &str = "\
Keys: r refresh   R reverse   j/k move   d detail   a add favorite
      f favorites   f N load favorite   x N delete favorite
      s QUERY search   o N / t N set origin/destination from search
      m MODE toggle mode (suburban, subway, tram, bus, ferry, regional, express)
      q quit";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let store = match std::env::var("TRANSIT_BOARD_PREFS") {
        Ok(path) => PreferencesStore::new(path),
        Err(_) => PreferencesStore::in_home_dir().unwrap_or_else(|e| {
            warn!(error = %e, "falling back to preferences in the working directory");
            PreferencesStore::new(DEFAULT_FILE_NAME)
        }),
    };
    let prefs = store.load();

    let mut config = BoardConfig::default();
    if let Some(secs) = std::env::var("TRANSIT_BOARD_REFRESH_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|&secs| secs > 0)
    {
        config = config.with_refresh_interval(Duration::from_secs(secs));
    }

    match std::env::var("TRANSIT_BOARD_MOCK_DIR") {
        Ok(dir) => {
            let source = MockSource::new(&dir).expect("Failed to load fixture data");
            info!(dir = %dir, routes = source.route_count(), "using fixture data");
            run(source, store, prefs, config).await;
        }
        Err(_) => {
            let mut vbb_config = VbbConfig::default();
            if let Ok(base) = std::env::var("TRANSIT_BOARD_API_BASE") {
                vbb_config = vbb_config.with_base_url(base);
            }
            info!(base_url = %vbb_config.base_url, "using live journey API");
            let client = VbbClient::new(vbb_config).expect("Failed to create API client");
            let source = CachedSource::new(client, &SearchCacheConfig::default());
            run(source, store, prefs, config).await;
        }
    }
}

async fn run<S: JourneySource>(
    source: S,
    store: PreferencesStore,
    prefs: Preferences,
    config: BoardConfig,
) {
    let source = Arc::new(source);
    let filters = ModeFilter::all_enabled();
    let (handle, task) = Coordinator::spawn(
        Arc::clone(&source),
        prefs.current_route(),
        filters.clone(),
        config,
    );

    tokio::spawn(draw_on_change(handle.clone()));
    println!("{HELP}");

    let mut front = FrontEnd {
        source,
        handle: handle.clone(),
        store,
        prefs,
        filters,
        search_results: Vec::new(),
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => break,
            line = lines.next_line() => match line {
                Ok(Some(line)) => match front.execute(line.trim()).await {
                    Ok(Flow::Continue) => {}
                    Ok(Flow::Quit) | Err(BoardClosed) => break,
                },
                Ok(None) => break,
                Err(e) => {
                    warn!(error = %e, "failed to read input");
                    break;
                }
            },
        }
    }

    handle.shutdown();
    if let Err(e) = task.await {
        warn!(error = %e, "board task ended abnormally");
    }
}

/// Redraw whenever something other than the animation frame changes.
async fn draw_on_change(handle: BoardHandle) {
    let mut rx = handle.subscribe();
    let mut last_key = None;

    while rx.changed().await.is_ok() {
        let snapshot = Arc::clone(&rx.borrow_and_update());
        let key = redraw_key(&snapshot);
        if last_key.as_ref() == Some(&key) {
            continue;
        }
        last_key = Some(key);

        let now = Local::now().fixed_offset();
        println!();
        println!("{}", render_header(&snapshot, &now));
        println!("{}", render_list(&snapshot, &now));
    }
}

type RedrawKey = (usize, bool, bool, usize, Option<String>, String, String);

/// What a redraw depends on.
fn redraw_key(snapshot: &BoardSnapshot) -> RedrawKey {
    (
        Arc::as_ptr(&snapshot.journeys) as *const () as usize,
        snapshot.loading,
        snapshot.highlight_active(),
        snapshot.selected,
        snapshot.status_text().map(str::to_string),
        snapshot.route.origin.id.clone(),
        snapshot.route.dest.id.clone(),
    )
}

enum Flow {
    Continue,
    Quit,
}

/// Line-oriented command handling.
struct FrontEnd<S> {
    source: Arc<S>,
    handle: BoardHandle,
    store: PreferencesStore,
    prefs: Preferences,
    filters: ModeFilter,
    search_results: Vec<Station>,
}

impl<S: JourneySource> FrontEnd<S> {
    async fn execute(&mut self, line: &str) -> Result<Flow, BoardClosed> {
        let (cmd, arg) = match line.split_once(char::is_whitespace) {
            Some((cmd, arg)) => (cmd, arg.trim()),
            None => (line, ""),
        };

        match (cmd, arg) {
            ("", _) => {}
            ("q", _) => return Ok(Flow::Quit),
            ("r", _) => self.handle.refresh().await?,
            ("R", _) => {
                self.prefs.reverse();
                self.store.save_or_warn(&self.prefs);
                self.handle.reverse_route().await?;
            }
            ("j", _) => self.handle.select_next().await?,
            ("k", _) => self.handle.select_previous().await?,
            ("d", _) => self.show_detail().await,
            ("a", _) => {
                let outcome = self.prefs.add_favorite();
                if outcome == FavoriteOutcome::Added {
                    self.store.save_or_warn(&self.prefs);
                }
                self.handle.show_status(outcome.message()).await?;
            }
            ("f", "") => self.list_favorites(),
            ("f", n) => match parse_index(n).and_then(|i| self.prefs.use_favorite(i)) {
                Some(route) => {
                    self.store.save_or_warn(&self.prefs);
                    self.handle.set_route(route).await?;
                }
                None => println!("No favorite {n}"),
            },
            ("x", n) => match parse_index(n).and_then(|i| self.prefs.remove_favorite(i)) {
                Some(_) => {
                    self.store.save_or_warn(&self.prefs);
                    self.list_favorites();
                }
                None => println!("No favorite {n}"),
            },
            ("s", query) => self.search(query).await,
            ("o", n) | ("t", n) => {
                let Some(station) = parse_index(n).and_then(|i| self.search_results.get(i)) else {
                    println!("No search result {n}");
                    return Ok(Flow::Continue);
                };
                let mut route = self.prefs.current_route();
                if cmd == "o" {
                    route.origin = station.clone();
                } else {
                    route.dest = station.clone();
                }
                self.prefs.set_route(route.clone());
                self.store.save_or_warn(&self.prefs);
                self.handle.set_route(route).await?;
            }
            ("m", mode) if KNOWN_PRODUCTS.contains(&mode) => {
                let enabled = !self.filters.allows(mode);
                self.filters.set(mode, enabled);
                let state = if enabled { "on" } else { "off" };
                self.handle.show_status(format!("{mode} {state}")).await?;
                self.handle.set_filters(self.filters.clone()).await?;
            }
            _ => println!("{HELP}"),
        }
        Ok(Flow::Continue)
    }

    async fn show_detail(&self) {
        let snapshot = self.handle.snapshot();
        let Some(journey) = snapshot.selected_journey() else {
            println!("No journey selected");
            return;
        };

        let mut delays = HashMap::new();
        for leg in journey.legs() {
            if !delays.contains_key(&leg.line_name) {
                let samples = self.handle.delay_history(&leg.line_name).await;
                delays.insert(leg.line_name.clone(), samples);
            }
        }

        let now = Local::now().fixed_offset();
        println!("{}", render_detail(journey, &now, &delays));
    }

    fn list_favorites(&self) {
        if self.prefs.routes.is_empty() {
            println!("No favorites saved. Press 'a' to add the current route.");
            return;
        }
        for (i, route) in self.prefs.routes.iter().enumerate() {
            println!("{}. {}", i + 1, route_label(route));
        }
    }

    async fn search(&mut self, query: &str) {
        if query.chars().count() < MIN_QUERY_CHARS {
            println!("Type at least {MIN_QUERY_CHARS} characters to search");
            return;
        }

        match self.source.search_stations(query).await {
            Ok(stations) if stations.is_empty() => println!("No stations found"),
            Ok(stations) => {
                for (i, station) in stations.iter().enumerate() {
                    println!("{}. {}", i + 1, station.name);
                }
                self.search_results = stations;
            }
            Err(e) => {
                warn!(query, error = %e, "station search failed");
                println!("Station search failed");
            }
        }
    }
}

/// Parse a 1-based position typed by the user.
fn parse_index(arg: &str) -> Option<usize> {
    arg.parse::<usize>().ok()?.checked_sub(1)
}

fn route_label(route: &Route) -> String {
    format!(
        "{} → {}",
        clean_station_name(&route.origin.name),
        clean_station_name(&route.dest.name)
    )
}
