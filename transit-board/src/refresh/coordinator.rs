//! Refresh/animation coordinator.
//!
//! One task owns the board state. It multiplexes the animation clock, the
//! periodic refresh timer, user commands, fetch completions and shutdown.
//! Fetches run in their own tasks and report back over a channel tagged
//! with the route generation they were started for, so a result for a
//! route the user has since left is dropped on arrival.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval, interval_at};
use tracing::{debug, info, warn};

use crate::board::{DelayHistoryTracker, ModeFilter, build_journeys, detect};
use crate::domain::Route;
use crate::source::JourneySource;
use crate::vbb::{RawJourneyBatch, SourceError};

use super::config::{BoardConfig, MIN_INTERVAL};
use super::state::{BoardSnapshot, Phase, RefreshCycleState};

/// Pending commands before senders start waiting.
const COMMAND_BUFFER: usize = 32;

/// Requests sent to the coordinator task.
#[derive(Debug, Clone)]
pub enum Command {
    Refresh,
    SetRoute(Route),
    ReverseRoute,
    SelectNext,
    SelectPrevious,
    Select(usize),
    SetFilters(ModeFilter),
    ShowStatus(String),
}

/// The coordinator task has stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("board coordinator is not running")]
pub struct BoardClosed;

/// Result of one fetch task.
struct FetchOutcome {
    generation: u64,
    result: Result<RawJourneyBatch, SourceError>,
}

/// Cloneable handle to a running board.
///
/// Dropping every handle stops the coordinator, as does `shutdown`.
#[derive(Clone)]
pub struct BoardHandle {
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<Arc<BoardSnapshot>>,
    shutdown: Arc<watch::Sender<bool>>,
    tracker: DelayHistoryTracker,
}

impl BoardHandle {
    async fn send(&self, command: Command) -> Result<(), BoardClosed> {
        self.commands.send(command).await.map_err(|_| BoardClosed)
    }

    /// Refresh now, unless a fetch for this route is already running.
    pub async fn refresh(&self) -> Result<(), BoardClosed> {
        self.send(Command::Refresh).await
    }

    /// Switch route and fetch it immediately.
    pub async fn set_route(&self, route: Route) -> Result<(), BoardClosed> {
        self.send(Command::SetRoute(route)).await
    }

    /// Swap origin and destination and fetch immediately.
    pub async fn reverse_route(&self) -> Result<(), BoardClosed> {
        self.send(Command::ReverseRoute).await
    }

    pub async fn select_next(&self) -> Result<(), BoardClosed> {
        self.send(Command::SelectNext).await
    }

    pub async fn select_previous(&self) -> Result<(), BoardClosed> {
        self.send(Command::SelectPrevious).await
    }

    pub async fn select(&self, index: usize) -> Result<(), BoardClosed> {
        self.send(Command::Select(index)).await
    }

    /// Replace the mode filters and refetch.
    pub async fn set_filters(&self, filters: ModeFilter) -> Result<(), BoardClosed> {
        self.send(Command::SetFilters(filters)).await
    }

    /// Show a transient status message.
    pub async fn show_status(&self, text: impl Into<String>) -> Result<(), BoardClosed> {
        self.send(Command::ShowStatus(text.into())).await
    }

    /// Stop the coordinator. In-flight fetches are left to finish and
    /// their results are ignored.
    pub fn shutdown(&self) {
        self.shutdown.send_replace(true);
    }

    /// Current board state.
    pub fn snapshot(&self) -> Arc<BoardSnapshot> {
        Arc::clone(&self.snapshots.borrow())
    }

    /// Receiver notified on every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Arc<BoardSnapshot>> {
        self.snapshots.clone()
    }

    /// Recent delay samples for a line, oldest first.
    pub async fn delay_history(&self, line_name: &str) -> Vec<i64> {
        self.tracker.snapshot(line_name).await
    }

    pub fn tracker(&self) -> &DelayHistoryTracker {
        &self.tracker
    }
}

/// Owner of the board state; runs inside its own task.
pub struct Coordinator<S> {
    source: Arc<S>,
    config: BoardConfig,
    tracker: DelayHistoryTracker,
    state: RefreshCycleState,
    snapshots: watch::Sender<Arc<BoardSnapshot>>,
    fetch_tx: mpsc::UnboundedSender<FetchOutcome>,
}

impl<S: JourneySource> Coordinator<S> {
    /// Start a board for `route` and return a handle to it.
    ///
    /// The first refresh starts immediately.
    pub fn spawn(
        source: Arc<S>,
        route: Route,
        filters: ModeFilter,
        config: BoardConfig,
    ) -> (BoardHandle, JoinHandle<()>) {
        let state = RefreshCycleState::new(route, filters);
        let (snapshots, snapshot_rx) = watch::channel(Arc::new(state.snapshot()));
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (fetch_tx, fetch_rx) = mpsc::unbounded_channel();
        let tracker = DelayHistoryTracker::new();

        let coordinator = Self {
            source,
            config,
            tracker: tracker.clone(),
            state,
            snapshots,
            fetch_tx,
        };
        let task = tokio::spawn(coordinator.run(command_rx, fetch_rx, shutdown_rx));

        let handle = BoardHandle {
            commands: command_tx,
            snapshots: snapshot_rx,
            shutdown: Arc::new(shutdown_tx),
            tracker,
        };
        (handle, task)
    }

    async fn run(
        mut self,
        mut commands: mpsc::Receiver<Command>,
        mut fetches: mpsc::UnboundedReceiver<FetchOutcome>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        let mut ticker = interval(self.config.tick_interval.max(MIN_INTERVAL));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let period = self.config.refresh_interval.max(MIN_INTERVAL);
        let mut refresher = interval_at(Instant::now() + period, period);
        refresher.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(route = %self.state.route, "board started");
        self.start_fetch();

        loop {
            tokio::select! {
                biased;

                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    self.state.tick();
                    self.publish();
                }
                _ = refresher.tick() => self.start_fetch(),
                Some(outcome) = fetches.recv() => self.apply(outcome).await,
                Some(command) = commands.recv() => self.handle(command),
            }
        }

        info!("board stopped");
    }

    fn publish(&self) {
        self.snapshots.send_replace(Arc::new(self.state.snapshot()));
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::Refresh => self.start_fetch(),
            Command::SetRoute(route) => {
                self.state.change_route(route);
                self.start_fetch();
            }
            Command::ReverseRoute => {
                let reversed = self.state.route.reversed();
                self.state.change_route(reversed);
                self.start_fetch();
            }
            Command::SelectNext => {
                self.state.select_next();
                self.publish();
            }
            Command::SelectPrevious => {
                self.state.select_previous();
                self.publish();
            }
            Command::Select(index) => {
                self.state.select(index);
                self.publish();
            }
            Command::SetFilters(filters) => {
                self.state.filters = filters;
                self.start_fetch();
            }
            Command::ShowStatus(text) => {
                self.state.show_status(text, self.config.status_ticks);
                self.publish();
            }
        }
    }

    /// Enter `Fetching` and spawn the fetch for the current route.
    fn start_fetch(&mut self) {
        if self.state.fetch_pending() {
            debug!(route = %self.state.route, "refresh already in flight");
            return;
        }

        let generation = self.state.generation;
        self.state.in_flight = Some(generation);
        self.state.loading = true;
        self.state.phase = Phase::Fetching;
        self.publish();

        let source = Arc::clone(&self.source);
        let origin = self.state.route.origin.id.clone();
        let dest = self.state.route.dest.id.clone();
        let done = self.fetch_tx.clone();

        debug!(%origin, %dest, generation, "starting fetch");
        tokio::spawn(async move {
            let result = source.fetch_raw(&origin, &dest).await;
            // The coordinator may be gone; the result is simply dropped
            let _ = done.send(FetchOutcome { generation, result });
        });
    }

    /// Fold a finished fetch into the board.
    async fn apply(&mut self, outcome: FetchOutcome) {
        if outcome.generation != self.state.generation {
            debug!(
                generation = outcome.generation,
                current = self.state.generation,
                "discarding result for previous route"
            );
            return;
        }
        self.state.in_flight = None;

        match outcome.result {
            Ok(batch) => {
                self.state.phase = Phase::Applying;

                let mut journeys = build_journeys(&batch, &self.state.filters);
                let (seen, any_new) = detect(&mut journeys, &self.state.seen);
                let first_cycle = !self.state.baseline_seeded;
                let samples = self.tracker.record(&journeys).await;

                info!(
                    route = %self.state.route,
                    journeys = journeys.len(),
                    any_new,
                    samples,
                    "board refreshed"
                );

                self.state.journeys = journeys.into();
                self.state.seen = seen;
                self.state.baseline_seeded = true;
                self.state.selected = 0;
                self.state.last_updated = Some(chrono::Utc::now());
                self.state.refresh_pulse = self.config.pulse_ticks;
                if any_new && (!first_cycle || self.config.highlight_first_cycle) {
                    self.state.new_highlight = self.config.highlight_ticks;
                }
            }
            Err(e) => {
                warn!(route = %self.state.route, error = %e, "journey fetch failed");
            }
        }

        self.state.loading = false;
        self.state.phase = Phase::Idle;
        self.publish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::test_support::{journey, raw_leg};
    use crate::domain::Station;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Serves scripted responses in call order, each after a delay.
    #[derive(Default)]
    struct ScriptedSource {
        script: Mutex<VecDeque<(Duration, Option<RawJourneyBatch>)>>,
        calls: AtomicUsize,
        routes: Mutex<Vec<(String, String)>>,
    }

    impl ScriptedSource {
        fn new(script: Vec<(Duration, Option<RawJourneyBatch>)>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(script.into()),
                ..Self::default()
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl JourneySource for ScriptedSource {
        async fn search_stations(&self, _: &str) -> Result<Vec<Station>, SourceError> {
            Ok(Vec::new())
        }

        async fn fetch_raw(&self, origin_id: &str, dest_id: &str) -> Result<RawJourneyBatch, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.routes
                .lock()
                .unwrap()
                .push((origin_id.to_string(), dest_id.to_string()));
            let next = self.script.lock().unwrap().pop_front();
            let (delay, response) = next.unwrap_or((Duration::ZERO, Some(RawJourneyBatch::default())));
            tokio::time::sleep(delay).await;
            response.ok_or(SourceError::RateLimited)
        }
    }

    fn route() -> Route {
        Route::new(Station::new("1", "Origin"), Station::new("2", "Destination"))
    }

    fn config() -> BoardConfig {
        BoardConfig::default().with_refresh_interval(Duration::from_secs(3600))
    }

    /// One single-leg journey per (line, departure), optionally delayed.
    fn batch(entries: &[(&str, &str, i64)]) -> Option<RawJourneyBatch> {
        let journeys = entries
            .iter()
            .map(|(line, dep, delay)| {
                let mut leg = raw_leg(line, "suburban", dep, "09:30");
                leg.departure_delay = Some(*delay);
                journey(vec![leg])
            })
            .collect();
        Some(RawJourneyBatch { journeys })
    }

    fn lines(snapshot: &BoardSnapshot) -> Vec<String> {
        snapshot
            .journeys
            .iter()
            .map(|j| j.first_leg().line_name.clone())
            .collect()
    }

    async fn wait_until(
        rx: &mut watch::Receiver<Arc<BoardSnapshot>>,
        condition: impl FnMut(&Arc<BoardSnapshot>) -> bool,
    ) -> Arc<BoardSnapshot> {
        let waited = tokio::time::timeout(Duration::from_secs(120), rx.wait_for(condition)).await;
        let snapshot = waited.expect("timed out").expect("coordinator stopped");
        Arc::clone(&snapshot)
    }

    async fn stop(handle: BoardHandle, task: JoinHandle<()>) {
        handle.shutdown();
        tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("coordinator did not stop")
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn initial_refresh_publishes_journeys() {
        let source = ScriptedSource::new(vec![(
            Duration::from_millis(300),
            batch(&[("U8", "08:10", 0), ("S3", "08:00", 0)]),
        )]);
        let (handle, task) = Coordinator::spawn(source.clone(), route(), ModeFilter::new(), config());
        let mut rx = handle.subscribe();

        let loading = wait_until(&mut rx, |s| s.loading).await;
        assert_eq!(loading.phase, Phase::Fetching);

        let snap = wait_until(&mut rx, |s| s.last_updated.is_some()).await;
        assert_eq!(lines(&snap), ["S3", "U8"]);
        assert!(!snap.loading);
        assert_eq!(snap.phase, Phase::Idle);
        assert_eq!(snap.selected, 0);
        assert!(snap.refresh_pulse > 0);
        assert_eq!(source.routes.lock().unwrap()[0], ("1".to_string(), "2".to_string()));

        stop(handle, task).await;
    }

    #[tokio::test(start_paused = true)]
    async fn failed_fetches_keep_last_good_list() {
        let source = ScriptedSource::new(vec![
            (Duration::ZERO, batch(&[("S3", "08:00", 0)])),
            (Duration::from_millis(500), None),
            (Duration::from_millis(500), None),
        ]);
        let (handle, task) = Coordinator::spawn(source.clone(), route(), ModeFilter::new(), config());
        let mut rx = handle.subscribe();

        let good = wait_until(&mut rx, |s| s.last_updated.is_some()).await;
        assert_eq!(lines(&good), ["S3"]);

        for attempt in 2..=3 {
            handle.refresh().await.unwrap();
            wait_until(&mut rx, |s| s.loading).await;
            let after = wait_until(&mut rx, |s| !s.loading).await;

            assert_eq!(source.calls(), attempt);
            assert!(Arc::ptr_eq(&after.journeys, &good.journeys));
            assert_eq!(after.last_updated, good.last_updated);
            assert_eq!(after.phase, Phase::Idle);
        }

        stop(handle, task).await;
    }

    #[tokio::test(start_paused = true)]
    async fn clock_runs_during_slow_fetch() {
        let source = ScriptedSource::new(vec![(Duration::from_secs(10), batch(&[("S3", "08:00", 0)]))]);
        let (handle, task) = Coordinator::spawn(source, route(), ModeFilter::new(), config());
        let mut rx = handle.subscribe();

        let mid_fetch = wait_until(&mut rx, |s| s.frame >= 20).await;
        assert!(mid_fetch.loading);
        assert!(mid_fetch.is_empty());

        let done = wait_until(&mut rx, |s| !s.loading).await;
        assert!(done.frame >= 100);
        assert_eq!(lines(&done), ["S3"]);

        stop(handle, task).await;
    }

    #[tokio::test(start_paused = true)]
    async fn triggers_coalesce_while_fetching() {
        let source = ScriptedSource::new(vec![(Duration::from_secs(2), batch(&[("S3", "08:00", 0)]))]);
        let (handle, task) = Coordinator::spawn(source.clone(), route(), ModeFilter::new(), config());
        let mut rx = handle.subscribe();

        wait_until(&mut rx, |s| s.loading).await;
        for _ in 0..3 {
            handle.refresh().await.unwrap();
        }
        wait_until(&mut rx, |s| !s.loading).await;

        assert_eq!(source.calls(), 1);

        stop(handle, task).await;
    }

    #[tokio::test(start_paused = true)]
    async fn periodic_timer_triggers_refresh() {
        let source = ScriptedSource::new(vec![
            (Duration::ZERO, batch(&[("S3", "08:00", 0)])),
            (Duration::ZERO, batch(&[("S3", "08:00", 0), ("S5", "08:20", 0)])),
        ]);
        let config = config().with_refresh_interval(Duration::from_secs(30));
        let (handle, task) = Coordinator::spawn(source.clone(), route(), ModeFilter::new(), config);
        let mut rx = handle.subscribe();

        let snap = wait_until(&mut rx, |s| s.journeys.len() == 2).await;
        assert_eq!(source.calls(), 2);
        assert!(snap.highlight_active());
        assert!(!snap.journeys[0].is_new());
        assert!(snap.journeys[1].is_new());

        stop(handle, task).await;
    }

    #[tokio::test(start_paused = true)]
    async fn first_cycle_seeds_baseline_silently() {
        let source = ScriptedSource::new(vec![(Duration::ZERO, batch(&[("S3", "08:00", 0)]))]);
        let (handle, task) = Coordinator::spawn(source, route(), ModeFilter::new(), config());
        let mut rx = handle.subscribe();

        let snap = wait_until(&mut rx, |s| s.last_updated.is_some()).await;
        assert_eq!(snap.new_highlight, 0);

        stop(handle, task).await;
    }

    #[tokio::test(start_paused = true)]
    async fn first_cycle_highlight_when_enabled() {
        let source = ScriptedSource::new(vec![(Duration::ZERO, batch(&[("S3", "08:00", 0)]))]);
        let config = config().with_highlight_first_cycle(true);
        let (handle, task) = Coordinator::spawn(source, route(), ModeFilter::new(), config);
        let mut rx = handle.subscribe();

        let snap = wait_until(&mut rx, |s| s.last_updated.is_some()).await;
        assert!(snap.highlight_active());
        assert!(snap.journeys[0].is_new());

        // Highlight fades after its ticks run out
        let faded = wait_until(&mut rx, |s| s.new_highlight == 0).await;
        assert!(faded.frame >= 30);

        stop(handle, task).await;
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_discards_in_flight_result() {
        let source = ScriptedSource::new(vec![
            (Duration::ZERO, batch(&[("S3", "08:00", 0)])),
            (Duration::from_secs(5), batch(&[("S5", "08:30", 0)])),
        ]);
        let (handle, task) = Coordinator::spawn(source.clone(), route(), ModeFilter::new(), config());
        let mut rx = handle.subscribe();

        wait_until(&mut rx, |s| s.last_updated.is_some()).await;
        handle.refresh().await.unwrap();
        wait_until(&mut rx, |s| s.loading).await;

        stop(handle.clone(), task).await;
        tokio::time::sleep(Duration::from_secs(10)).await;

        let last = handle.snapshot();
        assert_eq!(lines(&last), ["S3"]);
        assert_eq!(source.calls(), 2);
        assert!(handle.refresh().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn route_change_discards_stale_result() {
        let source = ScriptedSource::new(vec![
            (Duration::from_secs(5), batch(&[("OLD", "08:00", 0)])),
            (Duration::from_millis(100), batch(&[("NEW", "08:05", 0)])),
        ]);
        let (handle, task) = Coordinator::spawn(source.clone(), route(), ModeFilter::new(), config());
        let mut rx = handle.subscribe();

        wait_until(&mut rx, |s| s.loading).await;
        handle.reverse_route().await.unwrap();

        let snap = wait_until(&mut rx, |s| s.last_updated.is_some()).await;
        assert_eq!(lines(&snap), ["NEW"]);
        assert_eq!(snap.route, route().reversed());

        // Let the stale fetch land
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(lines(&handle.snapshot()), ["NEW"]);

        let routes = source.routes.lock().unwrap().clone();
        assert_eq!(routes[1], ("2".to_string(), "1".to_string()));

        stop(handle, task).await;
    }

    #[tokio::test(start_paused = true)]
    async fn selection_and_status_commands() {
        let source = ScriptedSource::new(vec![(
            Duration::ZERO,
            batch(&[("S3", "08:00", 0), ("S5", "08:10", 0), ("U8", "08:20", 0)]),
        )]);
        let (handle, task) = Coordinator::spawn(source, route(), ModeFilter::new(), config());
        let mut rx = handle.subscribe();
        wait_until(&mut rx, |s| s.journeys.len() == 3).await;

        handle.select_next().await.unwrap();
        handle.select_next().await.unwrap();
        handle.select_next().await.unwrap();
        let snap = wait_until(&mut rx, |s| s.selected == 2).await;
        assert_eq!(snap.selected_journey().unwrap().first_leg().line_name, "U8");

        handle.select_previous().await.unwrap();
        wait_until(&mut rx, |s| s.selected == 1).await;

        handle.select(0).await.unwrap();
        wait_until(&mut rx, |s| s.selected == 0).await;

        handle.show_status("★ Added to favorites!").await.unwrap();
        let shown = wait_until(&mut rx, |s| s.status.is_some()).await;
        assert_eq!(shown.status_text(), Some("★ Added to favorites!"));
        wait_until(&mut rx, |s| s.status.is_none()).await;

        stop(handle, task).await;
    }

    #[tokio::test(start_paused = true)]
    async fn filters_apply_on_refetch() {
        let bus = raw_leg("165", "bus", "08:00", "08:30");
        let mixed = RawJourneyBatch {
            journeys: vec![journey(vec![bus]), journey(vec![raw_leg("S3", "suburban", "08:05", "08:30")])],
        };
        let source = ScriptedSource::new(vec![
            (Duration::ZERO, Some(mixed.clone())),
            (Duration::ZERO, Some(mixed)),
        ]);
        let (handle, task) = Coordinator::spawn(source, route(), ModeFilter::new(), config());
        let mut rx = handle.subscribe();
        wait_until(&mut rx, |s| s.journeys.len() == 2).await;

        handle
            .set_filters(ModeFilter::new().with("bus", false))
            .await
            .unwrap();
        let snap = wait_until(&mut rx, |s| s.journeys.len() == 1).await;
        assert_eq!(lines(&snap), ["S3"]);
        assert!(!snap.filters.allows("bus"));

        stop(handle, task).await;
    }

    #[tokio::test(start_paused = true)]
    async fn delays_feed_history() {
        let source = ScriptedSource::new(vec![
            (Duration::ZERO, batch(&[("S3", "08:00", 120)])),
            (Duration::from_millis(500), batch(&[("S3", "08:00", 300)])),
        ]);
        let (handle, task) = Coordinator::spawn(source, route(), ModeFilter::new(), config());
        let mut rx = handle.subscribe();

        wait_until(&mut rx, |s| s.last_updated.is_some()).await;
        handle.refresh().await.unwrap();
        wait_until(&mut rx, |s| s.loading).await;
        wait_until(&mut rx, |s| !s.loading).await;

        assert_eq!(handle.delay_history("S3").await, vec![2, 5]);
        assert_eq!(handle.tracker().line_count().await, 1);

        stop(handle, task).await;
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_handles_stops_board() {
        let source = ScriptedSource::new(vec![]);
        let (handle, task) = Coordinator::spawn(source, route(), ModeFilter::new(), config());
        drop(handle);

        tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("coordinator did not stop")
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn zero_periods_still_run_board() {
        let source = ScriptedSource::new(vec![]);
        let mut config = config();
        config.tick_interval = Duration::ZERO;
        config.refresh_interval = Duration::ZERO;
        let (handle, task) = Coordinator::spawn(source.clone(), route(), ModeFilter::new(), config);
        let mut rx = handle.subscribe();

        let snap = wait_until(&mut rx, |s| s.last_updated.is_some() && s.frame >= 10).await;
        assert!(snap.frame >= 10);
        assert!(handle.refresh().await.is_ok());
        wait_until(&mut rx, |_| source.calls() >= 3).await;
        assert!(!task.is_finished());

        stop(handle, task).await;
    }

    #[tokio::test(start_paused = true)]
    async fn successful_refresh_resets_selection() {
        let three = || batch(&[("S3", "08:00", 0), ("S5", "08:10", 0), ("U8", "08:20", 0)]);
        let source = ScriptedSource::new(vec![
            (Duration::ZERO, three()),
            (Duration::from_millis(500), None),
            (Duration::from_millis(500), three()),
        ]);
        let (handle, task) = Coordinator::spawn(source, route(), ModeFilter::new(), config());
        let mut rx = handle.subscribe();
        wait_until(&mut rx, |s| s.journeys.len() == 3).await;

        handle.select(2).await.unwrap();
        wait_until(&mut rx, |s| s.selected == 2).await;

        // A failed refresh leaves the cursor where it was
        handle.refresh().await.unwrap();
        wait_until(&mut rx, |s| s.loading).await;
        let failed = wait_until(&mut rx, |s| !s.loading).await;
        assert_eq!(failed.selected, 2);

        handle.refresh().await.unwrap();
        wait_until(&mut rx, |s| s.loading).await;
        let refreshed = wait_until(&mut rx, |s| !s.loading).await;
        assert_eq!(refreshed.selected, 0);
        assert_eq!(lines(&refreshed), ["S3", "S5", "U8"]);

        stop(handle, task).await;
    }
}
