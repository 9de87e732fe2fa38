//! Text presentation of the board.
//!
//! View models are built from snapshots and rendered as plain lines. Colour
//! is expressed as a class (`Urgency`, `HeaderTone`) so a terminal front
//! end can map it to whatever styling it supports.

use std::collections::HashMap;
use std::fmt::Write;

use chrono::Duration;

use crate::domain::{Journey, Leg, Occupancy, Route, Timestamp, format_clock};
use crate::refresh::BoardSnapshot;

/// Shown when a refresh produced no journeys.
pub const EMPTY_BOARD: &str = "No journeys found. Press 'r' to refresh.";

/// Shown while the first batch is loading.
pub const LOADING: &str = "Loading routes...";

/// Warnings longer than this are cut.
const WARNING_MAX_CHARS: usize = 50;

/// Width of the in-transit progress bar.
const PROGRESS_WIDTH: usize = 20;

/// Width of the delay sparkline in the detail view.
pub const SPARKLINE_WIDTH: usize = 8;

/// Route names are cut to this many characters in the header.
const HEADER_NAME_CHARS: usize = 15;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

// ============================================================================
// Formatting helpers
// ============================================================================

/// How close a departure is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    /// Already departed
    Gone,
    /// Under a minute
    Imminent,
    /// Under five minutes
    Soon,
    Later,
}

/// A countdown to departure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    pub urgency: Urgency,
    pub text: String,
}

/// Format the time left until departure.
pub fn countdown(remaining: Duration) -> Countdown {
    if remaining < Duration::zero() {
        return Countdown {
            urgency: Urgency::Gone,
            text: "GONE".to_string(),
        };
    }

    let mins = remaining.num_minutes();
    let secs = remaining.num_seconds() % 60;

    let (urgency, text) = match mins {
        0 => (Urgency::Imminent, format!("{secs}s")),
        1..=4 => (Urgency::Soon, format!("{mins}:{secs:02}")),
        _ => (Urgency::Later, format!("{mins}:{secs:02}")),
    };
    Countdown { urgency, text }
}

/// Mini graph of delay samples.
///
/// Samples are scaled between their minimum and maximum; with more samples
/// than `width` every `len / width`-th one is drawn. Short output is padded
/// with the lowest block.
pub fn sparkline(values: &[i64], width: usize) -> String {
    let (Some(&min), Some(&max)) = (values.iter().min(), values.iter().max()) else {
        return BLOCKS[0].to_string().repeat(width);
    };

    let step = (values.len() / width.max(1)).max(1);
    let mut line: String = values
        .iter()
        .step_by(step)
        .take(width)
        .map(|&v| {
            let idx = if max > min {
                ((v - min) as f64 / (max - min) as f64 * 7.0) as usize
            } else {
                0
            };
            BLOCKS[idx.min(7)]
        })
        .collect();

    let drawn = line.chars().count();
    line.extend(std::iter::repeat_n(BLOCKS[0], width.saturating_sub(drawn)));
    line
}

/// Shorten a provider station name for display.
///
/// Drops bracketed suffixes, the city qualifier, line-type prefixes and
/// " Bhf", and keeps only the part before any '/'.
pub fn clean_station_name(name: &str) -> String {
    let mut name = strip_brackets(name);
    name = remove_with_leading_space(&name, "(Berlin)");

    for prefix in ["S+U", "S", "U"] {
        if let Some(rest) = name.strip_prefix(prefix)
            && rest.starts_with(char::is_whitespace)
        {
            name = rest.trim_start().to_string();
        }
    }

    let mut name = name.replace(" Bhf", "");
    if let Some(idx) = name.find('/') {
        name.truncate(idx);
    }
    name.trim().to_string()
}

/// Remove every `[...]` group together with the whitespace before it.
fn strip_brackets(name: &str) -> String {
    let mut out = name.to_string();
    while let Some(open) = out.find('[') {
        let Some(close) = out[open..].find(']') else {
            break;
        };
        let start = out[..open].trim_end().len();
        out.replace_range(start..open + close + 1, "");
    }
    out
}

/// Remove every occurrence of `needle` together with the whitespace before it.
fn remove_with_leading_space(name: &str, needle: &str) -> String {
    let mut out = name.to_string();
    while let Some(idx) = out.find(needle) {
        let start = out[..idx].trim_end().len();
        out.replace_range(start..idx + needle.len(), "");
    }
    out
}

/// Bracketed one-letter mode tag.
pub fn product_icon(product: &str) -> &'static str {
    match product {
        "suburban" => "[S]",
        "subway" => "[U]",
        "tram" => "[T]",
        "bus" => "[B]",
        "ferry" => "[F]",
        "regional" => "[R]",
        "express" => "[I]",
        _ => "[ ]",
    }
}

/// Colour name conventionally used for a mode.
pub fn product_colour(product: &str) -> &'static str {
    match product {
        "suburban" => "green",
        "subway" => "blue",
        "tram" => "red",
        "bus" => "purple",
        "ferry" => "teal",
        "regional" | "express" => "yellow",
        _ => "white",
    }
}

/// Occupancy as a five-cell gauge.
pub fn occupancy_gauge(level: Option<Occupancy>) -> &'static str {
    match level {
        Some(Occupancy::Low) => "▓░░░░",
        Some(Occupancy::Medium) => "▓▓▓░░",
        Some(Occupancy::High) => "▓▓▓▓▓",
        None => "░░░░░",
    }
}

fn occupancy_marker(level: Option<Occupancy>) -> &'static str {
    match level {
        Some(Occupancy::Low) => " ○",
        Some(Occupancy::Medium) => " ◐",
        Some(Occupancy::High) => " ●",
        None => "",
    }
}

/// Position marker on a fixed-width track.
pub fn progress_bar(progress: f64) -> String {
    let pos = ((progress * PROGRESS_WIDTH as f64) as usize).min(PROGRESS_WIDTH - 1);
    format!(
        "{}●{}",
        "─".repeat(pos),
        "─".repeat(PROGRESS_WIDTH - 1 - pos)
    )
}

/// Cut a warning to a readable length.
pub fn truncate_warning(text: &str) -> String {
    match text.char_indices().nth(WARNING_MAX_CHARS) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub fn spinner_frame(frame: u64) -> &'static str {
    SPINNER[(frame % SPINNER.len() as u64) as usize]
}

// ============================================================================
// View models
// ============================================================================

/// Risk flags for one journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JourneySummary {
    pub has_delay: bool,
    pub has_warning: bool,
    pub tight_connection: bool,
    pub max_occupancy: Option<Occupancy>,
}

impl JourneySummary {
    pub fn of(journey: &Journey) -> Self {
        journey.legs().iter().fold(Self::default(), |acc, leg| Self {
            has_delay: acc.has_delay || leg.is_delayed(),
            has_warning: acc.has_warning || leg.has_warnings(),
            tight_connection: acc.tight_connection || leg.is_tight_connection(),
            max_occupancy: acc.max_occupancy.max(leg.occupancy),
        })
    }
}

/// Colour class for a journey's header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderTone {
    /// Some leg departs late
    Delayed,
    /// Leaves within five minutes
    DepartingSoon,
    /// Five minutes of waiting or less
    ShortWait,
    /// Ten minutes of waiting or less
    ModerateWait,
    Normal,
}

impl HeaderTone {
    pub fn classify(summary: &JourneySummary, until_departure: Duration, wait: Duration) -> Self {
        let wait_mins = wait.num_minutes();
        if summary.has_delay {
            HeaderTone::Delayed
        } else if until_departure > Duration::zero() && until_departure < Duration::minutes(5) {
            HeaderTone::DepartingSoon
        } else if wait_mins <= 5 {
            HeaderTone::ShortWait
        } else if wait_mins <= 10 {
            HeaderTone::ModerateWait
        } else {
            HeaderTone::Normal
        }
    }

    pub fn colour(&self) -> &'static str {
        match self {
            HeaderTone::Delayed | HeaderTone::ModerateWait => "yellow",
            HeaderTone::DepartingSoon => "red",
            HeaderTone::ShortWait => "green",
            HeaderTone::Normal => "white",
        }
    }
}

/// Journey view model.
#[derive(Debug, Clone)]
pub struct JourneyView {
    pub departs: String,
    pub arrives: String,
    pub duration_mins: i64,
    pub wait_mins: i64,
    pub countdown: Countdown,
    pub summary: JourneySummary,
    pub tone: HeaderTone,
    /// Show the "new" star
    pub show_new: bool,
    pub lines: Vec<String>,
    pub legs: Vec<LegView>,
}

impl JourneyView {
    pub fn from_journey(journey: &Journey, now: &Timestamp, highlight_active: bool) -> Self {
        let until = journey.depart_at().signed_duration_since(*now);
        let summary = JourneySummary::of(journey);

        Self {
            departs: format_clock(Some(&journey.depart_at())),
            arrives: format_clock(Some(&journey.arrive_at())),
            duration_mins: journey.total_duration().num_minutes(),
            wait_mins: journey.total_wait().num_minutes(),
            countdown: countdown(until),
            tone: HeaderTone::classify(&summary, until, journey.total_wait()),
            summary,
            show_new: journey.is_new() && highlight_active,
            lines: journey.legs().iter().map(|l| l.line_name.clone()).collect(),
            legs: journey.legs().iter().map(|l| LegView::from_leg(l, now)).collect(),
        }
    }

    /// One-line summary, numbered from 1.
    pub fn headline(&self, number: usize) -> String {
        let mut line = format!(
            "{number}. {} → {}  ({}m)  wait:{}m  {}",
            self.departs, self.arrives, self.duration_mins, self.wait_mins, self.countdown.text
        );
        line.push_str(occupancy_marker(self.summary.max_occupancy));
        if self.summary.has_delay {
            line.push_str(" ⏱");
        }
        if self.summary.tight_connection {
            line.push_str(" ⚡");
        }
        if self.summary.has_warning {
            line.push_str(" ⚠");
        }
        if self.show_new {
            line.push_str(" ★");
        }
        line
    }
}

/// Leg view model.
#[derive(Debug, Clone)]
pub struct LegView {
    pub icon: &'static str,
    pub colour: &'static str,
    pub line: String,
    pub departs: String,
    pub arrives: String,
    pub from: String,
    pub to: String,
    pub departure_platform: Option<String>,
    pub arrival_platform: Option<String>,
    /// Whole minutes late, when late
    pub delay_mins: Option<i64>,
    pub wait_before_mins: i64,
    pub tight_connection: bool,
    pub occupancy: Option<Occupancy>,
    pub every_mins: Option<i64>,
    /// Track with vehicle position while in transit
    pub progress: Option<String>,
    pub warnings: Vec<String>,
}

impl LegView {
    pub fn from_leg(leg: &Leg, now: &Timestamp) -> Self {
        Self {
            icon: product_icon(&leg.product),
            colour: product_colour(&leg.product),
            line: leg.line_name.clone(),
            departs: format_clock(Some(&leg.departure)),
            arrives: format_clock(Some(&leg.arrival)),
            from: clean_station_name(&leg.origin_name),
            to: clean_station_name(&leg.dest_name),
            departure_platform: leg.departure_platform.clone(),
            arrival_platform: leg.arrival_platform.clone(),
            delay_mins: leg.is_delayed().then(|| leg.departure_delay_mins()),
            wait_before_mins: leg.wait_before.num_minutes(),
            tight_connection: leg.is_tight_connection(),
            occupancy: leg.occupancy,
            every_mins: (leg.repeat_interval_mins > 0).then_some(leg.repeat_interval_mins),
            progress: leg.progress_at(now).map(progress_bar),
            warnings: leg.service_warnings.iter().map(|w| truncate_warning(w)).collect(),
        }
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Title line: route, clock, spinner and status message.
pub fn render_header(snapshot: &BoardSnapshot, now: &Timestamp) -> String {
    let Route { origin, dest } = &snapshot.route;
    let origin = clean_station_name(&origin.name);
    let dest = clean_station_name(&dest.name);

    let mut header = format!(
        "{} → {}  {}",
        truncate_chars(&origin, HEADER_NAME_CHARS),
        truncate_chars(&dest, HEADER_NAME_CHARS),
        now.format("%H:%M:%S")
    );
    if snapshot.loading {
        let _ = write!(header, " {}", spinner_frame(snapshot.frame));
    }
    if let Some(status) = snapshot.status_text() {
        let _ = write!(header, "  {status}");
    }
    header
}

/// The journey list, or the empty/loading notice.
pub fn render_list(snapshot: &BoardSnapshot, now: &Timestamp) -> String {
    if snapshot.journeys.is_empty() {
        return if snapshot.loading {
            format!("  {} {LOADING}", spinner_frame(snapshot.frame))
        } else {
            format!("  {EMPTY_BOARD}")
        };
    }

    let mut out = String::new();
    for (i, journey) in snapshot.journeys.iter().enumerate() {
        let view = JourneyView::from_journey(journey, now, snapshot.highlight_active());
        let selector = if i == snapshot.selected { " ▸ " } else { "   " };
        let _ = writeln!(out, "{selector}{}", view.headline(i + 1));
        let _ = writeln!(out, "     {}", view.lines.join(" ─ "));
    }
    out
}

/// Full breakdown of one journey.
///
/// `delays` maps line names to their recent delay samples.
pub fn render_detail(journey: &Journey, now: &Timestamp, delays: &HashMap<String, Vec<i64>>) -> String {
    let view = JourneyView::from_journey(journey, now, false);
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Journey: {} → {}  Departs in: {}",
        view.departs, view.arrives, view.countdown.text
    );
    let _ = writeln!(
        out,
        "Duration: {}min  |  Total wait: {}min",
        view.duration_mins, view.wait_mins
    );
    let _ = writeln!(out, "{}", "─".repeat(55));

    for (i, leg) in view.legs.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if leg.wait_before_mins > 0 || leg.tight_connection {
            if leg.tight_connection {
                let _ = writeln!(out, "  ⚡ TIGHT CONNECTION: {}min to change!", leg.wait_before_mins);
            } else {
                let _ = writeln!(out, "  ⏱ Wait {}min", leg.wait_before_mins);
            }
        }

        let _ = write!(
            out,
            "{} {} {} → {}",
            leg.icon, leg.line, leg.departs, leg.arrives
        );
        if let Some(delay) = leg.delay_mins {
            let _ = write!(out, " +{delay}m");
        }
        let _ = write!(out, "  {}", occupancy_gauge(leg.occupancy));
        if let Some(every) = leg.every_mins {
            let _ = write!(out, " (every {every}m)");
        }
        if let Some(samples) = delays.get(&leg.line).filter(|s| !s.is_empty()) {
            let _ = write!(out, " {}", sparkline(samples, SPARKLINE_WIDTH));
        }
        out.push('\n');

        if let Some(bar) = &leg.progress {
            let _ = writeln!(out, "    {bar} in transit");
        }
        let _ = writeln!(out, "    From: {}{}", leg.from, platform_suffix(&leg.departure_platform));
        let _ = writeln!(out, "    To:   {}{}", leg.to, platform_suffix(&leg.arrival_platform));
        for warning in &leg.warnings {
            let _ = writeln!(out, "    ⚠ {warning}");
        }
    }
    out
}

fn platform_suffix(platform: &Option<String>) -> String {
    platform
        .as_deref()
        .map(|p| format!(" [Plt {p}]"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::ModeFilter;
    use crate::domain::test_support::{leg, ts};
    use crate::domain::Station;
    use crate::refresh::RefreshCycleState;

    #[test]
    fn countdown_bands() {
        assert_eq!(countdown(Duration::seconds(-1)).text, "GONE");
        assert_eq!(countdown(Duration::seconds(-1)).urgency, Urgency::Gone);

        let c = countdown(Duration::seconds(42));
        assert_eq!((c.urgency, c.text.as_str()), (Urgency::Imminent, "42s"));

        let c = countdown(Duration::seconds(0));
        assert_eq!((c.urgency, c.text.as_str()), (Urgency::Imminent, "0s"));

        let c = countdown(Duration::seconds(4 * 60 + 5));
        assert_eq!((c.urgency, c.text.as_str()), (Urgency::Soon, "4:05"));

        let c = countdown(Duration::seconds(12 * 60 + 30));
        assert_eq!((c.urgency, c.text.as_str()), (Urgency::Later, "12:30"));
    }

    #[test]
    fn sparkline_scaling() {
        assert_eq!(sparkline(&[], 4), "▁▁▁▁");
        assert_eq!(sparkline(&[3, 3], 4), "▁▁▁▁");
        assert_eq!(sparkline(&[0, 7], 2), "▁█");
        assert_eq!(sparkline(&[0, 4, 8], 3), "▁▄█");
    }

    #[test]
    fn sparkline_samples_with_stride() {
        // 16 samples into width 8: every second sample
        let values: Vec<i64> = (0..16).collect();
        let line = sparkline(&values, 8);
        assert_eq!(line.chars().count(), 8);
        assert!(line.starts_with('▁'));
    }

    #[test]
    fn sparkline_pads_short_input() {
        let line = sparkline(&[1, 5], 8);
        assert_eq!(line.chars().count(), 8);
        assert_eq!(line, "▁█▁▁▁▁▁▁");
    }

    #[test]
    fn clean_station_names() {
        assert_eq!(clean_station_name("S+U Alexanderplatz Bhf (Berlin)"), "Alexanderplatz");
        assert_eq!(clean_station_name("S Köpenick (Berlin)"), "Köpenick");
        assert_eq!(clean_station_name("U Hermannplatz (Berlin) [U7]"), "Hermannplatz");
        assert_eq!(clean_station_name("Brunnenstr./Invalidenstr. (Berlin)"), "Brunnenstr.");
        assert_eq!(clean_station_name("Potsdam Hbf [Bus]"), "Potsdam Hbf");
        assert_eq!(clean_station_name("Sonnenallee"), "Sonnenallee");
        assert_eq!(clean_station_name("  "), "");
    }

    #[test]
    fn icons_and_colours() {
        assert_eq!(product_icon("suburban"), "[S]");
        assert_eq!(product_icon("express"), "[I]");
        assert_eq!(product_icon("cablecar"), "[ ]");
        assert_eq!(product_colour("tram"), "red");
        assert_eq!(product_colour("unknown"), "white");
    }

    #[test]
    fn progress_bar_positions() {
        assert_eq!(progress_bar(0.0), format!("●{}", "─".repeat(19)));
        assert_eq!(progress_bar(0.5), format!("{}●{}", "─".repeat(10), "─".repeat(9)));
        assert_eq!(progress_bar(1.0), format!("{}●", "─".repeat(19)));
    }

    #[test]
    fn warnings_are_truncated() {
        let long = "x".repeat(60);
        assert_eq!(truncate_warning(&long), format!("{}...", "x".repeat(50)));
        assert_eq!(truncate_warning("short"), "short");

        let umlauts = "ü".repeat(51);
        assert_eq!(truncate_warning(&umlauts).chars().count(), 53);
    }

    #[test]
    fn summary_flags() {
        let first = leg("S3", "08:00", "08:10");
        let mut second = leg("U8", "08:12", "08:30");
        second.wait_before = Duration::minutes(2);
        second.departure_delay_secs = 60;
        second.occupancy = Some(Occupancy::Medium);
        let mut third = leg("M10", "08:40", "08:50");
        third.wait_before = Duration::minutes(10);
        third.occupancy = Some(Occupancy::Low);
        third.service_warnings.push("Diversion".into());

        let journey = Journey::new(ts("08:00"), vec![first, second, third]).unwrap();
        let summary = JourneySummary::of(&journey);

        assert!(summary.has_delay);
        assert!(summary.has_warning);
        assert!(summary.tight_connection);
        assert_eq!(summary.max_occupancy, Some(Occupancy::Medium));
    }

    #[test]
    fn header_tone_order() {
        let calm = JourneySummary::default();
        let delayed = JourneySummary {
            has_delay: true,
            ..JourneySummary::default()
        };
        let mins = Duration::minutes;

        assert_eq!(HeaderTone::classify(&delayed, mins(2), mins(20)), HeaderTone::Delayed);
        assert_eq!(HeaderTone::classify(&calm, mins(2), mins(20)), HeaderTone::DepartingSoon);
        assert_eq!(HeaderTone::classify(&calm, mins(-1), mins(3)), HeaderTone::ShortWait);
        assert_eq!(HeaderTone::classify(&calm, mins(30), mins(8)), HeaderTone::ModerateWait);
        assert_eq!(HeaderTone::classify(&calm, mins(30), mins(11)), HeaderTone::Normal);
        assert_eq!(HeaderTone::Normal.colour(), "white");
    }

    #[test]
    fn journey_view_fields() {
        let mut l = leg("S3", "08:00", "08:20");
        l.origin_name = "S Köpenick (Berlin)".into();
        l.departure_platform = Some("2".into());
        l.repeat_interval_mins = 10;
        let journey = Journey::new(ts("08:00"), vec![l]).unwrap();

        let view = JourneyView::from_journey(&journey, &ts("07:50"), true);
        assert_eq!(view.departs, "08:00");
        assert_eq!(view.duration_mins, 20);
        assert_eq!(view.countdown.text, "10:00");
        assert!(view.show_new);
        assert_eq!(view.legs[0].from, "Köpenick");
        assert_eq!(view.legs[0].every_mins, Some(10));
        assert!(view.legs[0].progress.is_none());
        assert_eq!(view.headline(1), "1. 08:00 → 08:20  (20m)  wait:0m  10:00 ★");

        let underway = JourneyView::from_journey(&journey, &ts("08:10"), false);
        assert!(underway.legs[0].progress.is_some());
        assert!(!underway.show_new);
        assert_eq!(underway.countdown.text, "GONE");
    }

    fn snapshot(journeys: Vec<Journey>, loading: bool) -> BoardSnapshot {
        let route = Route::new(
            Station::new("900100003", "S+U Alexanderplatz Bhf (Berlin)"),
            Station::new("900180001", "S Köpenick (Berlin)"),
        );
        let mut state = RefreshCycleState::new(route, ModeFilter::new());
        state.journeys = journeys.into();
        state.loading = loading;
        state.snapshot()
    }

    #[test]
    fn empty_and_loading_lists() {
        let now = ts("08:00");
        assert!(render_list(&snapshot(vec![], false), &now).contains(EMPTY_BOARD));
        assert!(render_list(&snapshot(vec![], true), &now).contains(LOADING));
    }

    #[test]
    fn list_marks_selection() {
        let journeys = vec![
            Journey::new(ts("08:00"), vec![leg("S3", "08:00", "08:20")]).unwrap(),
            Journey::new(ts("08:10"), vec![leg("S5", "08:10", "08:30")]).unwrap(),
        ];
        let out = render_list(&snapshot(journeys, false), &ts("07:00"));
        let lines: Vec<&str> = out.lines().collect();

        assert!(lines[0].starts_with(" ▸ 1. 08:00"));
        assert!(lines[2].starts_with("   2. 08:10"));
        assert_eq!(lines[1].trim(), "S3");
    }

    #[test]
    fn header_shows_route_and_spinner() {
        let header = render_header(&snapshot(vec![], true), &ts("08:00"));
        assert!(header.starts_with("Alexanderplatz → Köpenick  08:00:00"));
        assert!(header.contains(spinner_frame(0)));
    }

    #[test]
    fn detail_includes_warnings_and_sparkline() {
        let first = leg("S3", "08:00", "08:10");
        let mut second = leg("U8", "08:12", "08:30");
        second.wait_before = Duration::minutes(2);
        second.departure_delay_secs = 180;
        second.arrival_platform = Some("1".into());
        second.service_warnings.push("y".repeat(70));
        let journey = Journey::new(ts("08:00"), vec![first, second]).unwrap();

        let delays = HashMap::from([("U8".to_string(), vec![1, 3, 2])]);
        let out = render_detail(&journey, &ts("07:55"), &delays);

        assert!(out.contains("Journey: 08:00 → 08:30  Departs in: 5:00"));
        assert!(out.contains("⚡ TIGHT CONNECTION: 2min to change!"));
        assert!(out.contains("[S] U8 08:12 → 08:30 +3m"));
        assert!(out.contains("[Plt 1]"));
        assert!(out.contains(&format!("⚠ {}...", "y".repeat(50))));
        assert!(out.contains(&sparkline(&[1, 3, 2], SPARKLINE_WIDTH)));
    }
}
