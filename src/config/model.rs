use chrono_tz::Tz;
use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug)]
pub struct Config {
    pub debug_config: DebugConfig,
    pub events: Vec<EventSource>,
    pub fetch_timeout: Duration,
    pub output_path: PathBuf,
    pub timezone: Tz,
    pub dashboard: DashboardConfig,
}

impl Config {
    /// Events to scrape this run, honouring the debug limit
    pub fn scraped_events(&self) -> &[EventSource] {
        match self.debug_config.event_limit {
            Some(limit) => &self.events[..limit.min(self.events.len())],
            None => &self.events,
        }
    }
}

#[derive(Debug)]
pub struct DebugConfig {
    pub event_limit: Option<usize>,
    pub skip_writing: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventSource {
    pub name: String,
    pub url: Url,
}

impl EventSource {
    pub fn new(name: &str, url: Url) -> Self {
        Self {
            name: name.to_string(),
            url,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub title: String,
    /// Tabs that show capacity, stock and occupancy instead of just sold tickets
    pub capacity_events: Vec<String>,
}
