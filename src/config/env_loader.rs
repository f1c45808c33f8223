use crate::config::model::{Config, DashboardConfig, DebugConfig, EventSource};
use crate::dinaticket::api::DEFAULT_TIMEOUT;
use chrono_tz::Tz;
use reqwest::Url;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_EVENTS: [(&str, &str); 3] = [
    (
        "Disfruta",
        "https://www.dinaticket.com/es/provider/10402/event/4905281",
    ),
    (
        "Miedo",
        "https://www.dinaticket.com/es/provider/10402/event/4915778",
    ),
    (
        "Escondido",
        "https://www.dinaticket.com/es/provider/20073/event/4930233",
    ),
];
const DEFAULT_OUTPUT_PATH: &str = "docs/index.html";
const DEFAULT_TIMEZONE: Tz = Tz::Europe__Madrid;
const DEFAULT_TITLE: &str = "Cartelera — Escalera de Jacob y Escondido";
const DEFAULT_CAPACITY_EVENTS: &str = "Escondido";

pub fn load_config() -> Config {
    load_config_from(|name| env::var(name).ok())
}

/// Read on its own so logging is up before the rest of the config is validated.
pub fn load_loki_url() -> Option<String> {
    load_loki_url_from(|name| env::var(name).ok())
}

pub fn load_loki_url_from(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    lookup("LOKI_URL").filter(|url| !url.trim().is_empty())
}

/// Builds the config from any variable source. Invalid values abort with the variable's name.
pub fn load_config_from(lookup: impl Fn(&str) -> Option<String>) -> Config {
    let events = match lookup("CARTELERA_EVENTS") {
        Some(value) => parse_events("CARTELERA_EVENTS", &value),
        None => default_events(),
    };
    let fetch_timeout = load_number_config(&lookup, "FETCH_TIMEOUT_SECS")
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_TIMEOUT);

    if fetch_timeout.is_zero() {
        panic!("Invalid config 'FETCH_TIMEOUT_SECS'. Expected a positive number of seconds.");
    }

    let output_path = lookup("OUTPUT_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH));
    let timezone = lookup("TIMEZONE")
        .map(|value| {
            value.parse::<Tz>().unwrap_or_else(|_| {
                panic!("Invalid config 'TIMEZONE'. '{}' is not an IANA time zone", value)
            })
        })
        .unwrap_or(DEFAULT_TIMEZONE);

    let title = lookup("DASHBOARD_TITLE").unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let capacity_events = parse_list(
        &lookup("CAPACITY_EVENTS").unwrap_or_else(|| DEFAULT_CAPACITY_EVENTS.to_string()),
    );

    Config {
        debug_config: DebugConfig {
            event_limit: load_number_config(&lookup, "DEBUG_EVENT_LIMIT"),
            skip_writing: load_bool_config(&lookup, "DEBUG_SKIP_WRITING", false),
        },
        events,
        fetch_timeout,
        output_path,
        timezone,
        dashboard: DashboardConfig {
            title,
            capacity_events,
        },
    }
}

fn default_events() -> Vec<EventSource> {
    DEFAULT_EVENTS
        .iter()
        .map(|(name, url)| EventSource::new(name, Url::parse(url).expect("Invalid default event URL")))
        .collect()
}

/// Parses `Name=URL;Name=URL`, keeping the given order.
fn parse_events(config_name: &str, value: &str) -> Vec<EventSource> {
    value
        .split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (name, url) = entry.split_once('=').unwrap_or_else(|| {
                panic!(
                    "Invalid config '{}'. Expected 'Name=URL' but got '{}'",
                    config_name, entry
                )
            });
            let name = name.trim();

            if name.is_empty() {
                panic!("Invalid config '{}'. Event name missing in '{}'", config_name, entry);
            }

            EventSource::new(name, parse_event_url(config_name, url.trim()))
        })
        .collect()
}

fn parse_event_url(config_name: &str, value: &str) -> Url {
    match Url::parse(value) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => url,
        _ => panic!(
            "Invalid config '{}'. '{}' is not an http(s) URL",
            config_name, value
        ),
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn load_bool_config(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: bool) -> bool {
    lookup(name)
        .unwrap_or_else(|| default.to_string())
        .parse()
        .unwrap_or_else(|_| {
            panic!(
                "Invalid config '{}'. Expected either 'true' or 'false'",
                name
            )
        })
}

fn load_number_config<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Option<T> {
    lookup(name).map(|value| {
        value.trim().parse().unwrap_or_else(|_| {
            panic!(
                "Invalid config '{}'. Expected a non-negative integer number.",
                name
            )
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        load_config_from(|name| vars.get(name).cloned())
    }

    #[test_log::test]
    fn when_nothing_is_set_should_use_defaults() {
        let config = load(&[]);

        let names: Vec<&str> = config.events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Disfruta", "Miedo", "Escondido"]);
        assert_eq!(config.fetch_timeout, Duration::from_secs(20));
        assert_eq!(config.output_path, PathBuf::from("docs/index.html"));
        assert_eq!(config.timezone, Tz::Europe__Madrid);
        assert_eq!(config.dashboard.capacity_events, vec!["Escondido"]);
        assert_eq!(config.debug_config.event_limit, None);
        assert!(!config.debug_config.skip_writing);
    }

    #[test_log::test]
    fn should_parse_events_in_given_order() {
        let config = load(&[(
            "CARTELERA_EVENTS",
            " Zeta=https://example.com/z?a=1 ; Alfa=http://example.com/a;",
        )]);

        assert_eq!(config.events.len(), 2);
        assert_eq!(config.events[0].name, "Zeta");
        assert_eq!(config.events[0].url.as_str(), "https://example.com/z?a=1");
        assert_eq!(config.events[1].name, "Alfa");
    }

    #[test_log::test]
    #[should_panic(expected = "CARTELERA_EVENTS")]
    fn when_event_has_no_url_should_panic() {
        load(&[("CARTELERA_EVENTS", "Disfruta")]);
    }

    #[test_log::test]
    #[should_panic(expected = "not an http(s) URL")]
    fn when_event_url_is_not_http_should_panic() {
        load(&[("CARTELERA_EVENTS", "Disfruta=ftp://example.com/x")]);
    }

    #[test_log::test]
    #[should_panic(expected = "Event name missing")]
    fn when_event_name_is_empty_should_panic() {
        load(&[("CARTELERA_EVENTS", "=https://example.com")]);
    }

    #[test_log::test]
    #[should_panic(expected = "FETCH_TIMEOUT_SECS")]
    fn when_timeout_is_zero_should_panic() {
        load(&[("FETCH_TIMEOUT_SECS", "0")]);
    }

    #[test_log::test]
    #[should_panic(expected = "TIMEZONE")]
    fn when_timezone_is_unknown_should_panic() {
        load(&[("TIMEZONE", "Europe/Atlantis")]);
    }

    #[test_log::test]
    fn should_read_overrides() {
        let config = load(&[
            ("FETCH_TIMEOUT_SECS", "5"),
            ("OUTPUT_PATH", "/tmp/cartelera.html"),
            ("TIMEZONE", "Atlantic/Canary"),
            ("CAPACITY_EVENTS", "Miedo, Escondido"),
            ("DEBUG_EVENT_LIMIT", "1"),
            ("DEBUG_SKIP_WRITING", "true"),
        ]);

        assert_eq!(config.fetch_timeout, Duration::from_secs(5));
        assert_eq!(config.output_path, PathBuf::from("/tmp/cartelera.html"));
        assert_eq!(config.timezone, Tz::Atlantic__Canary);
        assert_eq!(config.dashboard.capacity_events, vec!["Miedo", "Escondido"]);
        assert!(config.debug_config.skip_writing);
        assert_eq!(config.scraped_events().len(), 1);
        assert_eq!(config.scraped_events()[0].name, "Disfruta");
    }

    #[test_log::test]
    #[should_panic(expected = "DEBUG_EVENT_LIMIT")]
    fn when_event_limit_is_negative_should_panic() {
        load(&[("DEBUG_EVENT_LIMIT", "-1")]);
    }

    #[test_log::test]
    #[should_panic(expected = "DEBUG_EVENT_LIMIT")]
    fn when_event_limit_does_not_fit_should_panic() {
        load(&[("DEBUG_EVENT_LIMIT", "340282366920938463463374607431768211456")]);
    }

    #[test_log::test]
    fn should_read_loki_url_when_set() {
        assert_eq!(
            load_loki_url_from(|name| (name == "LOKI_URL").then(|| "http://localhost:3100".to_string())),
            Some("http://localhost:3100".to_string())
        );
        assert_eq!(load_loki_url_from(|_| Some("  ".to_string())), None);
        assert_eq!(load_loki_url_from(|_| None), None);
    }

    #[test_log::test]
    fn when_event_limit_exceeds_events_should_scrape_all() {
        let config = load(&[("DEBUG_EVENT_LIMIT", "10")]);

        assert_eq!(config.scraped_events().len(), 3);
    }
}
