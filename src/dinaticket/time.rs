use lazy_static::lazy_static;
use regex::Regex;
use std::fmt::{Display, Formatter};

const HOUR_MARKER: char = 'h';

lazy_static! {
    // "20", "20:30", "2030" and "20:" (left over from "20h")
    static ref CLOCK_TIME: Regex = Regex::new(r"^(\d{1,2})(?::?(\d{2}))?:?$").unwrap();
}

/// Session start time, as read from the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionTime {
    Clock { hour: u32, minute: u32 },
    /// Anything that doesn't look like a time ("Tarde", "Por confirmar"), kept as written
    FreeText(String),
}

impl Display for SessionTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionTime::Clock { hour, minute } => write!(f, "{:02}:{:02}", hour, minute),
            SessionTime::FreeText(text) => write!(f, "{}", text),
        }
    }
}

/**
   Normalizes the free-form time text of a session into `HH:MM`.
   Falls back to the trimmed original text when it isn't a recognizable time.
*/
pub fn normalize_time(raw: &str) -> SessionTime {
    let trimmed = raw.trim();
    let compact: String = trimmed
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == HOUR_MARKER { ':' } else { c })
        .collect();

    CLOCK_TIME
        .captures(&compact)
        .and_then(|captures| {
            let hour = captures[1].parse().ok()?;
            let minute = match captures.get(2) {
                Some(minute) => minute.as_str().parse().ok()?,
                None => 0,
            };

            Some(SessionTime::Clock { hour, minute })
        })
        .unwrap_or_else(|| SessionTime::FreeText(trimmed.to_string()))
}
