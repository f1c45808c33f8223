use crate::dinaticket::model::SessionRecord;
use itertools::Itertools;

/// Sessions of every scraped event, keyed by event name in configuration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventCatalog {
    events: Vec<(String, Vec<SessionRecord>)>,
}

impl EventCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the sessions in place when the event is already listed.
    pub fn insert(&mut self, name: impl Into<String>, sessions: Vec<SessionRecord>) {
        let name = name.into();

        match self.events.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, existing_sessions)) => *existing_sessions = sessions,
            None => self.events.push((name, sessions)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&[SessionRecord]> {
        self.events
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, sessions)| sessions.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SessionRecord])> {
        self.events
            .iter()
            .map(|(name, sessions)| (name.as_str(), sessions.as_slice()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.events.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn total_sessions(&self) -> usize {
        self.events.iter().map(|(_, sessions)| sessions.len()).sum()
    }

    /// Sessions of an event by date then time, keeping page order on ties.
    pub fn sessions_chronologically(&self, name: &str) -> Vec<&SessionRecord> {
        self.get(name)
            .unwrap_or_default()
            .iter()
            .sorted_by(|a, b| (&a.date_iso, &a.time).cmp(&(&b.date_iso, &b.time)))
            .collect()
    }
}
