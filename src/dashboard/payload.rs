use crate::catalog::EventCatalog;
use crate::config::model::DashboardConfig;
use crate::dinaticket::model::{SessionRecord, DATE_ISO_FORMAT};
use chrono::{DateTime, NaiveDate, ParseError, SecondsFormat, TimeZone};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

pub const TABLE_HEADERS: [&str; 6] = ["Fecha", "Hora", "Vendidas", "FechaISO", "Capacidad", "Stock"];

const SOURCE_NAME: &str = "Dinaticket";
const SOURCE_NOTE: &str =
    "Pestañas por evento; los eventos con capacidad muestran capacidad/stock y ocupación";

/// A session flattened for the dashboard table:
/// `[date_label, time, sold_count, date_iso, capacity, stock]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRow(
    pub String,
    pub String,
    pub u32,
    pub String,
    pub Option<u32>,
    pub Option<u32>,
);

impl From<&SessionRecord> for SessionRow {
    fn from(record: &SessionRecord) -> Self {
        SessionRow(
            record.date_label.clone(),
            record.time.clone(),
            record.sold_count,
            record.date_iso.clone(),
            record.capacity,
            record.stock,
        )
    }
}

impl SessionRow {
    /// Reads a row back into a record.
    ///
    /// Only the date, time and quota columns are trusted: the label and the
    /// sold count are derived again, so a row can't produce an inconsistent record.
    pub fn into_record(self) -> Result<SessionRecord, ParseError> {
        let SessionRow(_, time, _, date_iso, capacity, stock) = self;
        let date = NaiveDate::parse_from_str(&date_iso, DATE_ISO_FORMAT)?;

        Ok(SessionRecord::new(date, time, capacity, stock))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PayloadMeta {
    pub source: String,
    pub note: String,
    pub title: String,
    pub capacity_tabs: Vec<String>,
}

impl PayloadMeta {
    pub fn new(dashboard: &DashboardConfig) -> Self {
        Self {
            source: SOURCE_NAME.to_string(),
            note: SOURCE_NOTE.to_string(),
            title: dashboard.title.clone(),
            capacity_tabs: dashboard.capacity_events.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionTable {
    pub headers: [&'static str; 6],
    pub rows: Vec<SessionRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventTab {
    pub table: SessionTable,
}

/// Tabs in catalog order, serialized as a JSON object
#[derive(Debug, Clone, Default)]
pub struct EventTabs(pub Vec<(String, EventTab)>);

impl Serialize for EventTabs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;

        for (name, tab) in &self.0 {
            map.serialize_entry(name, tab)?;
        }
        map.end()
    }
}

/// Everything the dashboard page needs, embedded as JSON
#[derive(Debug, Clone, Serialize)]
pub struct DashboardPayload {
    pub generated_at: String,
    pub meta: PayloadMeta,
    pub eventos: EventTabs,
}

impl DashboardPayload {
    pub fn build<Tz: TimeZone>(
        catalog: &EventCatalog,
        generated_at: DateTime<Tz>,
        meta: PayloadMeta,
    ) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        let eventos = catalog
            .iter()
            .map(|(name, sessions)| {
                let table = SessionTable {
                    headers: TABLE_HEADERS,
                    rows: sessions.iter().map(SessionRow::from).collect(),
                };

                (name.to_string(), EventTab { table })
            })
            .collect();

        Self {
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Micros, false),
            meta,
            eventos: EventTabs(eventos),
        }
    }
}
