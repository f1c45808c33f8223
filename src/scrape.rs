use crate::catalog::EventCatalog;
use crate::config::model::EventSource;
use crate::dinaticket::api::Fetcher;
use crate::dinaticket::extractor::Extractor;
use tracing::{error, info, instrument};

/**
   Scrapes the events one after another.
   An event whose page can't be fetched is kept with no sessions.
*/
#[instrument(skip_all, fields(events = events.len()))]
pub async fn scrape_catalog(
    fetcher: &Fetcher,
    extractor: &Extractor,
    events: &[EventSource],
) -> EventCatalog {
    let mut catalog = EventCatalog::new();

    for event in events {
        let sessions = match fetcher.fetch_page(event.url.as_str()).await {
            Ok(markup) => extractor.extract(&markup),
            Err(err) => {
                error!(event = %event.name, "Failed to fetch sessions: {}", err);
                Vec::new()
            }
        };

        info!("{}: {} sessions", event.name, sessions.len());

        catalog.insert(event.name.as_str(), sessions);
    }

    catalog
}
