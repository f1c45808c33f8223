use super::model::{MonthTable, SessionRecord};
use super::time::normalize_time;
use chrono::{Datelike, Local, NaiveDate};
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument, trace};

const SESSION_GROUP_CLASS: &str = "js-session-group";
const QUOTA_TOTAL_ATTRIBUTE: &str = "data-quota-total";
const QUOTA_STOCK_ATTRIBUTE: &str = "data-stock";

lazy_static! {
    static ref SESSION_ROW: Selector = Selector::parse("div.js-session-row").unwrap();
    static ref SESSION_DATE: Selector = Selector::parse("div.session-card__date").unwrap();
    static ref DAY_OF_MONTH: Selector = Selector::parse("span.num_dia").unwrap();
    static ref MONTH_ABBREVIATION: Selector = Selector::parse("span.mes").unwrap();
    static ref SESSION_TIME: Selector =
        Selector::parse("span.session-card__time-session").unwrap();
    static ref QUOTA_ROW: Selector = Selector::parse("div.js-quota-row").unwrap();
}

/// Reads session records out of a Dinaticket event page.
///
/// The page only shows day and month, so the year is fixed when the
/// extractor is built.
#[derive(Debug, Clone)]
pub struct Extractor {
    months: MonthTable,
    year: i32,
}

impl Extractor {
    pub fn new(months: MonthTable, year: i32) -> Self {
        Self { months, year }
    }

    pub fn for_current_year(months: MonthTable) -> Self {
        Self::new(months, Local::now().year())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /**
       Returns the sessions in document order.
       Incomplete or malformed sessions are left out.
    */
    #[instrument(skip_all, fields(bytes = markup.len()))]
    pub fn extract(&self, markup: &str) -> Vec<SessionRecord> {
        let document = Html::parse_document(markup);

        let sessions: Vec<SessionRecord> = document
            .select(&SESSION_ROW)
            .filter_map(|session| {
                let record = self.extract_session(session);

                if record.is_none() {
                    trace!("Skipping incomplete session");
                }
                record
            })
            .collect();

        debug!("Extracted {} sessions", sessions.len());

        sessions
    }

    fn extract_session(&self, session: ElementRef) -> Option<SessionRecord> {
        let group = session_group(session)?;
        let date = self.session_date(group)?;

        let time = session
            .select(&SESSION_TIME)
            .next()
            .map(|time| normalize_time(&text_of(time)))?;

        let quota = session.select(&QUOTA_ROW).next()?;
        let capacity = quota_attribute(quota, QUOTA_TOTAL_ATTRIBUTE)?;
        let stock = quota_attribute(quota, QUOTA_STOCK_ATTRIBUTE)?;

        Some(SessionRecord::new(
            date,
            time.to_string(),
            Some(capacity),
            Some(stock),
        ))
    }

    fn session_date(&self, group: ElementRef) -> Option<NaiveDate> {
        let date_card = group.select(&SESSION_DATE).next()?;
        let day = text_of(date_card.select(&DAY_OF_MONTH).next()?);
        let month = text_of(date_card.select(&MONTH_ABBREVIATION).next()?);

        if day.is_empty() || day.len() > 2 || !day.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }

        NaiveDate::from_ymd_opt(self.year, self.months.resolve(&month), day.parse().ok()?)
    }
}

/// Closest enclosing date group of a session row.
fn session_group(session: ElementRef) -> Option<ElementRef> {
    session.ancestors().filter_map(ElementRef::wrap).find(|element| {
        element.value().name() == "div"
            && element
                .value()
                .classes()
                .any(|class| class == SESSION_GROUP_CLASS)
    })
}

/// A missing attribute counts as zero; anything non-numeric drops the session.
fn quota_attribute(quota: ElementRef, name: &str) -> Option<u32> {
    match quota.value().attr(name) {
        None => Some(0),
        Some(value) => value.trim().parse().ok(),
    }
}

fn text_of(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
