pub mod catalog;
pub mod scrape;
pub mod tracing;

pub mod config {
    pub mod env_loader;
    pub mod model;
}

pub mod dinaticket {
    pub mod api;
    pub mod extractor;
    pub mod model;
    pub mod time;
}

pub mod dashboard {
    pub mod payload;
    pub mod render;
    pub mod writer;
}
