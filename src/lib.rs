//! # research_presence
//!
//! Compare how much a researcher publishes (NASA ADS record count) with how
//! visible they are on the web (Google Programmable Search result estimate).
//!
//! ## Modules
//!
//! - [`names`] - Researcher list loading (plain text or CSV)
//! - [`query`] - Query construction and filters
//! - [`lookup`] - The shared count-lookup trait
//! - [`ads`] - ADS search API client
//! - [`google`] - Google Programmable Search client
//! - [`aggregate`] - Per-researcher rows, sequential survey
//! - [`output`] - CSV export and scatter plot
//! - [`config`] - Credentials and endpoints
//! - [`error`] - Custom error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use research_presence::{ads::AdsClient, aggregate, config, output, query::QueryFilters};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = config::load_config(Path::new("config.yaml"))?;
//!     let ads = AdsClient::new(settings.credentials.ads_token.clone(), settings.ads_api_url.clone())?;
//!     let names = vec!["Vera Rubin".to_string()];
//!     let rows = aggregate::survey(&names, &QueryFilters::default(), &ads, None).await;
//!     output::write_csv(Path::new("output.csv"), &rows)?;
//!     Ok(())
//! }
//! ```

pub mod ads;
pub mod aggregate;
pub mod config;
pub mod error;
pub mod google;
pub mod lookup;
pub mod metric;
pub mod names;
pub mod output;
pub mod query;

pub use error::{PresenceError, Result};
