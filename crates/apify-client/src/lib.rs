//! # Apify Client
//!
//! A typed client for the [Apify](https://apify.com) actor platform HTTP API:
//! run actors (asynchronously or synchronously), fetch dataset items, read
//! and write key-value store records, inspect and abort runs, list actors and
//! fetch the current user.
//!
//! Every operation is a single request/response exchange. There is no
//! polling, retrying or caching here; callers who need to wait for an
//! asynchronous run to finish poll [`ApifyClient::get_actor_run`] themselves.
//!
//! ```no_run
//! use apify_client::{ApifyClient, ApifyConfig, RunOptions};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), apify_client::ApifyError> {
//! let client = ApifyClient::new(ApifyConfig::new("my-token"))?;
//! let run = client
//!     .run_actor(
//!         "apify~web-scraper",
//!         &json!({ "startUrls": [{ "url": "https://example.com" }] }),
//!         &RunOptions::default(),
//!     )
//!     .await?;
//! println!("run status: {}", run["data"]["status"]);
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod options;

pub use client::ApifyClient;
pub use config::{ApifyConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::ApifyError;
pub use options::{DatasetQuery, ListActorsQuery, RecordValue, RunOptions, Webhook};
