//! Option bags and query-parameter construction for the actor endpoints.
//!
//! The Apify run endpoints accept a fixed set of query parameters; everything
//! else a caller might pass must be dropped rather than forwarded. The three
//! run endpoints share one builder, [`run_query_params`], so the allow-list,
//! the `waitForFinish` default and the sync-endpoint stripping cannot drift
//! between call sites.

use base64::Engine;
use serde::{Deserialize, Serialize};

/// A webhook subscription attached to an actor run.
///
/// Transmitted in the query string as base64-encoded JSON, which is how the
/// platform expects webhook lists on the run endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    pub event_types: Vec<String>,
    pub request_url: String,
}

/// Options recognized by the run endpoints.
///
/// Deserializing a JSON option bag into this type silently drops any
/// unrecognized keys; only the fields below can ever reach the query string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RunOptions {
    /// Seconds to block the `runs` endpoint waiting for the run to finish.
    /// Defaults to 60 on the asynchronous endpoint; never transmitted on the
    /// synchronous ones.
    pub wait_for_finish: Option<u32>,
    /// Run timeout in seconds, overriding the actor default.
    pub timeout: Option<u32>,
    /// Memory limit in megabytes.
    pub memory: Option<u32>,
    /// Actor build to run (tag or build number).
    pub build: Option<String>,
    pub webhooks: Option<Vec<Webhook>>,
    /// Cap on dataset items produced by a pay-per-result actor.
    pub max_items: Option<u64>,
    /// Cap on the total charge for a pay-per-event actor run, in USD.
    pub max_total_charge_usd: Option<f64>,
}

/// Filters applied when fetching dataset items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatasetQuery {
    /// Item format, e.g. `"json"` or `"csv"`.
    pub format: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    /// Fields to project; joined with `,` for transmission.
    pub fields: Option<Vec<String>>,
}

/// Filters for listing actors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListActorsQuery {
    /// Restrict the listing to actors owned by the calling user.
    pub my: Option<bool>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// A response payload whose shape depends on the response content type.
///
/// The key-value record and synchronous run endpoints return whatever the
/// actor stored: JSON when the content type says so, opaque text otherwise.
/// Callers must branch explicitly instead of guessing.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    Json(serde_json::Value),
    Raw(String),
}

impl RecordValue {
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Raw(_) => None,
        }
    }

    pub fn as_raw(&self) -> Option<&str> {
        match self {
            Self::Json(_) => None,
            Self::Raw(text) => Some(text),
        }
    }
}

/// How a run endpoint treats the `waitForFinish` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WaitForFinish {
    /// Asynchronous endpoint: transmit the caller's value, or this default
    /// when none was supplied.
    DefaultSecs(u32),
    /// Synchronous endpoint: never transmit the parameter, even when the
    /// caller set it. The call blocks until completion anyway.
    Stripped,
}

/// Seconds the asynchronous run endpoint waits by default.
pub(crate) const DEFAULT_WAIT_FOR_FINISH_SECS: u32 = 60;

/// Build the query parameters for a run endpoint from `options`.
///
/// Emits only the recognized option fields, skipping absent ones entirely.
/// Webhook lists are serialized to JSON and base64-encoded. Fails only if the
/// webhook list cannot be serialized.
pub(crate) fn run_query_params(
    options: &RunOptions,
    wait: WaitForFinish,
) -> Result<Vec<(&'static str, String)>, serde_json::Error> {
    let mut params = Vec::new();

    match wait {
        WaitForFinish::DefaultSecs(default_secs) => {
            let secs = options.wait_for_finish.unwrap_or(default_secs);
            params.push(("waitForFinish", secs.to_string()));
        }
        WaitForFinish::Stripped => {}
    }

    if let Some(timeout) = options.timeout {
        params.push(("timeout", timeout.to_string()));
    }
    if let Some(memory) = options.memory {
        params.push(("memory", memory.to_string()));
    }
    if let Some(build) = &options.build {
        params.push(("build", build.clone()));
    }
    if let Some(webhooks) = &options.webhooks {
        let json = serde_json::to_string(webhooks)?;
        let encoded = base64::engine::general_purpose::STANDARD.encode(json);
        params.push(("webhooks", encoded));
    }
    if let Some(max_items) = options.max_items {
        params.push(("maxItems", max_items.to_string()));
    }
    if let Some(max_total_charge_usd) = options.max_total_charge_usd {
        params.push(("maxTotalChargeUsd", max_total_charge_usd.to_string()));
    }

    Ok(params)
}

/// Build the query parameters for a dataset-items request.
///
/// Absent fields are omitted entirely, never sent as empty strings. When
/// `default_format` is given it is used for an absent `format`.
pub(crate) fn dataset_query_params(
    query: &DatasetQuery,
    default_format: Option<&str>,
) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();

    match (&query.format, default_format) {
        (Some(format), _) => params.push(("format", format.clone())),
        (None, Some(default)) => params.push(("format", default.to_string())),
        (None, None) => {}
    }
    if let Some(limit) = query.limit {
        params.push(("limit", limit.to_string()));
    }
    if let Some(offset) = query.offset {
        params.push(("offset", offset.to_string()));
    }
    if let Some(fields) = &query.fields {
        params.push(("fields", fields.join(",")));
    }

    params
}

/// Build the query parameters for listing actors, omitting absent filters.
pub(crate) fn list_actors_query_params(query: &ListActorsQuery) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();

    if let Some(my) = query.my {
        params.push(("my", my.to_string()));
    }
    if let Some(limit) = query.limit {
        params.push(("limit", limit.to_string()));
    }
    if let Some(offset) = query.offset {
        params.push(("offset", offset.to_string()));
    }

    params
}
