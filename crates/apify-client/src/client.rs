//! The HTTP client for the Apify actor platform API.

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ApifyConfig;
use crate::error::ApifyError;
use crate::options::{
    dataset_query_params, list_actors_query_params, run_query_params, DatasetQuery,
    ListActorsQuery, RecordValue, RunOptions, WaitForFinish, DEFAULT_WAIT_FOR_FINISH_SECS,
};

/// Client for the Apify API v2.
///
/// Holds the base URL, the bearer token and a reqwest connection pool; no
/// per-call state, so one instance can be shared freely across tasks. Every
/// operation issues exactly one HTTP request and maps failures into
/// [`ApifyError`].
#[derive(Debug, Clone)]
pub struct ApifyClient {
    http: reqwest::Client,
    base_url: String,
    api_token: String,
}

impl ApifyClient {
    /// Build a client from `config`, constructing its own transport with the
    /// configured timeout.
    pub fn new(config: ApifyConfig) -> Result<Self, ApifyError> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApifyError::config(format!("failed to build HTTP transport: {e}")))?;
        Ok(Self {
            http,
            base_url: config.normalized_base_url(),
            api_token: config.api_token,
        })
    }

    /// Build a client around a caller-supplied transport, e.g. to share a
    /// connection pool or to install custom middleware. Timeouts are then the
    /// transport's responsibility.
    pub fn with_http_client(
        config: ApifyConfig,
        http: reqwest::Client,
    ) -> Result<Self, ApifyError> {
        config.validate()?;
        Ok(Self {
            http,
            base_url: config.normalized_base_url(),
            api_token: config.api_token,
        })
    }

    /// Build a client from `APIFY_API_TOKEN` / `APIFY_BASE_URI` /
    /// `APIFY_TIMEOUT` environment variables.
    pub fn from_env() -> Result<Self, ApifyError> {
        Self::new(ApifyConfig::from_env()?)
    }

    /// Start an actor run and return the run envelope.
    ///
    /// `input` is the actor input, transmitted verbatim as the JSON request
    /// body; `options` travel separately in the query string, filtered to the
    /// recognized parameters with `waitForFinish` defaulted to 60 seconds.
    pub async fn run_actor<T: Serialize + ?Sized>(
        &self,
        actor_id: &str,
        input: &T,
        options: &RunOptions,
    ) -> Result<Value, ApifyError> {
        const OP: &str = "run actor";
        let params = run_query_params(
            options,
            WaitForFinish::DefaultSecs(DEFAULT_WAIT_FOR_FINISH_SECS),
        )?;
        let response = self
            .execute(
                OP,
                self.request(Method::POST, &format!("acts/{actor_id}/runs"))
                    .query(&params)
                    .json(input),
            )
            .await?;
        self.decode_json(OP, response).await
    }

    /// Run an actor synchronously and return its OUTPUT record.
    ///
    /// The platform caps synchronous runs at roughly 300 seconds and answers
    /// 408 when the run outlasts that, which surfaces here as an error.
    /// `waitForFinish` is meaningless on this endpoint and is never sent.
    pub async fn run_actor_sync<T: Serialize + ?Sized>(
        &self,
        actor_id: &str,
        input: &T,
        options: &RunOptions,
    ) -> Result<RecordValue, ApifyError> {
        const OP: &str = "run actor synchronously";
        let params = run_query_params(options, WaitForFinish::Stripped)?;
        let response = self
            .execute(
                OP,
                self.request(Method::POST, &format!("acts/{actor_id}/run-sync"))
                    .query(&params)
                    .json(input),
            )
            .await?;
        self.read_record(OP, response).await
    }

    /// Run an actor synchronously and return the items of its default
    /// dataset.
    pub async fn run_actor_sync_dataset<T: Serialize + ?Sized>(
        &self,
        actor_id: &str,
        input: &T,
        options: &RunOptions,
        query: &DatasetQuery,
    ) -> Result<Vec<Value>, ApifyError> {
        const OP: &str = "run actor synchronously";
        let mut params = run_query_params(options, WaitForFinish::Stripped)?;
        params.extend(dataset_query_params(query, None));
        let response = self
            .execute(
                OP,
                self.request(
                    Method::POST,
                    &format!("acts/{actor_id}/run-sync-get-dataset-items"),
                )
                .query(&params)
                .json(input),
            )
            .await?;
        self.decode_json(OP, response).await
    }

    /// Fetch items from a dataset. The format defaults to `"json"`; absent
    /// filters are omitted from the request entirely.
    pub async fn get_dataset(
        &self,
        dataset_id: &str,
        query: &DatasetQuery,
    ) -> Result<Vec<Value>, ApifyError> {
        const OP: &str = "get dataset";
        let params = dataset_query_params(query, Some("json"));
        let response = self
            .execute(
                OP,
                self.request(Method::GET, &format!("datasets/{dataset_id}/items"))
                    .query(&params),
            )
            .await?;
        self.decode_json(OP, response).await
    }

    /// Fetch a record from a key-value store. Returns decoded JSON when the
    /// response content type says `application/json`, the raw body otherwise.
    pub async fn get_key_value_record(
        &self,
        store_id: &str,
        key: &str,
    ) -> Result<RecordValue, ApifyError> {
        const OP: &str = "get key-value store";
        let response = self
            .execute(
                OP,
                self.request(
                    Method::GET,
                    &format!("key-value-stores/{store_id}/records/{key}"),
                ),
            )
            .await?;
        self.read_record(OP, response).await
    }

    /// Store a record in a key-value store.
    ///
    /// With the default `application/json` content type the value is
    /// serialized as JSON; for any other content type a string value is sent
    /// as-is and anything else is JSON-serialized. Returns `true` iff the
    /// platform answered 201; other success statuses yield `false`, failures
    /// an error.
    pub async fn set_key_value_record(
        &self,
        store_id: &str,
        key: &str,
        value: &Value,
        content_type: &str,
    ) -> Result<bool, ApifyError> {
        const OP: &str = "set key-value store";
        let body = if content_type == "application/json" {
            serde_json::to_string(value)?
        } else {
            match value {
                Value::String(text) => text.clone(),
                other => serde_json::to_string(other)?,
            }
        };
        let response = self
            .execute(
                OP,
                self.request(
                    Method::PUT,
                    &format!("key-value-stores/{store_id}/records/{key}"),
                )
                .header(CONTENT_TYPE, content_type)
                .body(body),
            )
            .await?;
        Ok(response.status() == StatusCode::CREATED)
    }

    /// Fetch the envelope describing an actor run.
    pub async fn get_actor_run(&self, run_id: &str) -> Result<Value, ApifyError> {
        const OP: &str = "get actor run";
        let response = self
            .execute(OP, self.request(Method::GET, &format!("actor-runs/{run_id}")))
            .await?;
        self.decode_json(OP, response).await
    }

    /// Request that a running actor run be aborted. Reports whatever state
    /// the platform returns; the run's own lifecycle is not modeled here.
    pub async fn abort_actor_run(&self, run_id: &str) -> Result<Value, ApifyError> {
        const OP: &str = "abort actor run";
        let response = self
            .execute(
                OP,
                self.request(Method::POST, &format!("actor-runs/{run_id}/abort")),
            )
            .await?;
        self.decode_json(OP, response).await
    }

    /// Fetch the account the token belongs to.
    pub async fn get_user(&self) -> Result<Value, ApifyError> {
        const OP: &str = "get user info";
        let response = self.execute(OP, self.request(Method::GET, "users/me")).await?;
        self.decode_json(OP, response).await
    }

    /// List actors visible to the account, with optional filters.
    pub async fn list_actors(&self, query: &ListActorsQuery) -> Result<Value, ApifyError> {
        const OP: &str = "list actors";
        let params = list_actors_query_params(query);
        let response = self
            .execute(OP, self.request(Method::GET, "acts").query(&params))
            .await?;
        self.decode_json(OP, response).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "sending Apify API request");
        self.http
            .request(method, url)
            .bearer_auth(&self.api_token)
            .header(ACCEPT, "application/json")
    }

    /// Send a request and map transport failures and non-2xx statuses into
    /// [`ApifyError::Api`] for `operation`.
    async fn execute(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<Response, ApifyError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApifyError::transport(operation, e))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(operation, status = status.as_u16(), "Apify API request failed");
            return Err(ApifyError::status(operation, status.as_u16(), &body));
        }
        Ok(response)
    }

    /// Decode a success response body as JSON. Decoding failures are
    /// [`ApifyError::Json`], not [`ApifyError::Api`].
    async fn decode_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        response: Response,
    ) -> Result<T, ApifyError> {
        let body = response
            .text()
            .await
            .map_err(|e| ApifyError::transport(operation, e))?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Interpret a success response by its content type: JSON payloads are
    /// decoded, anything else is handed back as raw text.
    async fn read_record(
        &self,
        operation: &'static str,
        response: Response,
    ) -> Result<RecordValue, ApifyError> {
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("application/json"));
        let body = response
            .text()
            .await
            .map_err(|e| ApifyError::transport(operation, e))?;
        if is_json {
            Ok(RecordValue::Json(serde_json::from_str(&body)?))
        } else {
            Ok(RecordValue::Raw(body))
        }
    }
}
