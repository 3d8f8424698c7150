//! A small recording HTTP server for exercising the client against scripted
//! responses. Every incoming request is captured for assertions; responses
//! are served from a queue, defaulting to `200 {}` when the queue is empty.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use apify_client::{ApifyClient, ApifyConfig};
use axum::body::Body;
use axum::extract::State;
use axum::http::{header::CONTENT_TYPE, HeaderMap, Method, Uri};
use axum::response::Response;
use axum::routing::any;
use axum::Router;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub body: String,
    pub headers: HeaderMap,
}

impl RecordedRequest {
    /// Decoded query pairs, in transmission order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        match &self.query {
            Some(query) => url::form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn header(&self, name: &str) -> Option<String> {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string())
    }
}

#[derive(Debug)]
struct CannedResponse {
    status: u16,
    content_type: String,
    body: String,
}

#[derive(Clone)]
struct TestState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    responses: Arc<Mutex<VecDeque<CannedResponse>>>,
}

pub struct TestServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    responses: Arc<Mutex<VecDeque<CannedResponse>>>,
}

impl TestServer {
    pub async fn start() -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let responses = Arc::new(Mutex::new(VecDeque::new()));
        let state = TestState {
            requests: requests.clone(),
            responses: responses.clone(),
        };

        let app = Router::new()
            .route("/{*path}", any(record_and_respond))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test server");
        let addr = listener.local_addr().expect("test server address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve test server");
        });

        Self {
            base_url: format!("http://{addr}/"),
            requests,
            responses,
        }
    }

    /// Queue the next response the server will return.
    pub fn enqueue(&self, status: u16, content_type: &str, body: &str) {
        self.responses.lock().unwrap().push_back(CannedResponse {
            status,
            content_type: content_type.to_string(),
            body: body.to_string(),
        });
    }

    pub fn enqueue_json(&self, status: u16, body: &str) {
        self.enqueue(status, "application/json; charset=utf-8", body);
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .expect("no request was recorded")
            .clone()
    }

    /// A client configured with a test token and pointed at this server.
    pub fn client(&self) -> ApifyClient {
        let config = ApifyConfig::new("test-token").with_base_url(self.base_url.clone());
        ApifyClient::new(config).expect("build test client")
    }
}

async fn record_and_respond(
    State(state): State<TestState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(|q| q.to_string()),
        body,
        headers,
    });

    let canned = state
        .responses
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or(CannedResponse {
            status: 200,
            content_type: "application/json".to_string(),
            body: "{}".to_string(),
        });

    Response::builder()
        .status(canned.status)
        .header(CONTENT_TYPE, canned.content_type)
        .body(Body::from(canned.body))
        .expect("build canned response")
}
