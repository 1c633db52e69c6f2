//! Institutions REST client.
//!
//! Requests go through a [`FetchService`] so tests can swap the transport.
//! Answers come back as [`ApiEvent`]s on a flume channel, which the UI drains
//! once per frame.

use std::fmt::Debug;
use std::sync::Arc;

use ehttp::{Request, Response};
use log::{debug, error, info};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::BusinessConfig;
use crate::institution::{Institution, search_fixtures};
use crate::table::RowId;

pub type FetchCallback = Box<dyn FnOnce(ehttp::Result<Response>) + Send + 'static>;

pub trait FetchService: Send + Sync + Debug {
    fn fetch(&self, request: Request, on_done: FetchCallback);
}

#[derive(Debug, Default)]
pub struct EhttpFetcher;

impl FetchService for EhttpFetcher {
    fn fetch(&self, request: Request, on_done: FetchCallback) {
        ehttp::fetch(request, on_done);
    }
}

/// Answers every request with the same canned response and remembers the
/// requests it saw.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Default)]
pub struct MockFetcher {
    pub response: Option<ehttp::Result<Response>>,
    pub requests: std::sync::Mutex<Vec<Request>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockFetcher {
    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        Self {
            response: Some(Ok(Response {
                url: String::new(),
                ok: (200..300).contains(&status),
                status,
                status_text: String::new(),
                headers: ehttp::Headers::new(&[("content-type", "application/json")]),
                bytes: body.to_string().into_bytes(),
            })),
            requests: std::sync::Mutex::default(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Some(Err(message.to_owned())),
            requests: std::sync::Mutex::default(),
        }
    }

    pub fn seen_urls(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|requests| requests.iter().map(|r| r.url.clone()).collect())
            .unwrap_or_default()
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl FetchService for MockFetcher {
    fn fetch(&self, request: Request, on_done: FetchCallback) {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
        match &self.response {
            Some(response) => on_done(response.clone()),
            None => on_done(Err("MockFetcher: no response set".to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Server nicht erreichbar: {0}")]
    Transport(String),
    #[error("Server antwortete mit Status {status}")]
    Status { status: u16 },
    #[error("Antwort konnte nicht gelesen werden: {0}")]
    Decode(String),
    #[error("Anfrage konnte nicht erstellt werden: {0}")]
    Encode(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiEvent {
    /// Answer to a list or search request.
    Listed {
        query: String,
        result: Result<Vec<Institution>, ApiError>,
    },
    /// Answer to a single-record lookup. `None` when no record has the code.
    Found {
        id: RowId,
        result: Result<Option<Institution>, ApiError>,
    },
    /// Answer to a create request.
    Created(Result<Institution, ApiError>),
}

type Waker = Arc<dyn Fn() + Send + Sync>;

/// Sends institution requests and reports answers on a channel.
#[derive(Clone)]
pub struct ApiClient {
    config: BusinessConfig,
    fetcher: Arc<dyn FetchService>,
    sender: flume::Sender<ApiEvent>,
    waker: Option<Waker>,
}

impl Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .field("fetcher", &self.fetcher)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Client and the receiving end of its event channel.
    pub fn new(
        config: BusinessConfig,
        fetcher: Arc<dyn FetchService>,
    ) -> (Self, flume::Receiver<ApiEvent>) {
        let (sender, receiver) = flume::unbounded();
        let client = Self {
            config,
            fetcher,
            sender,
            waker: None,
        };
        (client, receiver)
    }

    /// Called after each event is queued, e.g. to request a repaint.
    pub fn with_waker(mut self, waker: impl Fn() + Send + Sync + 'static) -> Self {
        self.waker = Some(Arc::new(waker));
        self
    }

    /// `GET {base}/institution`, with `?id=` when `query` is not blank.
    pub fn list(&self, query: &str) {
        let query = query.trim().to_owned();
        if self.config.use_fixtures {
            debug!("Serving institutions from fixtures (query {query:?})");
            let result = Ok(search_fixtures(&query));
            self.emit(ApiEvent::Listed { query, result });
            return;
        }

        let request = Request::get(list_url(&self.config, &query));
        info!("Fetching institutions from {}", request.url);
        let reply = self.reply();
        self.fetcher.fetch(
            request,
            Box::new(move |response| {
                let result = response
                    .map_err(ApiError::Transport)
                    .and_then(|response| decode::<Vec<Institution>>(&response));
                reply(ApiEvent::Listed { query, result });
            }),
        );
    }

    /// Looks up one record by code with the same search request as
    /// [`ApiClient::list`], answering with [`ApiEvent::Found`].
    pub fn find(&self, id: &RowId) {
        let id = id.clone();
        let query = id.to_string();
        if self.config.use_fixtures {
            let result = Ok(pick(search_fixtures(&query), &id));
            self.emit(ApiEvent::Found { id, result });
            return;
        }

        let request = Request::get(list_url(&self.config, &query));
        info!("Looking up institution {id} at {}", request.url);
        let reply = self.reply();
        self.fetcher.fetch(
            request,
            Box::new(move |response| {
                let result = response
                    .map_err(ApiError::Transport)
                    .and_then(|response| decode::<Vec<Institution>>(&response))
                    .map(|institutions| pick(institutions, &id));
                reply(ApiEvent::Found { id, result });
            }),
        );
    }

    /// `POST {base}/institution` with the record as JSON.
    pub fn create(&self, institution: &Institution) {
        if self.config.use_fixtures {
            debug!("Accepting institution {} without a backend", institution.id);
            self.emit(ApiEvent::Created(Ok(institution.clone())));
            return;
        }

        let request = match Request::json(self.config.institution_url(), institution) {
            Ok(request) => request,
            Err(err) => {
                self.emit(ApiEvent::Created(Err(ApiError::Encode(err.to_string()))));
                return;
            }
        };
        info!("Creating institution {} at {}", institution.id, request.url);
        let sent = institution.clone();
        let reply = self.reply();
        self.fetcher.fetch(
            request,
            Box::new(move |response| {
                let result = response.map_err(ApiError::Transport).and_then(|response| {
                    // Some backends answer 201 without a body.
                    if response.ok && response.bytes.is_empty() {
                        Ok(sent)
                    } else {
                        decode::<Institution>(&response)
                    }
                });
                reply(ApiEvent::Created(result));
            }),
        );
    }

    fn emit(&self, event: ApiEvent) {
        (self.reply())(event);
    }

    fn reply(&self) -> impl FnOnce(ApiEvent) + Send + 'static {
        let sender = self.sender.clone();
        let waker = self.waker.clone();
        move |event| {
            let failure = match &event {
                ApiEvent::Listed { result, .. } => result.as_ref().err(),
                ApiEvent::Found { result, .. } => result.as_ref().err(),
                ApiEvent::Created(result) => result.as_ref().err(),
            };
            if let Some(err) = failure {
                error!("Institutions request failed: {err}");
            }
            if sender.send(event).is_err() {
                debug!("Institutions event dropped, receiver is gone");
            }
            if let Some(waker) = waker {
                waker();
            }
        }
    }
}

fn list_url(config: &BusinessConfig, query: &str) -> String {
    let url = config.institution_url();
    if query.is_empty() {
        url
    } else {
        format!("{url}?id={}", urlencoding::encode(query))
    }
}

fn pick(institutions: Vec<Institution>, id: &RowId) -> Option<Institution> {
    institutions.into_iter().find(|institution| &institution.id == id)
}

fn decode<T: DeserializeOwned>(response: &Response) -> Result<T, ApiError> {
    if !response.ok {
        return Err(ApiError::Status {
            status: response.status,
        });
    }
    serde_json::from_slice(&response.bytes).map_err(|err| ApiError::Decode(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::institution::fixtures;

    fn mock_client(fetcher: MockFetcher) -> (ApiClient, flume::Receiver<ApiEvent>, Arc<MockFetcher>) {
        let fetcher = Arc::new(fetcher);
        let (client, events) = ApiClient::new(
            BusinessConfig::new("http://api.test/"),
            Arc::clone(&fetcher) as Arc<dyn FetchService>,
        );
        (client, events, fetcher)
    }

    #[test]
    fn test_list_url_encodes_query() {
        let config = BusinessConfig::new("http://api.test");
        assert_eq!(list_url(&config, ""), "http://api.test/institution");
        assert_eq!(
            list_url(&config, "LL GI"),
            "http://api.test/institution?id=LL%20GI"
        );
    }

    #[test]
    fn test_list_decodes_rows() {
        let body = serde_json::to_value(fixtures()).unwrap();
        let (client, events, fetcher) = mock_client(MockFetcher::json(200, &body));

        client.list("  ");

        assert_eq!(fetcher.seen_urls(), ["http://api.test/institution"]);
        match events.try_recv().unwrap() {
            ApiEvent::Listed { query, result } => {
                assert_eq!(query, "");
                assert_eq!(result.unwrap().len(), 11);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_list_reports_status_and_transport_errors() {
        let (client, events, _) = mock_client(MockFetcher::json(503, &serde_json::json!({})));
        client.list("LLGGI");
        assert_eq!(
            events.try_recv().unwrap(),
            ApiEvent::Listed {
                query: "LLGGI".to_owned(),
                result: Err(ApiError::Status { status: 503 }),
            }
        );

        let (client, events, _) = mock_client(MockFetcher::failing("connection refused"));
        client.list("");
        assert!(matches!(
            events.try_recv().unwrap(),
            ApiEvent::Listed {
                result: Err(ApiError::Transport(_)),
                ..
            }
        ));
    }

    #[test]
    fn test_list_rejects_malformed_body() {
        let (client, events, _) = mock_client(MockFetcher::json(200, &serde_json::json!({"id": 1})));
        client.list("");
        assert!(matches!(
            events.try_recv().unwrap(),
            ApiEvent::Listed {
                result: Err(ApiError::Decode(_)),
                ..
            }
        ));
    }

    #[test]
    fn test_create_posts_json() {
        let institution = fixtures().remove(5);
        let body = serde_json::to_value(&institution).unwrap();
        let (client, events, fetcher) = mock_client(MockFetcher::json(201, &body));

        client.create(&institution);

        let requests = fetcher.requests.lock().unwrap();
        assert_eq!(requests[0].method, "POST");
        let sent: Institution = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(sent, institution);
        assert_eq!(events.try_recv().unwrap(), ApiEvent::Created(Ok(institution)));
    }

    #[test]
    fn test_find_reports_match_or_none() {
        let body = serde_json::to_value(fixtures()).unwrap();
        let (client, events, fetcher) = mock_client(MockFetcher::json(200, &body));

        client.find(&RowId::from("LLGGI"));
        assert_eq!(fetcher.seen_urls(), ["http://api.test/institution?id=LLGGI"]);
        match events.try_recv().unwrap() {
            ApiEvent::Found { id, result } => {
                assert_eq!(id, RowId::from("LLGGI"));
                assert_eq!(result.unwrap().unwrap().address.zip_code, 35396);
            }
            other => panic!("unexpected event {other:?}"),
        }

        client.find(&RowId::from("nope"));
        assert_eq!(
            events.try_recv().unwrap(),
            ApiEvent::Found {
                id: RowId::from("nope"),
                result: Ok(None),
            }
        );
    }

    #[test]
    fn test_fixtures_mode_skips_transport() {
        let fetcher = Arc::new(MockFetcher::default());
        let (client, events) = ApiClient::new(
            BusinessConfig::default(),
            Arc::clone(&fetcher) as Arc<dyn FetchService>,
        );
        let woken = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counter = Arc::clone(&woken);
        let client = client.with_waker(move || {
            counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        });

        client.list("LLGGI");
        match events.try_recv().unwrap() {
            ApiEvent::Listed { result, .. } => {
                assert_eq!(result.unwrap()[0].id, RowId::from("LLGGI"));
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert!(fetcher.seen_urls().is_empty());
        assert_eq!(woken.load(std::sync::atomic::Ordering::SeqCst), 1);
    }
}
