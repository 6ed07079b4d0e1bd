use std::{
    cell::RefCell,
    collections::{HashMap, VecDeque},
};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::{
    api::{ApiError, ApiRequest, ApiResponse, Method, Transport},
    storage::SessionStore,
    trip::{Trip, TripStatus},
};

/// Canned responses keyed by method and path. Every request is recorded so
/// tests can assert on what did (or did not) go over the wire.
#[derive(Default)]
pub struct FakeTransport {
    responses: RefCell<HashMap<(Method, String), VecDeque<Result<ApiResponse, ApiError>>>>,
    requests: RefCell<Vec<ApiRequest>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, method: Method, path: &str, status: u16, body: &str) {
        self.push(method, path, Ok(ApiResponse { status, body: body.into() }));
    }

    pub fn fail(&self, method: Method, path: &str, err: ApiError) {
        self.push(method, path, Err(err));
    }

    fn push(&self, method: Method, path: &str, response: Result<ApiResponse, ApiError>) {
        self.responses
            .borrow_mut()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(response);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests.borrow().iter().map(|r| r.path.clone()).collect()
    }
}

#[async_trait(?Send)]
impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let key = (request.method, request.path.clone());
        self.requests.borrow_mut().push(request);

        self.responses
            .borrow_mut()
            .get_mut(&key)
            .and_then(|queue| queue.pop_front())
            .unwrap_or_else(|| Err(ApiError::Network(format!("no canned response for {key:?}"))))
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

pub fn trip_json(id: i64, status: &str) -> String {
    format!(
        r#"{{"id":{id},"name":"Trip {id}","description":"Somewhere","creator_id":1,"status":"{status}","created_at":"2025-05-22T12:09:14Z","updated_at":"2025-05-22T12:09:14Z"}}"#
    )
}

pub fn user_json() -> &'static str {
    r#"{"id":1,"email":"ana@example.com","username":"ana","created_at":"2025-01-01T00:00:00Z","updated_at":"2025-01-01T00:00:00Z"}"#
}

pub fn trip_with_status(id: i64, status: TripStatus) -> Trip {
    let timestamp = Utc.with_ymd_and_hms(2025, 5, 22, 12, 9, 14).unwrap();
    Trip {
        id,
        name: format!("Trip {id}"),
        description: "Somewhere".into(),
        creator_id: 1,
        status,
        created_at: timestamp,
        updated_at: timestamp,
    }
}
