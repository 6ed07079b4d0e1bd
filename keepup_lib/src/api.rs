use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

use crate::{trip::Trip, user::User};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Relative to the api base, e.g. `/trips/4/start`
    pub path: String,
    /// JSON body
    pub body: Option<String>,
    pub bearer: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("not signed in")]
    Unauthorized,
    #[error("not found")]
    NotFound,
    #[error("{}", .message.as_deref().unwrap_or("request failed"))]
    Rejected { status: u16, message: Option<String> },
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 => ApiError::Unauthorized,
            404 => ApiError::NotFound,
            _ => {
                let message = serde_json::from_str::<ErrorBody>(body)
                    .ok()
                    .and_then(|body| body.error);
                ApiError::Rejected { status, message }
            }
        }
    }

    /// The `error` field the backend put in its response, if any.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn message_or(&self, fallback: &str) -> String {
        self.backend_message().unwrap_or(fallback).to_string()
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserEnvelope {
    user: User,
}

#[derive(Debug, Deserialize)]
struct TripsEnvelope {
    #[serde(default)]
    trips: Option<Vec<Trip>>,
}

#[derive(Debug, Deserialize)]
struct TripEnvelope {
    trip: Trip,
}

/// Login answer. Token fields are only present when the backend hands out
/// bearer tokens instead of (or next to) session cookies.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub user: User,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CreateTripRequest {
    pub name: String,
    pub description: String,
    pub password: String,
}

pub fn trip_path(trip_id: i64) -> String {
    format!("/trips/{trip_id}")
}

/// Turns a raw response into `T`, mapping non-2xx statuses to [`ApiError`].
pub fn decode<T>(response: &ApiResponse) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    if !(200..300).contains(&response.status) {
        return Err(ApiError::from_status(response.status, &response.body));
    }

    serde_json::from_str(&response.body).map_err(|err| ApiError::Decode(err.to_string()))
}

fn expect_success(response: &ApiResponse) -> Result<(), ApiError> {
    if (200..300).contains(&response.status) {
        Ok(())
    } else {
        Err(ApiError::from_status(response.status, &response.body))
    }
}

/// Moves requests over the wire. Only transport failures are errors here,
/// HTTP statuses are interpreted by [`ApiClient`].
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

pub struct ApiClient<T: Transport> {
    transport: T,
    bearer: Option<String>,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            bearer: None,
        }
    }

    pub fn with_bearer(mut self, token: Option<String>) -> Self {
        self.bearer = token;
        self
    }

    #[cfg(test)]
    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }

    async fn call(&self, method: Method, path: String, body: Option<String>) -> Result<ApiResponse, ApiError> {
        self.transport
            .send(ApiRequest {
                method,
                path,
                body,
                bearer: self.bearer.clone(),
            })
            .await
    }

    fn encode<B: Serialize>(body: &B) -> Result<String, ApiError> {
        serde_json::to_string(body).map_err(|err| ApiError::Decode(err.to_string()))
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let body = Self::encode(request)?;
        let response = self.call(Method::Post, "/auth/login".into(), Some(body)).await?;
        decode(&response)
    }

    pub async fn current_user(&self) -> Result<User, ApiError> {
        let response = self.call(Method::Get, "/users/me".into(), None).await?;
        decode::<UserEnvelope>(&response).map(|envelope| envelope.user)
    }

    pub async fn list_trips(&self) -> Result<Vec<Trip>, ApiError> {
        let response = self.call(Method::Get, "/trips".into(), None).await?;
        decode::<TripsEnvelope>(&response).map(|envelope| envelope.trips.unwrap_or_default())
    }

    pub async fn create_trip(&self, request: &CreateTripRequest) -> Result<Trip, ApiError> {
        let body = Self::encode(request)?;
        let response = self.call(Method::Post, "/trips".into(), Some(body)).await?;
        decode::<TripEnvelope>(&response).map(|envelope| envelope.trip)
    }

    pub async fn get_trip(&self, trip_id: i64) -> Result<Trip, ApiError> {
        let response = self.call(Method::Get, trip_path(trip_id), None).await?;
        decode::<TripEnvelope>(&response).map(|envelope| envelope.trip)
    }

    pub async fn start_trip(&self, trip_id: i64) -> Result<(), ApiError> {
        let response = self.call(Method::Put, format!("{}/start", trip_path(trip_id)), None).await?;
        expect_success(&response)
    }

    pub async fn end_trip(&self, trip_id: i64) -> Result<(), ApiError> {
        let response = self.call(Method::Put, format!("{}/end", trip_path(trip_id)), None).await?;
        expect_success(&response)
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        let response = self.call(Method::Post, "/auth/logout".into(), None).await?;
        expect_success(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{trip_json, FakeTransport};

    #[test]
    fn status_mapping() {
        assert_eq!(ApiError::from_status(401, ""), ApiError::Unauthorized);
        assert_eq!(ApiError::from_status(404, r#"{"error":"Trip not found"}"#), ApiError::NotFound);

        let err = ApiError::from_status(400, r#"{"error":"already started"}"#);
        assert_eq!(err.backend_message(), Some("already started"));
        assert_eq!(err.to_string(), "already started");

        let err = ApiError::from_status(500, "<html>oops</html>");
        assert_eq!(err.backend_message(), None);
        assert_eq!(err.message_or("Failed to start trip"), "Failed to start trip");
    }

    #[tokio::test]
    async fn null_trip_list_is_empty() {
        let transport = FakeTransport::new();
        transport.respond(Method::Get, "/trips", 200, r#"{"trips":null}"#);
        let client = ApiClient::new(transport);

        assert_eq!(client.list_trips().await.unwrap(), Vec::new());
    }

    #[tokio::test]
    async fn bearer_token_is_attached() {
        let transport = FakeTransport::new();
        transport.respond(Method::Get, "/trips/7", 200, &format!(r#"{{"trip":{}}}"#, trip_json(7, "active")));
        let client = ApiClient::new(transport).with_bearer(Some("abc".into()));

        let trip = client.get_trip(7).await.unwrap();
        assert_eq!(trip.id, 7);

        let requests = client.transport().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].bearer.as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn create_trip_sends_all_fields() {
        let transport = FakeTransport::new();
        transport.respond(Method::Post, "/trips", 201, &format!(r#"{{"trip":{}}}"#, trip_json(12, "created")));
        let client = ApiClient::new(transport);

        let request = CreateTripRequest {
            name: "Weekend".into(),
            description: "".into(),
            password: "hunter".into(),
        };
        let trip = client.create_trip(&request).await.unwrap();
        assert_eq!(trip.id, 12);

        let sent: serde_json::Value =
            serde_json::from_str(client.transport().requests()[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(sent["name"], "Weekend");
        assert_eq!(sent["description"], "");
        assert_eq!(sent["password"], "hunter");
    }

    #[tokio::test]
    async fn garbage_body_is_decode_error() {
        let transport = FakeTransport::new();
        transport.respond(Method::Get, "/users/me", 200, "not json");
        let client = ApiClient::new(transport);

        assert!(matches!(client.current_user().await, Err(ApiError::Decode(_))));
    }
}
