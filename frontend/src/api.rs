use async_trait::async_trait;
use gloo_net::http::{Method as HttpMethod, Request, RequestBuilder};
use keepup_lib::{
    api::{ApiClient, ApiError, ApiRequest, ApiResponse, Method, Transport},
    storage::SessionStore,
};
use web_sys::RequestCredentials;

use crate::{storage::BrowserStore, CONFIG};

/// `fetch` based transport. Cookies always travel along, a bearer token only
/// when one is stored.
pub struct HttpTransport {
    base: String,
}

impl HttpTransport {
    pub fn new(base: &str) -> Self {
        Self { base: base.to_string() }
    }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let method = match request.method {
            Method::Get => HttpMethod::GET,
            Method::Post => HttpMethod::POST,
            Method::Put => HttpMethod::PUT,
        };

        let mut builder = RequestBuilder::new(&format!("{}{}", self.base, request.path))
            .method(method)
            .credentials(RequestCredentials::Include);

        if let Some(token) = &request.bearer {
            builder = builder.header("Authorization", &format!("Bearer {token}"));
        }

        let built: Result<Request, _> = match request.body {
            Some(body) => builder.header("Content-Type", "application/json").body(body),
            None => builder.build(),
        };
        let built = built.map_err(|err| ApiError::Network(err.to_string()))?;

        let response = built.send().await.map_err(|err| ApiError::Network(err.to_string()))?;
        let status = response.status();
        let body = response.text().await.map_err(|err| ApiError::Decode(err.to_string()))?;

        Ok(ApiResponse { status, body })
    }
}

/// Client for the configured backend, carrying the stored access token if any.
pub fn client() -> ApiClient<HttpTransport> {
    ApiClient::new(HttpTransport::new(&CONFIG.api_base)).with_bearer(BrowserStore.access_token())
}
