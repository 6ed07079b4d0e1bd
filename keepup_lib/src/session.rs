use thiserror::Error;

use crate::{
    api::{ApiClient, ApiError, LoginRequest, Transport},
    config::AuthMode,
    storage::SessionStore,
    user::User,
};

/// Where a view wants the router to go instead of rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    Login,
    Dashboard,
    Trip(i64),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("no stored access token")]
    NoCredential,
    #[error("session rejected: {0}")]
    Rejected(#[from] ApiError),
}

/// Guard in front of every protected view.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GuardState {
    #[default]
    Checking,
    /// Bearer sessions may not have a profile snapshot yet.
    Authenticated(Option<User>),
    /// Navigation to login is under way, render nothing.
    Redirecting,
}

impl GuardState {
    pub fn from_check(result: &Result<Option<User>, SessionError>) -> Self {
        match result {
            Ok(user) => GuardState::Authenticated(user.clone()),
            Err(_) => GuardState::Redirecting,
        }
    }

    pub fn redirect(&self) -> Option<Redirect> {
        match self {
            GuardState::Redirecting => Some(Redirect::Login),
            _ => None,
        }
    }
}

/// Works out whether the visitor is signed in.
///
/// Cookie sessions are verified against `/users/me` and the returned profile is
/// cached. Bearer sessions only require a stored access token, no request is
/// made; the cached profile is returned if there is one.
pub async fn check_session<T, S>(client: &ApiClient<T>, store: &S, mode: AuthMode) -> Result<Option<User>, SessionError>
where
    T: Transport,
    S: SessionStore,
{
    match mode {
        AuthMode::Cookie => {
            let user = client.current_user().await?;
            store.cache_user(&user);
            Ok(Some(user))
        }
        AuthMode::Bearer => {
            if store.access_token().is_none() {
                return Err(SessionError::NoCredential);
            }
            Ok(store.cached_user())
        }
    }
}

pub async fn login<T, S>(client: &ApiClient<T>, store: &S, request: &LoginRequest) -> Result<User, ApiError>
where
    T: Transport,
    S: SessionStore,
{
    let response = client.login(request).await?;
    store.cache_user(&response.user);
    if let Some(access_token) = &response.access_token {
        store.store_tokens(access_token, response.refresh_token.as_deref());
    }
    Ok(response.user)
}

/// Ends the server session and wipes every cached credential. Local state is
/// cleared even when the request fails; the error is handed back for logging.
pub async fn logout<T, S>(client: &ApiClient<T>, store: &S) -> Result<(), ApiError>
where
    T: Transport,
    S: SessionStore,
{
    let result = client.logout().await;
    store.clear_session();
    result
}
