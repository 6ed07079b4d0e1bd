use crate::{
    api::{ApiClient, ApiError, Transport},
    session::Redirect,
    trip::Trip,
};

pub const START_FAILED: &str = "Failed to start trip. Please try again.";
pub const END_FAILED: &str = "Failed to end trip. Please try again.";
pub const END_CONFIRMATION: &str = "Are you sure you want to end this trip? This action cannot be undone.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripAction {
    Start,
    End,
}

impl TripAction {
    fn fallback_message(&self) -> &'static str {
        match self {
            TripAction::Start => START_FAILED,
            TripAction::End => END_FAILED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DetailState {
    #[default]
    Loading,
    Loaded(Trip),
    /// Shown briefly while the router takes us back to the dashboard.
    NotFound,
    /// The trip could exist, we just could not reach it. Retry is offered.
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Loaded(Trip),
    Redirect(Redirect),
    Unavailable(ApiError),
}

impl FetchOutcome {
    pub fn from_result(result: Result<Trip, ApiError>) -> Self {
        match result {
            Ok(trip) => FetchOutcome::Loaded(trip),
            Err(ApiError::NotFound) => FetchOutcome::Redirect(Redirect::Dashboard),
            Err(ApiError::Unauthorized) => FetchOutcome::Redirect(Redirect::Login),
            Err(err) => FetchOutcome::Unavailable(err),
        }
    }
}

pub async fn fetch_trip<T: Transport>(client: &ApiClient<T>, trip_id: i64) -> FetchOutcome {
    FetchOutcome::from_result(client.get_trip(trip_id).await)
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// The transition went through and the trip was fetched again.
    Refreshed(FetchOutcome),
    /// Message for a blocking alert.
    Failed(String, ApiError),
}

/// Requests a status transition and, when the backend accepts it, re-fetches
/// the trip so the view reflects whatever the backend recorded.
pub async fn run_action<T: Transport>(client: &ApiClient<T>, trip_id: i64, action: TripAction) -> ActionOutcome {
    let result = match action {
        TripAction::Start => client.start_trip(trip_id).await,
        TripAction::End => client.end_trip(trip_id).await,
    };

    match result {
        Ok(()) => ActionOutcome::Refreshed(fetch_trip(client, trip_id).await),
        Err(err) => ActionOutcome::Failed(err.message_or(action.fallback_message()), err),
    }
}

/// What the view has to do after a state change.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Effect {
    pub alert: Option<String>,
    pub redirect: Option<Redirect>,
    pub error: Option<ApiError>,
}

/// Detail view of one trip. Outcomes that were requested for another trip
/// (the route moved on while they were in flight) are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct TripDetail {
    pub trip_id: i64,
    pub state: DetailState,
    /// Action in flight. Suppresses any further action until it settles.
    pub busy: Option<TripAction>,
    pub menu_open: bool,
}

impl TripDetail {
    pub fn new(trip_id: i64) -> Self {
        Self {
            trip_id,
            state: DetailState::default(),
            busy: None,
            menu_open: false,
        }
    }

    pub fn trip(&self) -> Option<&Trip> {
        match &self.state {
            DetailState::Loaded(trip) => Some(trip),
            _ => None,
        }
    }

    pub fn shows_start(&self) -> bool {
        self.trip().is_some_and(Trip::can_start)
    }

    pub fn shows_end(&self) -> bool {
        self.trip().is_some_and(Trip::can_end)
    }

    pub fn apply_fetch(&mut self, trip_id: i64, outcome: FetchOutcome) -> Effect {
        if trip_id != self.trip_id {
            return Effect::default();
        }

        match outcome {
            FetchOutcome::Loaded(trip) => {
                self.state = DetailState::Loaded(trip);
                Effect::default()
            }
            FetchOutcome::Redirect(redirect) => {
                if redirect == Redirect::Dashboard {
                    self.state = DetailState::NotFound;
                }
                Effect {
                    redirect: Some(redirect),
                    ..Effect::default()
                }
            }
            FetchOutcome::Unavailable(err) => {
                self.state = DetailState::Unavailable(format!("Could not load trip: {err}"));
                Effect {
                    error: Some(err),
                    ..Effect::default()
                }
            }
        }
    }

    pub fn retry(&mut self) {
        self.state = DetailState::Loading;
    }

    /// Returns the trip to start, or `None` when starting is not allowed right now.
    pub fn begin_start(&mut self) -> Option<i64> {
        if self.busy.is_some() || !self.shows_start() {
            return None;
        }
        self.busy = Some(TripAction::Start);
        self.trip().map(|trip| trip.id)
    }

    /// Like [`Self::begin_start`], but the user has to confirm first. Declining
    /// leaves everything untouched.
    pub fn begin_end(&mut self, confirm: impl FnOnce(&str) -> bool) -> Option<i64> {
        if self.busy.is_some() || !self.shows_end() {
            return None;
        }
        if !confirm(END_CONFIRMATION) {
            return None;
        }
        self.busy = Some(TripAction::End);
        self.trip().map(|trip| trip.id)
    }

    pub fn finish(&mut self, trip_id: i64, outcome: ActionOutcome) -> Effect {
        if trip_id != self.trip_id {
            return Effect::default();
        }

        let action = self.busy.take();
        match outcome {
            ActionOutcome::Refreshed(fetch) => {
                if action == Some(TripAction::End) {
                    self.menu_open = false;
                }
                self.apply_fetch(trip_id, fetch)
            }
            ActionOutcome::Failed(message, err) => Effect {
                alert: Some(message),
                redirect: None,
                error: Some(err),
            },
        }
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::Method,
        testing::{trip_json, trip_with_status, FakeTransport},
        trip::TripStatus,
    };

    fn loaded(status: TripStatus) -> TripDetail {
        TripDetail {
            state: DetailState::Loaded(trip_with_status(5, status)),
            ..TripDetail::new(5)
        }
    }

    #[tokio::test]
    async fn not_found_redirects_to_dashboard() {
        let transport = FakeTransport::new();
        transport.respond(Method::Get, "/trips/5", 404, r#"{"error":"Trip not found"}"#);
        let client = ApiClient::new(transport);

        let mut detail = TripDetail::new(5);
        let effect = detail.apply_fetch(5, fetch_trip(&client, 5).await);

        assert_eq!(effect.redirect, Some(Redirect::Dashboard));
        assert_eq!(detail.state, DetailState::NotFound);
    }

    #[tokio::test]
    async fn transient_failure_is_not_treated_as_missing() {
        let client = ApiClient::new(FakeTransport::new());

        let mut detail = TripDetail::new(5);
        let effect = detail.apply_fetch(5, fetch_trip(&client, 5).await);

        assert_eq!(effect.redirect, None);
        assert!(matches!(effect.error, Some(ApiError::Network(_))));
        assert!(matches!(detail.state, DetailState::Unavailable(_)));
    }

    #[tokio::test]
    async fn unauthorized_fetch_goes_to_login() {
        let transport = FakeTransport::new();
        transport.respond(Method::Get, "/trips/5", 401, "");
        let client = ApiClient::new(transport);

        let mut detail = TripDetail::new(5);
        assert_eq!(detail.apply_fetch(5, fetch_trip(&client, 5).await).redirect, Some(Redirect::Login));
    }

    #[test]
    fn start_only_offered_for_created_trips() {
        assert!(loaded(TripStatus::Created).shows_start());
        for status in [TripStatus::Active, TripStatus::Ended, TripStatus::Unknown] {
            let mut detail = loaded(status);
            assert!(!detail.shows_start());
            assert_eq!(detail.begin_start(), None);
            assert_eq!(detail.busy, None);
        }
        assert_eq!(TripDetail::new(5).begin_start(), None);
    }

    #[test]
    fn busy_flag_suppresses_reentry() {
        let mut detail = loaded(TripStatus::Created);
        assert_eq!(detail.begin_start(), Some(5));
        assert_eq!(detail.begin_start(), None);
        assert_eq!(detail.busy, Some(TripAction::Start));
    }

    #[test]
    fn declined_confirmation_does_nothing() {
        let mut detail = loaded(TripStatus::Active);
        let mut asked = None;
        let started = detail.begin_end(|question| {
            asked = Some(question.to_string());
            false
        });

        assert_eq!(started, None);
        assert_eq!(detail.busy, None);
        assert_eq!(asked.as_deref(), Some(END_CONFIRMATION));
    }

    #[test]
    fn end_needs_active_trip() {
        let mut detail = loaded(TripStatus::Created);
        let mut asked = false;
        assert_eq!(
            detail.begin_end(|_| {
                asked = true;
                true
            }),
            None
        );
        assert!(!asked);
    }

    #[tokio::test]
    async fn start_refetches_on_success() {
        let transport = FakeTransport::new();
        transport.respond(Method::Put, "/trips/5/start", 200, r#"{"message":"Trip started successfully"}"#);
        transport.respond(Method::Get, "/trips/5", 200, &format!(r#"{{"trip":{}}}"#, trip_json(5, "active")));
        let client = ApiClient::new(transport);

        let mut detail = loaded(TripStatus::Created);
        let trip_id = detail.begin_start().unwrap();
        let effect = detail.finish(trip_id, run_action(&client, trip_id, TripAction::Start).await);

        assert_eq!(effect, Effect::default());
        assert_eq!(detail.busy, None);
        assert_eq!(detail.trip().unwrap().status, TripStatus::Active);
        assert!(detail.shows_end());
        assert_eq!(client.transport().paths(), vec!["/trips/5/start", "/trips/5"]);
    }

    #[tokio::test]
    async fn start_failure_alerts_backend_message() {
        let transport = FakeTransport::new();
        transport.respond(
            Method::Put,
            "/trips/5/start",
            400,
            r#"{"error":"trip not found, not authorized, or already started"}"#,
        );
        let client = ApiClient::new(transport);

        let mut detail = loaded(TripStatus::Created);
        let trip_id = detail.begin_start().unwrap();
        let effect = detail.finish(trip_id, run_action(&client, trip_id, TripAction::Start).await);

        assert_eq!(effect.alert.as_deref(), Some("trip not found, not authorized, or already started"));
        assert_eq!(detail.busy, None);
        assert_eq!(detail.trip().unwrap().status, TripStatus::Created);
    }

    #[tokio::test]
    async fn end_failure_falls_back_to_generic_alert() {
        let client = ApiClient::new(FakeTransport::new());

        let mut detail = loaded(TripStatus::Active);
        detail.menu_open = true;
        let trip_id = detail.begin_end(|_| true).unwrap();
        let effect = detail.finish(trip_id, run_action(&client, trip_id, TripAction::End).await);

        assert_eq!(effect.alert.as_deref(), Some(END_FAILED));
        assert!(detail.menu_open);
    }

    #[tokio::test]
    async fn end_success_closes_menu() {
        let transport = FakeTransport::new();
        transport.respond(Method::Put, "/trips/5/end", 200, "{}");
        transport.respond(Method::Get, "/trips/5", 200, &format!(r#"{{"trip":{}}}"#, trip_json(5, "ended")));
        let client = ApiClient::new(transport);

        let mut detail = loaded(TripStatus::Active);
        detail.toggle_menu();
        let trip_id = detail.begin_end(|_| true).unwrap();
        detail.finish(trip_id, run_action(&client, trip_id, TripAction::End).await);

        assert!(!detail.menu_open);
        assert!(!detail.shows_end());
        assert!(!detail.shows_start());
    }

    #[tokio::test]
    async fn fetch_for_previous_trip_is_ignored() {
        let transport = FakeTransport::new();
        transport.respond(Method::Get, "/trips/5", 200, &format!(r#"{{"trip":{}}}"#, trip_json(5, "created")));
        let client = ApiClient::new(transport);

        let mut detail = TripDetail::new(9);
        let effect = detail.apply_fetch(5, fetch_trip(&client, 5).await);

        assert_eq!(effect, Effect::default());
        assert_eq!(detail, TripDetail::new(9));
        assert_eq!(detail.begin_start(), None);
    }

    #[test]
    fn action_for_previous_trip_is_ignored() {
        let mut detail = TripDetail {
            state: DetailState::Loaded(trip_with_status(9, TripStatus::Created)),
            ..TripDetail::new(9)
        };
        assert_eq!(detail.begin_start(), Some(9));

        let stale = ActionOutcome::Refreshed(FetchOutcome::Loaded(trip_with_status(5, TripStatus::Active)));
        assert_eq!(detail.finish(5, stale), Effect::default());
        assert_eq!(detail.busy, Some(TripAction::Start));
        assert_eq!(detail.trip().unwrap().id, 9);

        let failed = ActionOutcome::Failed(START_FAILED.into(), ApiError::Network("offline".into()));
        assert_eq!(detail.finish(5, failed), Effect::default());
        assert_eq!(detail.busy, Some(TripAction::Start));
    }
}
