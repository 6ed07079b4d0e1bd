use crate::{
    api::{ApiClient, ApiError, Transport},
    session::Redirect,
    trip::{StatusTier, Trip, TripStatus},
};

/// What a trip card on the dashboard shows.
#[derive(Debug, Clone, PartialEq)]
pub struct TripCard {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub status: TripStatus,
    pub tier: StatusTier,
    pub created: String,
}

impl From<&Trip> for TripCard {
    fn from(trip: &Trip) -> Self {
        Self {
            id: trip.id,
            name: trip.name.clone(),
            description: Some(trip.description.clone()).filter(|d| !d.is_empty()),
            status: trip.status,
            tier: trip.status.tier(),
            created: trip.created_date(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum TripListState {
    #[default]
    Loading,
    Empty,
    Populated(Vec<TripCard>),
}

/// Result of loading the trip list. `error` is the failure that was swallowed
/// into the empty state, kept so the caller can log it.
#[derive(Debug, Clone, PartialEq)]
pub struct TripListLoad {
    pub state: TripListState,
    pub error: Option<ApiError>,
    pub redirect: Option<Redirect>,
}

impl TripListLoad {
    pub fn from_result(result: Result<Vec<Trip>, ApiError>) -> Self {
        match result {
            Ok(trips) if trips.is_empty() => Self {
                state: TripListState::Empty,
                error: None,
                redirect: None,
            },
            Ok(trips) => Self {
                state: TripListState::Populated(trips.iter().map(TripCard::from).collect()),
                error: None,
                redirect: None,
            },
            // The session expired between the guard and this request
            Err(ApiError::Unauthorized) => Self {
                state: TripListState::Empty,
                error: Some(ApiError::Unauthorized),
                redirect: Some(Redirect::Login),
            },
            Err(err) => Self {
                state: TripListState::Empty,
                error: Some(err),
                redirect: None,
            },
        }
    }
}

pub async fn load_trips<T: Transport>(client: &ApiClient<T>) -> TripListLoad {
    TripListLoad::from_result(client.list_trips().await)
}
