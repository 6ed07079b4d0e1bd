use crate::{
    api::{ApiClient, ApiError, CreateTripRequest, Transport},
    session::Redirect,
    validation::TripForm,
};

pub const CREATE_FAILED: &str = "Failed to create trip";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreateTrip {
    pub form: TripForm,
    pub submitting: bool,
    /// Shown inline above the form.
    pub error: Option<String>,
}

impl CreateTrip {
    /// Validates the form and marks it as submitting. Invalid input sets the
    /// inline error and nothing is sent.
    pub fn begin_submit(&mut self) -> Option<CreateTripRequest> {
        if self.submitting {
            return None;
        }
        self.error = None;

        match self.form.validate() {
            Ok(request) => {
                self.submitting = true;
                Some(request)
            }
            Err(err) => {
                self.error = Some(err.to_string());
                None
            }
        }
    }

    /// On success the caller navigates away, on failure the form stays as typed.
    pub fn finish(&mut self, result: Result<i64, ApiError>) -> Option<Redirect> {
        self.submitting = false;
        match result {
            Ok(trip_id) => Some(Redirect::Trip(trip_id)),
            Err(ApiError::Unauthorized) => Some(Redirect::Login),
            Err(err) => {
                self.error = Some(err.message_or(CREATE_FAILED));
                None
            }
        }
    }
}

pub async fn submit_trip<T: Transport>(client: &ApiClient<T>, request: &CreateTripRequest) -> Result<i64, ApiError> {
    client.create_trip(request).await.map(|trip| trip.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::Method,
        testing::{trip_json, FakeTransport},
    };

    fn filled(password: &str) -> CreateTrip {
        CreateTrip {
            form: TripForm {
                name: "Weekend Camping Trip".into(),
                description: "Mountains".into(),
                password: password.into(),
            },
            ..CreateTrip::default()
        }
    }

    #[test]
    fn short_password_rejected_before_request() {
        let mut create = filled("abc");
        assert_eq!(create.begin_submit(), None);
        assert!(!create.submitting);
        assert_eq!(create.error.as_deref(), Some("Trip password must be at least 4 characters"));
    }

    #[test]
    fn no_double_submit() {
        let mut create = filled("abcd");
        assert!(create.begin_submit().is_some());
        assert!(create.begin_submit().is_none());
    }

    #[tokio::test]
    async fn success_navigates_to_new_trip() {
        let transport = FakeTransport::new();
        transport.respond(Method::Post, "/trips", 201, &format!(r#"{{"trip":{}}}"#, trip_json(42, "created")));
        let client = ApiClient::new(transport);

        let mut create = filled("abcd");
        let request = create.begin_submit().unwrap();
        let redirect = create.finish(submit_trip(&client, &request).await);

        assert_eq!(redirect, Some(Redirect::Trip(42)));
        assert!(!create.submitting);
    }

    #[tokio::test]
    async fn failure_keeps_form_and_shows_backend_error() {
        let transport = FakeTransport::new();
        transport.respond(Method::Post, "/trips", 400, r#"{"error":"Invalid request format"}"#);
        let client = ApiClient::new(transport);

        let mut create = filled("abcd");
        let request = create.begin_submit().unwrap();
        let redirect = create.finish(submit_trip(&client, &request).await);

        assert_eq!(redirect, None);
        assert_eq!(create.error.as_deref(), Some("Invalid request format"));
        assert_eq!(create.form.name, "Weekend Camping Trip");
        assert_eq!(create.form.password, "abcd");
    }

    #[tokio::test]
    async fn failure_without_message_uses_fallback() {
        let client = ApiClient::new(FakeTransport::new());

        let mut create = filled("abcd");
        let request = create.begin_submit().unwrap();
        create.finish(submit_trip(&client, &request).await);

        assert_eq!(create.error.as_deref(), Some(CREATE_FAILED));
    }
}
