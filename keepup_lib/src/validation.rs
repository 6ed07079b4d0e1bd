use thiserror::Error;

use crate::api::CreateTripRequest;

pub const NAME_MAX: usize = 100;
pub const DESCRIPTION_MAX: usize = 500;
pub const PASSWORD_MIN: usize = 4;
pub const PASSWORD_MAX: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Trip name is required")]
    NameMissing,
    #[error("Trip name must be at most 100 characters")]
    NameTooLong,
    #[error("Description must be at most 500 characters")]
    DescriptionTooLong,
    #[error("Trip password must be at least 4 characters")]
    PasswordTooShort,
    #[error("Trip password must be at most 50 characters")]
    PasswordTooLong,
}

/// Raw contents of the create trip form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripForm {
    pub name: String,
    pub description: String,
    pub password: String,
}

impl TripForm {
    pub fn description_counter(&self) -> String {
        format!("{}/{} characters", self.description.chars().count(), DESCRIPTION_MAX)
    }

    /// Mirrors the backend's binding rules so obviously bad input never leaves
    /// the browser. The backend still validates on its own.
    pub fn validate(&self) -> Result<CreateTripRequest, ValidationError> {
        let name_len = self.name.chars().count();
        if name_len == 0 {
            return Err(ValidationError::NameMissing);
        }
        if name_len > NAME_MAX {
            return Err(ValidationError::NameTooLong);
        }

        if self.description.chars().count() > DESCRIPTION_MAX {
            return Err(ValidationError::DescriptionTooLong);
        }

        let password_len = self.password.chars().count();
        if password_len < PASSWORD_MIN {
            return Err(ValidationError::PasswordTooShort);
        }
        if password_len > PASSWORD_MAX {
            return Err(ValidationError::PasswordTooLong);
        }

        Ok(CreateTripRequest {
            name: self.name.clone(),
            description: self.description.clone(),
            password: self.password.clone(),
        })
    }
}
