use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Booking date must be in the future.")]
    PastDate,

    #[error("This provider is not available on that date.")]
    UnavailableDate,

    #[error("This date is already booked for the selected provider.")]
    AlreadyBooked,

    #[error("Already exists: {0}")]
    Duplicate(String),

    #[error("A user with this email already exists.")]
    DuplicateEmail,

    #[error("{field} must be at least {min} characters long.")]
    TooShort { field: &'static str, min: usize },

    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("File size cannot exceed 5MB.")]
    FileTooLarge,

    #[error("File extension '{0}' is not allowed. Allowed extensions are: pdf, png, jpg, jpeg.")]
    UnsupportedFileType(String),

    #[error("Validation: {0}")]
    Invalid(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, field: &'static str, value: impl ToString) -> Self {
        Self::NotFound {
            entity,
            field,
            value: value.to_string(),
        }
    }

    /// Whether the message is meant for the end user. Storage faults are
    /// logged and replaced with a generic message by the transport layer.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, DomainError::Storage(_))
    }
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Crypto error: {0}")]
    Crypto(#[from] bcrypt::BcryptError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}

/// Any failure a binary can surface
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Infra(#[from] InfraError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_user_readable() {
        assert_eq!(
            DomainError::TooShort { field: "Location", min: 2 }.to_string(),
            "Location must be at least 2 characters long."
        );
        assert_eq!(
            DomainError::not_found("Booking", "id", 7).to_string(),
            "Not found: Booking with id=7"
        );
    }

    #[test]
    fn storage_errors_are_not_user_facing() {
        assert!(!DomainError::Storage("disk I/O".into()).is_user_facing());
        assert!(DomainError::AlreadyBooked.is_user_facing());
        assert!(DomainError::PastDate.is_user_facing());
    }

    #[test]
    fn app_error_keeps_inner_message() {
        let err: AppError = DomainError::AlreadyBooked.into();
        assert_eq!(
            err.to_string(),
            "This date is already booked for the selected provider."
        );
        let err: AppError = InfraError::Config("bad toml".into()).into();
        assert_eq!(err.to_string(), "Config error: bad toml");
    }
}
