//! Admissibility rules for bookings, availability, providers and accounts.
//!
//! Every function here is pure: facts that live in storage (is the day
//! advertised, who holds the slot) and the current date are passed in.
//! Each returns the accepted, normalized value or the first failure.

use chrono::NaiveDate;
use validator::{Validate, ValidationErrors};

use super::provider::{
    CertificationUpload, ProviderInput, ProviderProfile, ALLOWED_CERTIFICATION_EXTENSIONS,
    MAX_CERTIFICATION_BYTES,
};
use super::{DomainError, DomainResult};

pub const MIN_PROFILE_TEXT_LEN: usize = 2;
pub const MAX_NAME_LEN: usize = 100;
pub const MAX_LOCATION_LEN: usize = 100;
pub const MAX_PRICE_NOTE_LEN: usize = 120;

/// What storage currently says about a (provider, date) slot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotState {
    /// An availability row exists for the slot
    pub available: bool,
    /// Id of the booking holding the slot, if any
    pub booked_by: Option<i32>,
}

/// Booking date rules, checked in order: not in the past, advertised by the
/// provider, not held by a booking other than `excluding_booking`.
pub fn check_booking_date(
    date: NaiveDate,
    today: NaiveDate,
    slot: &SlotState,
    excluding_booking: Option<i32>,
) -> DomainResult<NaiveDate> {
    if date < today {
        return Err(DomainError::PastDate);
    }
    if !slot.available {
        return Err(DomainError::UnavailableDate);
    }
    match slot.booked_by {
        Some(id) if Some(id) != excluding_booking => Err(DomainError::AlreadyBooked),
        _ => Ok(date),
    }
}

pub fn validate_availability_date(date: NaiveDate, today: NaiveDate) -> DomainResult<NaiveDate> {
    if date < today {
        return Err(DomainError::PastDate);
    }
    Ok(date)
}

/// Trim name and location; both need at least two characters.
pub fn validate_provider_profile(name: &str, location: &str) -> DomainResult<(String, String)> {
    let name = name.trim();
    if name.chars().count() < MIN_PROFILE_TEXT_LEN {
        return Err(DomainError::TooShort {
            field: "Provider name",
            min: MIN_PROFILE_TEXT_LEN,
        });
    }
    let location = location.trim();
    if location.chars().count() < MIN_PROFILE_TEXT_LEN {
        return Err(DomainError::TooShort {
            field: "Location",
            min: MIN_PROFILE_TEXT_LEN,
        });
    }
    Ok((name.to_string(), location.to_string()))
}

/// Full provider form: profile text rules plus category and column limits.
pub fn validate_provider_input(input: ProviderInput) -> DomainResult<ProviderProfile> {
    let (name, location) = validate_provider_profile(&input.name, &input.location)?;
    let category = input
        .category
        .ok_or_else(|| DomainError::Invalid("Please select a service type.".into()))?;

    check_max_len("Provider name", &name, MAX_NAME_LEN)?;
    check_max_len("Location", &location, MAX_LOCATION_LEN)?;
    let price_note = input.price_note.trim().to_string();
    check_max_len("Price note", &price_note, MAX_PRICE_NOTE_LEN)?;

    Ok(ProviderProfile {
        name,
        category,
        location,
        bio: input.bio.trim().to_string(),
        price_note,
    })
}

fn check_max_len(field: &str, value: &str, max: usize) -> DomainResult<()> {
    if value.chars().count() > max {
        return Err(DomainError::Invalid(format!(
            "{} must be at most {} characters long.",
            field, max
        )));
    }
    Ok(())
}

pub fn validate_certification(upload: &CertificationUpload) -> DomainResult<()> {
    let ext = upload.extension();
    if !ALLOWED_CERTIFICATION_EXTENSIONS.contains(&ext.as_str()) {
        return Err(DomainError::UnsupportedFileType(ext));
    }
    if upload.size > MAX_CERTIFICATION_BYTES {
        return Err(DomainError::FileTooLarge);
    }
    Ok(())
}

/// Sign-up form fields
#[derive(Debug, Clone, Validate)]
pub struct Registration {
    #[validate(
        length(min = 3, max = 150, message = "Username must be 3-150 characters"),
        custom(function = "username_chars")
    )]
    pub username: String,
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

fn username_chars(username: &str) -> Result<(), validator::ValidationError> {
    if username
        .chars()
        .all(|c| c.is_alphanumeric() || "@.+-_".contains(c))
    {
        Ok(())
    } else {
        let mut err = validator::ValidationError::new("username_chars");
        err.message =
            Some("Username may contain only letters, numbers, and @/./+/-/_ characters.".into());
        Err(err)
    }
}

impl Registration {
    pub fn new(username: &str, email: &str, password: &str) -> Self {
        Self {
            username: username.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        }
    }

    pub fn validated(self) -> DomainResult<Self> {
        self.validate().map_err(first_validation_error)?;
        Ok(self)
    }
}

fn first_validation_error(errors: ValidationErrors) -> DomainError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{}: {}", field, e.code))
            })
        })
        .collect();
    messages.sort();
    match messages.into_iter().next() {
        Some(msg) => DomainError::Invalid(msg),
        None => DomainError::Invalid("Validation failed".into()),
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::provider::Category;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    const OPEN: SlotState = SlotState {
        available: true,
        booked_by: None,
    };

    #[test]
    fn past_dates_are_rejected_whatever_the_slot_state() {
        let yesterday = today() - Duration::days(1);
        for slot in [
            OPEN,
            SlotState::default(),
            SlotState {
                available: true,
                booked_by: Some(3),
            },
        ] {
            assert_eq!(
                check_booking_date(yesterday, today(), &slot, None),
                Err(DomainError::PastDate)
            );
        }
    }

    #[test]
    fn today_is_bookable() {
        assert_eq!(check_booking_date(today(), today(), &OPEN, None), Ok(today()));
    }

    #[test]
    fn unadvertised_day_is_unavailable() {
        let date = today() + Duration::days(10);
        assert_eq!(
            check_booking_date(date, today(), &SlotState::default(), None),
            Err(DomainError::UnavailableDate)
        );
    }

    #[test]
    fn held_slot_is_already_booked_unless_excluded() {
        let date = today() + Duration::days(1);
        let slot = SlotState {
            available: true,
            booked_by: Some(42),
        };
        assert_eq!(
            check_booking_date(date, today(), &slot, None),
            Err(DomainError::AlreadyBooked)
        );
        assert_eq!(
            check_booking_date(date, today(), &slot, Some(41)),
            Err(DomainError::AlreadyBooked)
        );
        assert_eq!(check_booking_date(date, today(), &slot, Some(42)), Ok(date));
    }

    #[test]
    fn availability_date_rules() {
        assert_eq!(
            validate_availability_date(today() - Duration::days(1), today()),
            Err(DomainError::PastDate)
        );
        let tomorrow = today() + Duration::days(1);
        assert_eq!(validate_availability_date(tomorrow, today()), Ok(tomorrow));
    }

    #[test]
    fn profile_text_is_trimmed() {
        assert_eq!(
            validate_provider_profile("  Eco Solar  ", " Windsor "),
            Ok(("Eco Solar".to_string(), "Windsor".to_string()))
        );
    }

    #[test]
    fn profile_text_too_short() {
        assert_eq!(
            validate_provider_profile(" A ", "Windsor"),
            Err(DomainError::TooShort {
                field: "Provider name",
                min: 2
            })
        );
        assert_eq!(
            validate_provider_profile("Eco", " x"),
            Err(DomainError::TooShort {
                field: "Location",
                min: 2
            })
        );
    }

    #[test]
    fn provider_input_requires_category() {
        let input = ProviderInput {
            name: "New Provider".into(),
            category: None,
            location: "New City".into(),
            ..Default::default()
        };
        assert!(matches!(
            validate_provider_input(input),
            Err(DomainError::Invalid(_))
        ));
    }

    #[test]
    fn provider_input_enforces_price_note_limit() {
        let input = ProviderInput {
            name: "New Provider".into(),
            category: Some(Category::Solar),
            location: "New City".into(),
            bio: "Test bio".into(),
            price_note: "x".repeat(121),
        };
        assert!(matches!(
            validate_provider_input(input),
            Err(DomainError::Invalid(_))
        ));
    }

    #[test]
    fn provider_input_is_normalized() {
        let input = ProviderInput {
            name: " New Provider ".into(),
            category: Some(Category::Compost),
            location: "New City ".into(),
            bio: " Test bio\n".into(),
            price_note: " From $10 ".into(),
        };
        let profile = validate_provider_input(input).unwrap();
        assert_eq!(profile.name, "New Provider");
        assert_eq!(profile.location, "New City");
        assert_eq!(profile.bio, "Test bio");
        assert_eq!(profile.price_note, "From $10");
        assert_eq!(profile.category, Category::Compost);
    }

    #[test]
    fn certification_rules() {
        assert_eq!(
            validate_certification(&CertificationUpload::new("cert.pdf", MAX_CERTIFICATION_BYTES)),
            Ok(())
        );
        assert_eq!(
            validate_certification(&CertificationUpload::new(
                "cert.pdf",
                MAX_CERTIFICATION_BYTES + 1
            )),
            Err(DomainError::FileTooLarge)
        );
        assert_eq!(
            validate_certification(&CertificationUpload::new("cert.exe", 10)),
            Err(DomainError::UnsupportedFileType("exe".into()))
        );
        assert_eq!(
            validate_certification(&CertificationUpload::new("scan.JPG", 10)),
            Ok(())
        );
    }

    #[test]
    fn registration_rules() {
        assert!(Registration::new("newuser", "newuser@test.com", "testpass123")
            .validated()
            .is_ok());
        assert!(matches!(
            Registration::new("newuser", "not-an-email", "testpass123").validated(),
            Err(DomainError::Invalid(_))
        ));
        assert!(matches!(
            Registration::new("newuser", "newuser@test.com", "short").validated(),
            Err(DomainError::Invalid(_))
        ));
        assert!(matches!(
            Registration::new("bad user!", "newuser@test.com", "testpass123").validated(),
            Err(DomainError::Invalid(_))
        ));
    }
}
