//! Subjects and bodies of the booking e-mails

use chrono::NaiveDate;

/// Recipient-independent content of one message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub subject: String,
    pub body: String,
}

pub fn booking_confirmed(provider_name: &str, date: NaiveDate) -> Notice {
    Notice {
        subject: "EcoConnect: Booking Confirmed".into(),
        body: format!(
            "Your booking with {} on {} is confirmed.",
            provider_name, date
        ),
    }
}

pub fn new_booking(date: NaiveDate, customer_username: &str) -> Notice {
    Notice {
        subject: "EcoConnect: New Booking".into(),
        body: format!(
            "You have a new booking on {} from {}.",
            date, customer_username
        ),
    }
}

pub fn booking_cancelled(provider_name: &str, date: NaiveDate) -> Notice {
    Notice {
        subject: "EcoConnect: Booking Cancelled".into(),
        body: format!(
            "Your booking with {} on {} has been cancelled.",
            provider_name, date
        ),
    }
}
