mod common;

use std::sync::Arc;

use ecoconnect::application::{BookingService, DeliveryMode, NotificationDispatcher};
use ecoconnect::domain::{DomainError, NewBooking};
use ecoconnect::infrastructure::InMemoryMailer;
use ecoconnect::shared::clock::FixedClock;

use common::setup;

#[tokio::test]
async fn customer_books_an_available_day() {
    let app = setup().await;
    let owner = app.user("owner").await;
    let alice = app.user("alice").await;
    let provider = app.provider_with_days(&owner, &[2]).await;

    let booking = app
        .ctx
        .bookings
        .create_booking(&alice, provider.id, app.day(2))
        .await
        .unwrap();

    assert_eq!(booking.customer_id, alice.user_id);
    assert_eq!(booking.provider_id, provider.id);
    assert_eq!(booking.booking_date, app.day(2));
}

#[tokio::test]
async fn second_customer_gets_already_booked() {
    let app = setup().await;
    let owner = app.user("owner").await;
    let alice = app.user("alice").await;
    let bob = app.user("bob").await;
    let provider = app.provider_with_days(&owner, &[2]).await;

    app.ctx
        .bookings
        .create_booking(&alice, provider.id, app.day(2))
        .await
        .unwrap();
    let err = app
        .ctx
        .bookings
        .create_booking(&bob, provider.id, app.day(2))
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::AlreadyBooked);
    assert_eq!(
        err.to_string(),
        "This date is already booked for the selected provider."
    );
}

#[tokio::test]
async fn day_without_availability_is_unavailable() {
    let app = setup().await;
    let owner = app.user("owner").await;
    let alice = app.user("alice").await;
    let provider = app.provider_with_days(&owner, &[2]).await;

    let err = app
        .ctx
        .bookings
        .create_booking(&alice, provider.id, app.day(4))
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::UnavailableDate);
}

#[tokio::test]
async fn past_day_is_rejected_before_anything_else() {
    let app = setup().await;
    let owner = app.user("owner").await;
    let alice = app.user("alice").await;
    let provider = app.provider_with_days(&owner, &[]).await;

    let err = app
        .ctx
        .bookings
        .create_booking(&alice, provider.id, app.day(-1))
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::PastDate);
}

#[tokio::test]
async fn booking_unknown_provider_is_not_found() {
    let app = setup().await;
    let alice = app.user("alice").await;

    let err = app
        .ctx
        .bookings
        .create_booking(&alice, 9999, app.day(1))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity: "Provider", .. }));
}

#[tokio::test]
async fn validate_booking_date_ignores_the_excluded_booking() {
    let app = setup().await;
    let owner = app.user("owner").await;
    let alice = app.user("alice").await;
    let provider = app.provider_with_days(&owner, &[3]).await;
    let booking = app
        .ctx
        .bookings
        .create_booking(&alice, provider.id, app.day(3))
        .await
        .unwrap();

    assert_eq!(
        app.ctx
            .bookings
            .validate_booking_date(provider.id, app.day(3), None)
            .await,
        Err(DomainError::AlreadyBooked)
    );
    assert_eq!(
        app.ctx
            .bookings
            .validate_booking_date(provider.id, app.day(3), Some(booking.id))
            .await,
        Ok(app.day(3))
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_bookings_for_one_slot_have_one_winner() {
    let app = setup().await;
    let owner = app.user("owner").await;
    let provider = app.provider_with_days(&owner, &[5]).await;

    let service = Arc::new(BookingService::new(
        app.ctx.repos.clone(),
        Arc::new(NotificationDispatcher::new(
            app.mailer.clone(),
            "noreply@ecoconnect.local",
            DeliveryMode::Inline,
        )),
        Arc::new(FixedClock(app.today)),
    ));

    let mut customers = Vec::new();
    for name in [
        "cust1", "cust2", "cust3", "cust4", "cust5", "cust6", "cust7", "cust8",
    ] {
        customers.push(app.user(name).await);
    }

    let (provider_id, date) = (provider.id, app.day(5));
    let mut handles = Vec::new();
    for customer in customers {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service.create_booking(&customer, provider_id, date).await
        }));
    }

    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.unwrap());
    }

    let wins = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(wins, 1, "results: {:?}", results);
    for err in results.into_iter().filter_map(Result::err) {
        assert_eq!(err, DomainError::AlreadyBooked);
    }
}

#[tokio::test]
async fn booking_notifies_customer_and_owner() {
    let app = setup().await;
    let owner = app.user("owner").await;
    let alice = app.user("alice").await;
    let provider = app.provider_with_days(&owner, &[2]).await;

    app.ctx
        .bookings
        .create_booking(&alice, provider.id, app.day(2))
        .await
        .unwrap();

    let to_alice = app.mailer.sent_to("alice@example.com");
    assert_eq!(to_alice.len(), 1);
    assert_eq!(to_alice[0].subject, "EcoConnect: Booking Confirmed");
    assert_eq!(
        to_alice[0].body,
        format!("Your booking with Test Provider on {} is confirmed.", app.day(2))
    );
    assert_eq!(to_alice[0].from, "noreply@ecoconnect.local");

    let to_owner = app.mailer.sent_to("owner@example.com");
    assert_eq!(to_owner.len(), 1);
    assert_eq!(to_owner[0].subject, "EcoConnect: New Booking");
    assert_eq!(
        to_owner[0].body,
        format!("You have a new booking on {} from alice.", app.day(2))
    );
}

#[tokio::test]
async fn failed_notification_keeps_the_booking() {
    let app = setup().await;
    let owner = app.user("owner").await;
    let alice = app.user("alice").await;
    let provider = app.provider_with_days(&owner, &[2]).await;
    app.mailer.set_failing(true);

    let booking = app
        .ctx
        .bookings
        .create_booking(&alice, provider.id, app.day(2))
        .await
        .unwrap();

    assert!(app.mailer.sent().is_empty());
    let stored = app.ctx.listing.list_user_bookings(&alice).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].booking.id, booking.id);
}

#[tokio::test]
async fn background_delivery_failure_keeps_the_booking() {
    let app = setup().await;
    let owner = app.user("owner").await;
    let alice = app.user("alice").await;
    let provider = app.provider_with_days(&owner, &[2]).await;

    let mailer = Arc::new(InMemoryMailer::failing());
    let notifier = Arc::new(NotificationDispatcher::new(
        mailer,
        "noreply@ecoconnect.local",
        DeliveryMode::Background,
    ));
    let service = BookingService::new(
        app.ctx.repos.clone(),
        notifier,
        Arc::new(FixedClock(app.today)),
    );

    let booking = service
        .create_booking(&alice, provider.id, app.day(2))
        .await
        .unwrap();
    assert!(app
        .ctx
        .repos
        .bookings()
        .find_by_id(booking.id)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn customer_cancels_own_booking() {
    let app = setup().await;
    let owner = app.user("owner").await;
    let alice = app.user("alice").await;
    let bob = app.user("bob").await;
    let provider = app.provider_with_days(&owner, &[2]).await;
    let booking = app
        .ctx
        .bookings
        .create_booking(&alice, provider.id, app.day(2))
        .await
        .unwrap();

    app.ctx.bookings.cancel_booking(&alice, booking.id).await.unwrap();

    let cancelled = app.mailer.sent_to("alice@example.com");
    assert_eq!(cancelled.last().unwrap().subject, "EcoConnect: Booking Cancelled");
    assert!(app.ctx.listing.list_user_bookings(&alice).await.unwrap().is_empty());

    // The freed slot can be booked again.
    app.ctx
        .bookings
        .create_booking(&bob, provider.id, app.day(2))
        .await
        .unwrap();
}

#[tokio::test]
async fn cancelling_someone_elses_booking_is_forbidden() {
    let app = setup().await;
    let owner = app.user("owner").await;
    let alice = app.user("alice").await;
    let bob = app.user("bob").await;
    let provider = app.provider_with_days(&owner, &[2]).await;
    let booking = app
        .ctx
        .bookings
        .create_booking(&alice, provider.id, app.day(2))
        .await
        .unwrap();

    let err = app.ctx.bookings.cancel_booking(&bob, booking.id).await.unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(_)));
    assert_eq!(app.ctx.listing.list_user_bookings(&alice).await.unwrap().len(), 1);
}

#[tokio::test]
async fn cancelling_missing_booking_is_not_found() {
    let app = setup().await;
    let alice = app.user("alice").await;

    let err = app.ctx.bookings.cancel_booking(&alice, 424242).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity: "Booking", .. }));
}

#[tokio::test]
async fn unique_index_rejects_a_second_booking_for_the_slot() {
    let app = setup().await;
    let owner = app.user("owner").await;
    let alice = app.user("alice").await;
    let bob = app.user("bob").await;
    let provider = app.provider_with_days(&owner, &[2]).await;
    let bookings = app.ctx.repos.bookings();

    let first = bookings
        .create(NewBooking {
            customer_id: alice.user_id.clone(),
            provider_id: provider.id,
            booking_date: app.day(2),
        })
        .await
        .unwrap();

    let err = bookings
        .create(NewBooking {
            customer_id: bob.user_id.clone(),
            provider_id: provider.id,
            booking_date: app.day(2),
        })
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::AlreadyBooked);

    let held = bookings.find_by_slot(provider.id, app.day(2)).await.unwrap();
    assert_eq!(held.map(|b| b.id), Some(first.id));
}

#[tokio::test]
async fn insert_without_availability_rolls_back() {
    let app = setup().await;
    let owner = app.user("owner").await;
    let alice = app.user("alice").await;
    let provider = app.provider_with_days(&owner, &[2]).await;
    let bookings = app.ctx.repos.bookings();

    let err = bookings
        .create(NewBooking {
            customer_id: alice.user_id.clone(),
            provider_id: provider.id,
            booking_date: app.day(4),
        })
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::UnavailableDate);

    assert!(bookings
        .find_by_slot(provider.id, app.day(4))
        .await
        .unwrap()
        .is_none());
    assert!(app.ctx.listing.list_user_bookings(&alice).await.unwrap().is_empty());
}
