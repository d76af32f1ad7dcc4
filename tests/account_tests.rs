mod common;

use ecoconnect::application::AccountService;
use ecoconnect::domain::DomainError;

use common::setup;

#[tokio::test]
async fn registration_hashes_the_password() {
    let app = setup().await;
    let user = app
        .ctx
        .accounts
        .register_user(" newuser ", "newuser@test.com", "testpass123")
        .await
        .unwrap();

    assert_eq!(user.username, "newuser");
    assert_ne!(user.password_hash, "testpass123");
    assert!(app.ctx.hasher.verify("testpass123", &user.password_hash).unwrap());
}

#[tokio::test]
async fn email_and_username_must_be_unique() {
    let app = setup().await;
    app.ctx
        .accounts
        .register_user("first", "shared@test.com", "testpass123")
        .await
        .unwrap();

    let err = app
        .ctx
        .accounts
        .register_user("second", "shared@test.com", "testpass123")
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::DuplicateEmail);
    assert_eq!(err.to_string(), "A user with this email already exists.");
    assert_eq!(
        app.ctx.accounts.validate_unique_email("shared@test.com").await,
        Err(DomainError::DuplicateEmail)
    );

    let err = app
        .ctx
        .accounts
        .register_user("first", "other@test.com", "testpass123")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Duplicate(_)));
}

#[tokio::test]
async fn invalid_registration_input_is_rejected() {
    let app = setup().await;
    for (username, email, password) in [
        ("ab", "ab@test.com", "testpass123"),
        ("newuser", "not-an-email", "testpass123"),
        ("newuser", "newuser@test.com", "short"),
    ] {
        let err = app
            .ctx
            .accounts
            .register_user(username, email, password)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Invalid(_)), "{:?}", err);
    }
}

#[tokio::test]
async fn authenticate_yields_principal() {
    let app = setup().await;
    let alice = app.user("alice").await;

    let principal = app
        .ctx
        .accounts
        .authenticate("alice", "testpass123")
        .await
        .unwrap();
    assert_eq!(principal, alice);

    for (username, password) in [("alice", "wrongpass"), ("nobody", "testpass123")] {
        let err = app
            .ctx
            .accounts
            .authenticate(username, password)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
    }
}

#[tokio::test]
async fn change_password_requires_current_one() {
    let app = setup().await;
    let alice = app.user("alice").await;

    let err = app
        .ctx
        .accounts
        .change_password(&alice, "wrongpass", "newpass123")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Unauthorized(_)));

    app.ctx
        .accounts
        .change_password(&alice, "testpass123", "newpass123")
        .await
        .unwrap();
    assert!(app.ctx.accounts.authenticate("alice", "newpass123").await.is_ok());
    assert!(app.ctx.accounts.authenticate("alice", "testpass123").await.is_err());
}

#[tokio::test]
async fn account_service_runs_under_its_own_span() {
    let app = setup().await;
    let accounts = AccountService::new(app.ctx.repos.clone(), app.ctx.hasher)
        .with_span(tracing::info_span!("accounts", caller = "test"));

    let user = accounts
        .register_user("spanned", "spanned@test.com", "testpass123")
        .await
        .unwrap();
    let principal = accounts.authenticate("spanned", "testpass123").await.unwrap();
    assert_eq!(principal.user_id, user.id);

    let err = accounts
        .register_user("spanned", "other@test.com", "testpass123")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Duplicate(_)));
}
