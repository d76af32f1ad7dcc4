//! Shared fixtures: a migrated SQLite file in a temp dir, in-memory
//! adapters and a fixed "today".

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use tempfile::TempDir;

use ecoconnect::application::DeliveryMode;
use ecoconnect::config::AppConfig;
use ecoconnect::domain::{Category, Principal, Provider, ProviderInput};
use ecoconnect::infrastructure::crypto::password::MIN_COST;
use ecoconnect::infrastructure::{init_and_migrate, DatabaseConfig, InMemoryFileStore, InMemoryMailer};
use ecoconnect::shared::clock::FixedClock;
use ecoconnect::AppContext;

pub struct TestApp {
    pub ctx: AppContext,
    pub mailer: Arc<InMemoryMailer>,
    pub files: Arc<InMemoryFileStore>,
    pub today: NaiveDate,
    _dir: TempDir,
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

pub async fn setup() -> TestApp {
    let dir = tempfile::tempdir().expect("temp dir");
    let db_path = dir.path().join("ecoconnect-test.db");
    let db_config = DatabaseConfig::sqlite(db_path.to_str().expect("utf-8 temp path"));
    let db = init_and_migrate(&db_config).await.expect("migrated database");

    let mut config = AppConfig::default();
    config.database.url = db_config.url.clone();
    config.mail.delivery = DeliveryMode::Inline;
    config.security.bcrypt_cost = MIN_COST;
    config.media.root = dir.path().join("media");

    let mailer = Arc::new(InMemoryMailer::new());
    let files = Arc::new(InMemoryFileStore::new());
    let ctx = AppContext::from_parts(
        config,
        db,
        mailer.clone(),
        files.clone(),
        Arc::new(FixedClock(today())),
    );

    TestApp {
        ctx,
        mailer,
        files,
        today: today(),
        _dir: dir,
    }
}

impl TestApp {
    pub fn day(&self, offset: i64) -> NaiveDate {
        self.today + Duration::days(offset)
    }

    pub async fn user(&self, username: &str) -> Principal {
        let user = self
            .ctx
            .accounts
            .register_user(username, &format!("{}@example.com", username), "testpass123")
            .await
            .expect("registered user");
        Principal::from(user)
    }

    pub async fn provider(
        &self,
        owner: &Principal,
        name: &str,
        category: Category,
        location: &str,
    ) -> Provider {
        self.ctx
            .providers
            .register_provider(
                owner,
                ProviderInput {
                    name: name.into(),
                    category: Some(category),
                    location: location.into(),
                    bio: "Test bio".into(),
                    price_note: "From $50".into(),
                },
            )
            .await
            .expect("registered provider")
    }

    /// Provider owned by a fresh user, with availability on the given days
    pub async fn provider_with_days(&self, owner: &Principal, offsets: &[i64]) -> Provider {
        let provider = self
            .provider(owner, "Test Provider", Category::Solar, "Test City")
            .await;
        for &offset in offsets {
            self.ctx
                .providers
                .add_availability(owner, provider.id, self.day(offset))
                .await
                .expect("availability");
        }
        provider
    }
}
