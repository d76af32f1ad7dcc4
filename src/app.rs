//! Wiring of repositories, adapters and services.
//!
//! [`AppContext`] owns everything a front end needs: the database
//! connection, the repository provider and one instance of each service.
//! The CLI builds one from [`AppConfig`]; tests build one from parts with
//! in-memory adapters and a fixed clock.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing::info_span;

use crate::application::{
    AccountService, BookingService, FileStore, ListingService, Mailer, NotificationDispatcher,
    ProviderService,
};
use crate::config::AppConfig;
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::PasswordHasher;
use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;
use crate::infrastructure::{init_and_migrate, init_database, LocalFileStore, LogMailer};
use crate::shared::clock::{Clock, SystemClock};
use crate::shared::errors::InfraError;

// ── Options ────────────────────────────────────────────────────────

pub struct AppOptions {
    pub config: AppConfig,
    /// Run database migrations on connect (default: true)
    pub auto_migrate: bool,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
        }
    }
}

// ── AppContext ─────────────────────────────────────────────────────

pub struct AppContext {
    pub config: AppConfig,
    pub db: DatabaseConnection,
    pub repos: Arc<dyn RepositoryProvider>,
    pub clock: Arc<dyn Clock>,
    pub hasher: PasswordHasher,
    pub accounts: AccountService,
    pub providers: ProviderService,
    pub bookings: BookingService,
    pub listing: ListingService,
}

impl AppContext {
    /// Connect to the configured database and use the log mailer, local
    /// file storage and the system clock.
    pub async fn start(options: AppOptions) -> Result<Self, InfraError> {
        let db_config = options.config.database.connection_config();
        let db = if options.auto_migrate {
            init_and_migrate(&db_config).await?
        } else {
            init_database(&db_config).await?
        };

        let files = Arc::new(LocalFileStore::new(options.config.media.root.clone()));
        Ok(Self::from_parts(
            options.config,
            db,
            Arc::new(LogMailer),
            files,
            Arc::new(SystemClock),
        ))
    }

    pub fn from_parts(
        config: AppConfig,
        db: DatabaseConnection,
        mailer: Arc<dyn Mailer>,
        files: Arc<dyn FileStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
        let hasher = PasswordHasher::new(config.security.bcrypt_cost);
        let notifier = Arc::new(NotificationDispatcher::new(
            mailer,
            config.mail.from_address.clone(),
            config.mail.delivery,
        ));

        let accounts =
            AccountService::new(repos.clone(), hasher).with_span(info_span!("accounts"));
        let providers = ProviderService::new(repos.clone(), files, clock.clone())
            .with_span(info_span!("providers"));
        let bookings = BookingService::new(repos.clone(), notifier, clock.clone())
            .with_span(info_span!("bookings"));
        let listing = ListingService::new(repos.clone())
            .with_page_sizes(
                config.listing.providers_page_size,
                config.listing.availability_page_size,
            )
            .with_span(info_span!("listing"));

        Self {
            config,
            db,
            repos,
            clock,
            hasher,
            accounts,
            providers,
            bookings,
            listing,
        }
    }
}
