//! Demo data for local development
//!
//! Safe to run repeatedly: the account and provider are reused when they
//! exist and the calendar is rebuilt each time.

use chrono::{Duration, NaiveDate};
use tracing::info;

use crate::domain::{
    Category, CreateUserDto, DomainError, DomainResult, Provider, ProviderProfile,
    RepositoryProvider, User,
};
use crate::infrastructure::crypto::PasswordHasher;
use crate::shared::clock::Clock;

pub const DEMO_USERNAME: &str = "demo";
pub const DEMO_EMAIL: &str = "demo@example.com";
pub const DEMO_PASSWORD: &str = "demo1234";

/// Days after today that get an availability slot
const DEMO_DAY_OFFSETS: [i64; 5] = [1, 3, 5, 7, 9];

#[derive(Debug, Clone)]
pub struct SeedReport {
    pub user: User,
    pub user_created: bool,
    pub provider: Provider,
    pub provider_created: bool,
    pub dates: Vec<NaiveDate>,
}

fn demo_profile() -> ProviderProfile {
    ProviderProfile {
        name: "Eco Solar Co".into(),
        category: Category::Solar,
        location: "Windsor".into(),
        bio: "Solar installs and maintenance.".into(),
        price_note: "From $99 inspection".into(),
    }
}

pub async fn seed_demo_data(
    repos: &dyn RepositoryProvider,
    hasher: &PasswordHasher,
    clock: &dyn Clock,
) -> DomainResult<SeedReport> {
    let password_hash = hasher
        .hash(DEMO_PASSWORD)
        .map_err(|e| DomainError::Storage(format!("Failed to hash password: {}", e)))?;

    // An existing demo account gets its password reset.
    let (user, user_created) = match repos.users().get_user_by_username(DEMO_USERNAME).await? {
        Some(user) => {
            repos
                .users()
                .update_user_password(&user.id, &password_hash)
                .await?;
            (user, false)
        }
        None => {
            let user = repos
                .users()
                .create_user(CreateUserDto {
                    username: DEMO_USERNAME.into(),
                    email: DEMO_EMAIL.into(),
                    password_hash,
                })
                .await?;
            (user, true)
        }
    };

    let profile = demo_profile();
    let existing = repos
        .providers()
        .find_matching(&user.id, &profile.name, profile.category, &profile.location)
        .await?;
    let (provider, provider_created) = match existing {
        Some(p) => (p, false),
        None => (repos.providers().insert(&user.id, profile).await?, true),
    };

    let cleared = repos.availability().clear_for_provider(provider.id).await?;
    let today = clock.today();
    let mut dates = Vec::with_capacity(DEMO_DAY_OFFSETS.len());
    for offset in DEMO_DAY_OFFSETS {
        let slot = repos
            .availability()
            .insert(provider.id, today + Duration::days(offset))
            .await?;
        dates.push(slot.date);
    }

    info!(
        user_created,
        provider_created,
        provider_id = provider.id,
        cleared,
        added = dates.len(),
        "Demo data seeded"
    );
    Ok(SeedReport {
        user,
        user_created,
        provider,
        provider_created,
        dates,
    })
}
