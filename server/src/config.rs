use election::{Election, Identity};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::{Build, Rocket};
use serde::Deserialize;
use sqlx::postgres::PgPoolOptions;
use tracing::{error, info, warn};

use crate::auth::HmacAuthenticator;
use crate::processor::ElectionProcessor;
use crate::store::{AppState, TracingReporter};

const MAX_DB_CONNECTIONS: u32 = 5;

/// Application configuration, read from `Rocket.toml` and `ROCKET_*`
/// environment variables.
#[derive(Deserialize)]
pub struct AppConfig {
    // secrets
    auth_secret: String,
    database_url: Option<String>,
    // policy
    admin_identity: Option<String>,
}

impl AppConfig {
    /// Key for signing and verifying identity tokens.
    pub fn auth_secret(&self) -> &[u8] {
        self.auth_secret.as_bytes()
    }

    /// Postgres connection string; `None` keeps the election in memory.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    /// Identity allowed to add candidates and reset. `None` leaves both open.
    pub fn admin_identity(&self) -> Option<&str> {
        self.admin_identity.as_deref()
    }
}

/// Loads the config, connects and migrates the database if one is
/// configured, restores the stored election and puts it in managed state.
pub struct ElectionFairing;

#[rocket::async_trait]
impl Fairing for ElectionFairing {
    fn info(&self) -> Info {
        Info {
            name: "Election",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, rocket: Rocket<Build>) -> rocket::fairing::Result {
        let config = match rocket.figment().extract::<AppConfig>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load application config: {}", e);
                return Err(rocket);
            }
        };

        if config.auth_secret.trim().is_empty() {
            error!("auth_secret must not be empty");
            return Err(rocket);
        }

        let mut election = Election::with_reporter(
            HmacAuthenticator::new(config.auth_secret()),
            TracingReporter,
        );

        match config.admin_identity().map(Identity::new) {
            Some(Ok(admin)) => {
                info!(%admin, "Candidate management restricted to administrator");
                election = election.with_admin(admin);
            }
            Some(Err(e)) => {
                error!("Invalid admin_identity: {}", e);
                return Err(rocket);
            }
            None => warn!("admin_identity not set - any caller may add candidates or reset"),
        }

        let db = match config.database_url() {
            Some(url) => {
                let pool = match PgPoolOptions::new()
                    .max_connections(MAX_DB_CONNECTIONS)
                    .connect(url)
                    .await
                {
                    Ok(pool) => pool,
                    Err(e) => {
                        error!("Failed to connect to database: {}", e);
                        return Err(rocket);
                    }
                };

                if let Err(e) = sqlx::migrate!("./migrations").run(&pool).await {
                    error!("Failed to run migrations: {}", e);
                    return Err(rocket);
                }
                info!("📋 Migrations complete");

                if let Err(e) = ElectionProcessor::load(&mut election, &pool).await {
                    error!("Failed to load stored election: {}", e);
                    return Err(rocket);
                }
                Some(pool)
            }
            None => {
                warn!("database_url not set - election state will not survive a restart");
                None
            }
        };

        Ok(rocket.manage(AppState::new(election, db)))
    }
}
