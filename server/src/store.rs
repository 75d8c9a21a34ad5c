use election::{Election, Reporter};
use tokio::sync::Mutex;
use sqlx::PgPool;
use tracing::info;

use crate::auth::HmacAuthenticator;

/// Forwards engine status lines to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, line: &str) {
        info!(target: "election::report", "{}", line);
    }
}

pub type ServerElection = Election<HmacAuthenticator, TracingReporter>;

/// The single election, behind an async lock so that one operation
/// (including its database write) finishes before the next starts.
pub type ElectionStore = Mutex<ServerElection>;

pub struct AppState {
    pub election: ElectionStore,
    pub db: Option<PgPool>,
}

impl AppState {
    pub fn new(election: ServerElection, db: Option<PgPool>) -> Self {
        Self {
            election: Mutex::new(election),
            db,
        }
    }
}
