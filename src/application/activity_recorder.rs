use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use tracing::{event, Level};

use crate::domain::{activity::ActivityAction, user::User};
use crate::ports::activity_log_repository::ActivityLogRepository;

/// Writes activity entries on behalf of services. A failed write never undoes
/// the mutation it describes; it is only reported.
#[derive(Clone)]
pub struct ActivityRecorder {
    log: Arc<dyn ActivityLogRepository>,
    clock: fn() -> NaiveDateTime,
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

impl ActivityRecorder {
    pub fn new(log: Arc<dyn ActivityLogRepository>) -> Self {
        Self {
            log,
            clock: local_now,
        }
    }

    pub fn with_clock(self, clock: fn() -> NaiveDateTime) -> Self {
        Self { clock, ..self }
    }

    pub fn now(&self) -> NaiveDateTime {
        (self.clock)()
    }

    pub async fn record(&self, actor: &User, action: ActivityAction, detail: String) {
        let result = self
            .log
            .append(actor.display_name(), action.clone(), &detail, self.now())
            .await;
        if let Err(report) = result {
            event!(
                Level::WARN,
                action = %action,
                detail = %detail,
                error = ?report,
                "Could not write activity entry"
            );
        }
    }
}
