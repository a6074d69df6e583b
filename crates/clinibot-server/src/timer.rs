use std::sync::{Arc, Weak};
use std::time::Duration;

use jiff::Timestamp;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use uuid::Uuid;

use clinibot_core::workflow::{Event, WorkflowPolicy, transition};

use crate::state::{SessionEntry, SharedEntry};

/// Background task that flips a session's popup to `due` after a delay.
///
/// The task holds only a weak reference to its session, and is aborted when
/// this handle is dropped.
#[derive(Debug)]
pub struct PopupTimer {
    handle: JoinHandle<()>,
}

impl PopupTimer {
    pub fn schedule(
        session_id: Uuid,
        entry: &SharedEntry,
        delay: Duration,
        policy: WorkflowPolicy,
    ) -> Self {
        let weak: Weak<Mutex<SessionEntry>> = Arc::downgrade(entry);

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let Some(entry) = weak.upgrade() else {
                return;
            };
            let mut entry = entry.lock().await;

            match transition(
                &entry.session,
                Event::PopupElapsed {
                    now: Timestamp::now(),
                },
                &policy,
            ) {
                Ok(next) => {
                    if next.popup != entry.session.popup {
                        tracing::info!(session_id = %session_id, "registration popup due");
                    }
                    entry.session = next;
                }
                Err(e) => {
                    tracing::warn!(session_id = %session_id, error = %e, "popup timer ignored");
                }
            }
        });

        Self { handle }
    }
}

impl Drop for PopupTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
