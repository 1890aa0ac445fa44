//! Transient status banner.

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use clap::ValueEnum;
use tracing::trace;

pub const DEFAULT_STATUS_TTL: Duration = Duration::from_millis(4000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

/// What a scheduled expiry does when newer messages were shown meanwhile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ClearPolicy {
    /// Every expiry hides the banner, even if it now shows a newer message.
    #[default]
    Unconditional,
    /// Only the expiry belonging to the message on screen hides it.
    LatestWins,
}

#[derive(Debug, Default)]
struct BannerState {
    message: Option<StatusMessage>,
    visible: bool,
    generation: u64,
}

/// Status line shared between the controller and its expiry timers.
///
/// `show` must be called from within a tokio runtime.
#[derive(Clone, Debug)]
pub struct StatusBanner {
    state: Arc<Mutex<BannerState>>,
    ttl: Duration,
    policy: ClearPolicy,
}

impl Default for StatusBanner {
    fn default() -> Self {
        Self::new(DEFAULT_STATUS_TTL, ClearPolicy::default())
    }
}

impl StatusBanner {
    pub fn new(ttl: Duration, policy: ClearPolicy) -> Self {
        Self {
            state: Arc::default(),
            ttl,
            policy,
        }
    }

    pub fn show(&self, text: impl Into<String>, kind: StatusKind) {
        let generation = {
            let mut state = lock(&self.state);
            state.generation += 1;
            state.message = Some(StatusMessage {
                text: text.into(),
                kind,
            });
            state.visible = true;
            state.generation
        };

        let state = Arc::clone(&self.state);
        let ttl = self.ttl;
        let policy = self.policy;
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            let mut state = lock(&state);
            let stale = policy == ClearPolicy::LatestWins && state.generation != generation;
            if !stale {
                trace!(generation, "status banner expired");
                state.visible = false;
            }
        });
    }

    /// The message on screen, if the banner is currently visible.
    pub fn current(&self) -> Option<StatusMessage> {
        let state = lock(&self.state);
        if state.visible {
            state.message.clone()
        } else {
            None
        }
    }

    pub fn is_visible(&self) -> bool {
        lock(&self.state).visible
    }
}

fn lock(state: &Mutex<BannerState>) -> MutexGuard<'_, BannerState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
