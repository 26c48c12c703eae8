use crate::collection::TrackCollection;
use crate::config::Config;
use crate::types::unit::UnitSystem;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    sessions: Arc<DashMap<String, Session>>,
}

struct Session {
    collection: TrackCollection,
    touched_at: Instant,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            sessions: Arc::new(DashMap::new()),
        }
    }

    pub fn create_session(&self, unit: UnitSystem) -> String {
        let session_id = Uuid::new_v4().to_string();
        self.sessions.insert(
            session_id.clone(),
            Session {
                collection: TrackCollection::new(unit),
                touched_at: Instant::now(),
            },
        );
        session_id
    }

    /// Runs `f` against the session's collection, or returns `None` for an
    /// unknown session. The shard lock is held only while `f` runs, so `f`
    /// must not await or parse.
    pub fn with_session<R>(
        &self,
        session_id: &str,
        f: impl FnOnce(&mut TrackCollection) -> R,
    ) -> Option<R> {
        self.sessions.get_mut(session_id).map(|mut entry| {
            entry.touched_at = Instant::now();
            f(&mut entry.collection)
        })
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn evict_expired(&self, ttl: Duration) {
        let now = Instant::now();
        self.sessions.retain(|_, session| {
            now.duration_since(session.touched_at) < ttl
        });
        tracing::info!("Session eviction complete. Current size: {}", self.sessions.len());
    }
}
