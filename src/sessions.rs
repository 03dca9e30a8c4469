//! In-memory visitor sessions for the prediction flow.
//!
//! Key properties:
//! - Nothing is persisted; a restart forgets every visitor
//! - Sessions idle for at least the configured TTL are evicted on access
//! - The store is capped; the least recently active session goes first

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::flow::{transition, FlowError, FlowEvent, ViewState};
use crate::models::{FoodCategory, HealthForm, HealthProfile};

/// Upper bound on concurrently tracked visitors.
pub const MAX_SESSIONS: usize = 10_000;

// ═══════════════════════════════════════════════════════════
// FlowSession: one visitor
// ═══════════════════════════════════════════════════════════

struct FlowData {
    state: ViewState,
    profile: Option<HealthProfile>,
    form: HealthForm,
    generation: u64,
}

/// One visitor's prediction flow.
pub struct FlowSession {
    id: Uuid,
    created_at: DateTime<Utc>,
    data: tokio::sync::Mutex<FlowData>,
    last_active: Mutex<Instant>,
}

/// Point-in-time view of a session, as returned by the JSON API.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub created_at: String,
    pub generation: u64,
    pub caption: Option<&'static str>,
    pub profile: Option<HealthProfile>,
    pub view: ViewState,
}

impl FlowSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            data: tokio::sync::Mutex::new(FlowData {
                state: ViewState::Idle,
                profile: None,
                form: HealthForm::default(),
                generation: 0,
            }),
            last_active: Mutex::new(Instant::now()),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub async fn state(&self) -> ViewState {
        self.data.lock().await.state.clone()
    }

    pub async fn profile(&self) -> Option<HealthProfile> {
        self.data.lock().await.profile
    }

    /// Last form input, for re-rendering the form.
    pub async fn form(&self) -> HealthForm {
        self.data.lock().await.form.clone()
    }

    /// Remember raw form input without starting a submission (used when
    /// the input fails validation).
    pub async fn remember_form(&self, form: HealthForm) {
        self.data.lock().await.form = form;
    }

    pub async fn is_current(&self, generation: u64) -> bool {
        self.data.lock().await.generation == generation
    }

    /// Open a new generation for a prediction and enter `Submitting`.
    pub async fn begin_submission(&self, profile: HealthProfile) -> u64 {
        self.touch();
        let mut data = self.data.lock().await;
        data.generation += 1;
        data.profile = Some(profile);
        data.form = HealthForm::from(&profile);
        data.state = transition(&data.state, FlowEvent::Submit);
        data.generation
    }

    /// Open a new generation for a category fetch.
    ///
    /// Fails when no prediction exists yet.
    pub async fn begin_selection(
        &self,
        category: FoodCategory,
    ) -> Result<(u64, HealthProfile), FlowError> {
        self.touch();
        let mut data = self.data.lock().await;
        let profile = match (data.state.label(), data.profile) {
            (Some(_), Some(profile)) => profile,
            _ => return Err(FlowError::NoPrediction),
        };
        data.generation += 1;
        data.state = transition(&data.state, FlowEvent::SelectCategory(category));
        Ok((data.generation, profile))
    }

    /// Apply `event` if `generation` is still current.
    ///
    /// Returns false (and changes nothing) for a superseded generation.
    pub async fn apply(&self, generation: u64, event: FlowEvent) -> bool {
        let mut data = self.data.lock().await;
        if data.generation != generation {
            tracing::debug!(
                session = %self.id,
                stale = generation,
                current = data.generation,
                "Ignoring event from superseded request"
            );
            return false;
        }
        data.state = transition(&data.state, event);
        true
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let data = self.data.lock().await;
        SessionSnapshot {
            session_id: self.id,
            created_at: self.created_at.to_rfc3339(),
            generation: data.generation,
            caption: data.state.caption(),
            profile: data.profile,
            view: data.state.clone(),
        }
    }

    pub fn touch(&self) {
        if let Ok(mut last) = self.last_active.lock() {
            *last = Instant::now();
        }
    }

    fn idle_for(&self) -> Duration {
        self.last_active
            .lock()
            .map(|last| last.elapsed())
            .unwrap_or_default()
    }
}

impl Default for FlowSession {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════
// SessionStore: all visitors
// ═══════════════════════════════════════════════════════════

pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Arc<FlowSession>>>,
    ttl: Duration,
    capacity: usize,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self::with_capacity(ttl, MAX_SESSIONS)
    }

    pub fn with_capacity(ttl: Duration, capacity: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
            capacity: capacity.max(1),
        }
    }

    /// Start a new session.
    pub async fn create(&self) -> Arc<FlowSession> {
        self.evict_idle().await;

        let session = Arc::new(FlowSession::new());
        let mut sessions = self.sessions.write().await;
        while sessions.len() >= self.capacity {
            let oldest = sessions
                .values()
                .max_by_key(|s| s.idle_for())
                .map(|s| s.id());
            match oldest {
                Some(id) => {
                    sessions.remove(&id);
                    tracing::debug!(session = %id, "Session evicted (capacity)");
                }
                None => break,
            }
        }
        sessions.insert(session.id(), Arc::clone(&session));
        tracing::debug!(session = %session.id(), total = sessions.len(), "Session created");
        session
    }

    /// Look up a live session and mark it active.
    pub async fn get(&self, id: Uuid) -> Option<Arc<FlowSession>> {
        self.evict_idle().await;
        let session = self.sessions.read().await.get(&id).cloned()?;
        session.touch();
        Some(session)
    }

    /// Existing session for `id`, or a fresh one when absent or expired.
    pub async fn get_or_create(&self, id: Option<Uuid>) -> Arc<FlowSession> {
        if let Some(id) = id {
            if let Some(session) = self.get(id).await {
                return session;
            }
        }
        self.create().await
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    /// Drop sessions idle for at least the TTL. Returns how many went.
    pub async fn evict_idle(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.idle_for() < self.ttl);
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::info!(evicted, remaining = sessions.len(), "Idle sessions evicted");
        }
        evicted
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(Duration::from_secs(crate::config::DEFAULT_SESSION_TTL_SECS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RiskLabel;

    fn profile() -> HealthProfile {
        HealthProfile {
            age: 30.0,
            bmi: 24.0,
            glucose: 95.0,
            insulin: 12.0,
        }
    }

    #[tokio::test]
    async fn new_session_is_idle() {
        let session = FlowSession::new();
        assert_eq!(session.state().await, ViewState::Idle);
        assert!(session.profile().await.is_none());
        assert_eq!(session.snapshot().await.generation, 0);
    }

    #[tokio::test]
    async fn submission_bumps_generation_and_stores_profile() {
        let session = FlowSession::new();
        let first = session.begin_submission(profile()).await;
        let second = session.begin_submission(profile()).await;
        assert_eq!(second, first + 1);
        assert_eq!(session.profile().await, Some(profile()));
        assert_eq!(session.form().await.glucose, "95");
        assert!(!session.is_current(first).await);
        assert!(session.is_current(second).await);
    }

    #[tokio::test]
    async fn stale_generation_is_ignored() {
        let session = FlowSession::new();
        let old = session.begin_submission(profile()).await;
        let new = session.begin_submission(profile()).await;

        assert!(!session.apply(old, FlowEvent::PredictionSucceeded(RiskLabel::High)).await);
        assert_eq!(session.state().await, ViewState::Submitting { step: 0 });

        assert!(session.apply(new, FlowEvent::PredictionSucceeded(RiskLabel::Low)).await);
        assert_eq!(session.state().await.label(), Some(RiskLabel::Low));
    }

    #[tokio::test]
    async fn selection_requires_prediction() {
        let session = FlowSession::new();
        assert_eq!(
            session.begin_selection(FoodCategory::Fruit).await,
            Err(FlowError::NoPrediction)
        );

        let generation = session.begin_submission(profile()).await;
        assert_eq!(
            session.begin_selection(FoodCategory::Fruit).await,
            Err(FlowError::NoPrediction)
        );

        session
            .apply(generation, FlowEvent::PredictionSucceeded(RiskLabel::High))
            .await;
        let (next, used) = session.begin_selection(FoodCategory::Fruit).await.unwrap();
        assert_eq!(next, generation + 1);
        assert_eq!(used, profile());
        assert_eq!(session.state().await.category(), Some(FoodCategory::Fruit));
    }

    #[tokio::test]
    async fn snapshot_carries_caption_while_submitting() {
        let session = FlowSession::new();
        session.begin_submission(profile()).await;
        let snap = session.snapshot().await;
        assert_eq!(snap.caption, Some("Menganalisis data kesehatan..."));
        assert_eq!(snap.session_id, session.id());
    }

    #[tokio::test]
    async fn store_create_and_get() {
        let store = SessionStore::default();
        assert!(store.is_empty().await);
        let session = store.create().await;
        assert_eq!(store.len().await, 1);
        let found = store.get(session.id()).await.unwrap();
        assert_eq!(found.id(), session.id());
        assert!(store.get(Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn get_or_create_reuses_or_replaces() {
        let store = SessionStore::default();
        let session = store.create().await;
        let same = store.get_or_create(Some(session.id())).await;
        assert_eq!(same.id(), session.id());

        let fresh = store.get_or_create(Some(Uuid::new_v4())).await;
        assert_ne!(fresh.id(), session.id());
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn zero_ttl_evicts_everything_on_access() {
        let store = SessionStore::new(Duration::ZERO);
        let session = store.create().await;
        assert!(store.get(session.id()).await.is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn capacity_evicts_least_recently_active() {
        let store = SessionStore::with_capacity(Duration::from_secs(60), 2);
        let first = store.create().await;
        std::thread::sleep(Duration::from_millis(5));
        let second = store.create().await;
        std::thread::sleep(Duration::from_millis(5));
        let third = store.create().await;

        assert_eq!(store.len().await, 2);
        assert!(store.get(first.id()).await.is_none());
        assert!(store.get(second.id()).await.is_some());
        assert!(store.get(third.id()).await.is_some());
    }

    #[tokio::test]
    async fn remove_drops_session() {
        let store = SessionStore::default();
        let session = store.create().await;
        assert!(store.remove(session.id()).await);
        assert!(!store.remove(session.id()).await);
    }
}
