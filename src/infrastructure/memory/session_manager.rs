//! In-Memory Session Manager Implementation

use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;

use crate::application::ports::{SessionError, SessionManagerPort, StorySession, VoiceInput};
use crate::domain::story::StoryText;

/// 内存会话管理器
pub struct InMemorySessionManager {
    sessions: DashMap<String, StorySession>,
}

impl InMemorySessionManager {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl Default for InMemorySessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionManagerPort for InMemorySessionManager {
    fn create(&self, session: StorySession) -> Result<String, SessionError> {
        let session_id = session.id.clone();
        if self.sessions.contains_key(&session_id) {
            return Err(SessionError::AlreadyExists(session_id));
        }
        self.sessions.insert(session_id.clone(), session);
        tracing::info!(session_id = %session_id, "Session created");
        Ok(session_id)
    }

    fn get(&self, id: &str) -> Result<StorySession, SessionError> {
        self.sessions
            .get(id)
            .map(|s| s.clone())
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    fn is_valid(&self, id: &str) -> bool {
        self.sessions.contains_key(id)
    }

    fn store_story(&self, id: &str, story: StoryText) -> Result<(), SessionError> {
        let mut session = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        session.story = Some(story);
        session.last_activity = Utc::now();
        tracing::debug!(session_id = %id, "Session story replaced");
        Ok(())
    }

    fn post_voice_input(&self, id: &str, input: VoiceInput) -> Result<(), SessionError> {
        let mut session = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        if session.voice_input.is_some() {
            tracing::debug!(session_id = %id, "Unread voice input overwritten");
        }
        session.voice_input = Some(input);
        session.last_activity = Utc::now();
        Ok(())
    }

    fn take_voice_input(&self, id: &str) -> Result<Option<VoiceInput>, SessionError> {
        let mut session = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        session.last_activity = Utc::now();
        Ok(session.voice_input.take())
    }

    fn close(&self, id: &str) -> Result<(), SessionError> {
        self.sessions
            .remove(id)
            .map(|_| {
                tracing::info!(session_id = %id, "Session closed");
            })
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    fn get_expired_sessions(&self, idle_timeout_secs: u64) -> Vec<String> {
        let now = Utc::now();
        // 超出 chrono 可表示范围时按最大值处理，此时不会有会话过期
        let timeout = i64::try_from(idle_timeout_secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .unwrap_or(chrono::Duration::MAX);

        self.sessions
            .iter()
            .filter_map(|entry| {
                let elapsed = now - entry.last_activity;
                if elapsed > timeout {
                    Some(entry.key().clone())
                } else {
                    None
                }
            })
            .collect()
    }
}
