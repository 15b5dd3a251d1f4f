//! Session Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::SessionManagerPort;
use crate::application::queries::GetSession;

/// 会话视图
#[derive(Debug, Clone)]
pub struct SessionView {
    pub session_id: String,
    pub story: Option<String>,
    /// 是否有尚未读取的语音输入（只读，不消费）
    pub has_voice_input: bool,
    pub created_at: String,
}

/// GetSession Handler
pub struct GetSessionHandler {
    session_manager: Arc<dyn SessionManagerPort>,
}

impl GetSessionHandler {
    pub fn new(session_manager: Arc<dyn SessionManagerPort>) -> Self {
        Self { session_manager }
    }

    pub async fn handle(&self, query: GetSession) -> Result<SessionView, ApplicationError> {
        let session = self.session_manager.get(&query.session_id)?;

        Ok(SessionView {
            session_id: session.id,
            story: session.story.map(|s| s.into_inner()),
            has_voice_input: session.voice_input.is_some(),
            created_at: session.created_at.to_rfc3339(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{StorySession, VoiceInput};
    use crate::domain::story::StoryText;
    use crate::infrastructure::memory::InMemorySessionManager;

    #[tokio::test]
    async fn test_view_does_not_consume_voice_input() {
        let manager = Arc::new(InMemorySessionManager::new());
        let session_id = manager.create(StorySession::new()).unwrap();
        manager
            .store_story(&session_id, StoryText::new("A quiet night.").unwrap())
            .unwrap();
        manager
            .post_voice_input(&session_id, VoiceInput::Transcript("owl".into()))
            .unwrap();

        let handler = GetSessionHandler::new(manager.clone());
        let query = GetSession {
            session_id: session_id.clone(),
        };

        let view = handler.handle(query.clone()).await.unwrap();
        assert_eq!(view.story.as_deref(), Some("A quiet night."));
        assert!(view.has_voice_input);

        // 再查一次仍然可见
        assert!(handler.handle(query).await.unwrap().has_voice_input);
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let handler = GetSessionHandler::new(Arc::new(InMemorySessionManager::new()));
        let result = handler
            .handle(GetSession {
                session_id: "missing".into(),
            })
            .await;
        assert!(matches!(result, Err(ApplicationError::NotFound { .. })));
    }
}
