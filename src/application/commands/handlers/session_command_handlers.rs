//! Session Command Handlers

use std::sync::Arc;

use crate::application::commands::session_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::{SessionManagerPort, StorySession};

/// CreateSession Handler
pub struct CreateSessionHandler {
    session_manager: Arc<dyn SessionManagerPort>,
}

impl CreateSessionHandler {
    pub fn new(session_manager: Arc<dyn SessionManagerPort>) -> Self {
        Self { session_manager }
    }

    pub async fn handle(
        &self,
        _cmd: CreateSessionCommand,
    ) -> Result<CreateSessionResponse, ApplicationError> {
        let session_id = self.session_manager.create(StorySession::new())?;
        Ok(CreateSessionResponse { session_id })
    }
}

/// CloseSession Handler
pub struct CloseSessionHandler {
    session_manager: Arc<dyn SessionManagerPort>,
}

impl CloseSessionHandler {
    pub fn new(session_manager: Arc<dyn SessionManagerPort>) -> Self {
        Self { session_manager }
    }

    pub async fn handle(&self, cmd: CloseSessionCommand) -> Result<(), ApplicationError> {
        self.session_manager.close(&cmd.session_id)?;
        Ok(())
    }
}
