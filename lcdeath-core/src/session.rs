//! Per-session engine ownership.
//!
//! Each session key maps to its own [`Engine`]; sessions never share
//! answers, history or position. The registry is a plain owned map, so
//! callers serving several threads wrap it in their own lock.

use crate::config::EngineConfig;
use crate::engine::Engine;
use crate::error::EngineError;
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

/// Identifier of an open session.
pub type SessionId = Uuid;

/// Open sessions keyed by [`SessionId`].
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<SessionId, Engine>,
    config: EngineConfig,
}

impl SessionRegistry {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            sessions: HashMap::new(),
            config,
        }
    }

    /// Open a session using the registry's engine configuration.
    pub fn open(&mut self) -> SessionId {
        self.insert(Engine::from_config(&self.config))
    }

    /// Take ownership of an existing engine as a new session.
    pub fn insert(&mut self, engine: Engine) -> SessionId {
        let id = Uuid::new_v4();
        debug!(session = %id, topology = %engine.topology(), "Session opened");
        self.sessions.insert(id, engine);
        id
    }

    pub fn get(&self, id: SessionId) -> Result<&Engine, EngineError> {
        self.sessions
            .get(&id)
            .ok_or(EngineError::UnknownSession { id })
    }

    pub fn get_mut(&mut self, id: SessionId) -> Result<&mut Engine, EngineError> {
        self.sessions
            .get_mut(&id)
            .ok_or(EngineError::UnknownSession { id })
    }

    pub fn close(&mut self, id: SessionId) -> Option<Engine> {
        let engine = self.sessions.remove(&id);
        if engine.is_some() {
            debug!(session = %id, "Session closed");
        }
        engine
    }

    pub fn ids(&self) -> impl Iterator<Item = SessionId> + '_ {
        self.sessions.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
