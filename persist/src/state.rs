use serde::{Deserialize, Serialize};

/// Per-session hook state persisted between invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookState {
    pub session_id: String,
    /// How many times the stop hook has re-injected the prompt.
    pub iteration: u32,
    /// Promise string whose appearance in output ends the loop.
    pub promise: Option<String>,
    /// Prompt to re-inject when the loop continues.
    pub prompt: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl HookState {
    pub fn new(session_id: &str) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            session_id: session_id.to_string(),
            iteration: 0,
            promise: None,
            prompt: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    pub fn bump_iteration(&mut self) {
        self.iteration += 1;
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}

/// Trait for hook state storage backends.
pub trait StateStore {
    fn save(&self, state: &HookState) -> Result<(), StateError>;
    fn load(&self, session_id: &str) -> Result<HookState, StateError>;
    fn list_sessions(&self) -> Result<Vec<String>, StateError>;
    fn delete(&self, session_id: &str) -> Result<(), StateError>;
}

/// JSON file-based state store, one file per session.
pub struct JsonFileStore {
    base_dir: std::path::PathBuf,
}

impl JsonFileStore {
    pub fn new(base_dir: std::path::PathBuf) -> Self {
        Self { base_dir }
    }

    /// Load the session's state, or fresh state when none is saved.
    pub fn load_or_new(&self, session_id: &str) -> HookState {
        self.load(session_id)
            .unwrap_or_else(|_| HookState::new(session_id))
    }

    fn state_path(&self, session_id: &str) -> std::path::PathBuf {
        self.base_dir.join(format!("{session_id}.json"))
    }
}

impl StateStore for JsonFileStore {
    fn save(&self, state: &HookState) -> Result<(), StateError> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| StateError::Io(e.to_string()))?;
        let json = serde_json::to_string_pretty(state)
            .map_err(|e| StateError::Serialization(e.to_string()))?;
        std::fs::write(self.state_path(&state.session_id), json)
            .map_err(|e| StateError::Io(e.to_string()))
    }

    fn load(&self, session_id: &str) -> Result<HookState, StateError> {
        let path = self.state_path(session_id);
        if !path.exists() {
            return Err(StateError::NotFound(session_id.to_string()));
        }
        let data = std::fs::read_to_string(&path).map_err(|e| StateError::Io(e.to_string()))?;
        serde_json::from_str(&data).map_err(|e| StateError::Serialization(e.to_string()))
    }

    fn list_sessions(&self) -> Result<Vec<String>, StateError> {
        if !self.base_dir.exists() {
            return Ok(Vec::new());
        }
        let mut ids = Vec::new();
        for entry in
            std::fs::read_dir(&self.base_dir).map_err(|e| StateError::Io(e.to_string()))?
        {
            let entry = entry.map_err(|e| StateError::Io(e.to_string()))?;
            if let Some(name) = entry.path().file_stem().and_then(|n| n.to_str()) {
                if entry.path().extension().and_then(|e| e.to_str()) == Some("json") {
                    ids.push(name.to_string());
                }
            }
        }
        Ok(ids)
    }

    fn delete(&self, session_id: &str) -> Result<(), StateError> {
        let path = self.state_path(session_id);
        if path.exists() {
            std::fs::remove_file(&path).map_err(|e| StateError::Io(e.to_string()))?;
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("io error: {0}")]
    Io(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("state not found: {0}")]
    NotFound(String),
}
