//! Where saved automations go.
//!
//! There is no backend: [`MockStore`] keeps drafts in memory behind an
//! artificial delay, and [`LocalStore`] writes JSON files to a directory as the
//! device-local storage stand-in.

use crate::automation::{AutomationDraft, AutomationId};
use crate::error::StoreError;
use crate::session::Session;
use ahash::AHashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

const SESSION_KEY: &str = "megen_user";
const AUTOMATIONS_DIR: &str = "automations";
const ID_PREFIX: &str = "automation-";

/// A create-or-update sink for automation drafts.
pub trait AutomationStore {
    /// Creates the automation when `id` is `None`, otherwise replaces it.
    /// Returns the id the draft is stored under.
    fn save(
        &mut self,
        id: Option<&AutomationId>,
        draft: &AutomationDraft,
    ) -> Result<AutomationId, StoreError>;

    fn load(&self, id: &AutomationId) -> Result<Option<AutomationDraft>, StoreError>;
}

/// In-memory store that simulates network latency and never fails.
#[derive(Debug, Clone, Default)]
pub struct MockStore {
    drafts: AHashMap<AutomationId, AutomationDraft>,
    delay: Duration,
    next_id: u64,
}

impl MockStore {
    pub fn new(delay: Duration) -> Self {
        Self {
            drafts: AHashMap::new(),
            delay,
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    /// Next `automation-<n>` not already taken, including ids that were saved
    /// under an explicit key.
    fn fresh_id(&mut self) -> AutomationId {
        loop {
            let n = self.next_id.max(1);
            self.next_id = n.saturating_add(1);
            let candidate = AutomationId::new(format!("{}{}", ID_PREFIX, n));
            if !self.drafts.contains_key(&candidate) {
                return candidate;
            }
        }
    }
}

impl AutomationStore for MockStore {
    fn save(
        &mut self,
        id: Option<&AutomationId>,
        draft: &AutomationDraft,
    ) -> Result<AutomationId, StoreError> {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        let id = match id {
            Some(id) => id.clone(),
            None => self.fresh_id(),
        };
        debug!(automation = %id, name = %draft.name, "draft stored in memory");
        self.drafts.insert(id.clone(), draft.clone());
        Ok(id)
    }

    fn load(&self, id: &AutomationId) -> Result<Option<AutomationDraft>, StoreError> {
        Ok(self.drafts.get(id).cloned())
    }
}

/// Directory-backed JSON store for drafts and the current session.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Opens (creating if needed) a store rooted at `root`.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        let automations = root.join(AUTOMATIONS_DIR);
        fs::create_dir_all(&automations).map_err(|e| io_error(&automations, e))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn automation_path(&self, id: &AutomationId) -> Result<PathBuf, StoreError> {
        let key = id.as_str();
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self
            .root
            .join(AUTOMATIONS_DIR)
            .join(format!("{}.json", key)))
    }

    fn session_path(&self) -> PathBuf {
        self.root.join(format!("{}.json", SESSION_KEY))
    }

    /// Next free `automation-<n>` id, one past the highest stored.
    fn next_id(&self) -> Result<AutomationId, StoreError> {
        let dir = self.root.join(AUTOMATIONS_DIR);
        let entries = fs::read_dir(&dir).map_err(|e| io_error(&dir, e))?;
        let highest = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().into_string().ok()?;
                name.strip_suffix(".json")?
                    .strip_prefix(ID_PREFIX)?
                    .parse::<u64>()
                    .ok()
            })
            .max()
            .unwrap_or(0);
        Ok(AutomationId::new(format!("{}{}", ID_PREFIX, highest + 1)))
    }

    pub fn save_session(&self, session: &Session) -> Result<(), StoreError> {
        write_json(&self.session_path(), session)
    }

    pub fn load_session(&self) -> Result<Option<Session>, StoreError> {
        read_json(&self.session_path())
    }

    pub fn clear_session(&self) -> Result<(), StoreError> {
        let path = self.session_path();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(&path, e)),
        }
    }
}

impl AutomationStore for LocalStore {
    fn save(
        &mut self,
        id: Option<&AutomationId>,
        draft: &AutomationDraft,
    ) -> Result<AutomationId, StoreError> {
        let id = match id {
            Some(id) => id.clone(),
            None => self.next_id()?,
        };
        let path = self.automation_path(&id)?;
        write_json(&path, draft)?;
        info!(automation = %id, path = %path.display(), "draft written");
        Ok(id)
    }

    fn load(&self, id: &AutomationId) -> Result<Option<AutomationDraft>, StoreError> {
        read_json(&self.automation_path(id)?)
    }
}

fn io_error(path: &Path, e: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| StoreError::Json(e.to_string()))?;
    fs::write(path, json).map_err(|e| io_error(path, e))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(io_error(path, e)),
    };
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| StoreError::Json(e.to_string()))
}
