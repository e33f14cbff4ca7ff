use crate::automation::AutomationId;
use crate::session::{Session, ThemePreference};

/// What the surrounding application passes into an editor: which automation is
/// being edited (none for a new one) and who is editing it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorContext {
    pub automation_id: Option<AutomationId>,
    pub session: Option<Session>,
}

impl EditorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_automation(id: impl Into<AutomationId>) -> Self {
        Self {
            automation_id: Some(id.into()),
            session: None,
        }
    }

    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    pub fn is_new(&self) -> bool {
        self.automation_id.is_none()
    }

    /// The session's selected account, or `fallback`.
    pub fn account_id(&self, fallback: &str) -> String {
        self.session
            .as_ref()
            .and_then(|s| s.account_id.clone())
            .unwrap_or_else(|| fallback.to_string())
    }

    pub fn theme(&self) -> ThemePreference {
        self.session
            .as_ref()
            .map(|s| s.theme)
            .unwrap_or_default()
    }
}
