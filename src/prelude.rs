//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the flowdraft crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use flowdraft::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let config = EditorConfig::from_file("path/to/config.json")?;
//! let store = LocalStore::open("path/to/storage")?;
//! let context = EditorContext::for_automation("automation-1");
//! let editor = AutomationEditor::open(context, config, &store)?;
//!
//! println!("Editing '{}' with {} blocks", editor.name(), editor.blocks().len());
//! # Ok(())
//! # }
//! ```

// Editor
pub use crate::config::EditorConfig;
pub use crate::editor::{AutomationEditor, EditorContext, SaveOutcome};

// Data model
pub use crate::automation::{
    ActionKind, AutomationBlock, AutomationDraft, AutomationId, BlockId, BlockType, Connection,
    Endpoint, LogicKind, LogicOperator, OperatorId, QuestionOptions, ResponseKind, Trigger,
    TriggerId, TriggerKind, Vocabulary,
};

// Components
pub use crate::blocks::{BlockField, BlockPatch, OptionsPatch, visible_fields};
pub use crate::geometry::{ConnectionPath, CubicCurve, Point, Rect};
pub use crate::graph::ConnectorOutcome;
pub use crate::palette::DropTarget;
pub use crate::viewport::ViewportEvent;

// Session and storage
pub use crate::session::{MockAuthenticator, Session, ThemePreference, User};
pub use crate::store::{AutomationStore, LocalStore, MockStore};

// Error types
pub use crate::error::{ConfigError, EditorError, SessionError, StoreError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
