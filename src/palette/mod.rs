//! Action palette drag-and-drop: what is being dragged, where it can land, and
//! the block a drop produces.

use crate::automation::{
    ActionKind, AutomationBlock, BlockId, BlockType, QuestionOptions, ResponseKind,
};
use crate::error::EditorError;
use crate::geometry::Point;
use tracing::trace;

const ZONE_PREFIX: &str = "dropzone-";
const ENTRY_ZONE: &str = "entry";
const AFTER_PREFIX: &str = "after-";

pub const DEFAULT_QUESTION_ERROR: &str = "Por favor, forneça uma resposta válida";

/// Minimum pointer travel before a press on a palette item becomes a drag.
pub const DEFAULT_ACTIVATION_DISTANCE: f64 = 8.0;

/// A place a palette item can be dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DropTarget {
    /// The zone under the entry triggers; inserts at the front.
    Entry,
    /// A zone attached to a block. Both the zone above a block (`after:
    /// false`) and the one below it insert right after the anchor.
    Anchored { anchor: BlockId, after: bool },
}

impl DropTarget {
    /// Parses `dropzone-entry`, `dropzone-<id>` or `dropzone-after-<id>`.
    pub fn parse(zone: &str) -> Result<Self, EditorError> {
        let rest = zone
            .strip_prefix(ZONE_PREFIX)
            .filter(|rest| !rest.is_empty())
            .ok_or_else(|| EditorError::MalformedDropZone(zone.to_string()))?;

        if rest == ENTRY_ZONE {
            return Ok(DropTarget::Entry);
        }
        match rest.strip_prefix(AFTER_PREFIX) {
            Some("") => Err(EditorError::MalformedDropZone(zone.to_string())),
            Some(anchor) => Ok(DropTarget::Anchored {
                anchor: BlockId::from(anchor),
                after: true,
            }),
            None => Ok(DropTarget::Anchored {
                anchor: BlockId::from(rest),
                after: false,
            }),
        }
    }

    pub fn zone_id(&self) -> String {
        match self {
            DropTarget::Entry => format!("{}{}", ZONE_PREFIX, ENTRY_ZONE),
            DropTarget::Anchored {
                anchor,
                after: true,
            } => format!("{}{}{}", ZONE_PREFIX, AFTER_PREFIX, anchor),
            DropTarget::Anchored {
                anchor,
                after: false,
            } => format!("{}{}", ZONE_PREFIX, anchor),
        }
    }
}

/// The drop zones a renderer shows for the given block order: the entry zone,
/// a zone above every block but the first, and a zone below every block.
pub fn drop_zones<'a>(blocks: impl IntoIterator<Item = &'a AutomationBlock>) -> Vec<DropTarget> {
    let mut zones = vec![DropTarget::Entry];
    for (index, block) in blocks.into_iter().enumerate() {
        if index > 0 {
            zones.push(DropTarget::Anchored {
                anchor: block.id.clone(),
                after: false,
            });
        }
        zones.push(DropTarget::Anchored {
            anchor: block.id.clone(),
            after: true,
        });
    }
    zones
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragState {
    Idle,
    Pressed { kind: ActionKind, at: Point },
    Dragging { kind: ActionKind },
}

/// Tracks the palette item under the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    state: DragState,
    activation_distance: f64,
}

impl Default for DragSession {
    fn default() -> Self {
        Self::new(DEFAULT_ACTIVATION_DISTANCE)
    }
}

impl DragSession {
    pub fn new(activation_distance: f64) -> Self {
        Self {
            state: DragState::Idle,
            activation_distance,
        }
    }

    /// Pointer pressed on a palette item. The drag only activates once the
    /// pointer travels the activation distance.
    pub fn press(&mut self, kind: ActionKind, at: Point) {
        self.state = DragState::Pressed { kind, at };
    }

    /// Starts dragging immediately, skipping the activation distance.
    pub fn pick_up(&mut self, kind: ActionKind) {
        trace!(action = %kind, "drag started");
        self.state = DragState::Dragging { kind };
    }

    /// Returns `true` when this move activated the drag.
    pub fn pointer_move(&mut self, to: Point) -> bool {
        if let DragState::Pressed { kind, at } = self.state {
            let delta = to - at;
            if delta.x.hypot(delta.y) >= self.activation_distance {
                self.pick_up(kind);
                return true;
            }
        }
        false
    }

    /// The item currently being dragged, for drawing the overlay.
    pub fn active(&self) -> Option<ActionKind> {
        match self.state {
            DragState::Dragging { kind } => Some(kind),
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// Ends the gesture, returning the dragged item if the drag was active.
    pub fn release(&mut self) -> Option<ActionKind> {
        let active = self.active();
        self.state = DragState::Idle;
        active
    }
}

/// Builds the block a dropped action produces. Question blocks start with text
/// answers, the given error message and one empty response slot.
pub fn new_block(kind: ActionKind, id: BlockId, question_error: &str) -> AutomationBlock {
    let block_type = kind.block_type();
    let mut block = AutomationBlock::new(id, block_type);
    if block_type == BlockType::Question {
        block.options = Some(QuestionOptions {
            kind: ResponseKind::Text,
            error_message: Some(question_error.to_string()),
            min: None,
            max: None,
        });
        block.responses = Some(vec![String::new()]);
    }
    block
}
