//! Trigger list editing.
//!
//! A [`TriggerList`] keeps an ordered sequence of triggers and the AND/OR
//! combinators sitting between each adjacent pair. Every mutating operation
//! keeps `operators.len() == max(0, triggers.len() - 1)`.
//!
//! The combinators are only stored, never evaluated.

use crate::automation::{
    IdGenerator, LogicKind, LogicOperator, Trigger, TriggerId, TriggerKind, TriggerKindInfo,
    Vocabulary,
};
use crate::error::EditorError;
use itertools::Itertools;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct TriggerList {
    vocabulary: Vocabulary,
    triggers: Vec<Trigger>,
    operators: Vec<LogicOperator>,
}

impl TriggerList {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self {
            vocabulary,
            triggers: Vec::new(),
            operators: Vec::new(),
        }
    }

    /// Rebuilds a list from saved parts, repairing the operator count if the
    /// saved data does not match it (missing operators default to `OR`).
    pub fn from_parts(
        vocabulary: Vocabulary,
        triggers: Vec<Trigger>,
        mut operators: Vec<LogicOperator>,
        ids: &mut IdGenerator,
    ) -> Self {
        let expected = triggers.len().saturating_sub(1);
        if operators.len() != expected {
            warn!(
                vocabulary = ?vocabulary,
                found = operators.len(),
                expected,
                "operator count mismatch in saved triggers, repairing"
            );
            operators.truncate(expected);
            while operators.len() < expected {
                operators.push(LogicOperator {
                    id: ids.operator_id(),
                    kind: LogicKind::default(),
                });
            }
        }
        Self {
            vocabulary,
            triggers,
            operators,
        }
    }

    pub fn vocabulary(&self) -> Vocabulary {
        self.vocabulary
    }

    pub fn triggers(&self) -> &[Trigger] {
        &self.triggers
    }

    pub fn operators(&self) -> &[LogicOperator] {
        &self.operators
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    /// Whether the "add trigger" affordance is offered.
    pub fn can_add(&self) -> bool {
        self.triggers.len() < self.vocabulary.kinds().len()
    }

    /// Appends an unset trigger, plus a default `OR` operator when it is not the
    /// first one. Returns the new trigger's id, or `None` once every kind of the
    /// vocabulary could already be in use.
    pub fn add_trigger(&mut self, ids: &mut IdGenerator) -> Option<TriggerId> {
        if !self.can_add() {
            debug!(vocabulary = ?self.vocabulary, "trigger list full, add ignored");
            return None;
        }

        let id = ids.trigger_id();
        if !self.triggers.is_empty() {
            self.operators.push(LogicOperator {
                id: ids.operator_id(),
                kind: LogicKind::Or,
            });
        }
        self.triggers.push(Trigger::unset(id.clone()));
        debug!(vocabulary = ?self.vocabulary, trigger = %id, "trigger added");
        Some(id)
    }

    /// Sets the kind of a trigger. Uniqueness is enforced by
    /// [`TriggerList::unused_kinds`], not here.
    pub fn set_trigger_type(
        &mut self,
        id: &TriggerId,
        kind: Option<TriggerKind>,
    ) -> Result<(), EditorError> {
        let trigger = self
            .triggers
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| EditorError::TriggerNotFound(id.clone()))?;
        trigger.kind = kind;
        Ok(())
    }

    /// Removes the trigger at `index` together with the operator to its left.
    /// When the first trigger is removed, the operator to its right goes instead.
    pub fn remove_trigger(&mut self, index: usize) -> Result<Trigger, EditorError> {
        if index >= self.triggers.len() {
            return Err(EditorError::TriggerIndexOutOfRange {
                index,
                len: self.triggers.len(),
            });
        }
        if !self.vocabulary.is_removable(index) {
            warn!(vocabulary = ?self.vocabulary, index, "refusing to remove anchored trigger");
            return Err(EditorError::TriggerNotRemovable(index));
        }

        let removed = self.triggers.remove(index);
        if index > 0 {
            self.operators.remove(index - 1);
        } else if !self.operators.is_empty() {
            self.operators.remove(0);
        }
        debug!(vocabulary = ?self.vocabulary, trigger = %removed.id, index, "trigger removed");
        Ok(removed)
    }

    /// Sets the combinator between `triggers[index]` and `triggers[index + 1]`.
    pub fn set_operator(&mut self, index: usize, kind: LogicKind) -> Result<(), EditorError> {
        let len = self.operators.len();
        let operator = self
            .operators
            .get_mut(index)
            .ok_or(EditorError::OperatorIndexOutOfRange { index, len })?;
        operator.kind = kind;
        Ok(())
    }

    /// The kinds selectable for `trigger_id`: every kind of the vocabulary that
    /// no *other* trigger of this list uses. The trigger's own kind is included.
    pub fn unused_kinds(&self, trigger_id: &TriggerId) -> Vec<&'static TriggerKindInfo> {
        let used: Vec<TriggerKind> = self
            .triggers
            .iter()
            .filter(|t| &t.id != trigger_id)
            .filter_map(|t| t.kind)
            .collect();

        self.vocabulary
            .kinds()
            .iter()
            .filter(|info| !used.contains(&info.kind))
            .collect()
    }

    /// At least one trigger has a kind selected.
    pub fn has_valid_trigger(&self) -> bool {
        self.triggers.iter().any(Trigger::is_set)
    }

    /// Flat rendering such as `Recebeu a Tag OR Clicou em um Link`. Unset
    /// triggers show as `?`. No precedence is implied.
    pub fn describe(&self) -> String {
        let labels = self.triggers.iter().map(|t| {
            t.kind
                .and_then(|kind| self.vocabulary.info(kind))
                .map(|info| info.label)
                .unwrap_or("?")
        });
        let symbols = self.operators.iter().map(|op| op.kind.symbol());

        labels.interleave(symbols).join(" ")
    }

    pub fn into_parts(self) -> (Vec<Trigger>, Vec<LogicOperator>) {
        (self.triggers, self.operators)
    }
}
