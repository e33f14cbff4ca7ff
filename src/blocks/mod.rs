//! The ordered block sequence of an automation.

use crate::automation::{
    AutomationBlock, BlockId, BlockType, IdGenerator, QuestionOptions, ResponseKind,
};
use crate::error::EditorError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A partial update of a block. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockPatch {
    #[serde(default, rename = "type")]
    pub block_type: Option<BlockType>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub options: Option<OptionsPatch>,
    #[serde(default)]
    pub responses: Option<Vec<String>>,
}

impl BlockPatch {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn options(options: OptionsPatch) -> Self {
        Self {
            options: Some(options),
            ..Self::default()
        }
    }
}

/// A partial update of question options, merged field by field onto the
/// existing options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsPatch {
    #[serde(default, rename = "type")]
    pub kind: Option<ResponseKind>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub min: Option<i64>,
    #[serde(default)]
    pub max: Option<i64>,
}

impl OptionsPatch {
    fn merge_into(self, options: &mut QuestionOptions) {
        if let Some(kind) = self.kind {
            options.kind = kind;
        }
        if let Some(message) = self.error_message {
            options.error_message = Some(message);
        }
        if let Some(min) = self.min {
            options.min = Some(min);
        }
        if let Some(max) = self.max {
            options.max = Some(max);
        }
    }
}

/// An editor field a block card shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockField {
    Content,
    ResponseKind,
    Min,
    Max,
    ErrorMessage,
}

/// Which fields a block card renders, selected by block type and, for
/// questions, by the response kind.
pub fn visible_fields(block: &AutomationBlock) -> Vec<BlockField> {
    match block.block_type {
        BlockType::Input | BlockType::Response => vec![BlockField::Content],
        BlockType::Question => {
            let mut fields = vec![BlockField::Content, BlockField::ResponseKind];
            let is_range = block
                .options
                .as_ref()
                .is_some_and(|o| o.kind == ResponseKind::Range);
            if is_range {
                fields.push(BlockField::Min);
                fields.push(BlockField::Max);
            }
            fields.push(BlockField::ErrorMessage);
            fields
        }
        BlockType::End => Vec::new(),
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockStore {
    blocks: Vec<AutomationBlock>,
}

impl BlockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_blocks(blocks: Vec<AutomationBlock>) -> Self {
        Self { blocks }
    }

    pub fn blocks(&self) -> &[AutomationBlock] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, id: &BlockId) -> Option<&AutomationBlock> {
        self.blocks.iter().find(|b| &b.id == id)
    }

    pub fn contains(&self, id: &BlockId) -> bool {
        self.position(id).is_some()
    }

    pub fn position(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| &b.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &BlockId> {
        self.blocks.iter().map(|b| &b.id)
    }

    /// Inserts `block` at `index`, clamped to the end of the sequence.
    pub fn insert_at(&mut self, index: usize, block: AutomationBlock) {
        let index = index.min(self.blocks.len());
        debug!(block = %block.id, index, "block inserted");
        self.blocks.insert(index, block);
    }

    /// Inserts `block` immediately after `anchor`.
    pub fn insert_after(
        &mut self,
        anchor: &BlockId,
        block: AutomationBlock,
    ) -> Result<usize, EditorError> {
        let index = self
            .position(anchor)
            .ok_or_else(|| EditorError::BlockNotFound(anchor.clone()))?
            + 1;
        self.insert_at(index, block);
        Ok(index)
    }

    /// Shallow-merges `patch` into the block; options are merged field by field
    /// so a partial options update keeps the other option fields.
    pub fn update_block(&mut self, id: &BlockId, patch: BlockPatch) -> Result<(), EditorError> {
        let block = self
            .blocks
            .iter_mut()
            .find(|b| &b.id == id)
            .ok_or_else(|| EditorError::BlockNotFound(id.clone()))?;

        if let Some(block_type) = patch.block_type {
            block.block_type = block_type;
        }
        if let Some(content) = patch.content {
            block.content = content;
        }
        if let Some(options) = patch.options {
            options.merge_into(block.options.get_or_insert_with(QuestionOptions::default));
        }
        if let Some(responses) = patch.responses {
            block.responses = Some(responses);
        }
        debug!(block = %id, "block updated");
        Ok(())
    }

    /// Removes the block from the sequence. Edge cleanup is the caller's job;
    /// see [`crate::editor::AutomationEditor::delete_block`].
    pub fn remove(&mut self, id: &BlockId) -> Result<AutomationBlock, EditorError> {
        let index = self
            .position(id)
            .ok_or_else(|| EditorError::BlockNotFound(id.clone()))?;
        let removed = self.blocks.remove(index);
        debug!(block = %id, index, "block removed");
        Ok(removed)
    }

    /// Inserts a copy of the block right after it, under a fresh id.
    pub fn duplicate(
        &mut self,
        id: &BlockId,
        ids: &mut IdGenerator,
    ) -> Result<BlockId, EditorError> {
        let index = self
            .position(id)
            .ok_or_else(|| EditorError::BlockNotFound(id.clone()))?;
        let mut copy = self.blocks[index].clone();
        copy.id = ids.block_id();
        let new_id = copy.id.clone();
        self.insert_at(index + 1, copy);
        Ok(new_id)
    }

    pub fn into_blocks(self) -> Vec<AutomationBlock> {
        self.blocks
    }
}
