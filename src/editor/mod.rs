//! The automation editor: sole owner of every piece of flow state.
//!
//! Renderers drive it with user events (trigger edits, palette drags, connector
//! clicks, pointer moves) and measurements (connector rectangles, canvas size),
//! and read back state plus the derived connection curves. Operations that
//! change what the curves depend on request a recompute; the renderer runs it
//! once per frame through [`AutomationEditor::on_animation_frame`].

use crate::automation::{
    ActionKind, AutomationBlock, AutomationDraft, AutomationId, BlockId, Connection, Endpoint,
    IdGenerator, LogicKind, TriggerId, TriggerKind, TriggerKindInfo, Vocabulary,
};
use crate::blocks::{BlockPatch, BlockStore};
use crate::config::EditorConfig;
use crate::error::EditorError;
use crate::geometry::{ConnectionPath, ConnectorRegistry, FrameScheduler, Point, Rect, compute_curves};
use crate::graph::{ConnectionGraph, ConnectorOutcome};
use crate::palette::{DragSession, DropTarget, new_block};
use crate::session::{Session, ThemePreference};
use crate::store::AutomationStore;
use crate::triggers::TriggerList;
use crate::viewport::{Viewport, ViewportEvent};
use tracing::{debug, info};

mod context;

pub use context::EditorContext;

/// Result of a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub automation_id: AutomationId,
    /// Whether the user asked to activate the automation along with saving.
    pub activated: bool,
    /// Route the caller should navigate to.
    pub navigate_to: String,
}

pub struct AutomationEditor {
    context: EditorContext,
    config: EditorConfig,
    ids: IdGenerator,
    name: String,
    entry: TriggerList,
    exclusion: TriggerList,
    blocks: BlockStore,
    graph: ConnectionGraph,
    registry: ConnectorRegistry,
    scheduler: FrameScheduler,
    viewport: Viewport,
    drag: DragSession,
    curves: Vec<ConnectionPath>,
}

impl AutomationEditor {
    /// An empty editor for a new automation, or for `context.automation_id`.
    pub fn new(context: EditorContext, config: EditorConfig) -> Self {
        let draft = AutomationDraft::default();
        Self::from_draft(context, config, draft)
    }

    /// An editor restored from a saved draft.
    pub fn from_draft(context: EditorContext, config: EditorConfig, draft: AutomationDraft) -> Self {
        let mut ids = IdGenerator::new();
        ids.skip_past(
            draft
                .triggers
                .iter()
                .chain(&draft.exclusion_triggers)
                .map(|t| t.id.as_str())
                .chain(draft.blocks.iter().map(|b| b.id.as_str()))
                .chain(
                    draft
                        .logic_operators
                        .iter()
                        .chain(&draft.exclusion_operators)
                        .map(|op| op.id.as_str()),
                ),
        );

        let entry = TriggerList::from_parts(
            Vocabulary::Entry,
            draft.triggers,
            draft.logic_operators,
            &mut ids,
        );
        let exclusion = TriggerList::from_parts(
            Vocabulary::Exclusion,
            draft.exclusion_triggers,
            draft.exclusion_operators,
            &mut ids,
        );
        let blocks = BlockStore::from_blocks(draft.blocks);

        // Edges pointing at blocks that are not in the draft are dropped.
        let connections: Vec<Connection> = draft
            .connections
            .into_iter()
            .filter(|c| blocks.contains(&c.from) && blocks.contains(&c.to))
            .collect();
        let graph = ConnectionGraph::new(config.connection_kind.clone()).with_connections(connections);

        let mut scheduler = FrameScheduler::new();
        scheduler.request();

        Self {
            context,
            drag: DragSession::new(config.drag_activation_distance),
            config,
            ids,
            name: draft.name,
            entry,
            exclusion,
            blocks,
            graph,
            registry: ConnectorRegistry::default(),
            scheduler,
            viewport: Viewport::new(),
            curves: Vec::new(),
        }
    }

    /// Opens the automation named by `context.automation_id` from `store`, or a
    /// blank editor when there is no id or nothing stored under it.
    pub fn open(
        context: EditorContext,
        config: EditorConfig,
        store: &dyn AutomationStore,
    ) -> Result<Self, EditorError> {
        let draft = match context.automation_id.as_ref() {
            Some(id) => store.load(id)?,
            None => None,
        };
        Ok(match draft {
            Some(draft) => Self::from_draft(context, config, draft),
            None => Self::new(context, config),
        })
    }

    // --- Accessors ---

    pub fn context(&self) -> &EditorContext {
        &self.context
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn theme(&self) -> ThemePreference {
        self.context.theme()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn triggers(&self, vocabulary: Vocabulary) -> &TriggerList {
        match vocabulary {
            Vocabulary::Entry => &self.entry,
            Vocabulary::Exclusion => &self.exclusion,
        }
    }

    fn triggers_mut(&mut self, vocabulary: Vocabulary) -> &mut TriggerList {
        match vocabulary {
            Vocabulary::Entry => &mut self.entry,
            Vocabulary::Exclusion => &mut self.exclusion,
        }
    }

    pub fn blocks(&self) -> &[AutomationBlock] {
        self.blocks.blocks()
    }

    pub fn block(&self, id: &BlockId) -> Option<&AutomationBlock> {
        self.blocks.get(id)
    }

    pub fn connections(&self) -> &[Connection] {
        self.graph.connections()
    }

    pub fn pending_origin(&self) -> Option<&BlockId> {
        self.graph.pending_origin()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn registry(&self) -> &ConnectorRegistry {
        &self.registry
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    /// Curves from the most recent recompute.
    pub fn curves(&self) -> &[ConnectionPath] {
        &self.curves
    }

    // --- Triggers ---

    pub fn add_trigger(&mut self, vocabulary: Vocabulary) -> Option<TriggerId> {
        let (list, ids) = match vocabulary {
            Vocabulary::Entry => (&mut self.entry, &mut self.ids),
            Vocabulary::Exclusion => (&mut self.exclusion, &mut self.ids),
        };
        list.add_trigger(ids)
    }

    pub fn set_trigger_type(
        &mut self,
        vocabulary: Vocabulary,
        id: &TriggerId,
        kind: Option<TriggerKind>,
    ) -> Result<(), EditorError> {
        self.triggers_mut(vocabulary).set_trigger_type(id, kind)
    }

    pub fn remove_trigger(&mut self, vocabulary: Vocabulary, index: usize) -> Result<(), EditorError> {
        self.triggers_mut(vocabulary).remove_trigger(index).map(|_| ())
    }

    pub fn set_operator(
        &mut self,
        vocabulary: Vocabulary,
        index: usize,
        kind: LogicKind,
    ) -> Result<(), EditorError> {
        self.triggers_mut(vocabulary).set_operator(index, kind)
    }

    pub fn unused_kinds(
        &self,
        vocabulary: Vocabulary,
        trigger: &TriggerId,
    ) -> Vec<&'static TriggerKindInfo> {
        self.triggers(vocabulary).unused_kinds(trigger)
    }

    /// At least one entry trigger is configured. Gates the palette, drops and
    /// saving.
    pub fn has_valid_trigger(&self) -> bool {
        self.entry.has_valid_trigger()
    }

    // --- Palette ---

    /// Whether the actions palette and drop zones are shown.
    pub fn palette_enabled(&self) -> bool {
        self.has_valid_trigger()
    }

    /// Drop zones to render; none while no entry trigger is configured.
    pub fn drop_zones(&self) -> Vec<DropTarget> {
        if !self.palette_enabled() {
            return Vec::new();
        }
        crate::palette::drop_zones(self.blocks.blocks())
    }

    pub fn press_action(&mut self, kind: ActionKind, at: Point) {
        self.drag.press(kind, at);
    }

    pub fn pick_up_action(&mut self, kind: ActionKind) {
        self.drag.pick_up(kind);
    }

    pub fn drag_move(&mut self, to: Point) -> bool {
        self.drag.pointer_move(to)
    }

    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    /// The palette item being dragged, when the overlay should be drawn.
    pub fn active_drag(&self) -> Option<ActionKind> {
        self.drag.active().filter(|_| self.palette_enabled())
    }

    /// Ends the current drag over the drop zone `zone`.
    ///
    /// Returns the new block's id, or `None` if nothing was dragged or no entry
    /// trigger is configured (in which case the sequence is left untouched).
    pub fn drop_on(&mut self, zone: &str) -> Result<Option<BlockId>, EditorError> {
        let Some(kind) = self.drag.release() else {
            return Ok(None);
        };
        let target = DropTarget::parse(zone)?;
        self.drop_action(kind, &target)
    }

    /// Inserts the block for `kind` at `target` without a drag gesture.
    pub fn drop_action(
        &mut self,
        kind: ActionKind,
        target: &DropTarget,
    ) -> Result<Option<BlockId>, EditorError> {
        if !self.has_valid_trigger() {
            debug!(action = %kind, "drop ignored, no entry trigger configured");
            return Ok(None);
        }

        let index = match target {
            DropTarget::Entry => 0,
            DropTarget::Anchored { anchor, .. } => {
                self.blocks
                    .position(anchor)
                    .ok_or_else(|| EditorError::UnknownDropAnchor {
                        zone: target.zone_id(),
                        anchor: anchor.clone(),
                    })?
                    + 1
            }
        };

        let block = new_block(kind, self.ids.block_id(), &self.config.question_error_message);
        let id = block.id.clone();
        self.blocks.insert_at(index, block);
        info!(action = %kind, block = %id, index, "action dropped");
        self.scheduler.request();
        Ok(Some(id))
    }

    // --- Blocks ---

    pub fn update_block(&mut self, id: &BlockId, patch: BlockPatch) -> Result<(), EditorError> {
        self.blocks.update_block(id, patch)?;
        self.scheduler.request();
        Ok(())
    }

    /// Removes a block and every edge that starts or ends at it.
    pub fn delete_block(&mut self, id: &BlockId) -> Result<AutomationBlock, EditorError> {
        let removed = self.blocks.remove(id)?;
        let dropped_edges = self.graph.remove_block(id);
        self.registry.forget(id);
        info!(block = %id, dropped_edges, "block deleted");
        self.scheduler.request();
        Ok(removed)
    }

    pub fn duplicate_block(&mut self, id: &BlockId) -> Result<BlockId, EditorError> {
        let new_id = self.blocks.duplicate(id, &mut self.ids)?;
        self.scheduler.request();
        Ok(new_id)
    }

    // --- Connections ---

    pub fn connector_click(
        &mut self,
        block: &BlockId,
        endpoint: Endpoint,
    ) -> Result<ConnectorOutcome, EditorError> {
        if !self.blocks.contains(block) {
            return Err(EditorError::BlockNotFound(block.clone()));
        }
        let outcome = self.graph.connector_click(block, endpoint);
        if outcome.needs_recompute() {
            self.scheduler.request();
        }
        Ok(outcome)
    }

    /// Removes the edges from `from` to `to`, as confirmed by the user.
    pub fn delete_edge(&mut self, from: &BlockId, to: &BlockId) -> usize {
        let removed = self.graph.delete_edge(from, to);
        if removed > 0 {
            self.scheduler.request();
        }
        removed
    }

    // --- Measurement ---

    /// Records where a connector marker was laid out, in client coordinates.
    pub fn record_connector(&mut self, block: BlockId, endpoint: Endpoint, rect: Rect) {
        self.registry.record(block, endpoint, rect);
        self.scheduler.request();
    }

    /// The canvas was laid out or the window resized.
    pub fn resize_canvas(&mut self, canvas: Rect) {
        self.registry.set_canvas(canvas);
        self.scheduler.request();
    }

    // --- Viewport ---

    pub fn pointer_down(&mut self, pointer: Point, on_background: bool) -> ViewportEvent {
        self.viewport.pointer_down(pointer, on_background)
    }

    /// Pans the layout while a background drag is active. The recorded
    /// connectors move with it until the renderer measures them again.
    pub fn pointer_move(&mut self, pointer: Point) -> ViewportEvent {
        let event = self.viewport.pointer_move(pointer);
        if let ViewportEvent::Moved { delta, .. } = event {
            self.registry.shift_all(delta);
            self.scheduler.request();
        }
        event
    }

    pub fn pointer_up(&mut self) -> ViewportEvent {
        self.viewport.pointer_up()
    }

    pub fn pointer_leave(&mut self) -> ViewportEvent {
        self.viewport.pointer_leave()
    }

    // --- Geometry ---

    pub fn request_recompute(&mut self) {
        self.scheduler.request();
    }

    /// Called once per display refresh. Recomputes the curves if anything asked
    /// for it since the last frame and returns them; returns `None` otherwise.
    pub fn on_animation_frame(&mut self) -> Option<&[ConnectionPath]> {
        let registry = &self.registry;
        let connections = self.graph.connections();
        let offset = self.config.curve_offset;
        let curves = self
            .scheduler
            .on_frame(|| compute_curves(registry, connections, offset))?;
        self.curves = curves;
        Some(&self.curves)
    }

    /// Recomputes immediately, bypassing the frame scheduler.
    pub fn recompute_now(&mut self) -> &[ConnectionPath] {
        self.curves = compute_curves(
            &self.registry,
            self.graph.connections(),
            self.config.curve_offset,
        );
        &self.curves
    }

    // --- Save / navigation ---

    pub fn can_save(&self) -> bool {
        self.has_valid_trigger()
    }

    /// Snapshot of everything a save would send.
    pub fn to_draft(&self) -> AutomationDraft {
        AutomationDraft {
            name: self.name.clone(),
            triggers: self.entry.triggers().to_vec(),
            logic_operators: self.entry.operators().to_vec(),
            exclusion_triggers: self.exclusion.triggers().to_vec(),
            exclusion_operators: self.exclusion.operators().to_vec(),
            blocks: self.blocks.blocks().to_vec(),
            connections: self.graph.connections().to_vec(),
        }
    }

    /// Replaces the editor contents with `draft`, keeping context and config.
    pub fn load(&mut self, draft: AutomationDraft) {
        let context = self.context.clone();
        let config = self.config.clone();
        *self = Self::from_draft(context, config, draft);
    }

    /// Hands the draft to `store`, keyed by the current automation id, and
    /// returns where to navigate. The editor keeps the id it was stored under,
    /// so later saves update the same automation.
    pub fn save(
        &mut self,
        store: &mut dyn AutomationStore,
        activate: bool,
    ) -> Result<SaveOutcome, EditorError> {
        if !self.can_save() {
            return Err(EditorError::SaveBlocked(
                "at least one entry trigger must be selected".to_string(),
            ));
        }
        let draft = self.to_draft();
        let id = store.save(self.context.automation_id.as_ref(), &draft)?;
        info!(automation = %id, activate, blocks = draft.blocks.len(), "automation saved");
        self.context.automation_id = Some(id.clone());
        Ok(SaveOutcome {
            automation_id: id,
            activated: activate,
            navigate_to: self.back(),
        })
    }

    /// Route of the automation list the editor returns to.
    pub fn back(&self) -> String {
        format!(
            "/conta/{}/automation",
            self.context.account_id(&self.config.default_account)
        )
    }

    pub fn session(&self) -> Option<&Session> {
        self.context.session.as_ref()
    }
}
