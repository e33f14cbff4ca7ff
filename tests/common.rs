//! Common test utilities for building editors, drafts and layouts.
use flowdraft::automation::IdGenerator;
use flowdraft::prelude::*;

/// A blank editor with zero simulated latency.
#[allow(dead_code)]
pub fn blank_editor() -> AutomationEditor {
    AutomationEditor::new(EditorContext::new(), EditorConfig::instant())
}

/// An editor whose first entry trigger is set to `tag`, so drops are accepted.
#[allow(dead_code)]
pub fn editor_with_trigger() -> AutomationEditor {
    let mut editor = blank_editor();
    let id = editor.add_trigger(Vocabulary::Entry).unwrap();
    editor
        .set_trigger_type(Vocabulary::Entry, &id, Some(TriggerKind::Tag))
        .unwrap();
    editor
}

/// Drops `kinds` one after another, each after the previous block.
/// Returns the ids in sequence order.
#[allow(dead_code)]
pub fn editor_with_blocks(kinds: &[ActionKind]) -> (AutomationEditor, Vec<BlockId>) {
    let mut editor = editor_with_trigger();
    let mut ids: Vec<BlockId> = Vec::new();
    for kind in kinds {
        let target = match ids.last() {
            None => DropTarget::Entry,
            Some(last) => DropTarget::Anchored {
                anchor: last.clone(),
                after: true,
            },
        };
        let id = editor.drop_action(*kind, &target).unwrap().unwrap();
        ids.push(id);
    }
    (editor, ids)
}

/// Records both connectors of every block, one card per 400px column.
///
/// Input connector of block `i` is centered at `(400 * i, 112)`, output at
/// `(400 * i + 320, 112)`, with the canvas at the origin.
#[allow(dead_code)]
pub fn lay_out(editor: &mut AutomationEditor) {
    editor.resize_canvas(Rect::new(0.0, 0.0, 2000.0, 600.0));
    let ids: Vec<BlockId> = editor.blocks().iter().map(|b| b.id.clone()).collect();
    for (index, id) in ids.into_iter().enumerate() {
        let left = 400.0 * index as f64;
        editor.record_connector(
            id.clone(),
            Endpoint::Input,
            Rect::new(left - 12.0, 100.0, 24.0, 24.0),
        );
        editor.record_connector(
            id,
            Endpoint::Output,
            Rect::new(left + 320.0 - 12.0, 100.0, 24.0, 24.0),
        );
    }
}

/// A saved draft with two entry triggers, one exclusion trigger, three blocks
/// and two edges.
#[allow(dead_code)]
pub fn sample_draft_json() -> &'static str {
    r#"{
        "name": "Reengajamento",
        "triggers": [
            { "id": "10", "type": "tag" },
            { "id": "11", "type": "link" }
        ],
        "logicOperators": [ { "id": "op-12", "type": "AND" } ],
        "exclusionTriggers": [ { "id": "13", "type": "manual" } ],
        "exclusionOperators": [],
        "blocks": [
            { "id": "20", "type": "input", "content": "Oi!" },
            {
                "id": "21",
                "type": "question",
                "content": "Quantos quartos?",
                "options": { "type": "range", "errorMessage": "Número inválido", "min": 1, "max": 5 },
                "responses": [""]
            },
            { "id": "22", "type": "end", "content": "" }
        ],
        "connections": [
            { "from": "20", "to": "21", "tipo": "fluxo" },
            { "from": "21", "to": "22", "tipo": "fluxo" }
        ]
    }"#
}

#[allow(dead_code)]
pub fn ids() -> IdGenerator {
    IdGenerator::new()
}
