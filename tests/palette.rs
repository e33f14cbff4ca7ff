//! Tests for palette drags and drop zones.
mod common;
use common::*;
use flowdraft::palette::{DEFAULT_QUESTION_ERROR, DragSession, drop_zones, new_block};
use flowdraft::prelude::*;

#[test]
fn test_drop_target_parse() {
    assert_eq!(DropTarget::parse("dropzone-entry").unwrap(), DropTarget::Entry);
    assert_eq!(
        DropTarget::parse("dropzone-42").unwrap(),
        DropTarget::Anchored {
            anchor: BlockId::from("42"),
            after: false
        }
    );
    assert_eq!(
        DropTarget::parse("dropzone-after-42").unwrap(),
        DropTarget::Anchored {
            anchor: BlockId::from("42"),
            after: true
        }
    );

    for bad in ["", "dropzone-", "zone-1", "dropzone-after-"] {
        assert!(
            matches!(DropTarget::parse(bad), Err(EditorError::MalformedDropZone(_))),
            "'{}' should be rejected",
            bad
        );
    }
}

#[test]
fn test_zone_id_is_parse_inverse() {
    for zone in ["dropzone-entry", "dropzone-7", "dropzone-after-7"] {
        assert_eq!(DropTarget::parse(zone).unwrap().zone_id(), zone);
    }
}

#[test]
fn test_drop_zones_layout() {
    let blocks = vec![
        AutomationBlock::new(BlockId::from("a"), BlockType::Input),
        AutomationBlock::new(BlockId::from("b"), BlockType::End),
    ];
    let zones: Vec<String> = drop_zones(&blocks).iter().map(DropTarget::zone_id).collect();
    assert_eq!(
        zones,
        vec![
            "dropzone-entry",
            "dropzone-after-a",
            "dropzone-b",
            "dropzone-after-b"
        ]
    );
}

#[test]
fn test_drag_activation_distance() {
    let mut drag = DragSession::new(8.0);
    drag.press(ActionKind::AskQuestion, Point::new(10.0, 10.0));
    assert_eq!(drag.active(), None);

    assert!(!drag.pointer_move(Point::new(13.0, 14.0)));
    assert_eq!(drag.active(), None);

    assert!(drag.pointer_move(Point::new(16.0, 18.0)));
    assert_eq!(drag.active(), Some(ActionKind::AskQuestion));

    assert_eq!(drag.release(), Some(ActionKind::AskQuestion));
    assert_eq!(drag.active(), None);
}

#[test]
fn test_released_press_without_drag_drops_nothing() {
    let mut drag = DragSession::default();
    drag.press(ActionKind::SendMessage, Point::ORIGIN);
    assert_eq!(drag.release(), None);
}

#[test]
fn test_new_question_block_defaults() {
    let block = new_block(
        ActionKind::AskQuestion,
        BlockId::from("1"),
        DEFAULT_QUESTION_ERROR,
    );
    assert_eq!(block.block_type, BlockType::Question);
    assert_eq!(block.content, "");
    let options = block.options.unwrap();
    assert_eq!(options.kind, ResponseKind::Text);
    assert_eq!(
        options.error_message.as_deref(),
        Some("Por favor, forneça uma resposta válida")
    );
    assert_eq!(block.responses, Some(vec![String::new()]));

    let message = new_block(ActionKind::SendMessage, BlockId::from("2"), DEFAULT_QUESTION_ERROR);
    assert_eq!(message.block_type, BlockType::Input);
    assert!(message.options.is_none());
    assert!(message.responses.is_none());

    assert_eq!(ActionKind::Conditional.block_type(), BlockType::Response);
    assert_eq!(ActionKind::EndFlow.block_type(), BlockType::End);
}

#[test]
fn test_drop_ignored_without_entry_trigger() {
    let mut editor = blank_editor();
    assert!(!editor.palette_enabled());
    assert!(editor.drop_zones().is_empty());

    editor.pick_up_action(ActionKind::SendMessage);
    assert_eq!(editor.active_drag(), None);
    assert_eq!(editor.drop_on("dropzone-entry").unwrap(), None);
    assert!(editor.blocks().is_empty());

    // An unset trigger is not enough.
    editor.add_trigger(Vocabulary::Entry).unwrap();
    assert_eq!(
        editor
            .drop_action(ActionKind::SendMessage, &DropTarget::Entry)
            .unwrap(),
        None
    );
    assert!(editor.blocks().is_empty());
}

#[test]
fn test_drop_without_pick_up_is_noop() {
    let (mut editor, ids) = editor_with_blocks(&[ActionKind::SendMessage]);
    assert_eq!(editor.drop_on("dropzone-entry").unwrap(), None);
    assert_eq!(editor.blocks().len(), 1);

    editor.press_action(ActionKind::EndFlow, Point::ORIGIN);
    editor.cancel_drag();
    assert_eq!(editor.drop_on(&format!("dropzone-after-{}", ids[0])).unwrap(), None);
    assert_eq!(editor.blocks().len(), 1);
}

#[test]
fn test_entry_drop_inserts_at_front() {
    let (mut editor, ids) = editor_with_blocks(&[ActionKind::SendMessage, ActionKind::EndFlow]);
    let new_id = editor
        .drop_action(ActionKind::AskQuestion, &DropTarget::Entry)
        .unwrap()
        .unwrap();
    let order: Vec<&BlockId> = editor.blocks().iter().map(|b| &b.id).collect();
    assert_eq!(order, vec![&new_id, &ids[0], &ids[1]]);
}

#[test]
fn test_anchored_drop_inserts_after_anchor() {
    let (mut editor, ids) = editor_with_blocks(&[
        ActionKind::SendMessage,
        ActionKind::AskQuestion,
        ActionKind::EndFlow,
    ]);
    let (a, x, b) = (&ids[0], &ids[1], &ids[2]);

    editor.pick_up_action(ActionKind::Conditional);
    let zone = format!("dropzone-after-{}", x);
    let after_x = editor.drop_on(&zone).unwrap().unwrap();

    editor.pick_up_action(ActionKind::SendMessage);
    let zone = format!("dropzone-{}", x);
    let also_after_x = editor.drop_on(&zone).unwrap().unwrap();

    let order: Vec<&BlockId> = editor.blocks().iter().map(|b| &b.id).collect();
    assert_eq!(order, vec![a, x, &also_after_x, &after_x, b]);
    assert_eq!(
        editor.block(&after_x).unwrap().block_type,
        BlockType::Response
    );
}

#[test]
fn test_drop_on_unknown_anchor_leaves_sequence() {
    let (mut editor, _) = editor_with_blocks(&[ActionKind::SendMessage]);
    let before = editor.blocks().to_vec();

    editor.pick_up_action(ActionKind::EndFlow);
    let result = editor.drop_on("dropzone-after-missing");
    assert_eq!(
        result,
        Err(EditorError::UnknownDropAnchor {
            zone: "dropzone-after-missing".to_string(),
            anchor: BlockId::from("missing"),
        })
    );
    assert_eq!(editor.blocks(), before.as_slice());
    assert_eq!(editor.active_drag(), None);
}

#[test]
fn test_drop_uses_configured_question_error() {
    let mut config = EditorConfig::instant();
    config.question_error_message = "Resposta inválida".to_string();
    let mut editor = AutomationEditor::new(EditorContext::new(), config);
    let trigger = editor.add_trigger(Vocabulary::Entry).unwrap();
    editor
        .set_trigger_type(Vocabulary::Entry, &trigger, Some(TriggerKind::Form))
        .unwrap();

    let id = editor
        .drop_action(ActionKind::AskQuestion, &DropTarget::Entry)
        .unwrap()
        .unwrap();
    let options = editor.block(&id).unwrap().options.clone().unwrap();
    assert_eq!(options.error_message.as_deref(), Some("Resposta inválida"));
}
