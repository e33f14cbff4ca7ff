//! Tests for trigger list editing.
mod common;
use common::*;
use flowdraft::prelude::*;
use flowdraft::triggers::TriggerList;

fn assert_operator_invariant(list: &TriggerList) {
    assert_eq!(
        list.operators().len(),
        list.triggers().len().saturating_sub(1),
        "operators must sit exactly between adjacent triggers"
    );
}

#[test]
fn test_add_trigger_keeps_operator_count() {
    let mut ids = ids();
    let mut list = TriggerList::new(Vocabulary::Entry);
    assert_operator_invariant(&list);

    for expected in 1..=5 {
        assert!(list.add_trigger(&mut ids).is_some());
        assert_eq!(list.len(), expected);
        assert_operator_invariant(&list);
    }
    assert!(list.operators().iter().all(|op| op.kind == LogicKind::Or));
}

#[test]
fn test_add_trigger_refused_when_vocabulary_exhausted() {
    let mut ids = ids();
    let mut list = TriggerList::new(Vocabulary::Exclusion);
    for _ in 0..4 {
        assert!(list.add_trigger(&mut ids).is_some());
    }
    assert!(!list.can_add());
    assert!(list.add_trigger(&mut ids).is_none());
    assert_eq!(list.len(), 4);
    assert_operator_invariant(&list);
}

#[test]
fn test_mixed_add_remove_sequence_keeps_invariant() {
    let mut ids = ids();
    let mut list = TriggerList::new(Vocabulary::Exclusion);
    let script: &[Option<usize>] = &[None, None, None, Some(1), None, Some(0), Some(2), Some(0), None];
    for step in script {
        match step {
            None => {
                list.add_trigger(&mut ids);
            }
            Some(index) => {
                let _ = list.remove_trigger(*index);
            }
        }
        assert_operator_invariant(&list);
    }
}

#[test]
fn test_remove_trigger_shifts_operators_with_their_pairs() {
    let mut ids = ids();
    let mut list = TriggerList::new(Vocabulary::Entry);
    for _ in 0..4 {
        list.add_trigger(&mut ids);
    }
    // t0 AND t1 OR t2 AND t3
    list.set_operator(0, LogicKind::And).unwrap();
    list.set_operator(1, LogicKind::Or).unwrap();
    list.set_operator(2, LogicKind::And).unwrap();
    let t2 = list.triggers()[2].id.clone();
    let t3 = list.triggers()[3].id.clone();

    // Removing t1 drops the operator to its left (index 0).
    list.remove_trigger(1).unwrap();

    assert_operator_invariant(&list);
    let kinds: Vec<LogicKind> = list.operators().iter().map(|op| op.kind).collect();
    assert_eq!(kinds, vec![LogicKind::Or, LogicKind::And]);
    assert_eq!(list.triggers()[1].id, t2);
    assert_eq!(list.triggers()[2].id, t3);
}

#[test]
fn test_entry_first_trigger_is_anchored() {
    let mut ids = ids();
    let mut list = TriggerList::new(Vocabulary::Entry);
    list.add_trigger(&mut ids);

    assert_eq!(
        list.remove_trigger(0),
        Err(EditorError::TriggerNotRemovable(0))
    );
    assert_eq!(list.len(), 1);

    list.add_trigger(&mut ids);
    assert!(list.remove_trigger(0).is_err());
    assert!(list.remove_trigger(1).is_ok());
    assert_eq!(list.len(), 1);
    assert_operator_invariant(&list);
}

#[test]
fn test_exclusion_first_trigger_removal_drops_right_operator() {
    let mut ids = ids();
    let mut list = TriggerList::new(Vocabulary::Exclusion);
    for _ in 0..3 {
        list.add_trigger(&mut ids);
    }
    list.set_operator(0, LogicKind::And).unwrap();
    list.set_operator(1, LogicKind::Or).unwrap();

    list.remove_trigger(0).unwrap();
    assert_operator_invariant(&list);
    assert_eq!(list.operators()[0].kind, LogicKind::Or);

    list.remove_trigger(0).unwrap();
    list.remove_trigger(0).unwrap();
    assert!(list.is_empty());
    assert!(list.operators().is_empty());
}

#[test]
fn test_remove_out_of_range() {
    let mut ids = ids();
    let mut list = TriggerList::new(Vocabulary::Entry);
    list.add_trigger(&mut ids);
    assert_eq!(
        list.remove_trigger(3),
        Err(EditorError::TriggerIndexOutOfRange { index: 3, len: 1 })
    );
    assert_eq!(
        list.set_operator(0, LogicKind::And),
        Err(EditorError::OperatorIndexOutOfRange { index: 0, len: 0 })
    );
}

#[test]
fn test_set_trigger_type_does_not_touch_operators() {
    let mut ids = ids();
    let mut list = TriggerList::new(Vocabulary::Entry);
    let a = list.add_trigger(&mut ids).unwrap();
    list.add_trigger(&mut ids);
    let before = list.operators().to_vec();

    list.set_trigger_type(&a, Some(TriggerKind::Form)).unwrap();
    assert_eq!(list.operators(), before.as_slice());
    assert_eq!(list.triggers()[0].kind, Some(TriggerKind::Form));

    let missing = TriggerId::from("nope");
    assert_eq!(
        list.set_trigger_type(&missing, None),
        Err(EditorError::TriggerNotFound(missing.clone()))
    );
}

#[test]
fn test_unused_kinds_excludes_other_triggers_only() {
    let mut ids = ids();
    let mut list = TriggerList::new(Vocabulary::Entry);
    let a = list.add_trigger(&mut ids).unwrap();
    let b = list.add_trigger(&mut ids).unwrap();
    list.set_trigger_type(&a, Some(TriggerKind::Segment)).unwrap();
    list.set_trigger_type(&b, Some(TriggerKind::Link)).unwrap();

    let for_a: Vec<TriggerKind> = list.unused_kinds(&a).iter().map(|i| i.kind).collect();
    assert!(for_a.contains(&TriggerKind::Segment));
    assert!(!for_a.contains(&TriggerKind::Link));
    assert_eq!(for_a.len(), 4);

    let for_b: Vec<TriggerKind> = list.unused_kinds(&b).iter().map(|i| i.kind).collect();
    assert!(for_b.contains(&TriggerKind::Link));
    assert!(!for_b.contains(&TriggerKind::Segment));
}

#[test]
fn test_duplicate_kind_assignment_is_not_blocked() {
    let mut ids = ids();
    let mut list = TriggerList::new(Vocabulary::Entry);
    let a = list.add_trigger(&mut ids).unwrap();
    let b = list.add_trigger(&mut ids).unwrap();
    list.set_trigger_type(&a, Some(TriggerKind::Tag)).unwrap();
    assert!(list.set_trigger_type(&b, Some(TriggerKind::Tag)).is_ok());
}

#[test]
fn test_has_valid_trigger_and_describe() {
    let mut ids = ids();
    let mut list = TriggerList::new(Vocabulary::Entry);
    assert!(!list.has_valid_trigger());

    let a = list.add_trigger(&mut ids).unwrap();
    let _b = list.add_trigger(&mut ids).unwrap();
    assert!(!list.has_valid_trigger());
    assert_eq!(list.describe(), "? OR ?");

    list.set_trigger_type(&a, Some(TriggerKind::Tag)).unwrap();
    list.set_operator(0, LogicKind::And).unwrap();
    assert!(list.has_valid_trigger());
    assert_eq!(list.describe(), "Recebeu a Tag AND ?");
}

#[test]
fn test_from_parts_repairs_operator_count() {
    let mut ids = ids();
    let triggers = vec![
        Trigger::unset(TriggerId::from("1")),
        Trigger::unset(TriggerId::from("2")),
        Trigger::unset(TriggerId::from("3")),
    ];
    let list = TriggerList::from_parts(Vocabulary::Entry, triggers, Vec::new(), &mut ids);
    assert_operator_invariant(&list);
}

#[test]
fn test_operator_ids_are_typed_and_serialize_as_strings() {
    let mut ids = ids();
    let mut list = TriggerList::new(Vocabulary::Entry);
    list.add_trigger(&mut ids);
    list.add_trigger(&mut ids);

    let operator = &list.operators()[0];
    assert_eq!(operator.id, OperatorId::from("op-3"));
    assert!(operator.id.as_str().starts_with("op-"));

    let json = serde_json::to_value(operator).unwrap();
    assert_eq!(json["id"], "op-3");
    assert_eq!(json["type"], "OR");
}
