#![forbid(unsafe_code)]
use chrono::NaiveDate;
use substitute_planner::{
    AssignmentNotice, NoticeRenderer, Registry, RegistryError, Seed, SelectionError,
    SelectionSession, SubstitutionId, SubstitutionState, TeacherId, TextNotice,
};

#[test]
fn toggle_appends_then_removes() {
    let registry = demo_registry();
    let reference = registry.reference();
    let t2 = reference.teacher(&tid("2")).unwrap();
    let t5 = reference.teacher(&tid("5")).unwrap();
    let t4 = reference.teacher(&tid("4")).unwrap();

    let mut session = SelectionSession::new();
    session.open(&registry, &sid("1")).unwrap();
    assert!(session.toggle(t5));
    assert!(session.toggle(t2));
    assert!(session.toggle(t4));
    assert_eq!(session.selected(), &[tid("5"), tid("2"), tid("4")]);

    assert!(session.toggle(t2));
    assert_eq!(session.selected(), &[tid("5"), tid("4")]);
    assert!(!session.is_selected(&tid("2")));

    let names: Vec<&str> = session
        .selected_teachers(reference)
        .into_iter()
        .map(|t| t.name.as_str())
        .collect();
    assert_eq!(names, vec!["David Thompson", "Sarah Wilson"]);
}

#[test]
fn toggle_ignores_ineligible_teachers() {
    let registry = demo_registry();
    let reference = registry.reference();
    // remplacement "1" : original "1", éligibles "2", "4", "5", "6"
    let original = reference.teacher(&tid("1")).unwrap();
    let busy = reference.teacher(&tid("3")).unwrap();

    let mut session = SelectionSession::new();
    assert!(!session.toggle(reference.teacher(&tid("2")).unwrap()));
    assert!(session.selected().is_empty());

    session.open(&registry, &sid("1")).unwrap();
    assert!(!session.toggle(original));
    assert!(!session.toggle(busy));
    assert!(session.selected().is_empty());
}

#[test]
fn opening_another_slot_clears_selection() {
    let registry = demo_registry();
    let t2 = registry.reference().teacher(&tid("2")).unwrap();

    let mut session = SelectionSession::new();
    session.open(&registry, &sid("1")).unwrap();
    session.toggle(t2);

    // réouvrir le même créneau ne change rien
    session.open(&registry, &sid("1")).unwrap();
    assert_eq!(session.selected().len(), 1);

    session.open(&registry, &sid("3")).unwrap();
    assert!(session.selected().is_empty());
    assert_eq!(session.active(), Some(&sid("3")));

    assert!(matches!(
        session.open(&registry, &sid("nope")),
        Err(RegistryError::NotFound(_))
    ));
    assert_eq!(session.active(), Some(&sid("3")));

    session.toggle(t2);
    session.close();
    assert!(session.selected().is_empty());
    assert_eq!(session.active(), None);
}

#[test]
fn commit_assigns_then_clears() {
    let mut registry = demo_registry();
    let mut session = SelectionSession::new();
    session.open(&registry, &sid("1")).unwrap();
    for teacher in registry.eligible_for(&sid("1")).unwrap() {
        session.toggle(teacher);
    }
    assert_eq!(session.selected().len(), 4);

    session.commit(&mut registry, &sid("1"), &tid("4")).unwrap();
    assert!(session.selected().is_empty());
    assert_eq!(
        registry.state(&sid("1")).unwrap(),
        SubstitutionState::Assigned(tid("4"))
    );
}

#[test]
fn commit_requires_a_selected_teacher() {
    let mut registry = demo_registry();
    let t2 = registry.reference().teacher(&tid("2")).unwrap().clone();

    let mut session = SelectionSession::new();
    session.open(&registry, &sid("1")).unwrap();
    session.toggle(&t2);

    // "3" n'est pas disponible et n'a jamais été sélectionné
    let err = session.commit(&mut registry, &sid("1"), &tid("3")).unwrap_err();
    assert!(matches!(err, SelectionError::NotSelected(ref t) if t == &tid("3")));
    assert_eq!(registry.state(&sid("1")).unwrap(), SubstitutionState::Open);
    assert_eq!(session.selected(), &[tid("2")]);

    let err = session.commit(&mut registry, &sid("3"), &tid("2")).unwrap_err();
    assert!(matches!(err, SelectionError::WrongSlot { .. }));
    assert_eq!(registry.state(&sid("3")).unwrap(), SubstitutionState::Open);

    let mut closed = SelectionSession::new();
    let err = closed.commit(&mut registry, &sid("1"), &tid("2")).unwrap_err();
    assert!(matches!(err, SelectionError::NoActiveSlot));
    assert_eq!(registry.state(&sid("1")).unwrap(), SubstitutionState::Open);
}

#[test]
fn failed_commit_keeps_selection() {
    let mut registry = demo_registry();
    let t7 = registry.reference().teacher(&tid("7")).unwrap().clone();

    let mut session = SelectionSession::new();
    session.open(&registry, &sid("2")).unwrap();
    assert!(session.toggle(&t7));

    // "2" est déjà assigné à "4"
    let err = session.commit(&mut registry, &sid("2"), &tid("7")).unwrap_err();
    assert!(matches!(
        err,
        SelectionError::Registry(RegistryError::InvalidTransition { .. })
    ));
    assert_eq!(session.selected(), &[tid("7")]);

    session.release(&mut registry, &sid("2")).unwrap();
    assert!(session.selected().is_empty());
    session.toggle(&t7);
    session.commit(&mut registry, &sid("2"), &tid("7")).unwrap();
    assert_eq!(
        registry.state(&sid("2")).unwrap(),
        SubstitutionState::Assigned(tid("7"))
    );
}

#[test]
fn notice_uses_snapshot_before_mutation() {
    let mut registry = demo_registry();
    let before = registry.details(&sid("1")).unwrap();
    registry.assign(&sid("1"), &tid("6")).unwrap();
    let teacher = registry.reference().teacher(&tid("6")).unwrap();

    let notice = AssignmentNotice::assigned(&before, teacher);
    insta::assert_snapshot!(TextNotice.render(&notice), @r"
    Substitute Assigned
    Elizabeth Brown has been assigned to 10A - Mathematics
    ");

    let before = registry.details(&sid("1")).unwrap();
    registry.unassign(&sid("1")).unwrap();
    let notice = AssignmentNotice::unassigned(&before).unwrap();
    assert_eq!(
        TextNotice.description(&notice),
        "Elizabeth Brown has been removed from 10A - Mathematics"
    );

    let open = registry.details(&sid("1")).unwrap();
    assert!(AssignmentNotice::unassigned(&open).is_none());
}

fn sid(s: &str) -> SubstitutionId {
    SubstitutionId::new(s)
}

fn tid(s: &str) -> TeacherId {
    TeacherId::new(s)
}

fn demo_registry() -> Registry {
    let monday = NaiveDate::from_ymd_opt(2025, 10, 13).unwrap();
    Seed::demo(monday).unwrap().into_registry().unwrap()
}
