#![forbid(unsafe_code)]
use chrono::NaiveDate;
use substitute_planner::{ClassLesson, Seed, SubstitutionId, TeacherId, WeekView};

#[test]
fn week_grid_overlays_selected_teachers() {
    let seed = Seed::demo(monday()).unwrap();
    let lessons = seed.lessons_for(&seed.substitutions[0].class_id).to_vec();
    let registry = seed.into_registry().unwrap();
    let details = registry.details(&SubstitutionId::new("1")).unwrap();

    let reference = registry.reference();
    let overlay = vec![
        reference.teacher(&TeacherId::new("5")).unwrap(),
        reference.teacher(&TeacherId::new("2")).unwrap(),
    ];
    let view = WeekView::build(&details, &overlay, &lessons).unwrap();

    assert_eq!(view.monday, monday());
    assert_eq!(view.cells.len(), 40);

    let target = view.cell(0, 2).unwrap();
    assert!(target.is_substitution);
    assert_eq!(target.lesson.as_deref(), Some("Mathematics"));
    assert_eq!(target.available, vec![TeacherId::new("5"), TeacherId::new("2")]);

    let early = view.cell(0, 1).unwrap();
    assert!(!early.is_substitution);
    assert_eq!(early.available, vec![TeacherId::new("5")]);

    assert_eq!(
        view.cell(4, 1).unwrap().date,
        NaiveDate::from_ymd_opt(2025, 10, 17).unwrap()
    );
    assert_eq!(view.cells.iter().filter(|c| c.is_substitution).count(), 1);
}

#[test]
fn substituted_lesson_added_once() {
    let seed = Seed::demo(monday()).unwrap();
    let registry = seed.into_registry().unwrap();
    // remplacement 3 : 10B, Chemistry, mardi période 5
    let details = registry.details(&SubstitutionId::new("3")).unwrap();

    let lessons = vec![
        ClassLesson {
            day: 1,
            period: 2,
            subject: "Art".into(),
        },
        ClassLesson {
            day: 1,
            period: 2,
            subject: "Music".into(),
        },
    ];
    let view = WeekView::build(&details, &[], &lessons).unwrap();

    assert_eq!(view.cell(1, 2).unwrap().lesson.as_deref(), Some("Art"));
    assert_eq!(view.cell(1, 5).unwrap().lesson.as_deref(), Some("Chemistry"));
    assert_eq!(view.cells.iter().filter(|c| c.lesson.is_some()).count(), 2);
    assert!(view.cells.iter().all(|c| c.available.is_empty()));
}

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 13).unwrap()
}
