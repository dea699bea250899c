use crate::calendar::{week_monday, ClassLesson};
use crate::model::{
    Class, ClassId, ReferenceData, Subject, SubjectId, Substitution, SubstitutionId, Teacher,
    TeacherId, DAYS_PER_WEEK, PERIODS_PER_DAY,
};
use crate::registry::{Registry, RegistryError};
use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Jeu de données initial : référentiel + remplacements.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Seed {
    #[serde(flatten)]
    pub reference: ReferenceData,
    pub substitutions: Vec<Substitution>,
    /// Emploi du temps par classe, utilisé par la vue semaine.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub lessons: BTreeMap<ClassId, Vec<ClassLesson>>,
}

impl Seed {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let seed: Seed = serde_json::from_slice(&data)
            .with_context(|| format!("parsing seed {}", path.display()))?;
        Ok(seed)
    }

    pub fn lessons_for(&self, class_id: &ClassId) -> &[ClassLesson] {
        self.lessons.get(class_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn into_registry(self) -> Result<Registry, RegistryError> {
        Registry::new(self.reference, self.substitutions)
    }

    /// Données de démonstration fixes pour la semaine contenant `week_of`.
    ///
    /// Les disponibilités suivent un motif déterministe (~70 % des cases).
    pub fn demo(week_of: NaiveDate) -> Result<Self> {
        let monday = week_monday(week_of)?;

        let roster = [
            ("1", "John Smith", ["math", "physics"]),
            ("2", "Mary Johnson", ["english", "history"]),
            ("3", "Robert Davis", ["chemistry", "biology"]),
            ("4", "Sarah Wilson", ["art", "music"]),
            ("5", "David Thompson", ["physical education", "health"]),
            ("6", "Elizabeth Brown", ["math", "computer science"]),
            ("7", "Michael Jones", ["english", "drama"]),
        ];
        let teachers = roster
            .iter()
            .enumerate()
            .map(|(idx, (id, name, subjects))| {
                let mut teacher = Teacher::new(id, *name).with_subjects(subjects.iter().copied());
                for day in 0..DAYS_PER_WEEK {
                    for period in 1..=PERIODS_PER_DAY {
                        teacher.set_available(day, period, demo_available(idx, day, period));
                    }
                }
                teacher
            })
            .collect();

        let classes = [
            ("1", "10A", "10"),
            ("2", "10B", "10"),
            ("3", "11A", "11"),
            ("4", "11B", "11"),
            ("5", "12A", "12"),
            ("6", "12B", "12"),
        ]
        .iter()
        .map(|(id, name, grade)| Class::new(id, *name, *grade))
        .collect();

        let subjects = [
            "Mathematics",
            "English",
            "Physics",
            "Chemistry",
            "Biology",
            "History",
            "Geography",
            "Art",
            "Music",
            "Physical Education",
            "Computer Science",
        ]
        .iter()
        .enumerate()
        .map(|(idx, name)| Subject::new((idx + 1).to_string(), *name))
        .collect();

        // (original, classe, matière, jour, période, remplaçant)
        let plan: [(&str, &str, &str, u8, u8, Option<&str>); 8] = [
            ("1", "1", "1", 0, 2, None),
            ("2", "3", "2", 1, 3, Some("4")),
            ("3", "2", "4", 1, 5, None),
            ("6", "5", "11", 2, 1, Some("7")),
            ("4", "4", "8", 3, 6, None),
            ("5", "6", "10", 4, 4, Some("2")),
            ("7", "1", "2", 4, 7, None),
            ("1", "2", "3", 2, 8, None),
        ];
        let mut substitutions = Vec::with_capacity(plan.len());
        for (idx, (original, class, subject, day, period, substitute)) in plan.iter().enumerate() {
            let date = monday
                .checked_add_signed(Duration::days(i64::from(*day)))
                .context("date overflow")?;
            let mut record = Substitution::new(
                TeacherId::new(original),
                ClassId::new(class),
                SubjectId::new(subject),
                date,
                *period,
            )
            .map_err(anyhow::Error::msg)?
            .with_id(SubstitutionId::new((idx + 1).to_string()));
            if let Some(teacher) = substitute {
                record.substitute_teacher_id = Some(TeacherId::new(teacher));
                record.is_assigned = true;
            }
            substitutions.push(record);
        }

        let mut lessons = BTreeMap::new();
        lessons.insert(
            ClassId::new("1"),
            vec![
                lesson(0, 1, "Mathematics"),
                lesson(0, 2, "Mathematics"),
                lesson(1, 2, "Physics"),
                lesson(2, 3, "Mathematics"),
                lesson(3, 4, "History"),
                lesson(4, 7, "English"),
            ],
        );
        lessons.insert(
            ClassId::new("2"),
            vec![
                lesson(1, 5, "Chemistry"),
                lesson(2, 1, "Chemistry"),
                lesson(2, 8, "Physics"),
                lesson(4, 1, "Geography"),
            ],
        );

        Ok(Self {
            reference: ReferenceData {
                teachers,
                classes,
                subjects,
            },
            substitutions,
            lessons,
        })
    }
}

fn demo_available(teacher_idx: usize, day: u8, period: u8) -> bool {
    (teacher_idx * 3 + usize::from(day) * 5 + usize::from(period) * 7) % 10 >= 3
}

fn lesson(day: u8, period: u8, subject: &str) -> ClassLesson {
    ClassLesson {
        day,
        period,
        subject: subject.to_string(),
    }
}
