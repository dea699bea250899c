use crate::availability::is_available;
use crate::model::{SubstitutionWithDetails, Teacher, TeacherId, DAYS_PER_WEEK, PERIODS_PER_DAY};
use anyhow::{Context, Result};
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Cours d'une classe sur la grille hebdomadaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassLesson {
    pub day: u8,
    pub period: u8,
    pub subject: String,
}

/// Case (jour, période) de la vue semaine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekCell {
    pub day: u8,
    pub period: u8,
    pub date: NaiveDate,
    /// Case du remplacement affiché.
    pub is_substitution: bool,
    pub lesson: Option<String>,
    /// Enseignants de la superposition disponibles ici, dans l'ordre de sélection.
    pub available: Vec<TeacherId>,
}

/// Grille 5 × 8 autour d'un remplacement.
#[derive(Debug, Clone, Serialize)]
pub struct WeekView {
    pub monday: NaiveDate,
    pub cells: Vec<WeekCell>,
}

impl WeekView {
    /// Construit la vue de la semaine du remplacement.
    ///
    /// `overlay` : candidats dont on affiche les disponibilités.
    /// `lessons` : emploi du temps de la classe ; une seule leçon par case
    /// (la première gagne), et le cours remplacé est ajouté s'il manque.
    pub fn build(
        substitution: &SubstitutionWithDetails,
        overlay: &[&Teacher],
        lessons: &[ClassLesson],
    ) -> Result<Self> {
        let monday = week_monday(substitution.date)?;
        let lessons = unique_lessons(lessons, substitution);

        let mut cells = Vec::with_capacity(usize::from(DAYS_PER_WEEK * PERIODS_PER_DAY));
        for day in 0..DAYS_PER_WEEK {
            let date = date_for_day(substitution.date, substitution.day, day)?;
            for period in 1..=PERIODS_PER_DAY {
                let lesson = lessons
                    .iter()
                    .find(|l| l.day == day && l.period == period)
                    .map(|l| l.subject.clone());
                let available = overlay
                    .iter()
                    .filter(|t| is_available(t, day, period))
                    .map(|t| t.id.clone())
                    .collect();
                cells.push(WeekCell {
                    day,
                    period,
                    date,
                    is_substitution: day == substitution.day && period == substitution.period,
                    lesson,
                    available,
                });
            }
        }

        Ok(Self { monday, cells })
    }

    pub fn cell(&self, day: u8, period: u8) -> Option<&WeekCell> {
        self.cells
            .iter()
            .find(|c| c.day == day && c.period == period)
    }
}

/// Lundi de la semaine contenant `date`.
pub fn week_monday(date: NaiveDate) -> Result<NaiveDate> {
    let back = i64::from(date.weekday().num_days_from_monday());
    date.checked_sub_signed(Duration::days(back))
        .context("date overflow")
}

/// Date du jour `day` (0 = lundi) dans la semaine d'une occurrence `(date, date_day)`.
pub fn date_for_day(date: NaiveDate, date_day: u8, day: u8) -> Result<NaiveDate> {
    let diff = i64::from(day) - i64::from(date_day);
    date.checked_add_signed(Duration::days(diff))
        .context("date overflow")
}

fn unique_lessons(lessons: &[ClassLesson], substitution: &SubstitutionWithDetails) -> Vec<ClassLesson> {
    let mut out: Vec<ClassLesson> = Vec::with_capacity(lessons.len() + 1);
    let own = ClassLesson {
        day: substitution.day,
        period: substitution.period,
        subject: substitution.subject.name.clone(),
    };
    for lesson in lessons.iter().chain(std::iter::once(&own)) {
        if !out
            .iter()
            .any(|l| l.day == lesson.day && l.period == lesson.period)
        {
            out.push(lesson.clone());
        }
    }
    out
}
