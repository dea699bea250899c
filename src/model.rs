use chrono::{DateTime, Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Nombre de jours ouvrés couverts par la grille (lundi → vendredi).
pub const DAYS_PER_WEEK: u8 = 5;
/// Nombre de périodes de cours par jour (numérotées à partir de 1).
pub const PERIODS_PER_DAY: u8 = 8;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new<S: AsRef<str>>(s: S) -> Self {
                Self(s.as_ref().to_owned())
            }
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifiant fort pour Teacher
    TeacherId
);
string_id!(
    /// Identifiant fort pour Class
    ClassId
);
string_id!(
    /// Identifiant fort pour Subject
    SubjectId
);
string_id!(
    /// Identifiant fort pour Substitution
    SubstitutionId
);

impl SubstitutionId {
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

/// Disponibilité d'un enseignant sur une case (jour, période) de la semaine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    /// 0 = lundi … 4 = vendredi
    pub day: u8,
    /// 1 … 8
    pub period: u8,
    pub available: bool,
}

/// Enseignant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: TeacherId,
    pub name: String,
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default)]
    pub availability: Vec<Availability>,
}

impl Teacher {
    pub fn new<I: AsRef<str>, N: Into<String>>(id: I, name: N) -> Self {
        Self {
            id: TeacherId::new(id),
            name: name.into(),
            subjects: Vec::new(),
            availability: Vec::new(),
        }
    }

    pub fn with_subjects<S: Into<String>>(mut self, subjects: impl IntoIterator<Item = S>) -> Self {
        self.subjects = subjects.into_iter().map(Into::into).collect();
        self
    }

    /// Positionne la disponibilité d'une case. Remplace l'entrée existante
    /// pour garder au plus une entrée par (jour, période).
    pub fn set_available(&mut self, day: u8, period: u8, available: bool) {
        match self
            .availability
            .iter_mut()
            .find(|a| a.day == day && a.period == period)
        {
            Some(entry) => entry.available = available,
            None => self.availability.push(Availability {
                day,
                period,
                available,
            }),
        }
    }

    pub fn with_available(mut self, day: u8, period: u8) -> Self {
        self.set_available(day, period, true);
        self
    }

    /// Vérifie la grille : cases dans 5 × 8, au plus une entrée par case.
    pub(crate) fn check_availability(&self) -> Result<(), &'static str> {
        let mut seen = std::collections::HashSet::with_capacity(self.availability.len());
        for entry in &self.availability {
            if entry.day >= DAYS_PER_WEEK {
                return Err("day outside 0-4");
            }
            if !(1..=PERIODS_PER_DAY).contains(&entry.period) {
                return Err("period outside 1-8");
            }
            if !seen.insert((entry.day, entry.period)) {
                return Err("duplicate (day, period) entry");
            }
        }
        Ok(())
    }
}

/// Classe (référentiel, sans comportement)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    pub id: ClassId,
    pub name: String,
    pub grade: String,
}

impl Class {
    pub fn new<I: AsRef<str>, N: Into<String>, G: Into<String>>(id: I, name: N, grade: G) -> Self {
        Self {
            id: ClassId::new(id),
            name: name.into(),
            grade: grade.into(),
        }
    }
}

/// Matière (référentiel)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
}

impl Subject {
    pub fn new<I: AsRef<str>, N: Into<String>>(id: I, name: N) -> Self {
        Self {
            id: SubjectId::new(id),
            name: name.into(),
        }
    }
}

/// Créneau à remplacer.
///
/// `substitute_teacher_id` et `is_assigned` ne sont modifiables que par le
/// [`Registry`](crate::registry::Registry) : `is_assigned == substitute_teacher_id.is_some()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Substitution {
    pub id: SubstitutionId,
    pub original_teacher_id: TeacherId,
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    #[serde(deserialize_with = "deserialize_school_date")]
    pub date: NaiveDate,
    pub day: u8,
    pub period: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) substitute_teacher_id: Option<TeacherId>,
    #[serde(default)]
    pub(crate) is_assigned: bool,
}

impl Substitution {
    /// Crée un créneau ouvert ; le jour est déduit de `date`.
    pub fn new(
        original_teacher_id: TeacherId,
        class_id: ClassId,
        subject_id: SubjectId,
        date: NaiveDate,
        period: u8,
    ) -> Result<Self, String> {
        let day = weekday_index(date).ok_or_else(|| format!("{date} is not a school day"))?;
        if !(1..=PERIODS_PER_DAY).contains(&period) {
            return Err(format!("period {period} out of range 1..={PERIODS_PER_DAY}"));
        }
        Ok(Self {
            id: SubstitutionId::random(),
            original_teacher_id,
            class_id,
            subject_id,
            date,
            day,
            period,
            substitute_teacher_id: None,
            is_assigned: false,
        })
    }

    /// Remplace l'identifiant aléatoire.
    pub fn with_id(mut self, id: SubstitutionId) -> Self {
        self.id = id;
        self
    }

    pub fn substitute_teacher_id(&self) -> Option<&TeacherId> {
        self.substitute_teacher_id.as_ref()
    }

    pub fn is_assigned(&self) -> bool {
        self.is_assigned
    }

    pub fn slot(&self) -> Slot {
        Slot {
            date: self.date,
            day: self.day,
            period: self.period,
            original_teacher_id: self.original_teacher_id.clone(),
            class_id: self.class_id.clone(),
            subject_id: self.subject_id.clone(),
        }
    }

    /// Vérifie la cohérence interne d'un enregistrement chargé tel quel.
    pub(crate) fn check_shape(&self) -> Result<(), &'static str> {
        if weekday_index(self.date) != Some(self.day) {
            return Err("day does not match date");
        }
        if !(1..=PERIODS_PER_DAY).contains(&self.period) {
            return Err("period out of range");
        }
        if self.is_assigned != self.substitute_teacher_id.is_some() {
            return Err("isAssigned disagrees with substituteTeacherId");
        }
        if self.substitute_teacher_id.as_ref() == Some(&self.original_teacher_id) {
            return Err("substitute is the original teacher");
        }
        Ok(())
    }
}

/// Occurrence à couvrir : (jour, période, classe, matière, date).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub date: NaiveDate,
    pub day: u8,
    pub period: u8,
    pub original_teacher_id: TeacherId,
    pub class_id: ClassId,
    pub subject_id: SubjectId,
}

/// Vue jointe d'un remplacement, recalculée à chaque lecture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubstitutionWithDetails {
    pub id: SubstitutionId,
    pub original_teacher: Teacher,
    pub class: Class,
    pub subject: Subject,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub substitute_teacher: Option<Teacher>,
    pub date: NaiveDate,
    pub day: u8,
    pub period: u8,
    pub is_assigned: bool,
}

/// Référentiel enseignants / classes / matières.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceData {
    pub teachers: Vec<Teacher>,
    pub classes: Vec<Class>,
    pub subjects: Vec<Subject>,
}

impl ReferenceData {
    pub fn teacher<'a>(&'a self, id: &TeacherId) -> Option<&'a Teacher> {
        self.teachers.iter().find(|t| &t.id == id)
    }
    pub fn class<'a>(&'a self, id: &ClassId) -> Option<&'a Class> {
        self.classes.iter().find(|c| &c.id == id)
    }
    pub fn subject<'a>(&'a self, id: &SubjectId) -> Option<&'a Subject> {
        self.subjects.iter().find(|s| &s.id == id)
    }
}

/// Date de créneau : `YYYY-MM-DD`, ou horodatage RFC 3339 dont on garde la
/// date locale (`2025-10-14T00:00:00.000Z` → 2025-10-14).
pub fn parse_school_date(raw: &str) -> Result<NaiveDate, String> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map_err(|e| format!("invalid date {raw:?}: {e}"))
}

fn deserialize_school_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_school_date(&raw).map_err(serde::de::Error::custom)
}

/// Index 0..=4 du jour ouvré, `None` le week-end.
pub fn weekday_index(date: NaiveDate) -> Option<u8> {
    match date.weekday() {
        Weekday::Sat | Weekday::Sun => None,
        wd => Some(wd.num_days_from_monday() as u8),
    }
}
