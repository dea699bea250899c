use crate::model::{SubstitutionWithDetails, Teacher};

/// Changement à annoncer à l'opérateur après une commande réussie.
///
/// Construit à partir de la vue détaillée *avant* mutation : les noms
/// affichés sont ceux du créneau tel que l'opérateur l'a vu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentNotice {
    Assigned {
        teacher: String,
        class: String,
        subject: String,
    },
    Unassigned {
        teacher: String,
        class: String,
        subject: String,
    },
}

impl AssignmentNotice {
    pub fn assigned(before: &SubstitutionWithDetails, teacher: &Teacher) -> Self {
        Self::Assigned {
            teacher: teacher.name.clone(),
            class: before.class.name.clone(),
            subject: before.subject.name.clone(),
        }
    }

    /// `None` si le créneau n'avait pas de remplaçant.
    pub fn unassigned(before: &SubstitutionWithDetails) -> Option<Self> {
        let teacher = before.substitute_teacher.as_ref()?;
        Some(Self::Unassigned {
            teacher: teacher.name.clone(),
            class: before.class.name.clone(),
            subject: before.subject.name.clone(),
        })
    }
}

/// Permet de customiser le rendu du message (terminal, toast, etc.).
pub trait NoticeRenderer {
    fn title(&self, notice: &AssignmentNotice) -> String;
    fn description(&self, notice: &AssignmentNotice) -> String;

    fn render(&self, notice: &AssignmentNotice) -> String {
        format!("{}\n{}", self.title(notice), self.description(notice))
    }
}

/// Rendu texte brut.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextNotice;

impl NoticeRenderer for TextNotice {
    fn title(&self, notice: &AssignmentNotice) -> String {
        match notice {
            AssignmentNotice::Assigned { .. } => "Substitute Assigned".to_string(),
            AssignmentNotice::Unassigned { .. } => "Substitute Removed".to_string(),
        }
    }

    fn description(&self, notice: &AssignmentNotice) -> String {
        match notice {
            AssignmentNotice::Assigned {
                teacher,
                class,
                subject,
            } => format!("{teacher} has been assigned to {class} - {subject}"),
            AssignmentNotice::Unassigned {
                teacher,
                class,
                subject,
            } => format!("{teacher} has been removed from {class} - {subject}"),
        }
    }
}
