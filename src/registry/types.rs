use crate::model::{SubstitutionId, TeacherId};
use thiserror::Error;

/// État d'un remplacement dans la machine Open ⇄ Assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubstitutionState {
    Open,
    Assigned(TeacherId),
}

impl std::fmt::Display for SubstitutionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => f.write_str("open"),
            Self::Assigned(teacher) => write!(f, "assigned to {teacher}"),
        }
    }
}

/// Type de référence qui n'a pas pu être résolue lors d'une jointure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    OriginalTeacher,
    SubstituteTeacher,
    Class,
    Subject,
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::OriginalTeacher => "original teacher",
            Self::SubstituteTeacher => "substitute teacher",
            Self::Class => "class",
            Self::Subject => "subject",
        })
    }
}

/// Entité introuvable pour une commande.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Missing {
    Substitution(SubstitutionId),
    Teacher(TeacherId),
}

impl std::fmt::Display for Missing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Substitution(id) => write!(f, "substitution {id}"),
            Self::Teacher(id) => write!(f, "teacher {id}"),
        }
    }
}

/// Filtre appliqué par [`Registry::list_with_details`](super::Registry::list_with_details).
#[derive(Debug, Clone, Copy, Default)]
pub struct ListFilter {
    pub open_only: bool,
}

impl ListFilter {
    pub fn open_only() -> Self {
        Self { open_only: true }
    }
}

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("substitution {substitution} references unknown {kind} {id}")]
    ReferenceIntegrity {
        substitution: SubstitutionId,
        kind: ReferenceKind,
        id: String,
    },
    #[error("invalid transition for substitution {substitution}: already {state}")]
    InvalidTransition {
        substitution: SubstitutionId,
        state: SubstitutionState,
    },
    #[error("not found: {0}")]
    NotFound(Missing),
    #[error("teacher {teacher} is the original teacher of substitution {substitution}")]
    SameTeacher {
        substitution: SubstitutionId,
        teacher: TeacherId,
    },
    #[error("invalid record {substitution}: {reason}")]
    InvalidRecord {
        substitution: SubstitutionId,
        reason: &'static str,
    },
    #[error("invalid availability for teacher {teacher}: {reason}")]
    InvalidAvailability {
        teacher: TeacherId,
        reason: &'static str,
    },
}
