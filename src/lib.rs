#![forbid(unsafe_code)]
//! Substitute planner — cœur de planification des remplacements d'enseignants.
//!
//! - Disponibilités sur une grille 5 jours × 8 périodes.
//! - Registre en mémoire : assignation / retrait atomiques.
//! - Session de sélection transitoire des candidats.
//! - Pas de persistance : un jeu de données initial (JSON) alimente la session.

pub mod availability;
pub mod calendar;
pub mod io;
pub mod model;
pub mod notification;
pub mod registry;
pub mod seed;
pub mod selection;

pub use availability::{eligible_substitutes, is_available, is_eligible};
pub use calendar::{date_for_day, week_monday, ClassLesson, WeekCell, WeekView};
pub use model::{
    parse_school_date, Availability, Class, ClassId, ReferenceData, Slot, Subject, SubjectId,
    Substitution, SubstitutionId, SubstitutionWithDetails, Teacher, TeacherId,
};
pub use notification::{AssignmentNotice, NoticeRenderer, TextNotice};
pub use registry::{
    filter_open_only, ListFilter, Missing, ReferenceKind, Registry, RegistryError,
    SubstitutionState,
};
pub use seed::Seed;
pub use selection::{SelectionError, SelectionSession};
