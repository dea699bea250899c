//! Résolution des disponibilités : qui peut remplacer sur une case donnée.
//!
//! Une case sans entrée de disponibilité vaut « indisponible ». Aucune
//! correspondance de matière n'est exigée : tout enseignant libre est proposé.

use crate::model::{Slot, Teacher};

/// Vrai si l'enseignant a une entrée `available` pour (jour, période).
pub fn is_available(teacher: &Teacher, day: u8, period: u8) -> bool {
    teacher
        .availability
        .iter()
        .any(|a| a.day == day && a.period == period && a.available)
}

/// Vrai si `teacher` peut être proposé pour `slot`.
pub fn is_eligible(teacher: &Teacher, slot: &Slot) -> bool {
    teacher.id != slot.original_teacher_id && is_available(teacher, slot.day, slot.period)
}

/// Remplaçants éligibles, dans l'ordre du référentiel fourni.
pub fn eligible_substitutes<'a>(all_teachers: &'a [Teacher], slot: &Slot) -> Vec<&'a Teacher> {
    all_teachers
        .iter()
        .filter(|t| is_eligible(t, slot))
        .collect()
}
