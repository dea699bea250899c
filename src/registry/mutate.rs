use super::{Missing, Registry, RegistryError, SubstitutionState};
use crate::model::{SubstitutionId, TeacherId};

pub(super) fn assign(
    registry: &mut Registry,
    substitution_id: &SubstitutionId,
    teacher_id: &TeacherId,
) -> Result<(), RegistryError> {
    let pos = registry.position(substitution_id)?;

    if registry.reference.teacher(teacher_id).is_none() {
        return Err(RegistryError::NotFound(Missing::Teacher(teacher_id.clone())));
    }

    let record = &registry.records[pos];
    if let Some(current) = record.substitute_teacher_id() {
        return Err(RegistryError::InvalidTransition {
            substitution: substitution_id.clone(),
            state: SubstitutionState::Assigned(current.clone()),
        });
    }
    if &record.original_teacher_id == teacher_id {
        return Err(RegistryError::SameTeacher {
            substitution: substitution_id.clone(),
            teacher: teacher_id.clone(),
        });
    }

    // toutes les vérifications sont faites : la paire est écrite d'un bloc
    let record = &mut registry.records[pos];
    record.substitute_teacher_id = Some(teacher_id.clone());
    record.is_assigned = true;

    #[cfg(feature = "logging")]
    tracing::info!(
        substitution = %substitution_id,
        teacher = %teacher_id,
        "substitute assigned"
    );
    Ok(())
}

pub(super) fn unassign(
    registry: &mut Registry,
    substitution_id: &SubstitutionId,
) -> Result<(), RegistryError> {
    let pos = registry.position(substitution_id)?;

    let record = &mut registry.records[pos];
    let Some(previous) = record.substitute_teacher_id.take() else {
        return Err(RegistryError::InvalidTransition {
            substitution: substitution_id.clone(),
            state: SubstitutionState::Open,
        });
    };
    record.is_assigned = false;

    #[cfg(feature = "logging")]
    tracing::info!(
        substitution = %substitution_id,
        teacher = %previous,
        "substitute removed"
    );
    #[cfg(not(feature = "logging"))]
    let _ = previous;
    Ok(())
}
