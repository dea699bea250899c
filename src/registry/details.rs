use super::{ListFilter, ReferenceKind, Registry, RegistryError};
use crate::model::{ReferenceData, Substitution, SubstitutionWithDetails};

pub(super) fn list_with_details(
    registry: &Registry,
    filter: ListFilter,
) -> Result<Vec<SubstitutionWithDetails>, RegistryError> {
    let rows = registry
        .records
        .iter()
        .map(|record| join(&registry.reference, record))
        .collect::<Result<Vec<_>, _>>()?;

    if filter.open_only {
        Ok(filter_open_only(rows))
    } else {
        Ok(rows)
    }
}

/// Joint un remplacement à son référentiel ; échoue sur toute référence pendante.
pub(super) fn join(
    reference: &ReferenceData,
    record: &Substitution,
) -> Result<SubstitutionWithDetails, RegistryError> {
    let dangling = |kind: ReferenceKind, id: &str| RegistryError::ReferenceIntegrity {
        substitution: record.id.clone(),
        kind,
        id: id.to_string(),
    };

    let original_teacher = reference
        .teacher(&record.original_teacher_id)
        .ok_or_else(|| {
            dangling(
                ReferenceKind::OriginalTeacher,
                record.original_teacher_id.as_str(),
            )
        })?;
    let class = reference
        .class(&record.class_id)
        .ok_or_else(|| dangling(ReferenceKind::Class, record.class_id.as_str()))?;
    let subject = reference
        .subject(&record.subject_id)
        .ok_or_else(|| dangling(ReferenceKind::Subject, record.subject_id.as_str()))?;
    let substitute_teacher = match record.substitute_teacher_id() {
        Some(id) => Some(
            reference
                .teacher(id)
                .ok_or_else(|| dangling(ReferenceKind::SubstituteTeacher, id.as_str()))?
                .clone(),
        ),
        None => None,
    };

    Ok(SubstitutionWithDetails {
        id: record.id.clone(),
        original_teacher: original_teacher.clone(),
        class: class.clone(),
        subject: subject.clone(),
        substitute_teacher,
        date: record.date,
        day: record.day,
        period: record.period,
        is_assigned: record.is_assigned(),
    })
}

/// Ne garde que les remplacements encore ouverts.
pub fn filter_open_only<I>(records: I) -> Vec<SubstitutionWithDetails>
where
    I: IntoIterator<Item = SubstitutionWithDetails>,
{
    records.into_iter().filter(|r| !r.is_assigned).collect()
}
