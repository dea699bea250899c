mod details;
mod mutate;
mod types;

pub use details::filter_open_only;
pub use types::{ListFilter, Missing, ReferenceKind, RegistryError, SubstitutionState};

use crate::availability;
use crate::model::{ReferenceData, Slot, Substitution, SubstitutionId, SubstitutionWithDetails, Teacher, TeacherId};
use std::collections::HashMap;

/// Registry : seul propriétaire des remplacements, indexés par identifiant.
///
/// Les enregistrements ne sont jamais prêtés en `&mut` ; seules
/// [`Registry::assign`] et [`Registry::unassign`] les modifient.
#[derive(Debug, Default)]
pub struct Registry {
    reference: ReferenceData,
    records: Vec<Substitution>,
    index: HashMap<SubstitutionId, usize>,
}

impl Registry {
    /// Construit le registre à partir d'un jeu de données initial.
    ///
    /// Rejette les enregistrements incohérents (jour/date, période,
    /// drapeau d'assignation, doublons) et les grilles de disponibilité
    /// hors bornes ou contradictoires. Les références vers le référentiel
    /// ne sont vérifiées qu'à la lecture détaillée.
    pub fn new(
        reference: ReferenceData,
        substitutions: Vec<Substitution>,
    ) -> Result<Self, RegistryError> {
        for teacher in &reference.teachers {
            teacher
                .check_availability()
                .map_err(|reason| RegistryError::InvalidAvailability {
                    teacher: teacher.id.clone(),
                    reason,
                })?;
        }

        let mut index = HashMap::with_capacity(substitutions.len());
        for (pos, record) in substitutions.iter().enumerate() {
            record
                .check_shape()
                .map_err(|reason| RegistryError::InvalidRecord {
                    substitution: record.id.clone(),
                    reason,
                })?;
            if index.insert(record.id.clone(), pos).is_some() {
                return Err(RegistryError::InvalidRecord {
                    substitution: record.id.clone(),
                    reason: "duplicate id",
                });
            }
        }

        #[cfg(feature = "logging")]
        tracing::debug!(
            teachers = reference.teachers.len(),
            substitutions = substitutions.len(),
            "registry loaded"
        );

        Ok(Self {
            reference,
            records: substitutions,
            index,
        })
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn records(&self) -> &[Substitution] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &SubstitutionId) -> Option<&Substitution> {
        self.index.get(id).map(|&pos| &self.records[pos])
    }

    pub fn state(&self, id: &SubstitutionId) -> Result<SubstitutionState, RegistryError> {
        let record = self.require(id)?;
        Ok(match record.substitute_teacher_id() {
            Some(teacher) => SubstitutionState::Assigned(teacher.clone()),
            None => SubstitutionState::Open,
        })
    }

    pub fn slot(&self, id: &SubstitutionId) -> Result<Slot, RegistryError> {
        Ok(self.require(id)?.slot())
    }

    /// Remplaçants éligibles pour un remplacement, d'après le référentiel courant.
    pub fn eligible_for(&self, id: &SubstitutionId) -> Result<Vec<&Teacher>, RegistryError> {
        let slot = self.slot(id)?;
        Ok(availability::eligible_substitutes(
            &self.reference.teachers,
            &slot,
        ))
    }

    pub fn assign(
        &mut self,
        substitution_id: &SubstitutionId,
        teacher_id: &TeacherId,
    ) -> Result<(), RegistryError> {
        mutate::assign(self, substitution_id, teacher_id)
    }

    pub fn unassign(&mut self, substitution_id: &SubstitutionId) -> Result<(), RegistryError> {
        mutate::unassign(self, substitution_id)
    }

    pub fn list_with_details(
        &self,
        filter: ListFilter,
    ) -> Result<Vec<SubstitutionWithDetails>, RegistryError> {
        details::list_with_details(self, filter)
    }

    pub fn details(&self, id: &SubstitutionId) -> Result<SubstitutionWithDetails, RegistryError> {
        details::join(&self.reference, self.require(id)?)
    }

    fn position(&self, id: &SubstitutionId) -> Result<usize, RegistryError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| RegistryError::NotFound(Missing::Substitution(id.clone())))
    }

    fn require(&self, id: &SubstitutionId) -> Result<&Substitution, RegistryError> {
        self.position(id).map(|pos| &self.records[pos])
    }
}
