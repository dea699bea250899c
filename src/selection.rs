//! Sélection transitoire des candidats pour le remplacement affiché.
//!
//! La session ne touche jamais aux entités : elle garde des identifiants et
//! délègue toute écriture au [`Registry`]. Seuls les enseignants éligibles
//! pour le créneau ouvert peuvent être sélectionnés, et seul un enseignant
//! sélectionné peut être assigné.

use crate::availability::is_eligible;
use crate::model::{ReferenceData, Slot, SubstitutionId, Teacher, TeacherId};
use crate::registry::{Registry, RegistryError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SelectionError {
    #[error("no substitution is open")]
    NoActiveSlot,
    #[error("substitution {requested} is not the open one ({active})")]
    WrongSlot {
        active: SubstitutionId,
        requested: SubstitutionId,
    },
    #[error("teacher {0} is not among the selected candidates")]
    NotSelected(TeacherId),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

#[derive(Debug, Clone)]
struct ActiveSlot {
    id: SubstitutionId,
    slot: Slot,
}

#[derive(Debug, Default, Clone)]
pub struct SelectionSession {
    active: Option<ActiveSlot>,
    selected: Vec<TeacherId>,
}

impl SelectionSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ouvre un remplacement. Changer de créneau vide la sélection.
    pub fn open(
        &mut self,
        registry: &Registry,
        substitution_id: &SubstitutionId,
    ) -> Result<(), RegistryError> {
        if self.active() == Some(substitution_id) {
            return Ok(());
        }
        let slot = registry.slot(substitution_id)?;
        self.clear();
        self.active = Some(ActiveSlot {
            id: substitution_id.clone(),
            slot,
        });
        Ok(())
    }

    /// Ferme le créneau courant.
    pub fn close(&mut self) {
        self.clear();
        self.active = None;
    }

    pub fn active(&self) -> Option<&SubstitutionId> {
        self.active.as_ref().map(|a| &a.id)
    }

    /// Ajoute l'enseignant en fin de sélection, ou le retire s'il y est déjà.
    ///
    /// Un enseignant non éligible pour le créneau ouvert (ou sans créneau
    /// ouvert) est ignoré. Renvoie `true` si la sélection a changé.
    pub fn toggle(&mut self, teacher: &Teacher) -> bool {
        if let Some(pos) = self.selected.iter().position(|id| id == &teacher.id) {
            self.selected.remove(pos);
            return true;
        }
        match &self.active {
            Some(active) if is_eligible(teacher, &active.slot) => {
                self.selected.push(teacher.id.clone());
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn selected(&self) -> &[TeacherId] {
        &self.selected
    }

    pub fn is_selected(&self, teacher_id: &TeacherId) -> bool {
        self.selected.contains(teacher_id)
    }

    /// Enseignants sélectionnés, dans l'ordre de sélection. Les identifiants
    /// absents du référentiel sont ignorés.
    pub fn selected_teachers<'a>(&self, reference: &'a ReferenceData) -> Vec<&'a Teacher> {
        self.selected
            .iter()
            .filter_map(|id| reference.teacher(id))
            .collect()
    }

    /// Valide un choix : assigne puis vide la sélection. En cas d'échec la
    /// sélection est conservée pour permettre une nouvelle tentative.
    pub fn commit(
        &mut self,
        registry: &mut Registry,
        substitution_id: &SubstitutionId,
        teacher_id: &TeacherId,
    ) -> Result<(), SelectionError> {
        self.ensure_active(substitution_id)?;
        if !self.is_selected(teacher_id) {
            return Err(SelectionError::NotSelected(teacher_id.clone()));
        }
        registry.assign(substitution_id, teacher_id)?;
        self.clear();
        Ok(())
    }

    /// Retire le remplaçant puis vide la sélection.
    pub fn release(
        &mut self,
        registry: &mut Registry,
        substitution_id: &SubstitutionId,
    ) -> Result<(), SelectionError> {
        self.ensure_active(substitution_id)?;
        registry.unassign(substitution_id)?;
        self.clear();
        Ok(())
    }

    fn ensure_active(&self, substitution_id: &SubstitutionId) -> Result<(), SelectionError> {
        match self.active() {
            None => Err(SelectionError::NoActiveSlot),
            Some(active) if active != substitution_id => Err(SelectionError::WrongSlot {
                active: active.clone(),
                requested: substitution_id.clone(),
            }),
            Some(_) => Ok(()),
        }
    }
}
