use std::collections::HashSet;

use periop_model::ConceptId;

/// Procedure concepts that count as surgery at a site.
///
/// The set itself is precomputed against the warehouse (standard CPT4
/// descendants of the surgical-procedure concept plus ICD10PCS codes present
/// in the category table); here it is only queried.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurgicalConceptSet {
    ids: HashSet<ConceptId>,
}

impl SurgicalConceptSet {
    pub fn new<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = ConceptId>,
    {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    pub fn contains(&self, concept_id: ConceptId) -> bool {
        self.ids.contains(&concept_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<ConceptId> for SurgicalConceptSet {
    fn from_iter<T: IntoIterator<Item = ConceptId>>(iter: T) -> Self {
        Self::new(iter)
    }
}
