//! # Document Mutations
//!
//! High-level semantic operations on the site document.
//!
//! ## Design Principles
//!
//! 1. **Intent-preserving**: each mutation is one user-visible edit
//! 2. **Validated**: a mutation either applies fully or leaves the
//!    document untouched
//! 3. **Forgiving**: operations on missing ids and boundary moves resolve
//!    to [`MutationOutcome::Noop`] where the editing surface expects it,
//!    and only `UpdateSection`/`DuplicateSection` insist on the target
//!    existing
//!
//! Section operations always target the current page. The caller (the
//! editor) is responsible for snapshotting applied outcomes and for
//! carrying out the returned [`SelectionEffect`].

use pagecraft_document::{DocumentError, Section, SectionKind, SectionPatch, SiteDocument};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Semantic mutations over the page collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Mutation {
    /// Insert a section cloned from a template, appended unless a position
    /// is given. An optional patch is merged into the template data.
    AddSection {
        kind: String,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        position: Option<usize>,
        #[serde(default)]
        patch: Option<SectionPatch>,
    },

    /// Merge a patch into a section's data, last-write-wins per field.
    UpdateSection {
        section_id: String,
        patch: SectionPatch,
    },

    /// Delete a section. No-op if the id does not exist.
    RemoveSection { section_id: String },

    /// Swap a section with its immediate neighbor. No-op at the boundary.
    MoveSection {
        section_id: String,
        direction: MoveDirection,
    },

    /// Deep-clone a section, inserting the copy immediately after the
    /// original.
    DuplicateSection { section_id: String },

    /// Append a new empty page and make it current.
    AddPage { name: String, path: String },

    /// Remove a page. Refused for the last remaining page.
    RemovePage { page_id: String },

    /// Point the current-page pointer at another page.
    SelectPage { page_id: String },

    RenamePage { page_id: String, name: String },

    /// Update page head metadata, last-write-wins per field.
    UpdatePageSettings {
        page_id: String,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        description: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Section not found: {0}")]
    SectionNotFound(String),

    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("Unknown section kind: {0}")]
    UnknownSectionKind(String),

    #[error("Patch family '{patch}' does not match section data family '{data}'")]
    KindMismatch {
        data: &'static str,
        patch: &'static str,
    },

    #[error("Cannot remove the last page")]
    CannotRemoveLastPage,
}

impl From<DocumentError> for MutationError {
    fn from(e: DocumentError) -> Self {
        match e {
            DocumentError::PageNotFound(id) => MutationError::PageNotFound(id),
            DocumentError::SectionNotFound(id) => MutationError::SectionNotFound(id),
            DocumentError::LastPage => MutationError::CannotRemoveLastPage,
            DocumentError::FamilyMismatch { data, patch } => {
                MutationError::KindMismatch { data, patch }
            }
        }
    }
}

/// What the editor should do with the selection after an applied mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEffect {
    /// Leave the selection alone.
    Keep,
    /// Clear the selection if it currently points at this section.
    ClearIf(String),
    /// Clear the selection unconditionally (page switches).
    ClearAll,
    /// Select this section.
    Select(String),
}

/// Result of applying a mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    Applied {
        selection: SelectionEffect,
        /// Id of a newly created section or page, when the mutation
        /// creates one.
        created_id: Option<String>,
    },
    /// The mutation had no effect (missing id, boundary move). No snapshot
    /// is pushed and the document is unchanged.
    Noop { reason: &'static str },
}

impl Mutation {
    /// Apply this mutation to the document.
    ///
    /// On error the document is left exactly as it was.
    pub fn apply(&self, doc: &mut SiteDocument) -> Result<MutationOutcome, MutationError> {
        match self {
            Mutation::AddSection {
                kind,
                name,
                position,
                patch,
            } => Self::apply_add_section(doc, kind, name.as_deref(), *position, patch.as_ref()),

            Mutation::UpdateSection { section_id, patch } => {
                Self::apply_update_section(doc, section_id, patch)
            }

            Mutation::RemoveSection { section_id } => Self::apply_remove_section(doc, section_id),

            Mutation::MoveSection {
                section_id,
                direction,
            } => Self::apply_move_section(doc, section_id, *direction),

            Mutation::DuplicateSection { section_id } => {
                Self::apply_duplicate_section(doc, section_id)
            }

            Mutation::AddPage { name, path } => {
                let id = doc.add_page(name.clone(), path.clone());
                Ok(MutationOutcome::Applied {
                    selection: SelectionEffect::ClearAll,
                    created_id: Some(id),
                })
            }

            Mutation::RemovePage { page_id } => {
                let was_current = doc.current_page_id == *page_id;
                doc.remove_page(page_id)?;
                Ok(MutationOutcome::Applied {
                    selection: if was_current {
                        SelectionEffect::ClearAll
                    } else {
                        SelectionEffect::Keep
                    },
                    created_id: None,
                })
            }

            Mutation::SelectPage { page_id } => {
                if doc.page(page_id).is_none() {
                    return Err(MutationError::PageNotFound(page_id.clone()));
                }
                doc.current_page_id = page_id.clone();
                Ok(MutationOutcome::Applied {
                    selection: SelectionEffect::ClearAll,
                    created_id: None,
                })
            }

            Mutation::RenamePage { page_id, name } => {
                let page = doc
                    .page_mut(page_id)
                    .ok_or_else(|| MutationError::PageNotFound(page_id.clone()))?;
                page.name = name.clone();
                Ok(MutationOutcome::Applied {
                    selection: SelectionEffect::Keep,
                    created_id: None,
                })
            }

            Mutation::UpdatePageSettings {
                page_id,
                title,
                description,
            } => {
                let page = doc
                    .page_mut(page_id)
                    .ok_or_else(|| MutationError::PageNotFound(page_id.clone()))?;
                if let Some(title) = title {
                    page.settings.title = title.clone();
                }
                if let Some(description) = description {
                    page.settings.description = description.clone();
                }
                Ok(MutationOutcome::Applied {
                    selection: SelectionEffect::Keep,
                    created_id: None,
                })
            }
        }
    }

    fn apply_add_section(
        doc: &mut SiteDocument,
        kind: &str,
        name: Option<&str>,
        position: Option<usize>,
        patch: Option<&SectionPatch>,
    ) -> Result<MutationOutcome, MutationError> {
        let kind = SectionKind::parse(kind)
            .ok_or_else(|| MutationError::UnknownSectionKind(kind.to_string()))?;

        // Build the section before touching the document so a mismatched
        // patch leaves the store unchanged.
        let mut data = kind.template();
        if let Some(patch) = patch {
            data.merge(patch)?;
        }

        let id = doc.allocate_id("section");
        let mut section = Section::from_template(id.clone(), kind);
        section.data = data;
        if let Some(name) = name {
            section.name = name.to_string();
        }

        let page = doc.current_page_mut()?;
        let index = position.unwrap_or(page.sections.len()).min(page.sections.len());
        page.sections.insert(index, section);

        tracing::debug!(section = %id, kind = %kind, "section added");
        Ok(MutationOutcome::Applied {
            selection: SelectionEffect::Select(id.clone()),
            created_id: Some(id),
        })
    }

    fn apply_update_section(
        doc: &mut SiteDocument,
        section_id: &str,
        patch: &SectionPatch,
    ) -> Result<MutationOutcome, MutationError> {
        let page = doc.current_page_mut()?;
        let section = page
            .section_mut(section_id)
            .ok_or_else(|| MutationError::SectionNotFound(section_id.to_string()))?;
        section.data.merge(patch)?;

        Ok(MutationOutcome::Applied {
            selection: SelectionEffect::Keep,
            created_id: None,
        })
    }

    fn apply_remove_section(
        doc: &mut SiteDocument,
        section_id: &str,
    ) -> Result<MutationOutcome, MutationError> {
        let page = doc.current_page_mut()?;
        match page.section_index(section_id) {
            Some(index) => {
                page.sections.remove(index);
                Ok(MutationOutcome::Applied {
                    selection: SelectionEffect::ClearIf(section_id.to_string()),
                    created_id: None,
                })
            }
            None => Ok(MutationOutcome::Noop {
                reason: "section does not exist",
            }),
        }
    }

    fn apply_move_section(
        doc: &mut SiteDocument,
        section_id: &str,
        direction: MoveDirection,
    ) -> Result<MutationOutcome, MutationError> {
        let page = doc.current_page_mut()?;
        let Some(index) = page.section_index(section_id) else {
            return Ok(MutationOutcome::Noop {
                reason: "section does not exist",
            });
        };

        let neighbor = match direction {
            MoveDirection::Up if index > 0 => index - 1,
            MoveDirection::Down if index + 1 < page.sections.len() => index + 1,
            _ => {
                return Ok(MutationOutcome::Noop {
                    reason: "section already at boundary",
                })
            }
        };
        page.sections.swap(index, neighbor);

        Ok(MutationOutcome::Applied {
            selection: SelectionEffect::Keep,
            created_id: None,
        })
    }

    fn apply_duplicate_section(
        doc: &mut SiteDocument,
        section_id: &str,
    ) -> Result<MutationOutcome, MutationError> {
        // Resolve the original before allocating so a missing id leaves
        // the document untouched.
        let index = doc
            .current_page()?
            .section_index(section_id)
            .ok_or_else(|| MutationError::SectionNotFound(section_id.to_string()))?;

        let id = doc.allocate_id("section");
        let page = doc.current_page_mut()?;
        let mut copy = page.sections[index].clone();
        copy.id = id.clone();
        page.sections.insert(index + 1, copy);

        Ok(MutationOutcome::Applied {
            selection: SelectionEffect::Select(id.clone()),
            created_id: Some(id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutation_serialization() {
        let mutation = Mutation::MoveSection {
            section_id: "section-2".to_string(),
            direction: MoveDirection::Down,
        };

        let json = serde_json::to_string(&mutation).unwrap();
        let deserialized: Mutation = serde_json::from_str(&json).unwrap();

        assert_eq!(mutation, deserialized);
    }

    #[test]
    fn test_add_section_rejects_unknown_kind() {
        let mut doc = SiteDocument::new();
        let before = doc.clone();

        let result = Mutation::AddSection {
            kind: "mega-menu".to_string(),
            name: None,
            position: None,
            patch: None,
        }
        .apply(&mut doc);

        assert_eq!(
            result,
            Err(MutationError::UnknownSectionKind("mega-menu".to_string()))
        );
        assert_eq!(doc, before);
    }

    #[test]
    fn test_add_section_rejects_mismatched_patch() {
        let mut doc = SiteDocument::new();
        let before = doc.clone();

        let result = Mutation::AddSection {
            kind: "banner".to_string(),
            name: None,
            position: None,
            patch: Some(SectionPatch::Hero(Default::default())),
        }
        .apply(&mut doc);

        assert!(matches!(result, Err(MutationError::KindMismatch { .. })));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_update_missing_section_is_not_found() {
        let mut doc = SiteDocument::new();

        let result = Mutation::UpdateSection {
            section_id: "section-404".to_string(),
            patch: SectionPatch::Banner(Default::default()),
        }
        .apply(&mut doc);

        assert_eq!(
            result,
            Err(MutationError::SectionNotFound("section-404".to_string()))
        );
    }

    #[test]
    fn test_select_missing_page_is_not_found() {
        let mut doc = SiteDocument::new();

        let result = Mutation::SelectPage {
            page_id: "page-404".to_string(),
        }
        .apply(&mut doc);

        assert_eq!(result, Err(MutationError::PageNotFound("page-404".to_string())));
    }
}
