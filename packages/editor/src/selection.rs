//! Selection state: which section/element the property panel is editing.
//!
//! Selection holds ids, not references, and is never validated against the
//! document. A stale selection simply renders nothing; it is rebuilt on the
//! next render pass and never persisted into history.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub section_id: Option<String>,
    pub element_id: Option<String>,
}

impl Selection {
    pub fn select_section(&mut self, section_id: impl Into<String>) {
        self.section_id = Some(section_id.into());
        self.element_id = None;
    }

    pub fn select_element(&mut self, element_id: impl Into<String>) {
        self.element_id = Some(element_id.into());
    }

    pub fn clear(&mut self) {
        self.section_id = None;
        self.element_id = None;
    }

    /// Clear only if the given section is the selected one.
    pub fn clear_if_section(&mut self, section_id: &str) {
        if self.section_id.as_deref() == Some(section_id) {
            self.clear();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.section_id.is_none() && self.element_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_section_clears_element() {
        let mut selection = Selection::default();
        selection.select_section("section-1");
        selection.select_element("el-9");
        selection.select_section("section-2");

        assert_eq!(selection.section_id.as_deref(), Some("section-2"));
        assert!(selection.element_id.is_none());
    }

    #[test]
    fn test_clear_if_section_only_matches() {
        let mut selection = Selection::default();
        selection.select_section("section-1");

        selection.clear_if_section("section-2");
        assert!(!selection.is_empty());

        selection.clear_if_section("section-1");
        assert!(selection.is_empty());
    }
}
