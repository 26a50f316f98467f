//! Pages: one routable view of the site, owning an ordered section sequence.

use crate::section::Section;
use serde::{Deserialize, Serialize};

/// Head metadata for a page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageSettings {
    pub title: String,
    pub description: String,
}

/// An ordered collection of sections representing one routable view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    pub name: String,
    /// Route path, e.g. `/` or `/about`.
    pub path: String,
    pub sections: Vec<Section>,
    pub settings: PageSettings,
}

impl Page {
    pub fn new(id: impl Into<String>, name: impl Into<String>, path: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            settings: PageSettings {
                title: name.clone(),
                description: String::new(),
            },
            name,
            path: path.into(),
            sections: Vec::new(),
        }
    }

    pub fn section(&self, section_id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == section_id)
    }

    pub fn section_mut(&mut self, section_id: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == section_id)
    }

    pub fn section_index(&self, section_id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == section_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::SectionKind;

    #[test]
    fn test_new_page_defaults_title_to_name() {
        let page = Page::new("page-1", "Home", "/");
        assert_eq!(page.settings.title, "Home");
        assert!(page.sections.is_empty());
    }

    #[test]
    fn test_section_lookup() {
        let mut page = Page::new("page-1", "Home", "/");
        page.sections
            .push(Section::from_template("sec-1", SectionKind::Banner));
        page.sections
            .push(Section::from_template("sec-2", SectionKind::Hero1));

        assert_eq!(page.section_index("sec-2"), Some(1));
        assert!(page.section("sec-3").is_none());
    }
}
