//! # Sections
//!
//! A section is a single editable content block within a page. Each section
//! carries a kind tag (the template it was cloned from) and a typed data
//! payload. Updates arrive as patches that merge field-by-field,
//! last-write-wins, dispatching on the payload's variant tag.

use crate::document::DocumentError;
use serde::{Deserialize, Serialize};

/// Closed enumeration of section templates.
///
/// The string tags are the wire/persisted names. Several kinds can share one
/// data family (e.g. both hero templates carry [`HeroData`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionKind {
    #[serde(rename = "hero-1")]
    Hero1,
    #[serde(rename = "hero-2")]
    Hero2,
    #[serde(rename = "collection-grid")]
    CollectionGrid,
    #[serde(rename = "banner")]
    Banner,
    #[serde(rename = "footer-1")]
    Footer1,
    #[serde(rename = "footer-2")]
    Footer2,
    #[serde(rename = "rich-text")]
    RichText,
}

impl SectionKind {
    pub const ALL: [SectionKind; 7] = [
        SectionKind::Hero1,
        SectionKind::Hero2,
        SectionKind::CollectionGrid,
        SectionKind::Banner,
        SectionKind::Footer1,
        SectionKind::Footer2,
        SectionKind::RichText,
    ];

    /// Parse a kind tag. Returns `None` for anything outside the enumeration.
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.tag() == tag)
    }

    /// The persisted string tag for this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            SectionKind::Hero1 => "hero-1",
            SectionKind::Hero2 => "hero-2",
            SectionKind::CollectionGrid => "collection-grid",
            SectionKind::Banner => "banner",
            SectionKind::Footer1 => "footer-1",
            SectionKind::Footer2 => "footer-2",
            SectionKind::RichText => "rich-text",
        }
    }

    /// Human-readable label used as the default section name.
    pub fn display_name(&self) -> &'static str {
        match self {
            SectionKind::Hero1 => "Hero",
            SectionKind::Hero2 => "Hero (split)",
            SectionKind::CollectionGrid => "Collection grid",
            SectionKind::Banner => "Banner",
            SectionKind::Footer1 => "Footer",
            SectionKind::Footer2 => "Footer (columns)",
            SectionKind::RichText => "Rich text",
        }
    }

    /// Default data payload for a section cloned from this template.
    pub fn template(&self) -> SectionData {
        match self {
            SectionKind::Hero1 | SectionKind::Hero2 => SectionData::Hero(HeroData::default()),
            SectionKind::CollectionGrid => {
                SectionData::CollectionGrid(CollectionGridData::default())
            }
            SectionKind::Banner => SectionData::Banner(BannerData::default()),
            SectionKind::Footer1 | SectionKind::Footer2 => {
                SectionData::Footer(FooterData::default())
            }
            SectionKind::RichText => SectionData::RichText(RichTextData::default()),
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Typed payload of a section, one variant per template family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "kebab-case")]
pub enum SectionData {
    Hero(HeroData),
    CollectionGrid(CollectionGridData),
    Banner(BannerData),
    Footer(FooterData),
    RichText(RichTextData),
}

impl SectionData {
    /// Name of the variant tag, for diagnostics.
    pub fn family(&self) -> &'static str {
        match self {
            SectionData::Hero(_) => "hero",
            SectionData::CollectionGrid(_) => "collection-grid",
            SectionData::Banner(_) => "banner",
            SectionData::Footer(_) => "footer",
            SectionData::RichText(_) => "rich-text",
        }
    }

    /// Merge a patch into this payload, last-write-wins per field.
    ///
    /// Fails without touching any field when the patch targets a different
    /// family than the payload holds.
    pub fn merge(&mut self, patch: &SectionPatch) -> Result<(), DocumentError> {
        match (self, patch) {
            (SectionData::Hero(data), SectionPatch::Hero(patch)) => {
                merge_field(&mut data.title, &patch.title);
                merge_field(&mut data.subtitle, &patch.subtitle);
                merge_field(&mut data.image_url, &patch.image_url);
                merge_field(&mut data.cta_label, &patch.cta_label);
                merge_field(&mut data.cta_link, &patch.cta_link);
                Ok(())
            }
            (SectionData::CollectionGrid(data), SectionPatch::CollectionGrid(patch)) => {
                merge_field(&mut data.heading, &patch.heading);
                merge_field(&mut data.collection, &patch.collection);
                merge_field(&mut data.columns, &patch.columns);
                merge_field(&mut data.max_items, &patch.max_items);
                Ok(())
            }
            (SectionData::Banner(data), SectionPatch::Banner(patch)) => {
                merge_field(&mut data.text, &patch.text);
                merge_field(&mut data.link, &patch.link);
                merge_field(&mut data.background, &patch.background);
                Ok(())
            }
            (SectionData::Footer(data), SectionPatch::Footer(patch)) => {
                merge_field(&mut data.copyright, &patch.copyright);
                merge_field(&mut data.links, &patch.links);
                Ok(())
            }
            (SectionData::RichText(data), SectionPatch::RichText(patch)) => {
                merge_field(&mut data.body, &patch.body);
                Ok(())
            }
            (data, patch) => Err(DocumentError::FamilyMismatch {
                data: data.family(),
                patch: patch.family(),
            }),
        }
    }
}

fn merge_field<T: Clone>(field: &mut T, patch: &Option<T>) {
    if let Some(value) = patch {
        *field = value.clone();
    }
}

/// Partial update for a section payload. Mirrors [`SectionData`] with every
/// field optional; absent fields are left untouched on merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "kebab-case")]
pub enum SectionPatch {
    Hero(HeroPatch),
    CollectionGrid(CollectionGridPatch),
    Banner(BannerPatch),
    Footer(FooterPatch),
    RichText(RichTextPatch),
}

impl SectionPatch {
    pub fn family(&self) -> &'static str {
        match self {
            SectionPatch::Hero(_) => "hero",
            SectionPatch::CollectionGrid(_) => "collection-grid",
            SectionPatch::Banner(_) => "banner",
            SectionPatch::Footer(_) => "footer",
            SectionPatch::RichText(_) => "rich-text",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroData {
    pub title: String,
    pub subtitle: String,
    pub image_url: String,
    pub cta_label: String,
    pub cta_link: String,
}

impl Default for HeroData {
    fn default() -> Self {
        Self {
            title: "Welcome".to_string(),
            subtitle: String::new(),
            image_url: String::new(),
            cta_label: "Shop now".to_string(),
            cta_link: "/".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeroPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub cta_label: Option<String>,
    #[serde(default)]
    pub cta_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionGridData {
    pub heading: String,
    /// Slug of the collection to render.
    pub collection: String,
    pub columns: u8,
    pub max_items: u32,
}

impl Default for CollectionGridData {
    fn default() -> Self {
        Self {
            heading: "Featured".to_string(),
            collection: "all".to_string(),
            columns: 3,
            max_items: 12,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionGridPatch {
    #[serde(default)]
    pub heading: Option<String>,
    #[serde(default)]
    pub collection: Option<String>,
    #[serde(default)]
    pub columns: Option<u8>,
    #[serde(default)]
    pub max_items: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BannerData {
    pub text: String,
    pub link: String,
    pub background: String,
}

impl Default for BannerData {
    fn default() -> Self {
        Self {
            text: String::new(),
            link: String::new(),
            background: "#ffffff".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BannerPatch {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub background: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FooterData {
    pub copyright: String,
    pub links: Vec<FooterLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FooterLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FooterPatch {
    #[serde(default)]
    pub copyright: Option<String>,
    #[serde(default)]
    pub links: Option<Vec<FooterLink>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichTextData {
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichTextPatch {
    #[serde(default)]
    pub body: Option<String>,
}

/// A single editable content block within a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Unique within the owning page for the lifetime of the page.
    pub id: String,
    pub kind: SectionKind,
    /// Display label shown in the layer list.
    pub name: String,
    pub data: SectionData,
}

impl Section {
    /// Clone a section from its kind's template.
    pub fn from_template(id: impl Into<String>, kind: SectionKind) -> Self {
        Self {
            id: id.into(),
            kind,
            name: kind.display_name().to_string(),
            data: kind.template(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_tags() {
        for kind in SectionKind::ALL {
            assert_eq!(SectionKind::parse(kind.tag()), Some(kind));
        }
        assert_eq!(SectionKind::parse("sidebar"), None);
    }

    #[test]
    fn test_template_matches_kind_family() {
        let data = SectionKind::Hero2.template();
        assert!(matches!(data, SectionData::Hero(_)));

        let data = SectionKind::Footer2.template();
        assert!(matches!(data, SectionData::Footer(_)));
    }

    #[test]
    fn test_merge_is_last_write_wins_per_field() {
        let mut data = SectionKind::Hero1.template();

        data.merge(&SectionPatch::Hero(HeroPatch {
            title: Some("Summer sale".to_string()),
            ..Default::default()
        }))
        .unwrap();

        data.merge(&SectionPatch::Hero(HeroPatch {
            subtitle: Some("Up to 50% off".to_string()),
            ..Default::default()
        }))
        .unwrap();

        match data {
            SectionData::Hero(hero) => {
                assert_eq!(hero.title, "Summer sale");
                assert_eq!(hero.subtitle, "Up to 50% off");
                // Untouched fields keep template defaults
                assert_eq!(hero.cta_label, "Shop now");
            }
            _ => panic!("expected hero data"),
        }
    }

    #[test]
    fn test_merge_rejects_family_mismatch() {
        let mut data = SectionKind::Banner.template();
        let before = data.clone();

        let result = data.merge(&SectionPatch::Hero(HeroPatch::default()));
        assert!(result.is_err());
        assert_eq!(data, before);
    }

    #[test]
    fn test_section_data_serde_round_trip() {
        let data = SectionData::CollectionGrid(CollectionGridData::default());
        let json = serde_json::to_string(&data).unwrap();
        let back: SectionData = serde_json::from_str(&json).unwrap();
        assert_eq!(data, back);
    }
}
