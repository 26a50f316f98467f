//! # Pagecraft Document
//!
//! Data model for the page-builder document store.
//!
//! A [`SiteDocument`] owns an ordered collection of [`Page`]s, each holding
//! an ordered sequence of [`Section`]s. Section payloads are a tagged union
//! ([`SectionData`]) with one strongly-typed variant per template family.
//!
//! ## Ownership
//!
//! - Sections are exclusively owned by their parent page; never shared.
//! - Section ids come from a monotonic counter owned by the document, so
//!   ids stay unique across add/duplicate/undo sequences.
//! - All writes go through the mutation layer in `pagecraft-editor`; this
//!   crate only exposes the structural operations mutations are built from.

mod document;
mod page;
mod persist;
mod section;

pub use document::{DocumentError, SiteDocument};
pub use page::{Page, PageSettings};
pub use persist::{document_from_json, document_to_json};
pub use section::{
    BannerData, BannerPatch, CollectionGridData, CollectionGridPatch, FooterData, FooterLink,
    FooterPatch, HeroData, HeroPatch, RichTextData, RichTextPatch, Section, SectionData,
    SectionKind, SectionPatch,
};
