//! Labordash Layout
//!
//! Composes the workforce forecast dashboard into an HTML document.
//!
//! The page is built as a typed tree ([`Element`]/[`Node`]) from
//! [`Component`] builders, checked by [`check_page`], and serialized by
//! [`render_document`]. Output is a pure function of the metrics snapshot.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod component;
pub mod composer;
pub mod error;
pub mod html;
pub mod node;
pub mod shell;
pub mod validate;

pub use component::{
    Card, Component, Embed, Finding, FindingKind, MetricCard, NavLink, Navbar, Section, Tab,
    TabGroup, Tone,
};
pub use composer::{Composer, PAGE_TITLE, Page, SECTION_ANCHORS};
pub use error::{LayoutError, LayoutResult};
pub use html::{render_document, render_fragment};
pub use node::{Element, Node};
pub use shell::Shell;
pub use validate::{ValidationIssue, check_page, in_page_anchors};
