//! Dashboard components lowered onto the document tree.
//!
//! Markup follows Bootstrap 5 conventions so the stock bundle script provides
//! the tab widget, the collapsing navbar, and scrollspy highlighting.

use crate::error::{LayoutError, LayoutResult};
use crate::node::{Element, Node};
use labordash_core::Artifact;

/// Anything that renders to a single element
pub trait Component {
    /// Build the element subtree
    fn render(&self) -> Element;
}

/// `div.row` with extra classes
#[must_use]
pub fn row(classes: &str) -> Element {
    Element::new("div").class("row").class(classes)
}

/// Grid column; `classes` carries the breakpoint spans (`col-12 col-md-3`)
#[must_use]
pub fn col(classes: &str) -> Element {
    Element::new("div").class(classes)
}

/// Full-width row holding a single full-width column
#[must_use]
pub fn full_row(row_classes: &str, content: Vec<Node>) -> Element {
    row(row_classes).child(col("col-12").children(content))
}

/// A link in the navigation bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    /// Visible label
    pub label: String,
    /// Section anchor without `#`
    pub anchor: String,
}

impl NavLink {
    /// Create a new nav link
    #[must_use]
    pub fn new(label: impl Into<String>, anchor: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            anchor: anchor.into(),
        }
    }
}

/// Sticky top navigation bar with a collapsible link list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navbar {
    /// Element id, used as the scrollspy target
    pub id: String,
    /// Brand text
    pub brand: String,
    /// Section links
    pub links: Vec<NavLink>,
}

impl Component for Navbar {
    fn render(&self) -> Element {
        let brand = Element::new("a")
            .attr("href", "#")
            .style("text-decoration", "none")
            .child(
                row("align-items-center g-0").child(
                    col("col").child(
                        Element::new("span")
                            .class("navbar-brand ms-2")
                            .text(self.brand.clone()),
                    ),
                ),
            );

        let toggler = Element::new("button")
            .id("navbar-toggler")
            .class("navbar-toggler")
            .attr("type", "button")
            .attr("data-bs-toggle", "collapse")
            .attr("data-bs-target", "#navbar-collapse")
            .attr("aria-controls", "navbar-collapse")
            .attr("aria-expanded", "false")
            .attr("aria-label", "Toggle navigation")
            .child(Element::new("span").class("navbar-toggler-icon"));

        let links = Element::new("ul")
            .class("navbar-nav ms-auto")
            .children(self.links.iter().map(|link| {
                Element::new("li").class("nav-item").child(
                    Element::new("a")
                        .class("nav-link")
                        .attr("href", format!("#{}", link.anchor))
                        .text(link.label.clone()),
                )
            }));

        Element::new("nav")
            .id(self.id.clone())
            .class("navbar navbar-expand-md navbar-dark bg-primary mb-4 sticky-top")
            .child(
                Element::new("div")
                    .class("container")
                    .child(brand)
                    .child(toggler)
                    .child(
                        Element::new("div")
                            .id("navbar-collapse")
                            .class("collapse navbar-collapse")
                            .child(links),
                    ),
            )
    }
}

/// Color of a metric value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Neutral headline figure
    Primary,
    /// Figure describing a shortfall
    Danger,
}

impl Tone {
    /// Bootstrap text class
    #[must_use]
    pub fn class(&self) -> &'static str {
        match self {
            Self::Primary => "text-primary",
            Self::Danger => "text-danger",
        }
    }
}

/// Card showing one headline number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricCard {
    /// Card title
    pub title: String,
    /// Metric key the value comes from
    pub metric: &'static str,
    /// Formatted value
    pub value: String,
    /// Caption under the value
    pub caption: String,
    /// Value color
    pub tone: Tone,
}

impl Component for MetricCard {
    fn render(&self) -> Element {
        col("col-12 col-md-3 mb-4").child(
            Element::new("div").class("card h-100").child(
                Element::new("div")
                    .class("card-body")
                    .child(
                        Element::new("h5")
                            .class("card-title")
                            .text(self.title.clone()),
                    )
                    .child(
                        Element::new("h2")
                            .class(self.tone.class())
                            .attr("data-metric", self.metric)
                            .text(self.value.clone()),
                    )
                    .child(
                        Element::new("p")
                            .class("text-muted")
                            .text(self.caption.clone()),
                    ),
            ),
        )
    }
}

/// Card with a header title and free-form body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// Header title
    pub title: String,
    /// Body content
    pub body: Vec<Node>,
}

impl Component for Card {
    fn render(&self) -> Element {
        Element::new("div")
            .class("card")
            .child(
                Element::new("div").class("card-header").child(
                    Element::new("h5")
                        .class("card-title")
                        .text(self.title.clone()),
                ),
            )
            .child(
                Element::new("div")
                    .class("card-body")
                    .children(self.body.iter().cloned()),
            )
    }
}

/// Bold lead-in of a caption
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindingKind {
    /// "Key Finding: "
    KeyFinding,
    /// "Methodological Note: "
    MethodologicalNote,
}

impl FindingKind {
    /// Lead-in text
    #[must_use]
    pub fn lead(&self) -> &'static str {
        match self {
            Self::KeyFinding => "Key Finding: ",
            Self::MethodologicalNote => "Methodological Note: ",
        }
    }
}

/// Caption paragraph under a chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// Lead-in
    pub kind: FindingKind,
    /// Caption body
    pub text: String,
    /// Spacing classes on the paragraph
    pub spacing: &'static str,
}

impl Finding {
    /// Key finding with default spacing
    #[must_use]
    pub fn key(text: impl Into<String>) -> Self {
        Self {
            kind: FindingKind::KeyFinding,
            text: text.into(),
            spacing: "mt-3",
        }
    }

    /// Methodological note with default spacing
    #[must_use]
    pub fn note(text: impl Into<String>) -> Self {
        Self {
            kind: FindingKind::MethodologicalNote,
            text: text.into(),
            spacing: "mt-3",
        }
    }

    /// Override the spacing classes
    #[must_use]
    pub fn with_spacing(mut self, spacing: &'static str) -> Self {
        self.spacing = spacing;
        self
    }
}

impl Component for Finding {
    fn render(&self) -> Element {
        Element::new("div").child(
            Element::new("p")
                .class(self.spacing)
                .child(Element::new("strong").text(self.kind.lead()))
                .text(self.text.clone()),
        )
    }
}

/// Inline frame embedding a visualization artifact behind a loading spinner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Embed {
    /// Artifact to load
    pub artifact: Artifact,
    /// Frame height in pixels
    pub height_px: u32,
}

impl Embed {
    /// Create a new embed
    #[must_use]
    pub fn new(artifact: Artifact, height_px: u32) -> Self {
        Self {
            artifact,
            height_px,
        }
    }
}

impl Component for Embed {
    fn render(&self) -> Element {
        Element::new("div")
            .class("dash-loading")
            .attr("data-loading-type", "circle")
            .child(
                Element::new("div")
                    .class("spinner-border text-primary")
                    .attr("role", "status")
                    .child(Element::new("span").class("visually-hidden").text("Loading...")),
            )
            .child(
                Element::new("iframe")
                    .id(self.artifact.frame_id)
                    .attr("src", self.artifact.url())
                    .style("width", "100%")
                    .style("height", format!("{}px", self.height_px))
                    .style("border", "none"),
            )
    }
}

/// One view in a tab group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    /// Pane id
    pub id: String,
    /// Tab label
    pub label: String,
    /// Pane content
    pub content: Vec<Node>,
}

impl Tab {
    /// Create a new tab
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>, content: Vec<Node>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            content,
        }
    }
}

/// Mutually exclusive views with exactly one initially active
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabGroup {
    id: String,
    active: String,
    tabs: Vec<Tab>,
}

impl TabGroup {
    /// Create a tab group
    ///
    /// # Errors
    ///
    /// Returns error if `tabs` is empty, a tab id repeats, or `active` names no tab
    pub fn new(
        id: impl Into<String>,
        active: impl Into<String>,
        tabs: Vec<Tab>,
    ) -> LayoutResult<Self> {
        let id = id.into();
        let active = active.into();

        if tabs.is_empty() {
            return Err(LayoutError::EmptyTabGroup { group: id });
        }
        for (i, tab) in tabs.iter().enumerate() {
            if tabs[..i].iter().any(|t| t.id == tab.id) {
                return Err(LayoutError::DuplicateTab {
                    group: id,
                    tab: tab.id.clone(),
                });
            }
        }
        if !tabs.iter().any(|t| t.id == active) {
            return Err(LayoutError::UnknownActiveTab { group: id, active });
        }

        Ok(Self { id, active, tabs })
    }

    /// Group id
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Initially active tab id
    #[must_use]
    pub fn active(&self) -> &str {
        &self.active
    }

    /// Tabs in display order
    #[must_use]
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }
}

impl Component for TabGroup {
    fn render(&self) -> Element {
        let nav = Element::new("ul")
            .id(self.id.clone())
            .class("nav nav-tabs")
            .attr("role", "tablist")
            .children(self.tabs.iter().map(|tab| {
                let is_active = tab.id == self.active;
                let button = Element::new("button")
                    .id(format!("{}-label", tab.id))
                    .class("nav-link")
                    .attr("type", "button")
                    .attr("role", "tab")
                    .attr("data-bs-toggle", "tab")
                    .attr("data-bs-target", format!("#{}", tab.id))
                    .attr("aria-controls", tab.id.clone())
                    .attr("aria-selected", if is_active { "true" } else { "false" })
                    .text(tab.label.clone());
                let button = if is_active { button.class("active") } else { button };
                Element::new("li")
                    .class("nav-item")
                    .attr("role", "presentation")
                    .child(button)
            }));

        let panes = Element::new("div")
            .class("tab-content pt-3")
            .children(self.tabs.iter().map(|tab| {
                let pane = Element::new("div")
                    .id(tab.id.clone())
                    .class("tab-pane fade")
                    .attr("role", "tabpanel")
                    .attr("aria-labelledby", format!("{}-label", tab.id))
                    .children(tab.content.iter().cloned());
                if tab.id == self.active {
                    pane.class("show active")
                } else {
                    pane
                }
            }));

        Element::new("div").class("tab-group").child(nav).child(panes)
    }
}

/// Page section introduced by an anchored heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Anchor id on the heading
    pub anchor: String,
    /// Heading text
    pub title: String,
    /// Muted subtitle
    pub subtitle: String,
    /// Rows following the heading
    pub rows: Vec<Element>,
}

impl Component for Section {
    fn render(&self) -> Element {
        let header = full_row(
            "mb-3",
            vec![
                Element::new("h3")
                    .id(self.anchor.clone())
                    .class("mb-3 section-header")
                    .text(self.title.clone())
                    .into(),
                Element::new("p")
                    .class("text-muted")
                    .text(self.subtitle.clone())
                    .into(),
            ],
        );

        Element::new("section")
            .attr("aria-labelledby", self.anchor.clone())
            .child(header)
            .children(self.rows.iter().cloned())
    }
}
