//! Structural checks on a composed page.
//!
//! Runs on the finished tree, so it catches anything the component builders
//! let through: in-page links must land on exactly one heading, ids must be
//! unique, and every tab group must have exactly one active tab whose pane is
//! the active pane.

use crate::node::Element;
use indexmap::IndexMap;

/// A broken structural invariant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// An in-page link target does not resolve to exactly one element
    BrokenAnchor {
        /// Fragment without the leading `#`
        anchor: String,
        /// Number of elements carrying that id
        matches: usize,
    },
    /// An in-page link target resolves to something that is not a heading
    AnchorNotHeading {
        /// Fragment without the leading `#`
        anchor: String,
        /// Tag of the target element
        tag: String,
    },
    /// An id appears on more than one element
    DuplicateId {
        /// Repeated id
        id: String,
        /// Occurrences
        count: usize,
    },
    /// A tab list contains no tabs
    EmptyTabGroup {
        /// Tab list id
        group: String,
    },
    /// A tab list does not have exactly one active tab
    ActiveTabCount {
        /// Tab list id
        group: String,
        /// Active tabs found
        count: usize,
    },
    /// A tab points at a pane that does not exist
    MissingPane {
        /// Tab list id
        group: String,
        /// Pane id the tab targets
        pane: String,
    },
    /// The active tab and the visible pane disagree
    PaneMismatch {
        /// Tab list id
        group: String,
        /// Pane id of the active tab
        pane: String,
    },
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BrokenAnchor { anchor, matches } => {
                write!(f, "Link #{} resolves to {} elements", anchor, matches)
            }
            Self::AnchorNotHeading { anchor, tag } => {
                write!(f, "Link #{} targets <{}>, not a heading", anchor, tag)
            }
            Self::DuplicateId { id, count } => write!(f, "Id {} used {} times", id, count),
            Self::EmptyTabGroup { group } => write!(f, "Tab group {} has no tabs", group),
            Self::ActiveTabCount { group, count } => {
                write!(f, "Tab group {} has {} active tabs", group, count)
            }
            Self::MissingPane { group, pane } => {
                write!(f, "Tab group {} targets missing pane {}", group, pane)
            }
            Self::PaneMismatch { group, pane } => {
                write!(f, "Tab group {} shows a pane other than {}", group, pane)
            }
        }
    }
}

impl std::error::Error for ValidationIssue {}

/// Run every structural check over a tree
///
/// # Errors
///
/// Returns every issue found, in document order
pub fn check_page(root: &Element) -> Result<(), Vec<ValidationIssue>> {
    let ids = id_counts(root);
    let mut issues = Vec::new();

    for (id, count) in &ids {
        if *count > 1 {
            issues.push(ValidationIssue::DuplicateId {
                id: (*id).to_string(),
                count: *count,
            });
        }
    }

    issues.extend(check_anchors(root, &ids));
    issues.extend(check_tab_groups(root));

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

/// In-page link targets (`href="#x"`), deduplicated, in document order
#[must_use]
pub fn in_page_anchors(root: &Element) -> Vec<&str> {
    let mut anchors: Vec<&str> = Vec::new();
    root.walk(&mut |el| {
        if el.tag() != "a" {
            return;
        }
        if let Some(anchor) = el.get_attr("href").and_then(|h| h.strip_prefix('#')) {
            if !anchor.is_empty() && !anchors.contains(&anchor) {
                anchors.push(anchor);
            }
        }
    });
    anchors
}

fn id_counts(root: &Element) -> IndexMap<&str, usize> {
    let mut ids: IndexMap<&str, usize> = IndexMap::new();
    root.walk(&mut |el| {
        if let Some(id) = el.element_id() {
            *ids.entry(id).or_insert(0) += 1;
        }
    });
    ids
}

fn check_anchors(root: &Element, ids: &IndexMap<&str, usize>) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for anchor in in_page_anchors(root) {
        let matches = ids.get(anchor).copied().unwrap_or(0);
        if matches != 1 {
            issues.push(ValidationIssue::BrokenAnchor {
                anchor: anchor.to_string(),
                matches,
            });
            continue;
        }
        if let Some(target) = root.find_by_id(anchor) {
            if !target.is_heading() {
                issues.push(ValidationIssue::AnchorNotHeading {
                    anchor: anchor.to_string(),
                    tag: target.tag().to_string(),
                });
            }
        }
    }
    issues
}

fn check_tab_groups(root: &Element) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for list in root.find_all(|el| el.get_attr("role") == Some("tablist")) {
        let group = list.element_id().unwrap_or("<anonymous>").to_string();
        let tabs = list.find_all(|el| el.get_attr("role") == Some("tab"));

        if tabs.is_empty() {
            issues.push(ValidationIssue::EmptyTabGroup { group });
            continue;
        }

        let active: Vec<&&Element> = tabs.iter().filter(|t| t.has_class("active")).collect();
        if active.len() != 1 {
            issues.push(ValidationIssue::ActiveTabCount {
                group,
                count: active.len(),
            });
            continue;
        }

        for tab in &tabs {
            let Some(pane_id) = pane_target(tab) else {
                continue;
            };
            let Some(pane) = root.find_by_id(pane_id) else {
                issues.push(ValidationIssue::MissingPane {
                    group: group.clone(),
                    pane: pane_id.to_string(),
                });
                continue;
            };
            if tab.has_class("active") != pane.has_class("active") {
                let active_pane = pane_target(active[0]).unwrap_or(pane_id);
                issues.push(ValidationIssue::PaneMismatch {
                    group: group.clone(),
                    pane: active_pane.to_string(),
                });
            }
        }
    }

    issues
}

fn pane_target(tab: &Element) -> Option<&str> {
    tab.get_attr("data-bs-target")
        .and_then(|t| t.strip_prefix('#'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav(anchors: &[&str]) -> Element {
        Element::new("ul").children(anchors.iter().map(|a| {
            Element::new("a")
                .class("nav-link")
                .attr("href", format!("#{}", a))
                .text(*a)
        }))
    }

    fn tab(id: &str, active: bool) -> Element {
        let el = Element::new("button")
            .class("nav-link")
            .attr("role", "tab")
            .attr("data-bs-target", format!("#{}", id));
        if active { el.class("active") } else { el }
    }

    fn pane(id: &str, active: bool) -> Element {
        let el = Element::new("div").id(id).class("tab-pane").attr("role", "tabpanel");
        if active { el.class("active") } else { el }
    }

    #[test]
    fn test_valid_page() {
        let root = Element::new("body")
            .child(nav(&["summary"]))
            .child(Element::new("h3").id("summary"))
            .child(
                Element::new("ul")
                    .id("demand-tabs")
                    .attr("role", "tablist")
                    .child(tab("tab-a", true))
                    .child(tab("tab-b", false)),
            )
            .child(pane("tab-a", true))
            .child(pane("tab-b", false));

        assert_eq!(check_page(&root), Ok(()));
    }

    #[test]
    fn test_missing_anchor() {
        let root = Element::new("body").child(nav(&["jobs"]));
        let issues = check_page(&root).unwrap_err();
        assert_eq!(
            issues,
            vec![ValidationIssue::BrokenAnchor {
                anchor: "jobs".to_string(),
                matches: 0
            }]
        );
    }

    #[test]
    fn test_anchor_must_be_heading() {
        let root = Element::new("body")
            .child(nav(&["jobs"]))
            .child(Element::new("div").id("jobs"));
        let issues = check_page(&root).unwrap_err();
        assert_eq!(
            issues,
            vec![ValidationIssue::AnchorNotHeading {
                anchor: "jobs".to_string(),
                tag: "div".to_string()
            }]
        );
    }

    #[test]
    fn test_duplicate_heading_ids() {
        let root = Element::new("body")
            .child(nav(&["supply"]))
            .child(Element::new("h3").id("supply"))
            .child(Element::new("h3").id("supply"));
        let issues = check_page(&root).unwrap_err();
        assert!(issues.contains(&ValidationIssue::DuplicateId {
            id: "supply".to_string(),
            count: 2
        }));
        assert!(issues.contains(&ValidationIssue::BrokenAnchor {
            anchor: "supply".to_string(),
            matches: 2
        }));
    }

    #[test]
    fn test_bare_hash_link_ignored() {
        let root = Element::new("body").child(Element::new("a").attr("href", "#"));
        assert_eq!(in_page_anchors(&root), Vec::<&str>::new());
        assert!(check_page(&root).is_ok());
    }

    #[test]
    fn test_empty_tab_group() {
        let root = Element::new("ul").id("jobs-tabs").attr("role", "tablist");
        assert_eq!(
            check_page(&root).unwrap_err(),
            vec![ValidationIssue::EmptyTabGroup {
                group: "jobs-tabs".to_string()
            }]
        );
    }

    #[test]
    fn test_two_active_tabs() {
        let root = Element::new("div")
            .child(
                Element::new("ul")
                    .id("supply-tabs")
                    .attr("role", "tablist")
                    .child(tab("tab-a", true))
                    .child(tab("tab-b", true)),
            )
            .child(pane("tab-a", true))
            .child(pane("tab-b", true));
        assert_eq!(
            check_page(&root).unwrap_err(),
            vec![ValidationIssue::ActiveTabCount {
                group: "supply-tabs".to_string(),
                count: 2
            }]
        );
    }

    #[test]
    fn test_pane_mismatch_and_missing_pane() {
        let root = Element::new("div")
            .child(
                Element::new("ul")
                    .id("shortage-tabs")
                    .attr("role", "tablist")
                    .child(tab("tab-a", true))
                    .child(tab("tab-b", false))
                    .child(tab("tab-c", false)),
            )
            .child(pane("tab-a", false))
            .child(pane("tab-b", true));
        let issues = check_page(&root).unwrap_err();
        assert!(issues.contains(&ValidationIssue::PaneMismatch {
            group: "shortage-tabs".to_string(),
            pane: "tab-a".to_string()
        }));
        assert!(issues.contains(&ValidationIssue::MissingPane {
            group: "shortage-tabs".to_string(),
            pane: "tab-c".to_string()
        }));
    }

    #[test]
    fn test_issue_display() {
        let issue = ValidationIssue::ActiveTabCount {
            group: "demand-tabs".to_string(),
            count: 0,
        };
        assert_eq!(issue.to_string(), "Tab group demand-tabs has 0 active tabs");
    }
}
