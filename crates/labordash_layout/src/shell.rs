//! Document shell: `<head>` metadata, theme, inline stylesheet, and scripts.

use crate::node::{Element, Node};

/// Bootswatch FLATLY theme
pub const FLATLY_CSS: &str =
    "https://cdn.jsdelivr.net/npm/bootswatch@5.3.3/dist/flatly/bootstrap.min.css";

/// Bootstrap bundle (tabs, collapse, scrollspy)
pub const BOOTSTRAP_JS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/js/bootstrap.bundle.min.js";

/// Smooth scrolling, active nav link, section offsets under the sticky bar,
/// and the frame loading spinner.
const INLINE_CSS: &str = r#"
html {
    scroll-behavior: smooth;
}
body {
    position: relative;
}
.nav-link.active {
    font-weight: bold;
    text-decoration: underline;
}
.section-header {
    padding-top: 100px;
    margin-top: -80px;
    scroll-margin-top: 80px;
}
.sticky-top {
    position: sticky;
    top: 0;
    z-index: 1000;
}
.dash-loading {
    position: relative;
    min-height: 3rem;
}
.dash-loading > .spinner-border {
    position: absolute;
    top: 50%;
    left: 50%;
}
.dash-loading.is-loaded > .spinner-border {
    display: none;
}
"#;

/// Marks each `.dash-loading` wrapper once its frame has loaded, which hides
/// the spinner. Frames that finished before the script ran are marked at once.
const LOADING_SCRIPT: &str = r#"
document.querySelectorAll('.dash-loading > iframe').forEach(function (frame) {
    var done = function () {
        frame.parentElement.classList.add('is-loaded');
    };
    var doc = frame.contentDocument;
    if (doc && doc.readyState === 'complete' && doc.URL !== 'about:blank') {
        done();
    } else {
        frame.addEventListener('load', done);
    }
});
"#;

/// Page-level settings around the composed content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shell {
    /// Document title
    pub title: String,
    /// Stylesheets linked from `<head>`
    pub stylesheets: Vec<String>,
    /// Scripts loaded at the end of `<body>`
    pub scripts: Vec<String>,
    /// Navbar id scrollspy tracks
    pub spy_target: String,
}

impl Shell {
    /// Shell with the FLATLY theme and the Bootstrap bundle
    #[must_use]
    pub fn new(title: impl Into<String>, spy_target: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            stylesheets: vec![FLATLY_CSS.to_string()],
            scripts: vec![BOOTSTRAP_JS.to_string()],
            spy_target: spy_target.into(),
        }
    }

    /// Wrap page content into a full `<html>` tree
    #[must_use]
    pub fn wrap(&self, content: Vec<Node>) -> Element {
        let head = Element::new("head")
            .child(Element::new("meta").attr("charset", "utf-8"))
            .child(
                Element::new("meta")
                    .attr("name", "viewport")
                    .attr("content", "width=device-width, initial-scale=1"),
            )
            .child(Element::new("title").text(self.title.clone()))
            .children(self.stylesheets.iter().map(|href| {
                Element::new("link")
                    .attr("rel", "stylesheet")
                    .attr("href", href.clone())
            }))
            .child(Element::new("style").text(INLINE_CSS));

        let body = Element::new("body")
            .attr("data-bs-spy", "scroll")
            .attr("data-bs-target", format!("#{}", self.spy_target))
            .attr("data-bs-offset", "100")
            .attr("tabindex", "0")
            .child(Element::new("div").class("container-fluid").children(content))
            .child(
                Element::new("footer")
                    .children(
                        self.scripts
                            .iter()
                            .map(|src| Element::new("script").attr("src", src.clone())),
                    )
                    .child(Element::new("script").text(LOADING_SCRIPT)),
            );

        Element::new("html").attr("lang", "en").child(head).child(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::render_document;

    #[test]
    fn test_head_contents() {
        let root = Shell::new("Forecast", "main-navbar").wrap(Vec::new());
        let titles = root.find_all(|e| e.tag() == "title");
        assert_eq!(titles.len(), 1);
        assert_eq!(titles[0].text_content(), "Forecast");

        let links = root.find_all(|e| e.tag() == "link");
        assert_eq!(links[0].get_attr("href"), Some(FLATLY_CSS));
    }

    #[test]
    fn test_body_scrollspy() {
        let root = Shell::new("Forecast", "main-navbar").wrap(Vec::new());
        let body = root.find_all(|e| e.tag() == "body")[0];
        assert_eq!(body.get_attr("data-bs-spy"), Some("scroll"));
        assert_eq!(body.get_attr("data-bs-target"), Some("#main-navbar"));
    }

    #[test]
    fn test_inline_css_not_escaped() {
        let html = render_document(&Shell::new("Forecast", "nav").wrap(Vec::new()));
        assert!(html.contains(".dash-loading > .spinner-border"));
        assert!(html.contains("scroll-behavior: smooth;"));
    }

    #[test]
    fn test_loading_script_after_bundle() {
        let root = Shell::new("Forecast", "nav").wrap(Vec::new());
        let scripts = root.find_all(|e| e.tag() == "script");
        assert_eq!(scripts.len(), 2);
        assert_eq!(scripts[0].get_attr("src"), Some(BOOTSTRAP_JS));
        assert_eq!(scripts[1].get_attr("src"), None);
        assert!(scripts[1].text_content().contains("classList.add('is-loaded')"));

        let html = render_document(&root);
        assert!(html.contains("frame.addEventListener('load', done);"));
    }

    #[test]
    fn test_content_inside_fluid_container() {
        let root = Shell::new("Forecast", "nav").wrap(vec!["hello".into()]);
        let container = root.find_all(|e| e.has_class("container-fluid"));
        assert_eq!(container.len(), 1);
        assert_eq!(container[0].text_content(), "hello");
    }
}
