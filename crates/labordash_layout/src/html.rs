//! HTML serialization for the document tree.

use crate::node::{Element, Node};

/// Elements that never have content or a closing tag
const VOID_ELEMENTS: [&str; 7] = ["area", "br", "hr", "img", "input", "link", "meta"];

/// Elements whose text content is emitted verbatim
const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

/// Serialize a full document, prefixed with the HTML5 doctype
#[must_use]
pub fn render_document(root: &Element) -> String {
    let mut out = String::from("<!DOCTYPE html>\n");
    render_element(root, &mut out);
    out.push('\n');
    out
}

/// Serialize a single element and its subtree
#[must_use]
pub fn render_fragment(el: &Element) -> String {
    let mut out = String::new();
    render_element(el, &mut out);
    out
}

fn render_element(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(el.tag());

    if let Some(id) = el.element_id() {
        push_attr(out, "id", id);
    }
    if !el.classes().is_empty() {
        push_attr(out, "class", &el.classes().join(" "));
    }
    for (name, value) in el.attrs() {
        push_attr(out, name, value);
    }
    if !el.styles().is_empty() {
        let style: Vec<String> = el
            .styles()
            .iter()
            .map(|(prop, value)| format!("{}: {}", prop, value))
            .collect();
        push_attr(out, "style", &style.join("; "));
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&el.tag()) {
        return;
    }

    let raw = RAW_TEXT_ELEMENTS.contains(&el.tag());
    for child in el.child_nodes() {
        match child {
            Node::Element(inner) => render_element(inner, out),
            Node::Text(text) if raw => out.push_str(text),
            Node::Text(text) => out.push_str(&escape_text(text)),
        }
    }

    out.push_str("</");
    out.push_str(el.tag());
    out.push('>');
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_attr(value));
    out.push('"');
}

/// Escape character data
#[must_use]
pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape an attribute value for a double-quoted attribute
#[must_use]
pub fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;").replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_simple() {
        let el = Element::new("p").class("lead").text("Hello");
        assert_eq!(render_fragment(&el), r#"<p class="lead">Hello</p>"#);
    }

    #[test]
    fn test_attribute_order() {
        let el = Element::new("iframe")
            .attr("src", "/assets/skill_heatmap.html")
            .id("skill-heatmap")
            .style("width", "100%")
            .style("height", "600px")
            .class("embed");
        assert_eq!(
            render_fragment(&el),
            concat!(
                r#"<iframe id="skill-heatmap" class="embed" src="/assets/skill_heatmap.html""#,
                r#" style="width: 100%; height: 600px"></iframe>"#
            )
        );
    }

    #[test]
    fn test_void_elements() {
        let el = Element::new("div").child(Element::new("hr")).child(
            Element::new("meta").attr("charset", "utf-8"),
        );
        assert_eq!(render_fragment(&el), r#"<div><hr><meta charset="utf-8"></div>"#);
    }

    #[test]
    fn test_text_is_escaped() {
        let el = Element::new("p").text("Enrollment & Graduates <2030>");
        assert_eq!(
            render_fragment(&el),
            "<p>Enrollment &amp; Graduates &lt;2030&gt;</p>"
        );
    }

    #[test]
    fn test_attribute_is_escaped() {
        let el = Element::new("div").attr("onload", r#"add('x') "y""#);
        assert_eq!(
            render_fragment(&el),
            r#"<div onload="add(&#39;x&#39;) &quot;y&quot;"></div>"#
        );
    }

    #[test]
    fn test_raw_text_elements() {
        let el = Element::new("style").text(".a > .b { color: red; }");
        assert_eq!(render_fragment(&el), "<style>.a > .b { color: red; }</style>");
    }

    #[test]
    fn test_document_doctype() {
        let doc = render_document(&Element::new("html"));
        assert_eq!(doc, "<!DOCTYPE html>\n<html></html>\n");
    }

    proptest::proptest! {
        #[test]
        fn prop_escaped_text_has_no_markup(s in ".*") {
            let escaped = escape_text(&s);
            proptest::prop_assert!(!escaped.contains('<'));
            proptest::prop_assert!(!escaped.contains('>'));
        }

        #[test]
        fn prop_escaped_attr_has_no_quotes(s in ".*") {
            let escaped = escape_attr(&s);
            proptest::prop_assert!(!escaped.contains('"'));
            proptest::prop_assert!(!escaped.contains('\''));
        }

        #[test]
        fn prop_render_deterministic(text in ".*", id in "[a-z][a-z0-9-]{0,12}") {
            let el = Element::new("div").id(id).child(Element::new("p").text(text));
            proptest::prop_assert_eq!(render_fragment(&el), render_fragment(&el.clone()));
        }
    }
}
