//! Tests for the arena DOM, the tree walker and the HTML front end.

use strut_dom::{DomTree, ElementData, FilterResult, NodeId, TreeWalker, parse_html};

/// Helper: `<html><body><div id=a><span>x</span></div><p>y</p></body></html>`
fn sample_tree() -> (DomTree, [NodeId; 6]) {
    let mut tree = DomTree::new();
    let html = tree.append_element(NodeId::ROOT, ElementData::new("html"));
    let body = tree.append_element(html, ElementData::new("body"));
    let div = tree.append_element(body, ElementData::new("div").with_attr("id", "a"));
    let span = tree.append_element(div, ElementData::new("span"));
    let _ = tree.append_text(span, "x");
    let p = tree.append_element(body, ElementData::new("p"));
    let text = tree.append_text(p, "y");
    (tree, [html, body, div, span, p, text])
}

#[test]
fn test_walker_visits_in_document_order() {
    let (tree, [html, body, div, span, p, text]) = sample_tree();
    let elements: Vec<NodeId> = TreeWalker::new(&tree, html, |t, id| {
        if t.is_element(id) {
            FilterResult::Accept
        } else {
            FilterResult::Skip
        }
    })
    .collect();
    assert_eq!(elements, vec![body, div, span, p]);

    let all: Vec<NodeId> = TreeWalker::new(&tree, p, |_, _| FilterResult::Accept).collect();
    assert_eq!(all, vec![text]);
}

#[test]
fn test_walker_reject_prunes_subtree() {
    let (tree, [html, body, div, _span, p, text]) = sample_tree();
    let visited: Vec<NodeId> = TreeWalker::new(&tree, html, |t, id| {
        if t.as_element(id).is_some_and(|e| e.tag_name == "div") {
            FilterResult::Reject
        } else {
            FilterResult::Accept
        }
    })
    .collect();
    assert_eq!(visited, vec![body, p, text]);
    assert!(!visited.contains(&div));
}

#[test]
fn test_walker_skip_keeps_children() {
    let (tree, [html, body, div, span, p, _text]) = sample_tree();
    let visited: Vec<NodeId> = TreeWalker::new(&tree, html, |t, id| {
        match t.as_element(id) {
            Some(e) if e.tag_name == "div" => FilterResult::Skip,
            Some(_) => FilterResult::Accept,
            None => FilterResult::Reject,
        }
    })
    .collect();
    assert_eq!(visited, vec![body, span, p]);
    assert!(!visited.contains(&div));
}

#[test]
fn test_styled_element_for_text_is_parent() {
    let (tree, [_html, _body, _div, _span, p, text]) = sample_tree();
    assert_eq!(tree.styled_element(text), Some(p));
    assert_eq!(tree.styled_element(p), Some(p));
}

#[test]
fn test_text_content_and_lookup() {
    let (tree, [_html, body, div, _span, _p, _text]) = sample_tree();
    assert_eq!(tree.text_content(body), "xy");
    assert_eq!(tree.element_by_id("a"), Some(div));
    assert_eq!(tree.element_by_id("missing"), None);
    assert!(tree.is_descendant_of(div, body));
    assert!(!tree.is_descendant_of(body, div));
}

#[test]
fn test_element_classes() {
    let data = ElementData::new("DIV").with_attr("class", "  one two ");
    assert_eq!(data.tag_name, "div");
    assert_eq!(data.classes().collect::<Vec<_>>(), vec!["one", "two"]);
    assert!(data.has_class("two"));
    assert!(!data.has_class("three"));
}

#[test]
fn test_parse_html_builds_arena() {
    let tree = parse_html(
        "<!DOCTYPE html><html><head><title>t</title></head>\
         <body><div id=\"box\" style=\"width: 10px\">hello <b>world</b></div></body></html>",
    )
    .expect("valid html");

    let html = tree.document_element().expect("document element");
    assert_eq!(tree.as_element(html).map(|e| e.tag_name.as_str()), Some("html"));

    let body = tree.body().expect("body");
    let div = tree.element_by_id("box").expect("div#box");
    assert_eq!(tree.parent(div), Some(body));
    assert_eq!(
        tree.as_element(div).and_then(ElementData::style_attribute),
        Some("width: 10px")
    );
    assert_eq!(tree.text_content(div), "hello world");
}
