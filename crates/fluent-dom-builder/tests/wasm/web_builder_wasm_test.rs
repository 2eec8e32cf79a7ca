//! Browser Host WASM Tests
//!
//! Runs the builder against the real DOM through `web_sys`.
//!
//! **Run with**: `wasm-pack test --headless --firefox crates/fluent-dom-builder`

#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use fluent_dom_builder::builder::html::{button, div, li, ul};
use fluent_dom_builder::{BuilderError, DomError, Element, ElementBuilder, document};
use serde_json::{Map, json};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

// ============================================================================
// Construction
// ============================================================================

/// Test element creation through the window document
#[wasm_bindgen_test]
fn test_create_element() {
	let doc = document().unwrap();

	let element = ElementBuilder::create(&doc, "section").unwrap().build();

	assert_eq!(Element::tag_name(&element), "SECTION");
}

/// Test that the browser rejects invalid tag names
#[wasm_bindgen_test]
fn test_invalid_tag_rejected() {
	let doc = document().unwrap();

	let err = ElementBuilder::create(&doc, "not a tag").unwrap_err();

	assert!(matches!(
		err,
		BuilderError::HostCreation(DomError::InvalidCharacter { .. })
	));
}

// ============================================================================
// Mutations
// ============================================================================

/// Test attribute, property and markup mutations
#[wasm_bindgen_test]
fn test_attr_prop_and_inner_html() {
	let doc = document().unwrap();

	let element = button(&doc)
		.unwrap()
		.attr("id", "x")
		.unwrap()
		.prop("disabled", true)
		.unwrap()
		.inner_html("<span>hi</span>")
		.unwrap()
		.build();

	assert_eq!(Element::attribute(&element, "id").as_deref(), Some("x"));
	assert_eq!(Element::property(&element, "disabled"), Some(json!(true)));
	assert_eq!(Element::inner_html(&element), "<span>hi</span>");
}

/// Test that assigning a getter-only property fails
#[wasm_bindgen_test]
fn test_read_only_property_rejected() {
	let doc = document().unwrap();

	let err = div(&doc)
		.unwrap()
		.prop("tagName", "P")
		.map(|_| ())
		.unwrap_err();

	assert!(matches!(
		err.dom_error(),
		Some(DomError::ReadOnlyProperty { .. })
	));
}

/// Test children append order
#[wasm_bindgen_test]
fn test_children_in_order() {
	let doc = document().unwrap();
	let a = li(&doc).unwrap().text("a").unwrap().build();
	let b = li(&doc).unwrap().text("b").unwrap().build();

	let list = ul(&doc).unwrap().child(&a).unwrap().child(&b).unwrap().build();

	assert_eq!(list.inner_html(), "<li>a</li><li>b</li>");
	assert!(Element::is_same_node(
		&list.first_element_child().unwrap(),
		&a
	));
}

/// Test appending an ancestor surfaces the DOM exception
#[wasm_bindgen_test]
fn test_append_ancestor_rejected() {
	let doc = document().unwrap();
	let inner = div(&doc).unwrap().build();
	let outer = div(&doc).unwrap().child(&inner).unwrap().build();

	let err = ElementBuilder::new(inner)
		.child(&outer)
		.map(|_| ())
		.unwrap_err();

	assert!(matches!(
		err.dom_error(),
		Some(DomError::HierarchyRequest(_))
	));
}

// ============================================================================
// Callbacks and listeners
// ============================================================================

/// Test listener registration and dispatch
#[wasm_bindgen_test]
fn test_on_click_dispatch() {
	let doc = document().unwrap();
	let hits = Rc::new(Cell::new(0));

	let element = button(&doc)
		.unwrap()
		.on_click({
			let hits = Rc::clone(&hits);
			move |_| hits.set(hits.get() + 1)
		})
		.unwrap()
		.build();

	assert_eq!(hits.get(), 0);
	element
		.dyn_ref::<web_sys::HtmlElement>()
		.unwrap()
		.click();
	assert_eq!(hits.get(), 1);
}

/// Test callback result assignment
#[wasm_bindgen_test]
fn test_run_assigns_result() {
	let doc = document().unwrap();
	let mut target = Map::new();

	div(&doc)
		.unwrap()
		.inner_html("<p>1</p><p>2</p>")
		.unwrap()
		.run(
			|node| Ok::<_, std::convert::Infallible>(node.child_element_count()),
			Some(&mut target),
			Some("count"),
		)
		.unwrap();

	assert_eq!(target["count"], json!(2));
}
