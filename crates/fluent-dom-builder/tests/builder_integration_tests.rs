//! ElementBuilder Integration Tests
//!
//! Drives the builder against the in-memory host end to end.
//!
//! Success Criteria:
//! 1. Construction creates or adopts exactly one node
//! 2. Every mutating call returns the same builder
//! 3. Attribute, property, content and child mutations are visible on the node
//! 4. Listeners are registered, never invoked, and dispatched later
//! 5. The first failure ends the chain and later calls do not run
//!
//! Test Categories:
//! - Category 1: Construction and unwrap
//! - Category 2: Mutations
//! - Category 3: Callbacks and listeners
//! - Category 4: Failure propagation
//! - Category 5: Host configuration

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use fluent_dom_builder::builder::html::{button, div, form, input, li, span, ul};
use fluent_dom_builder::{
	BuilderError, Document, DomError, Element, ElementBuilder, ElementSource, Listener,
	MemoryDocument, MemoryDocumentConfig, MemoryElement, MemoryEvent, MemoryNode, PropertySink,
};
use rstest::{fixture, rstest};
use serde_json::{Map, Value, json};

#[derive(Debug, thiserror::Error)]
#[error("layout not ready: {0}")]
struct LayoutNotReady(&'static str);

#[fixture]
fn doc() -> MemoryDocument {
	MemoryDocument::new()
}

// ============================================================================
// Category 1: Construction and unwrap
// ============================================================================

/// Tests that any accepted tag yields a node of that tag
#[rstest]
#[case("div")]
#[case("custom-widget")]
#[case("svg:rect")]
fn test_create_yields_requested_tag(doc: MemoryDocument, #[case] tag: &str) {
	let element = ElementBuilder::create(&doc, tag).unwrap().build();

	assert_eq!(element.tag_name(), tag);
	assert!(element.children().is_empty());
}

/// Tests that adopting a node and building returns the identical node
#[rstest]
fn test_adopt_then_build_is_identity(doc: MemoryDocument) {
	let existing = doc.create_element("article").unwrap();
	existing.set_inner_html("<p>kept</p>").unwrap();

	let built = ElementBuilder::new(existing.clone()).build();

	assert!(built.is_same_node(&existing));
	assert_eq!(built.inner_html(), "<p>kept</p>");
}

/// Tests both arms of ElementSource
#[rstest]
fn test_from_source(doc: MemoryDocument) {
	let existing = doc.create_element("main").unwrap();

	let created = ElementBuilder::from_source(&doc, String::from("aside")).unwrap();
	let adopted =
		ElementBuilder::from_source(&doc, ElementSource::Existing(existing.clone())).unwrap();

	assert_eq!(created.element().tag_name(), "aside");
	assert!(adopted.element().is_same_node(&existing));
}

/// Tests that build can be called repeatedly
#[rstest]
fn test_build_twice_returns_same_node(doc: MemoryDocument) {
	let mut builder = div(&doc).unwrap();
	builder.attr("id", "once").unwrap();

	let first = builder.build();
	let second = builder.build();

	assert_eq!(first, second);
	assert_eq!(second.attribute("id").as_deref(), Some("once"));
}

// ============================================================================
// Category 2: Mutations
// ============================================================================

/// Tests that each mutating call hands back the same builder
#[rstest]
fn test_every_mutator_returns_same_instance(doc: MemoryDocument) {
	let child = span(&doc).unwrap().build();
	let mut target = Map::new();
	let mut builder = div(&doc).unwrap();
	let origin = &builder as *const ElementBuilder<MemoryElement>;

	let ptr = |b: &mut ElementBuilder<MemoryElement>| b as *const ElementBuilder<MemoryElement>;

	let results = [
		ptr(builder.attr("data-x", "1").unwrap()),
		ptr(builder.prop("hidden", false).unwrap()),
		ptr(builder.inner_html("<i>x</i>").unwrap()),
		ptr(builder.on("click", |_: &MemoryEvent| {}).unwrap()),
		ptr(builder.child(&child).unwrap()),
		ptr(builder
			.run(
				|_| Ok::<_, LayoutNotReady>(1),
				Some(&mut target),
				Some("n"),
			)
			.unwrap()),
	];

	assert!(results.iter().all(|ptr| std::ptr::eq(*ptr, origin)));
}

/// Tests attribute read-back
#[rstest]
fn test_attr_id_reads_back(doc: MemoryDocument) {
	let element = div(&doc).unwrap().attr("id", "x").unwrap().build();

	assert_eq!(element.attribute("id").as_deref(), Some("x"));
	assert_eq!(element.property("id"), Some(json!("x")));
}

/// Tests that markup content becomes child nodes
#[rstest]
fn test_inner_html_parses_span(doc: MemoryDocument) {
	let element = div(&doc)
		.unwrap()
		.inner_html("<span>hi</span>")
		.unwrap()
		.build();

	let spans = element.child_elements();
	assert_eq!(spans.len(), 1);
	assert_eq!(spans[0].tag_name(), "span");
	assert_eq!(spans[0].text_content(), "hi");
	assert!(element.inner_html().contains("<span>hi</span>"));
}

/// Tests boolean property reflection
#[rstest]
fn test_prop_disabled_reads_true(doc: MemoryDocument) {
	let element = button(&doc).unwrap().prop("disabled", true).unwrap().build();

	assert_eq!(element.property("disabled"), Some(Value::Bool(true)));
	assert_eq!(element.outer_html(), r#"<button disabled=""></button>"#);
}

/// Tests that properties are assigned without type checking
#[rstest]
#[case(json!(3.5))]
#[case(json!({ "nested": [1, 2] }))]
#[case(json!(null))]
fn test_prop_stores_any_value(doc: MemoryDocument, #[case] value: Value) {
	let element = div(&doc)
		.unwrap()
		.prop("customState", value.clone())
		.unwrap()
		.build();

	assert_eq!(element.property("customState"), Some(value));
}

/// Tests that children keep their append order
#[rstest]
fn test_children_in_append_order(doc: MemoryDocument) {
	let a = li(&doc).unwrap().build();
	let b = li(&doc).unwrap().build();

	let list = ul(&doc)
		.unwrap()
		.child(&a)
		.unwrap()
		.child(&b)
		.unwrap()
		.build();

	assert_eq!(list.child_elements(), vec![a.clone(), b]);
	assert_eq!(a.parent(), Some(list));
}

/// Tests that appending an attached node moves it
#[rstest]
fn test_child_moves_between_parents(doc: MemoryDocument) {
	let item = li(&doc).unwrap().build();
	let first = ul(&doc).unwrap().child(&item).unwrap().build();

	let second = ul(&doc).unwrap().child(&item).unwrap().build();

	assert!(first.children().is_empty());
	assert_eq!(second.child_elements(), vec![item]);
}

/// Tests mixed content produced by text and markup
#[rstest]
fn test_text_then_child_mixes_nodes(doc: MemoryDocument) {
	let strong = doc.create_element("strong").unwrap();
	strong.set_text_content("!").unwrap();

	let element = span(&doc)
		.unwrap()
		.text("Hello")
		.unwrap()
		.child(&strong)
		.unwrap()
		.build();

	let children = element.children();
	assert_eq!(children.len(), 2);
	assert_eq!(children[0], MemoryNode::Text("Hello".to_string()));
	assert_eq!(element.outer_html(), "<span>Hello<strong>!</strong></span>");
}

/// Tests child chains nested far past the markup depth limit
#[rstest]
fn test_deep_child_chain_serializes(doc: MemoryDocument) {
	const DEPTH: usize = 20_000;
	let mut node = span(&doc).unwrap().text("deep").unwrap().build();
	for _ in 0..DEPTH {
		node = div(&doc).unwrap().child(&node).unwrap().build();
	}

	let html = node.outer_html();

	assert!(html.starts_with("<div><div><div>"));
	assert!(html.contains("<span>deep</span>"));
	assert_eq!(html.matches("</div>").count(), DEPTH);
	assert_eq!(node.text_content(), "deep");
}

// ============================================================================
// Category 3: Callbacks and listeners
// ============================================================================

/// Tests that the callback result lands on the target property
#[rstest]
fn test_run_writes_target_property(doc: MemoryDocument) {
	let mut obj = Value::Null;

	div(&doc)
		.unwrap()
		.run(|_| Ok::<_, LayoutNotReady>(42), Some(&mut obj), Some("out"))
		.unwrap();

	assert_eq!(obj["out"], json!(42));
}

/// Tests that omitting target or property writes nothing
#[rstest]
fn test_run_without_target_writes_nothing(doc: MemoryDocument) {
	let mut obj: HashMap<String, Value> = HashMap::new();
	let mut builder = div(&doc).unwrap();

	builder
		.run(|_| Ok::<_, LayoutNotReady>(1), None, Some("out"))
		.unwrap()
		.run(|_| Ok::<_, LayoutNotReady>(2), Some(&mut obj), None)
		.unwrap();

	assert!(obj.is_empty());
}

/// Tests a custom sink implementation
#[rstest]
fn test_run_with_custom_sink(doc: MemoryDocument) {
	#[derive(Default)]
	struct Recorder(Vec<(String, Value)>);

	impl PropertySink for Recorder {
		fn assign(&mut self, property: &str, value: Value) {
			self.0.push((property.to_string(), value));
		}
	}

	let mut recorder = Recorder::default();
	input(&doc)
		.unwrap()
		.attr("value", "abc")
		.unwrap()
		.run(
			|node| Ok::<_, LayoutNotReady>(node.attribute("value")),
			Some(&mut recorder),
			Some("snapshot"),
		)
		.unwrap();

	assert_eq!(recorder.0, vec![("snapshot".to_string(), json!("abc"))]);
}

/// Tests that registration never invokes and dispatch does
#[rstest]
fn test_listener_deferred_until_dispatch(doc: MemoryDocument) {
	let log = Rc::new(RefCell::new(Vec::new()));

	let element = form(&doc)
		.unwrap()
		.on("submit", {
			let log = Rc::clone(&log);
			move |event: &MemoryEvent| log.borrow_mut().push(event.target().tag_name())
		})
		.unwrap()
		.build();

	assert!(log.borrow().is_empty());
	assert_eq!(element.dispatch_event("submit"), 1);
	assert_eq!(element.dispatch_event("reset"), 0);
	assert_eq!(*log.borrow(), vec!["form".to_string()]);
}

/// Tests that a shared listener is registered once per node
#[rstest]
fn test_shared_listener_deduplicated(doc: MemoryDocument) {
	let hits = Rc::new(Cell::new(0));
	let listener: Listener<MemoryEvent> = {
		let hits = Rc::clone(&hits);
		Listener::new(move |_| hits.set(hits.get() + 1))
	};

	let element = button(&doc)
		.unwrap()
		.on("click", listener.clone())
		.unwrap()
		.on("click", listener.clone())
		.unwrap()
		.on("focus", listener)
		.unwrap()
		.build();

	element.dispatch_event("click");

	assert_eq!(element.listener_count("click"), 1);
	assert_eq!(element.listener_count("focus"), 1);
	assert_eq!(hits.get(), 1);
}

// ============================================================================
// Category 4: Failure propagation
// ============================================================================

/// Tests that a failing callback stops later operations
#[rstest]
fn test_failing_callback_stops_chain(doc: MemoryDocument) {
	let mut obj = Map::new();
	let later_ran = Cell::new(false);

	let mut build = || -> Result<MemoryElement, BuilderError> {
		Ok(div(&doc)?
			.attr("id", "before")?
			.run(
				|_| Err::<i32, _>(LayoutNotReady("no width")),
				Some(&mut obj),
				Some("width"),
			)?
			.with_element(|_| later_ran.set(true))
			.attr("id", "after")?
			.build())
	};
	let err = build().unwrap_err();

	assert!(err.is_callback());
	assert_eq!(err.to_string(), "layout not ready: no width");
	assert!(!later_ran.get());
	assert!(obj.is_empty());
}

/// Tests that the node keeps mutations made before the failure
#[rstest]
fn test_failure_keeps_earlier_mutations(doc: MemoryDocument) {
	let mut builder = div(&doc).unwrap();
	let node = builder.build();

	let result = builder
		.attr("id", "kept")
		.and_then(|b| b.prop("tagName", "P"))
		.and_then(|b| b.attr("class", "never"));

	assert!(matches!(
		result,
		Err(BuilderError::HostMutation(DomError::ReadOnlyProperty { .. }))
	));
	assert_eq!(node.attribute("id").as_deref(), Some("kept"));
	assert_eq!(node.attribute("class"), None);
}

/// Tests host rejections surface unchanged
#[rstest]
#[case("", DomError::invalid_character(""))]
#[case("1st", DomError::invalid_character("1st"))]
#[case("a b", DomError::invalid_character("a b"))]
fn test_invalid_tag_is_host_creation_error(
	doc: MemoryDocument,
	#[case] tag: &str,
	#[case] expected: DomError,
) {
	let err = ElementBuilder::create(&doc, tag).unwrap_err();

	assert!(matches!(err, BuilderError::HostCreation(_)));
	assert_eq!(err.dom_error(), Some(&expected));
	assert_eq!(err.to_string(), expected.to_string());
}

/// Tests that appending an ancestor is rejected
#[rstest]
fn test_append_ancestor_rejected(doc: MemoryDocument) {
	let mut outer = div(&doc).unwrap();
	let inner = span(&doc).unwrap().build();
	outer.child(&inner).unwrap();

	let err = ElementBuilder::new(inner)
		.child(&outer.build())
		.map(|_| ())
		.unwrap_err();

	assert!(matches!(
		err.dom_error(),
		Some(DomError::HierarchyRequest(_))
	));
}

/// Tests that malformed markup leaves content unchanged
#[rstest]
fn test_malformed_markup_keeps_content(doc: MemoryDocument) {
	let mut builder = div(&doc).unwrap();
	builder.inner_html("<em>old</em>").unwrap();

	let err = builder.inner_html("<b class=\"open").map(|_| ()).unwrap_err();

	assert!(matches!(err.dom_error(), Some(DomError::Syntax(_))));
	assert_eq!(builder.element().inner_html(), "<em>old</em>");
}

// ============================================================================
// Category 5: Host configuration
// ============================================================================

/// Tests configured nesting depth
#[rstest]
fn test_nesting_limit_from_config() {
	let config = MemoryDocumentConfig::from_json(r#"{ "max_nesting_depth": 2 }"#).unwrap();
	let doc = MemoryDocument::with_config(config);
	let mut builder = div(&doc).unwrap();

	builder.inner_html("<p><b>ok</b></p>").unwrap();
	let err = builder
		.inner_html("<p><b><i>deep</i></b></p>")
		.map(|_| ())
		.unwrap_err();

	assert_eq!(
		err.dom_error(),
		Some(&DomError::NestingTooDeep { limit: 2 })
	);
}

/// Tests that case is preserved without HTML semantics
#[rstest]
fn test_case_sensitive_document() {
	let doc =
		MemoryDocument::with_config(MemoryDocumentConfig::default().with_html_semantics(false));

	let element = ElementBuilder::create(&doc, "feGaussianBlur")
		.unwrap()
		.attr("stdDeviation", "2")
		.unwrap()
		.build();

	assert_eq!(element.tag_name(), "feGaussianBlur");
	assert_eq!(element.attribute("stdDeviation").as_deref(), Some("2"));
	assert_eq!(element.attribute("stddeviation"), None);
}

/// Tests extra read-only properties
#[rstest]
fn test_configured_read_only_property_rejects_prop() {
	let doc = MemoryDocument::with_config(
		MemoryDocumentConfig::default().with_read_only_property("dataset"),
	);

	let err = div(&doc)
		.unwrap()
		.prop("dataset", json!({}))
		.map(|_| ())
		.unwrap_err();

	assert_eq!(err.dom_error(), Some(&DomError::read_only("dataset")));
}
