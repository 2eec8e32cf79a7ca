//! Element builder
//!
//! [`ElementBuilder`] owns one node handle and applies a sequence of
//! mutations to it in a single chained expression.
//!
//! ## Design Pattern
//!
//! - **Same instance**: every mutating call returns `&mut Self`, the builder
//!   the call was made on
//! - **Fail fast**: a host rejection or callback failure comes back as `Err`
//!   and `?` ends the chain, so later calls never run
//! - **Host agnostic**: all node access goes through the [`Element`] trait

use serde_json::Value;

use crate::callback::Listener;
use crate::dom::{Document, Element, ElementSource};
use crate::error::{BuilderError, CallbackError};
use crate::sink::PropertySink;

/// Chainable wrapper around a single UI-tree node.
///
/// ## Example
///
/// ```
/// use fluent_dom_builder::{Element, ElementBuilder, MemoryDocument};
///
/// # fn main() -> Result<(), fluent_dom_builder::BuilderError> {
/// let doc = MemoryDocument::new();
/// let button = ElementBuilder::create(&doc, "button")?
///     .id("submit-button")?
///     .class("btn btn-primary")?
///     .text("Submit")?
///     .build();
///
/// assert_eq!(button.attribute("id").as_deref(), Some("submit-button"));
/// assert_eq!(button.inner_html(), "Submit");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ElementBuilder<E: Element> {
	/// The wrapped node. Set once at construction.
	element: E,
}

impl<E: Element> ElementBuilder<E> {
	/// Wraps an existing node without modifying it.
	pub fn new(element: E) -> Self {
		Self { element }
	}

	/// Creates a fresh `tag` element through `document` and wraps it.
	///
	/// # Errors
	///
	/// Returns [`BuilderError::HostCreation`] when the host rejects the tag.
	pub fn create<D>(document: &D, tag: &str) -> Result<Self, BuilderError>
	where
		D: Document<Element = E>,
	{
		document
			.create_element(tag)
			.map(Self::new)
			.map_err(BuilderError::HostCreation)
	}

	/// Creates or adopts a node, depending on the source.
	///
	/// ```
	/// use fluent_dom_builder::{Document, Element, ElementBuilder, ElementSource, MemoryDocument};
	///
	/// # fn main() -> Result<(), fluent_dom_builder::BuilderError> {
	/// let doc = MemoryDocument::new();
	/// let existing = doc.create_element("nav").unwrap();
	///
	/// let created = ElementBuilder::from_source(&doc, "header")?;
	/// let adopted = ElementBuilder::from_source(&doc, ElementSource::Existing(existing.clone()))?;
	///
	/// assert_eq!(created.element().tag_name(), "header");
	/// assert_eq!(adopted.build(), existing);
	/// # Ok(())
	/// # }
	/// ```
	pub fn from_source<D, S>(document: &D, source: S) -> Result<Self, BuilderError>
	where
		D: Document<Element = E>,
		S: Into<ElementSource<E>>,
	{
		source
			.into()
			.resolve(document)
			.map(Self::new)
			.map_err(BuilderError::HostCreation)
	}

	/// Runs `func` against the node.
	///
	/// When both `target` and `property` are given, the callback's result is
	/// assigned to `target[property]`; otherwise it is discarded.
	///
	/// # Errors
	///
	/// A callback failure is returned as [`BuilderError::Callback`] and
	/// nothing is assigned.
	///
	/// ## Example
	///
	/// ```
	/// use fluent_dom_builder::{Element, ElementBuilder, MemoryDocument};
	/// use serde_json::{Map, Value};
	///
	/// # fn main() -> Result<(), fluent_dom_builder::BuilderError> {
	/// let doc = MemoryDocument::new();
	/// let mut measurements = Map::new();
	///
	/// ElementBuilder::create(&doc, "ul")?
	///     .inner_html("<li>a</li><li>b</li>")?
	///     .run(
	///         |list| Ok::<_, std::convert::Infallible>(list.child_elements().len()),
	///         Some(&mut measurements),
	///         Some("items"),
	///     )?;
	///
	/// assert_eq!(measurements["items"], Value::from(2));
	/// # Ok(())
	/// # }
	/// ```
	pub fn run<F, R, CE>(
		&mut self,
		func: F,
		target: Option<&mut dyn PropertySink>,
		property: Option<&str>,
	) -> Result<&mut Self, BuilderError>
	where
		F: FnOnce(&E) -> Result<R, CE>,
		R: Into<Value>,
		CE: Into<CallbackError>,
	{
		let value = func(&self.element).map_err(|err| BuilderError::Callback(err.into()))?;
		if let (Some(target), Some(property)) = (target, property) {
			target.assign(property, value.into());
		}
		Ok(self)
	}

	/// Runs an infallible callback against the node.
	#[inline]
	pub fn with_element<F>(&mut self, func: F) -> &mut Self
	where
		F: FnOnce(&E),
	{
		func(&self.element);
		self
	}

	/// Assigns a named property with no type checking.
	///
	/// ## Example
	///
	/// ```ignore
	/// input(&doc)?.prop("disabled", true)?.prop("value", "draft")?.build()
	/// ```
	pub fn prop(&mut self, name: &str, value: impl Into<Value>) -> Result<&mut Self, BuilderError> {
		self.element
			.set_property(name, value.into())
			.map_err(BuilderError::HostMutation)?;
		Ok(self)
	}

	/// Replaces the node's content with parsed markup.
	///
	/// The markup is handed to the host as-is. Never pass untrusted input.
	pub fn inner_html(&mut self, markup: &str) -> Result<&mut Self, BuilderError> {
		self.element
			.set_inner_html(markup)
			.map_err(BuilderError::HostMutation)?;
		Ok(self)
	}

	/// Sets an attribute, overwriting any previous value.
	///
	/// ## Example
	///
	/// ```ignore
	/// div(&doc)?.attr("data-test-id", "my-div")?.build()
	/// ```
	pub fn attr(&mut self, name: &str, value: &str) -> Result<&mut Self, BuilderError> {
		self.element
			.set_attribute(name, value)
			.map_err(BuilderError::HostMutation)?;
		Ok(self)
	}

	/// Set the id attribute
	#[inline]
	pub fn id(&mut self, id: &str) -> Result<&mut Self, BuilderError> {
		self.attr("id", id)
	}

	/// Set the class attribute
	///
	/// Multiple calls overwrite the previous value.
	/// Use space-separated values for multiple classes.
	#[inline]
	pub fn class(&mut self, class: &str) -> Result<&mut Self, BuilderError> {
		self.attr("class", class)
	}

	/// Set the style attribute
	#[inline]
	pub fn style(&mut self, style: &str) -> Result<&mut Self, BuilderError> {
		self.attr("style", style)
	}

	/// Set text content
	///
	/// This replaces all children of the element.
	pub fn text(&mut self, text: &str) -> Result<&mut Self, BuilderError> {
		self.element
			.set_text_content(text)
			.map_err(BuilderError::HostMutation)?;
		Ok(self)
	}

	/// Registers an event listener for any event type.
	///
	/// The listener is not invoked here; it runs when the host dispatches a
	/// matching event. Pass a cloned [`Listener`] to register one handle on
	/// several nodes or to rely on the host's duplicate check.
	///
	/// ## Example
	///
	/// ```ignore
	/// button(&doc)?
	///     .on("mouseenter", |_: &MemoryEvent| println!("entered"))?
	///     .on("mouseleave", |_: &MemoryEvent| println!("left"))?
	///     .build()
	/// ```
	pub fn on(
		&mut self,
		event_type: &str,
		listener: impl Into<Listener<E::Event>>,
	) -> Result<&mut Self, BuilderError> {
		self.element
			.add_event_listener(event_type, listener.into())
			.map_err(BuilderError::HostMutation)?;
		Ok(self)
	}

	/// Add a click event listener
	#[inline]
	pub fn on_click<F>(&mut self, callback: F) -> Result<&mut Self, BuilderError>
	where
		F: Fn(&E::Event) + 'static,
	{
		self.on("click", Listener::new(callback))
	}

	/// Add an input event listener
	///
	/// Commonly used with `<input>` and `<textarea>` elements.
	#[inline]
	pub fn on_input<F>(&mut self, callback: F) -> Result<&mut Self, BuilderError>
	where
		F: Fn(&E::Event) + 'static,
	{
		self.on("input", Listener::new(callback))
	}

	/// Add a change event listener
	#[inline]
	pub fn on_change<F>(&mut self, callback: F) -> Result<&mut Self, BuilderError>
	where
		F: Fn(&E::Event) + 'static,
	{
		self.on("change", Listener::new(callback))
	}

	/// Add a submit event listener
	///
	/// Commonly used with `<form>` elements.
	#[inline]
	pub fn on_submit<F>(&mut self, callback: F) -> Result<&mut Self, BuilderError>
	where
		F: Fn(&E::Event) + 'static,
	{
		self.on("submit", Listener::new(callback))
	}

	/// Add a keydown event listener
	#[inline]
	pub fn on_keydown<F>(&mut self, callback: F) -> Result<&mut Self, BuilderError>
	where
		F: Fn(&E::Event) + 'static,
	{
		self.on("keydown", Listener::new(callback))
	}

	/// Add a focus event listener
	#[inline]
	pub fn on_focus<F>(&mut self, callback: F) -> Result<&mut Self, BuilderError>
	where
		F: Fn(&E::Event) + 'static,
	{
		self.on("focus", Listener::new(callback))
	}

	/// Add a blur event listener
	#[inline]
	pub fn on_blur<F>(&mut self, callback: F) -> Result<&mut Self, BuilderError>
	where
		F: Fn(&E::Event) + 'static,
	{
		self.on("blur", Listener::new(callback))
	}

	/// Appends `child` as the last child.
	///
	/// A child that already has a parent is moved, not copied.
	///
	/// ## Example
	///
	/// ```ignore
	/// div(&doc)?
	///     .child(&p(&doc)?.text("First paragraph")?.build())?
	///     .child(&p(&doc)?.text("Second paragraph")?.build())?
	///     .build()
	/// ```
	pub fn child(&mut self, child: &E) -> Result<&mut Self, BuilderError> {
		self.element
			.append_child(child)
			.map_err(BuilderError::HostMutation)?;
		Ok(self)
	}

	/// Appends each child in order, stopping at the first failure.
	pub fn children<'a, I>(&mut self, children: I) -> Result<&mut Self, BuilderError>
	where
		I: IntoIterator<Item = &'a E>,
		E: 'a,
	{
		for child in children {
			self.child(child)?;
		}
		Ok(self)
	}

	/// Returns the wrapped node.
	///
	/// The builder keeps its handle, so calling this again returns the same
	/// node.
	pub fn build(&self) -> E {
		self.element.clone()
	}

	/// Borrows the wrapped node.
	pub fn element(&self) -> &E {
		&self.element
	}

	/// Consumes the builder and returns the wrapped node.
	pub fn into_element(self) -> E {
		self.element
	}
}

impl<E: Element> From<E> for ElementBuilder<E> {
	fn from(element: E) -> Self {
		Self::new(element)
	}
}

// ============================================================================
// Helper functions for common HTML elements
// ============================================================================

/// Macro for defining HTML element creation functions
macro_rules! define_element {
	($(#[$meta:meta])* $name:ident, $tag:literal) => {
		$(#[$meta])*
		///
		/// # Errors
		///
		/// Returns [`BuilderError::HostCreation`] when the host cannot create
		/// the element.
		pub fn $name<D: Document>(
			document: &D,
		) -> Result<ElementBuilder<D::Element>, BuilderError> {
			ElementBuilder::create(document, $tag)
		}
	};
}

define_element!(
	/// Create a `<div>` element
	///
	/// ## Example
	///
	/// ```ignore
	/// let container = div(&doc)?
	///     .class("container")?
	///     .child(&p(&doc)?.text("Content")?.build())?
	///     .build();
	/// ```
	div, "div"
);

define_element!(
	/// Create a `<span>` element
	span, "span"
);

define_element!(
	/// Create a `<p>` element (paragraph)
	p, "p"
);

define_element!(
	/// Create a `<button>` element
	///
	/// ## Example
	///
	/// ```ignore
	/// let btn = button(&doc)?
	///     .text("Click me")?
	///     .on_click(|_| println!("clicked"))?
	///     .build();
	/// ```
	button, "button"
);

define_element!(
	/// Create an `<input>` element
	input, "input"
);

define_element!(
	/// Create a `<textarea>` element
	textarea, "textarea"
);

define_element!(
	/// Create a `<select>` element
	select, "select"
);

define_element!(
	/// Create an `<option>` element
	option, "option"
);

define_element!(
	/// Create a `<form>` element
	form, "form"
);

define_element!(
	/// Create an `<a>` element (hyperlink)
	a, "a"
);

define_element!(
	/// Create an `<img>` element
	img, "img"
);

define_element!(
	/// Create an `<h1>` element
	h1, "h1"
);

define_element!(
	/// Create an `<h2>` element
	h2, "h2"
);

define_element!(
	/// Create an `<h3>` element
	h3, "h3"
);

define_element!(
	/// Create a `<ul>` element (unordered list)
	ul, "ul"
);

define_element!(
	/// Create an `<ol>` element (ordered list)
	ol, "ol"
);

define_element!(
	/// Create an `<li>` element (list item)
	li, "li"
);

define_element!(
	/// Create a `<header>` element
	header, "header"
);

define_element!(
	/// Create a `<nav>` element
	nav, "nav"
);

define_element!(
	/// Create a `<section>` element
	section, "section"
);

define_element!(
	/// Create a `<footer>` element
	footer, "footer"
);

define_element!(
	/// Create a `<label>` element
	label, "label"
);

define_element!(
	/// Create a `<table>` element
	table, "table"
);

define_element!(
	/// Create a `<thead>` element
	thead, "thead"
);

define_element!(
	/// Create a `<tbody>` element
	tbody, "tbody"
);

define_element!(
	/// Create a `<tr>` element (table row)
	tr, "tr"
);

define_element!(
	/// Create a `<th>` element (table header cell)
	th, "th"
);

define_element!(
	/// Create a `<td>` element (table data cell)
	td, "td"
);
