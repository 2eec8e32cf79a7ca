//! In-memory DOM host
//!
//! A single-threaded element tree that follows browser semantics closely
//! enough to stand in for the real DOM: markup parsing on `innerHTML`,
//! attribute reflection for common properties, listener de-duplication and
//! move-on-append.
//!
//! Nodes are `Rc<RefCell<_>>` handles. Cloning a [`MemoryElement`] yields
//! another handle to the same node, and `==` compares node identity.
//!
//! ## Example
//!
//! ```
//! use fluent_dom_builder::{Document, Element, MemoryDocument};
//!
//! let doc = MemoryDocument::new();
//! let list = doc.create_element("ul").unwrap();
//! list.set_inner_html("<li>one</li><li>two</li>").unwrap();
//!
//! assert_eq!(list.child_elements().len(), 2);
//! assert_eq!(list.outer_html(), "<ul><li>one</li><li>two</li></ul>");
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use serde_json::Value;

use crate::callback::Listener;
use crate::config::MemoryDocumentConfig;
use crate::debug_log;
use crate::dom::{Document, Element};
use crate::error::DomError;

mod markup;
mod reflect;

use reflect::Reflection;

/// Element factory for the in-memory tree.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
	config: Rc<MemoryDocumentConfig>,
}

impl MemoryDocument {
	/// Creates a document with the default configuration.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a document with a custom configuration.
	pub fn with_config(config: MemoryDocumentConfig) -> Self {
		Self {
			config: Rc::new(config),
		}
	}

	/// The configuration shared by every element of this document.
	pub fn config(&self) -> &MemoryDocumentConfig {
		&self.config
	}
}

impl Document for MemoryDocument {
	type Element = MemoryElement;

	fn create_element(&self, tag: &str) -> Result<MemoryElement, DomError> {
		if !is_valid_name(tag) {
			return Err(DomError::invalid_character(tag));
		}
		Ok(MemoryElement::detached(
			self.config.normalize_name(tag),
			Rc::clone(&self.config),
		))
	}
}

/// A child of a [`MemoryElement`].
#[derive(Clone, PartialEq)]
pub enum MemoryNode {
	/// An element child.
	Element(MemoryElement),
	/// A text child.
	Text(String),
}

impl MemoryNode {
	/// Returns the element, if this is an element node.
	pub fn as_element(&self) -> Option<&MemoryElement> {
		match self {
			Self::Element(element) => Some(element),
			Self::Text(_) => None,
		}
	}

	/// Returns the text, if this is a text node.
	pub fn as_text(&self) -> Option<&str> {
		match self {
			Self::Text(text) => Some(text),
			Self::Element(_) => None,
		}
	}
}

impl fmt::Debug for MemoryNode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Element(element) => element.fmt(f),
			Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
		}
	}
}

/// Event object delivered by [`MemoryElement::dispatch_event`].
#[derive(Debug, Clone)]
pub struct MemoryEvent {
	event_type: String,
	target: MemoryElement,
}

impl MemoryEvent {
	/// The dispatched event type.
	pub fn event_type(&self) -> &str {
		&self.event_type
	}

	/// The element the event was dispatched on.
	pub fn target(&self) -> &MemoryElement {
		&self.target
	}
}

struct ElementData {
	tag_name: String,
	attributes: Vec<(String, String)>,
	properties: HashMap<String, Value>,
	children: Vec<MemoryNode>,
	parent: Weak<RefCell<ElementData>>,
	listeners: Vec<(String, Listener<MemoryEvent>)>,
	config: Rc<MemoryDocumentConfig>,
}

/// Releases descendants with an explicit stack. The default drop glue
/// recurses once per tree level.
impl Drop for ElementData {
	fn drop(&mut self) {
		let mut pending = std::mem::take(&mut self.children);
		while let Some(node) = pending.pop() {
			if let MemoryNode::Element(element) = node {
				if let Ok(cell) = Rc::try_unwrap(element.inner) {
					let mut data = cell.into_inner();
					pending.append(&mut data.children);
				}
			}
		}
	}
}

/// Handle to a node of the in-memory tree.
#[derive(Clone)]
pub struct MemoryElement {
	inner: Rc<RefCell<ElementData>>,
}

impl MemoryElement {
	fn detached(tag_name: String, config: Rc<MemoryDocumentConfig>) -> Self {
		Self {
			inner: Rc::new(RefCell::new(ElementData {
				tag_name,
				attributes: Vec::new(),
				properties: HashMap::new(),
				children: Vec::new(),
				parent: Weak::new(),
				listeners: Vec::new(),
				config,
			})),
		}
	}

	/// The parent element, if attached.
	pub fn parent(&self) -> Option<MemoryElement> {
		self.inner
			.borrow()
			.parent
			.upgrade()
			.map(|inner| MemoryElement { inner })
	}

	/// All children in order.
	pub fn children(&self) -> Vec<MemoryNode> {
		self.inner.borrow().children.clone()
	}

	/// Element children in order.
	pub fn child_elements(&self) -> Vec<MemoryElement> {
		self.inner
			.borrow()
			.children
			.iter()
			.filter_map(|node| node.as_element().cloned())
			.collect()
	}

	/// Attributes in insertion order.
	pub fn attributes(&self) -> Vec<(String, String)> {
		self.inner.borrow().attributes.clone()
	}

	/// Whether the attribute is present.
	pub fn has_attribute(&self, name: &str) -> bool {
		self.attribute(name).is_some()
	}

	/// Concatenated text of all descendants.
	pub fn text_content(&self) -> String {
		let mut out = String::new();
		self.collect_text(&mut out);
		out
	}

	/// Serializes the element including its own tag.
	pub fn outer_html(&self) -> String {
		let mut out = String::new();
		markup::serialize_element(self, &mut out);
		out
	}

	/// Number of listeners registered for `event_type`.
	pub fn listener_count(&self, event_type: &str) -> usize {
		self.inner
			.borrow()
			.listeners
			.iter()
			.filter(|(registered, _)| registered == event_type)
			.count()
	}

	/// Runs every listener registered for `event_type`, in registration
	/// order, and returns how many ran.
	///
	/// Listeners may mutate this element; no internal borrow is held while
	/// they run. The event does not bubble.
	pub fn dispatch_event(&self, event_type: &str) -> usize {
		let listeners: Vec<Listener<MemoryEvent>> = self
			.inner
			.borrow()
			.listeners
			.iter()
			.filter(|(registered, _)| registered == event_type)
			.map(|(_, listener)| listener.clone())
			.collect();

		let event = MemoryEvent {
			event_type: event_type.to_string(),
			target: self.clone(),
		};
		for listener in &listeners {
			listener.call(&event);
		}
		listeners.len()
	}

	fn tag_name_is(&self, name: &str) -> bool {
		self.inner.borrow().tag_name == name
	}

	fn config(&self) -> Rc<MemoryDocumentConfig> {
		Rc::clone(&self.inner.borrow().config)
	}

	fn collect_text(&self, out: &mut String) {
		let mut pending: Vec<MemoryNode> =
			self.inner.borrow().children.iter().rev().cloned().collect();
		while let Some(node) = pending.pop() {
			match node {
				MemoryNode::Text(text) => out.push_str(&text),
				MemoryNode::Element(element) => {
					pending.extend(element.inner.borrow().children.iter().rev().cloned());
				}
			}
		}
	}

	fn is_read_only(&self, name: &str) -> bool {
		reflect::READ_ONLY_PROPERTIES.contains(&name)
			|| self
				.inner
				.borrow()
				.config
				.read_only_properties
				.iter()
				.any(|property| property == name)
	}

	/// Appends a parsed node without hierarchy checks. Adjacent text merges.
	fn push_node(&self, node: MemoryNode) {
		let mut data = self.inner.borrow_mut();
		match node {
			MemoryNode::Text(text) => {
				if let Some(MemoryNode::Text(last)) = data.children.last_mut() {
					last.push_str(&text);
				} else {
					data.children.push(MemoryNode::Text(text));
				}
			}
			MemoryNode::Element(element) => {
				element.inner.borrow_mut().parent = Rc::downgrade(&self.inner);
				data.children.push(MemoryNode::Element(element));
			}
		}
	}

	/// Sets an attribute whose name the parser already accepted.
	fn push_attribute(&self, name: String, value: String) {
		let mut data = self.inner.borrow_mut();
		if !data
			.attributes
			.iter()
			.any(|(existing, _)| *existing == name)
		{
			data.attributes.push((name, value));
		}
	}

	fn remove_attribute(&self, name: &str) {
		let name = self.config().normalize_name(name);
		self.inner
			.borrow_mut()
			.attributes
			.retain(|(existing, _)| *existing != name);
	}

	fn replace_children(&self, nodes: Vec<MemoryNode>) {
		let old = std::mem::take(&mut self.inner.borrow_mut().children);
		for node in old {
			if let MemoryNode::Element(element) = node {
				element.inner.borrow_mut().parent = Weak::new();
			}
		}
		for node in nodes {
			self.push_node(node);
		}
	}

	fn detach(&self) {
		if let Some(parent) = self.parent() {
			parent
				.inner
				.borrow_mut()
				.children
				.retain(|node| {
					!matches!(node, MemoryNode::Element(element) if element.is_same_node(self))
				});
		}
		self.inner.borrow_mut().parent = Weak::new();
	}
}

impl Element for MemoryElement {
	type Event = MemoryEvent;

	fn tag_name(&self) -> String {
		self.inner.borrow().tag_name.clone()
	}

	fn set_property(&self, name: &str, value: Value) -> Result<(), DomError> {
		if self.is_read_only(name) {
			return Err(DomError::read_only(name));
		}
		match reflect::reflection(name) {
			Reflection::InnerHtml => self.set_inner_html(&reflect::to_content_string(&value)),
			Reflection::TextContent => self.set_text_content(&reflect::to_content_string(&value)),
			Reflection::StringAttribute(attribute) => {
				self.set_attribute(attribute, &reflect::to_dom_string(&value))
			}
			Reflection::BooleanAttribute(attribute) => {
				if reflect::is_truthy(&value) {
					self.set_attribute(attribute, "")
				} else {
					self.remove_attribute(attribute);
					Ok(())
				}
			}
			Reflection::LiveString(_) => {
				let value = Value::String(reflect::to_content_string(&value));
				self.inner
					.borrow_mut()
					.properties
					.insert(name.to_string(), value);
				Ok(())
			}
			Reflection::LiveBoolean(_) => {
				let value = Value::Bool(reflect::is_truthy(&value));
				self.inner
					.borrow_mut()
					.properties
					.insert(name.to_string(), value);
				Ok(())
			}
			Reflection::Expando => {
				self.inner
					.borrow_mut()
					.properties
					.insert(name.to_string(), value);
				Ok(())
			}
		}
	}

	fn property(&self, name: &str) -> Option<Value> {
		match name {
			"tagName" | "nodeName" => {
				let data = self.inner.borrow();
				let tag = if data.config.html_semantics {
					data.tag_name.to_ascii_uppercase()
				} else {
					data.tag_name.clone()
				};
				Some(Value::String(tag))
			}
			"nodeType" => Some(Value::from(1)),
			"childElementCount" => Some(Value::from(self.child_elements().len())),
			"outerHTML" => Some(Value::String(self.outer_html())),
			_ => match reflect::reflection(name) {
				Reflection::InnerHtml => Some(Value::String(self.inner_html())),
				Reflection::TextContent => Some(Value::String(self.text_content())),
				Reflection::StringAttribute(attribute) => {
					Some(Value::String(self.attribute(attribute).unwrap_or_default()))
				}
				Reflection::BooleanAttribute(attribute) => {
					Some(Value::Bool(self.has_attribute(attribute)))
				}
				Reflection::LiveString(attribute) => {
					let stored = self.inner.borrow().properties.get(name).cloned();
					stored.or_else(|| {
						Some(Value::String(self.attribute(attribute).unwrap_or_default()))
					})
				}
				Reflection::LiveBoolean(attribute) => {
					let stored = self.inner.borrow().properties.get(name).cloned();
					stored.or_else(|| Some(Value::Bool(self.has_attribute(attribute))))
				}
				Reflection::Expando => self.inner.borrow().properties.get(name).cloned(),
			},
		}
	}

	fn set_attribute(&self, name: &str, value: &str) -> Result<(), DomError> {
		if !is_valid_name(name) {
			return Err(DomError::invalid_character(name));
		}
		let name = self.config().normalize_name(name);
		let mut data = self.inner.borrow_mut();
		match data
			.attributes
			.iter_mut()
			.find(|(existing, _)| *existing == name)
		{
			Some((_, existing)) => *existing = value.to_string(),
			None => data.attributes.push((name, value.to_string())),
		}
		Ok(())
	}

	fn attribute(&self, name: &str) -> Option<String> {
		let name = self.config().normalize_name(name);
		self.inner
			.borrow()
			.attributes
			.iter()
			.find(|(existing, _)| *existing == name)
			.map(|(_, value)| value.clone())
	}

	fn set_inner_html(&self, markup: &str) -> Result<(), DomError> {
		let nodes = markup::parse_fragment(markup, &self.config())?;
		self.replace_children(nodes);
		Ok(())
	}

	fn inner_html(&self) -> String {
		let mut out = String::new();
		markup::serialize_children(self, &mut out);
		out
	}

	fn set_text_content(&self, text: &str) -> Result<(), DomError> {
		let nodes = if text.is_empty() {
			Vec::new()
		} else {
			vec![MemoryNode::Text(text.to_string())]
		};
		self.replace_children(nodes);
		Ok(())
	}

	fn add_event_listener(
		&self,
		event_type: &str,
		listener: Listener<MemoryEvent>,
	) -> Result<(), DomError> {
		let mut data = self.inner.borrow_mut();
		let duplicate = data
			.listeners
			.iter()
			.any(|(registered, existing)| registered == event_type && existing.ptr_eq(&listener));
		if duplicate {
			debug_log!(
				"<{}>: listener for '{}' already registered",
				data.tag_name,
				event_type
			);
			return Ok(());
		}
		data.listeners.push((event_type.to_string(), listener));
		Ok(())
	}

	fn append_child(&self, child: &MemoryElement) -> Result<(), DomError> {
		if self.is_same_node(child) {
			return Err(DomError::HierarchyRequest(
				"cannot append an element to itself".to_string(),
			));
		}
		let mut cursor = self.parent();
		while let Some(ancestor) = cursor {
			if ancestor.is_same_node(child) {
				return Err(DomError::HierarchyRequest(
					"the new child is an ancestor of the parent".to_string(),
				));
			}
			cursor = ancestor.parent();
		}

		child.detach();
		self.push_node(MemoryNode::Element(child.clone()));
		Ok(())
	}

	fn is_same_node(&self, other: &MemoryElement) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}
}

/// Node identity.
impl PartialEq for MemoryElement {
	fn eq(&self, other: &Self) -> bool {
		self.is_same_node(other)
	}
}

impl Eq for MemoryElement {}

impl fmt::Debug for MemoryElement {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let data = self.inner.borrow();
		f.debug_struct("MemoryElement")
			.field("tag_name", &data.tag_name)
			.field("attributes", &data.attributes)
			.field("children_count", &data.children.len())
			.field("listeners_count", &data.listeners.len())
			.finish()
	}
}

/// Element and attribute names accepted by the in-memory host.
pub(crate) fn is_valid_name(name: &str) -> bool {
	let mut chars = name.chars();
	match chars.next() {
		Some(first) if first.is_alphabetic() || first == '_' || first == ':' => {}
		_ => return false,
	}
	chars.all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ':') || !c.is_ascii())
}
