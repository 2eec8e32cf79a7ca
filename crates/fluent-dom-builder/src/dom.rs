//! DOM abstraction layer
//!
//! The builder talks to the host UI tree only through the two traits in this
//! module, so the same chained code runs against the browser DOM on `wasm32`
//! and against the in-memory tree everywhere else.
//!
//! - [`Document`]: creates elements by tag name.
//! - [`Element`]: a cloneable handle to one node. Clones refer to the same
//!   node, the way a `web_sys::Element` clone refers to the same JS object.
//!
//! ## Hosts
//!
//! - [`memory`]: reference implementation backed by `Rc<RefCell<_>>` nodes.
//! - `web` (`wasm32` only): `web_sys::Document` / `web_sys::Element`.

use serde_json::Value;

use crate::callback::Listener;
use crate::error::DomError;

pub mod memory;

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Element factory of a host environment.
pub trait Document {
	/// The node handle type this document creates.
	type Element: Element;

	/// Creates a detached element for `tag`.
	///
	/// Hosts decide which names are legal; failures are reported unchanged.
	fn create_element(&self, tag: &str) -> Result<Self::Element, DomError>;
}

/// Capabilities of a host UI-tree node.
pub trait Element: Clone {
	/// Event object handed to listeners.
	type Event: 'static;

	/// The element's tag name as the host reports it.
	fn tag_name(&self) -> String;

	/// Assigns a named property.
	fn set_property(&self, name: &str, value: Value) -> Result<(), DomError>;

	/// Reads a named property. `None` when the host has no such property.
	fn property(&self, name: &str) -> Option<Value>;

	/// Sets or overwrites an attribute.
	fn set_attribute(&self, name: &str, value: &str) -> Result<(), DomError>;

	/// Reads an attribute.
	fn attribute(&self, name: &str) -> Option<String>;

	/// Replaces all children with the parsed `markup`.
	fn set_inner_html(&self, markup: &str) -> Result<(), DomError>;

	/// Serializes the children as markup.
	fn inner_html(&self) -> String;

	/// Replaces all children with a single text node.
	fn set_text_content(&self, text: &str) -> Result<(), DomError>;

	/// Registers `listener` for `event_type`.
	///
	/// The listener runs later, when the host dispatches the event.
	fn add_event_listener(
		&self,
		event_type: &str,
		listener: Listener<Self::Event>,
	) -> Result<(), DomError>;

	/// Appends `child` as the last child, moving it if it already has a parent.
	fn append_child(&self, child: &Self) -> Result<(), DomError>;

	/// Whether both handles refer to the same node.
	fn is_same_node(&self, other: &Self) -> bool;
}

/// Input accepted when constructing a builder: a tag to create, or an
/// existing node to adopt.
#[derive(Debug, Clone)]
pub enum ElementSource<E> {
	/// Create a fresh element with this tag name.
	Tag(String),
	/// Adopt this element as-is.
	Existing(E),
}

impl<E> From<&str> for ElementSource<E> {
	fn from(tag: &str) -> Self {
		Self::Tag(tag.to_string())
	}
}

impl<E> From<String> for ElementSource<E> {
	fn from(tag: String) -> Self {
		Self::Tag(tag)
	}
}

impl<E> ElementSource<E> {
	/// Resolves the source into an element using `document` for tags.
	pub fn resolve<D>(self, document: &D) -> Result<E, DomError>
	where
		D: Document<Element = E>,
	{
		match self {
			Self::Tag(tag) => document.create_element(&tag),
			Self::Existing(element) => Ok(element),
		}
	}
}
