//! Browser DOM host (`wasm32` only)
//!
//! `web_sys::Document` and `web_sys::Element` implement the host traits
//! directly, so a builder can wrap nodes obtained from any other web-sys code.
//!
//! Both types also have inherent methods with the same names as the trait
//! methods (`create_element`, `set_attribute`, ...). Method-call syntax picks
//! the inherent web-sys method; the builder always goes through the traits.
//!
//! ## Example
//!
//! ```ignore
//! use fluent_dom_builder::{ElementBuilder, dom::web::document};
//!
//! let doc = document()?;
//! let button = ElementBuilder::create(&doc, "button")?
//!     .text("Save")?
//!     .on_click(|_event: &web_sys::Event| web_sys::console::log_1(&"saved".into()))?
//!     .build();
//! ```

use serde_json::Value;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::callback::Listener;
use crate::debug_log;
use crate::dom::{Document, Element as DomElement};
use crate::error::DomError;

/// Returns the document of the global window.
pub fn document() -> Result<web_sys::Document, DomError> {
	let window =
		web_sys::window().ok_or_else(|| DomError::Unavailable("no global window".to_string()))?;
	window
		.document()
		.ok_or_else(|| DomError::Unavailable("window has no document".to_string()))
}

impl Document for web_sys::Document {
	type Element = web_sys::Element;

	fn create_element(&self, tag: &str) -> Result<web_sys::Element, DomError> {
		web_sys::Document::create_element(self, tag)
			.map_err(|err| map_js_error("createElement", tag, err))
	}
}

impl DomElement for web_sys::Element {
	type Event = web_sys::Event;

	fn tag_name(&self) -> String {
		web_sys::Element::tag_name(self)
	}

	fn set_property(&self, name: &str, value: Value) -> Result<(), DomError> {
		let assigned = js_sys::Reflect::set(self, &JsValue::from_str(name), &to_js(&value))
			.map_err(|err| map_js_error("setProperty", name, err))?;
		if assigned {
			Ok(())
		} else {
			Err(DomError::read_only(name))
		}
	}

	fn property(&self, name: &str) -> Option<Value> {
		js_sys::Reflect::get(self, &JsValue::from_str(name))
			.ok()
			.and_then(from_js)
	}

	fn set_attribute(&self, name: &str, value: &str) -> Result<(), DomError> {
		web_sys::Element::set_attribute(self, name, value)
			.map_err(|err| map_js_error("setAttribute", name, err))
	}

	fn attribute(&self, name: &str) -> Option<String> {
		web_sys::Element::get_attribute(self, name)
	}

	fn set_inner_html(&self, markup: &str) -> Result<(), DomError> {
		web_sys::Element::set_inner_html(self, markup);
		Ok(())
	}

	fn inner_html(&self) -> String {
		web_sys::Element::inner_html(self)
	}

	fn set_text_content(&self, text: &str) -> Result<(), DomError> {
		web_sys::Node::set_text_content(self, Some(text));
		Ok(())
	}

	fn add_event_listener(
		&self,
		event_type: &str,
		listener: Listener<web_sys::Event>,
	) -> Result<(), DomError> {
		let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
			listener.call(&event);
		}) as Box<dyn FnMut(web_sys::Event)>);

		self.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())
			.map_err(|err| map_js_error("addEventListener", event_type, err))?;

		// The node owns the listener for the rest of its life.
		closure.forget();
		debug_log!(
			"<{}>: '{}' listener attached",
			web_sys::Element::tag_name(self),
			event_type
		);
		Ok(())
	}

	fn append_child(&self, child: &web_sys::Element) -> Result<(), DomError> {
		web_sys::Node::append_child(self, child)
			.map(|_| ())
			.map_err(|err| map_js_error("appendChild", "", err))
	}

	fn is_same_node(&self, other: &web_sys::Element) -> bool {
		web_sys::Node::is_same_node(self, Some(other))
	}
}

/// Converts a JSON value into the equivalent JS value.
fn to_js(value: &Value) -> JsValue {
	match value {
		Value::Null => JsValue::NULL,
		Value::Bool(b) => JsValue::from_bool(*b),
		Value::Number(n) => n.as_f64().map_or(JsValue::NULL, JsValue::from_f64),
		Value::String(s) => JsValue::from_str(s),
		Value::Array(_) | Value::Object(_) => {
			js_sys::JSON::parse(&value.to_string()).unwrap_or(JsValue::UNDEFINED)
		}
	}
}

/// Converts a JS value into JSON. `undefined` and functions have no JSON form.
fn from_js(value: JsValue) -> Option<Value> {
	if value.is_undefined() || value.is_function() {
		return None;
	}
	if value.is_null() {
		return Some(Value::Null);
	}
	if let Some(b) = value.as_bool() {
		return Some(Value::Bool(b));
	}
	if let Some(f) = value.as_f64() {
		return Some(
			serde_json::Number::from_f64(f)
				.map(Value::Number)
				.unwrap_or(Value::Null),
		);
	}
	if let Some(s) = value.as_string() {
		return Some(Value::String(s));
	}
	js_sys::JSON::stringify(&value)
		.ok()
		.and_then(|json| json.as_string())
		.and_then(|json| serde_json::from_str(&json).ok())
}

/// Maps a thrown JS exception onto [`DomError`], keeping DOMException names
/// the builder callers are likely to match on.
fn map_js_error(operation: &'static str, subject: &str, err: JsValue) -> DomError {
	match err.dyn_ref::<js_sys::Error>() {
		Some(error) => {
			let name = String::from(error.name());
			let message = String::from(error.message());
			match name.as_str() {
				"InvalidCharacterError" => DomError::invalid_character(subject),
				"HierarchyRequestError" => DomError::HierarchyRequest(message),
				"SyntaxError" => DomError::Syntax(message),
				_ => DomError::host(operation, format!("{name}: {message}")),
			}
		}
		None => DomError::host(
			operation,
			err.as_string().unwrap_or_else(|| format!("{err:?}")),
		),
	}
}
