//! Property reflection rules for the in-memory host.
//!
//! Scripted DOM properties either mirror an attribute (`id`, `className`,
//! `disabled`, ...), stand for the content (`innerHTML`, `textContent`), or
//! are plain expando values stored on the node.
//!
//! `value` and `checked` are live state: assigning them never touches the
//! attribute, which only supplies the initial value. `defaultValue` and
//! `defaultChecked` write the attribute.

use serde_json::Value;

/// Properties that can never be assigned.
pub(super) const READ_ONLY_PROPERTIES: &[&str] = &[
	"tagName",
	"nodeName",
	"nodeType",
	"childElementCount",
	"parentElement",
	"outerHTML",
];

/// How a property name maps onto node state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Reflection {
	InnerHtml,
	TextContent,
	/// String-valued property stored in the named attribute.
	StringAttribute(&'static str),
	/// Boolean property expressed by the presence of the named attribute.
	BooleanAttribute(&'static str),
	/// String state kept on the node, read from the attribute until assigned.
	LiveString(&'static str),
	/// Boolean state kept on the node, read from the attribute until assigned.
	LiveBoolean(&'static str),
	/// Plain value kept in the node's property map.
	Expando,
}

pub(super) fn reflection(name: &str) -> Reflection {
	match name {
		"innerHTML" => Reflection::InnerHtml,
		"textContent" => Reflection::TextContent,
		"id" => Reflection::StringAttribute("id"),
		"className" => Reflection::StringAttribute("class"),
		"title" => Reflection::StringAttribute("title"),
		"name" => Reflection::StringAttribute("name"),
		"value" => Reflection::LiveString("value"),
		"defaultValue" => Reflection::StringAttribute("value"),
		"disabled" => Reflection::BooleanAttribute("disabled"),
		"hidden" => Reflection::BooleanAttribute("hidden"),
		"checked" => Reflection::LiveBoolean("checked"),
		"defaultChecked" => Reflection::BooleanAttribute("checked"),
		"required" => Reflection::BooleanAttribute("required"),
		"readOnly" => Reflection::BooleanAttribute("readonly"),
		_ => Reflection::Expando,
	}
}

/// Script-style string conversion of a property value.
pub(super) fn to_dom_string(value: &Value) -> String {
	match value {
		Value::Null => "null".to_string(),
		Value::Bool(b) => b.to_string(),
		Value::Number(n) => number_to_string(n),
		Value::String(s) => s.clone(),
		Value::Array(items) => items
			.iter()
			.map(|item| match item {
				Value::Null => String::new(),
				other => to_dom_string(other),
			})
			.collect::<Vec<_>>()
			.join(","),
		Value::Object(_) => "[object Object]".to_string(),
	}
}

/// Like [`to_dom_string`], but `null` becomes the empty string, as the
/// content setters treat it.
pub(super) fn to_content_string(value: &Value) -> String {
	match value {
		Value::Null => String::new(),
		other => to_dom_string(other),
	}
}

/// Script truthiness of a property value.
pub(super) fn is_truthy(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(b) => *b,
		Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
		Value::String(s) => !s.is_empty(),
		Value::Array(_) | Value::Object(_) => true,
	}
}

fn number_to_string(n: &serde_json::Number) -> String {
	if let Some(i) = n.as_i64() {
		return i.to_string();
	}
	if let Some(u) = n.as_u64() {
		return u.to_string();
	}
	match n.as_f64() {
		Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{f:.0}"),
		Some(f) => f.to_string(),
		None => n.to_string(),
	}
}
