//! Targets that can receive a named value from
//! [`ElementBuilder::run`](crate::ElementBuilder::run).

use std::collections::{BTreeMap, HashMap};

use serde_json::{Map, Value};

/// An object whose named properties can be assigned.
pub trait PropertySink {
	/// Assigns `value` to `property`, replacing any previous value.
	fn assign(&mut self, property: &str, value: Value);
}

impl PropertySink for Map<String, Value> {
	fn assign(&mut self, property: &str, value: Value) {
		self.insert(property.to_string(), value);
	}
}

impl<S> PropertySink for HashMap<String, Value, S>
where
	S: std::hash::BuildHasher,
{
	fn assign(&mut self, property: &str, value: Value) {
		self.insert(property.to_string(), value);
	}
}

impl PropertySink for BTreeMap<String, Value> {
	fn assign(&mut self, property: &str, value: Value) {
		self.insert(property.to_string(), value);
	}
}

/// Assigning into a JSON value turns non-objects into an empty object first.
impl PropertySink for Value {
	fn assign(&mut self, property: &str, value: Value) {
		if !self.is_object() {
			*self = Value::Object(Map::new());
		}
		if let Value::Object(map) = self {
			map.insert(property.to_string(), value);
		}
	}
}
