//! Configuration for the in-memory DOM host.

use serde::{Deserialize, Serialize};

/// Default maximum nesting depth accepted by the markup parser.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 512;

/// Behaviour knobs for [`MemoryDocument`](crate::dom::memory::MemoryDocument).
///
/// Every field has a default, so partial JSON is accepted:
///
/// ```
/// use fluent_dom_builder::MemoryDocumentConfig;
///
/// let config = MemoryDocumentConfig::from_json(r#"{ "max_nesting_depth": 8 }"#).unwrap();
/// assert_eq!(config.max_nesting_depth, 8);
/// assert!(config.html_semantics);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryDocumentConfig {
	/// ASCII-lowercase tag and attribute names, as an HTML document does.
	pub html_semantics: bool,
	/// Deepest element nesting the markup parser accepts.
	pub max_nesting_depth: usize,
	/// Property names rejected on assignment, in addition to the built-in
	/// read-only set.
	pub read_only_properties: Vec<String>,
}

impl Default for MemoryDocumentConfig {
	fn default() -> Self {
		Self {
			html_semantics: true,
			max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
			read_only_properties: Vec::new(),
		}
	}
}

impl MemoryDocumentConfig {
	/// Parses a configuration from JSON.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}

	/// Sets [`html_semantics`](Self::html_semantics).
	pub fn with_html_semantics(mut self, enabled: bool) -> Self {
		self.html_semantics = enabled;
		self
	}

	/// Sets [`max_nesting_depth`](Self::max_nesting_depth).
	pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
		self.max_nesting_depth = depth;
		self
	}

	/// Adds a property name to the read-only set.
	pub fn with_read_only_property(mut self, name: impl Into<String>) -> Self {
		self.read_only_properties.push(name.into());
		self
	}

	/// Normalizes a tag or attribute name according to the document mode.
	pub(crate) fn normalize_name(&self, name: &str) -> String {
		if self.html_semantics {
			name.to_ascii_lowercase()
		} else {
			name.to_string()
		}
	}
}
