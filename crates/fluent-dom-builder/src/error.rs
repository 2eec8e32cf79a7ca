//! Error types for DOM hosts and the element builder.

use std::error::Error as StdError;

/// Boxed error raised by a caller-supplied callback.
pub type CallbackError = Box<dyn StdError + Send + Sync + 'static>;

/// A rejection reported by a DOM host.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
	/// A tag or attribute name contains characters the host does not accept.
	#[error("invalid character in name: '{name}'")]
	InvalidCharacter {
		/// The rejected name.
		name: String,
	},

	/// The property cannot be assigned.
	#[error("property '{name}' is read-only")]
	ReadOnlyProperty {
		/// The property name.
		name: String,
	},

	/// The requested tree insertion would produce an invalid hierarchy.
	#[error("hierarchy request error: {0}")]
	HierarchyRequest(String),

	/// Markup could not be parsed.
	#[error("markup syntax error: {0}")]
	Syntax(String),

	/// Markup nests deeper than the host allows.
	#[error("markup nesting exceeds {limit} levels")]
	NestingTooDeep {
		/// Configured maximum depth.
		limit: usize,
	},

	/// The host environment is not reachable (no window, no document).
	#[error("DOM host unavailable: {0}")]
	Unavailable(String),

	/// Any other exception raised by the host.
	#[error("{operation} failed: {message}")]
	Host {
		/// Host operation that raised.
		operation: &'static str,
		/// Host-provided message.
		message: String,
	},
}

impl DomError {
	/// Creates an [`DomError::InvalidCharacter`] for `name`.
	pub fn invalid_character(name: impl Into<String>) -> Self {
		Self::InvalidCharacter { name: name.into() }
	}

	/// Creates a [`DomError::ReadOnlyProperty`] for `name`.
	pub fn read_only(name: impl Into<String>) -> Self {
		Self::ReadOnlyProperty { name: name.into() }
	}

	/// Creates a [`DomError::Host`] error.
	pub fn host(operation: &'static str, message: impl Into<String>) -> Self {
		Self::Host {
			operation,
			message: message.into(),
		}
	}
}

/// Error surfaced by a chained [`ElementBuilder`](crate::ElementBuilder) call.
///
/// Each variant carries the original error unchanged; `Display` and
/// `source()` are those of the wrapped error.
#[derive(Debug, thiserror::Error)]
pub enum BuilderError {
	/// The host refused to create an element for the requested tag.
	#[error(transparent)]
	HostCreation(DomError),

	/// The host rejected a mutation of the owned node.
	#[error(transparent)]
	HostMutation(DomError),

	/// A caller-supplied callback failed.
	#[error(transparent)]
	Callback(CallbackError),
}

impl BuilderError {
	/// Returns the host error, if this is a host failure.
	pub fn dom_error(&self) -> Option<&DomError> {
		match self {
			Self::HostCreation(err) | Self::HostMutation(err) => Some(err),
			Self::Callback(_) => None,
		}
	}

	/// Downcasts a callback failure to its concrete type.
	pub fn callback_error<T>(&self) -> Option<&T>
	where
		T: StdError + 'static,
	{
		match self {
			Self::Callback(err) => err.downcast_ref::<T>(),
			_ => None,
		}
	}

	/// Whether the failure came from a caller-supplied callback.
	pub fn is_callback(&self) -> bool {
		matches!(self, Self::Callback(_))
	}
}
