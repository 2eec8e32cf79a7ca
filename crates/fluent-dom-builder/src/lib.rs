//! Fluent DOM Builder - chained construction of UI-tree nodes
//!
//! Wraps a single host node in an [`ElementBuilder`] so attributes,
//! properties, content, listeners and children can be applied in one
//! chained expression.
//!
//! ## Features
//!
//! - **Host agnostic**: the builder only needs the [`Document`] and
//!   [`Element`] capability traits
//! - **In-memory host**: [`MemoryDocument`] parses and serializes markup,
//!   reflects properties onto attributes and dispatches events, on every
//!   target
//! - **Browser host**: `web_sys::Document` and `web_sys::Element` on `wasm32`
//! - **Typed errors**: host rejections and callback failures surface as
//!   [`BuilderError`] through `?`
//!
//! ## Architecture
//!
//! - [`builder`]: [`ElementBuilder`] and tag helpers
//! - [`dom`]: capability traits and host implementations
//! - [`callback`]: [`Listener`] handles
//! - [`sink`]: [`PropertySink`] targets for [`ElementBuilder::run`]
//! - [`config`]: [`MemoryDocumentConfig`]
//! - [`error`]: [`DomError`] and [`BuilderError`]
//! - [`logging`]: debug-build logging macros
//!
//! ## Example
//!
//! ```
//! use fluent_dom_builder::builder::html::{form, input};
//! use fluent_dom_builder::{Element, MemoryDocument};
//!
//! # fn main() -> Result<(), fluent_dom_builder::BuilderError> {
//! let doc = MemoryDocument::new();
//! let name = input(&doc)?
//!     .attr("type", "text")?
//!     .prop("name", "username")?
//!     .prop("required", true)?
//!     .build();
//!
//! let login = form(&doc)?
//!     .id("login")?
//!     .child(&name)?
//!     .on_submit(|event| println!("submitted <{}>", event.target().tag_name()))?
//!     .build();
//!
//! assert_eq!(
//!     login.inner_html(),
//!     r#"<input type="text" name="username" required="">"#
//! );
//! assert_eq!(login.dispatch_event("submit"), 1);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod builder;
pub mod callback;
pub mod config;
pub mod dom;
pub mod error;
pub mod logging;
pub mod sink;

pub use builder::ElementBuilder;
pub use callback::Listener;
pub use config::{DEFAULT_MAX_NESTING_DEPTH, MemoryDocumentConfig};
pub use dom::memory::{MemoryDocument, MemoryElement, MemoryEvent, MemoryNode};
pub use dom::{Document, Element, ElementSource};
pub use error::{BuilderError, CallbackError, DomError};
pub use sink::PropertySink;

#[cfg(target_arch = "wasm32")]
pub use dom::web::document;

// Used by the logging macros on wasm32.
#[doc(hidden)]
pub use web_sys as __web_sys;
