//! # fluent-dom
//!
//! Chained construction of UI-tree nodes over a pluggable DOM host.
//!
//! Instead of creating a node and mutating it in several statements, wrap it
//! in an [`ElementBuilder`] and apply attributes, properties, content,
//! listeners and children in one expression. Each step returns the same
//! builder, and the first failure ends the chain through `?`.
//!
//! ## Feature Flags
//!
//! - `debug-hooks` - Enables `debug_log!` tracing from the DOM hosts
//!   (debug builds only)
//!
//! ## Modules
//!
//! - [`builder`]: the builder, tag helpers, hosts and error types
//!
//! ## Example
//!
//! ```rust
//! use fluent_dom::{Element, ElementBuilder, MemoryDocument};
//!
//! # fn main() -> Result<(), fluent_dom::BuilderError> {
//! let doc = MemoryDocument::new();
//! let link = ElementBuilder::create(&doc, "a")?
//!     .attr("href", "/docs")?
//!     .text("Docs")?
//!     .build();
//!
//! assert_eq!(link.outer_html(), r#"<a href="/docs">Docs</a>"#);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod builder;

pub use builder::{
	BuilderError, Document, DomError, Element, ElementBuilder, ElementSource, Listener,
	MemoryDocument, MemoryDocumentConfig, MemoryElement, MemoryEvent, MemoryNode, PropertySink,
};
