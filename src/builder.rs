//! Chainable element construction
//!
//! This module provides access to fluent-dom-builder: an [`ElementBuilder`]
//! wrapping one UI-tree node, the host capability traits, and the in-memory
//! and browser hosts.
//!
//! ## Example
//!
//! ```rust
//! use fluent_dom::builder::html::{li, ul};
//! use fluent_dom::builder::{Element, MemoryDocument};
//!
//! # fn main() -> Result<(), fluent_dom::builder::BuilderError> {
//! let doc = MemoryDocument::new();
//! let list = ul(&doc)?
//!     .class("menu")?
//!     .child(&li(&doc)?.text("Home")?.build())?
//!     .build();
//!
//! assert_eq!(list.outer_html(), r#"<ul class="menu"><li>Home</li></ul>"#);
//! # Ok(())
//! # }
//! ```

pub use fluent_dom_builder::builder::html;
pub use fluent_dom_builder::*;
