//! Fluent element construction
//!
//! This module provides [`ElementBuilder`], a chainable wrapper around one
//! host node, plus tag helper functions for common HTML elements.
//!
//! ## Features
//!
//! - **Chaining**: each mutating call returns the same builder
//! - **Error propagation**: host and callback failures surface through `?`
//! - **Event shortcuts**: `.on_click()`, `.on_input()` and friends
//!
//! ## Example
//!
//! ```
//! use fluent_dom_builder::builder::html::{button, div};
//! use fluent_dom_builder::{Element, MemoryDocument};
//!
//! # fn main() -> Result<(), fluent_dom_builder::BuilderError> {
//! let doc = MemoryDocument::new();
//!
//! let counter = div(&doc)?
//!     .class("counter")?
//!     .child(&button(&doc)?.text("Increment")?.on_click(|_| {})?.build())?
//!     .build();
//!
//! assert_eq!(
//!     counter.inner_html(),
//!     "<button>Increment</button>"
//! );
//! # Ok(())
//! # }
//! ```

pub mod html;

pub use html::*;
