//! Event listener handles.
//!
//! [`Listener`] wraps a closure in an `Rc`, making it cheaply cloneable while
//! keeping a stable identity. Hosts that de-duplicate registrations compare
//! listeners with [`Listener::ptr_eq`], the same way a browser compares
//! function references.
//!
//! ## Example
//!
//! ```ignore
//! use fluent_dom_builder::{Listener, MemoryEvent};
//!
//! let on_click: Listener<MemoryEvent> = Listener::new(|event| {
//!     println!("clicked <{}>", event.target().tag_name());
//! });
//!
//! // Registering the same handle twice keeps one registration on hosts
//! // with DOM de-duplication semantics.
//! builder.on("click", on_click.clone())?.on("click", on_click)?;
//! ```

use std::fmt;
use std::rc::Rc;

/// A cloneable event listener receiving `&Ev`.
pub struct Listener<Ev> {
	inner: Rc<dyn Fn(&Ev) + 'static>,
}

impl<Ev> Listener<Ev> {
	/// Wraps a closure.
	pub fn new<F>(f: F) -> Self
	where
		F: Fn(&Ev) + 'static,
	{
		Self { inner: Rc::new(f) }
	}

	/// Invokes the listener.
	pub fn call(&self, event: &Ev) {
		(self.inner)(event)
	}

	/// Whether both handles refer to the same closure.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}
}

impl<Ev> Clone for Listener<Ev> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<Ev> fmt::Debug for Listener<Ev> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Listener")
			.field("ptr", &Rc::as_ptr(&self.inner).cast::<()>())
			.finish()
	}
}

impl<Ev, F> From<F> for Listener<Ev>
where
	F: Fn(&Ev) + 'static,
{
	fn from(f: F) -> Self {
		Self::new(f)
	}
}
