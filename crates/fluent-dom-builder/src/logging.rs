//! Logging macros shared by the DOM hosts
//!
//! Every macro compiles to a no-op in release builds. On `wasm32` the output
//! goes to the browser console, elsewhere to stderr with a level prefix.
//!
//! | Macro | Debug Assertions | Feature Required | WASM | Non-WASM |
//! |-------|------------------|------------------|------|----------|
//! | `debug_log!` | Required | `debug-hooks` | `console.debug` | `eprintln!` |
//! | `info_log!` | Required | None | `console.info` | `eprintln!` |
//! | `warn_log!` | Required | None | `console.warn` | `eprintln!` |
//! | `error_log!` | Required | None | `console.error` | `eprintln!` |
//!
//! ## Example
//!
//! ```ignore
//! use fluent_dom_builder::{debug_log, warn_log};
//!
//! debug_log!("parsed {} nodes", count);
//! warn_log!("ignoring stray </{}>", tag);
//! ```

/// Routes a formatted message to the platform sink.
#[doc(hidden)]
#[macro_export]
#[cfg(target_arch = "wasm32")]
macro_rules! __emit_log {
	(debug, $($arg:tt)*) => {
		$crate::__web_sys::console::debug_1(&::std::format!($($arg)*).into())
	};
	(info, $($arg:tt)*) => {
		$crate::__web_sys::console::info_1(&::std::format!($($arg)*).into())
	};
	(warn, $($arg:tt)*) => {
		$crate::__web_sys::console::warn_1(&::std::format!($($arg)*).into())
	};
	(error, $($arg:tt)*) => {
		$crate::__web_sys::console::error_1(&::std::format!($($arg)*).into())
	};
}

/// Routes a formatted message to the platform sink.
#[doc(hidden)]
#[macro_export]
#[cfg(not(target_arch = "wasm32"))]
macro_rules! __emit_log {
	(debug, $($arg:tt)*) => {
		::std::eprintln!("[DEBUG] {}", ::std::format!($($arg)*))
	};
	(info, $($arg:tt)*) => {
		::std::eprintln!("[INFO] {}", ::std::format!($($arg)*))
	};
	(warn, $($arg:tt)*) => {
		::std::eprintln!("[WARN] {}", ::std::format!($($arg)*))
	};
	(error, $($arg:tt)*) => {
		::std::eprintln!("[ERROR] {}", ::std::format!($($arg)*))
	};
}

/// Logs a debug message (requires `debug-hooks` feature + `debug_assertions`)
///
/// Intended for tracing host internals such as parser recovery.
#[macro_export]
#[cfg(all(debug_assertions, feature = "debug-hooks"))]
macro_rules! debug_log {
	($($arg:tt)*) => {{
		$crate::__emit_log!(debug, $($arg)*);
	}};
}

/// No-op debug_log when conditions are not met
#[macro_export]
#[cfg(not(all(debug_assertions, feature = "debug-hooks")))]
macro_rules! debug_log {
	($($arg:tt)*) => {{}};
}

/// Logs an info message (requires `debug_assertions`)
#[macro_export]
#[cfg(debug_assertions)]
macro_rules! info_log {
	($($arg:tt)*) => {{
		$crate::__emit_log!(info, $($arg)*);
	}};
}

/// No-op info_log in release builds
#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! info_log {
	($($arg:tt)*) => {{}};
}

/// Logs a warning message (requires `debug_assertions`)
///
/// # Example
///
/// ```ignore
/// warn_log!("listener for {:?} already registered", event_type);
/// ```
#[macro_export]
#[cfg(debug_assertions)]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		$crate::__emit_log!(warn, $($arg)*);
	}};
}

/// No-op warn_log in release builds
#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! warn_log {
	($($arg:tt)*) => {{}};
}

/// Logs an error message (requires `debug_assertions`)
#[macro_export]
#[cfg(debug_assertions)]
macro_rules! error_log {
	($($arg:tt)*) => {{
		$crate::__emit_log!(error, $($arg)*);
	}};
}

/// No-op error_log in release builds
#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! error_log {
	($($arg:tt)*) => {{}};
}
