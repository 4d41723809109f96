//! Structural difference reports for nested values.
//!
//! `diffattr-core` compares a *reference* value with a *test* value and
//! lists every location where they diverge, each identified by a path such
//! as `[key1][2].name`. It is meant for test code that wants to know *where*
//! two values differ rather than only *whether* they do.
//!
//! ```
//! use diffattr_core::{compare, report, Value};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let reference = Value::from_json_str(r#"{"key1": [1, 2, {"nested_key": "value1"}]}"#)?;
//!     let test = Value::from_json_str(r#"{"key1": [1, 3, {"nested_key": "value2"}]}"#)?;
//!
//!     let paths = compare(&reference, &test)
//!         .map(|item| item.map(|difference| difference.path.to_string()))
//!         .collect::<Result<Vec<_>, _>>()?;
//!     assert_eq!(paths, ["", "[key1]", "[key1][1]", "[key1][2]", "[key1][2][nested_key]"]);
//!
//!     let rendered = report(&reference, &test)?.expect("values differ");
//!     assert!(rendered.ends_with("Path: [key1][2][nested_key], Ref: \"value1\", Test: \"value2\""));
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod diff;
mod diffable;
mod error;
mod number;
mod record;
mod report;
mod value;

pub use diff::{compare, Difference, Differences, Path, PathSegment};
pub use diffable::Diffable;
pub use error::{DiffError, ParseError};
pub use number::Number;
pub use record::{Opaque, Record};
pub use report::{
    render_differences, render_json, report, report_diffable, report_with, ReportConfig,
};
pub use value::{Kind, Value, ValueSet};
