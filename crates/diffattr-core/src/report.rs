//! Plain-text and JSON renderings of difference records.

use tracing::debug;

use crate::{compare, DiffError, Difference, Diffable, Value};

const COLOR_RESET: &str = "\u{1b}[0m";
const COLOR_RED: &str = "\u{1b}[31m";
const COLOR_GREEN: &str = "\u{1b}[32m";

/// Configuration toggles for report rendering.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReportConfig {
    color: bool,
}

impl ReportConfig {
    /// Constructs a configuration with default settings (no ANSI color).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables ANSI color output.
    #[must_use]
    pub fn with_color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    /// Indicates whether color output is enabled.
    #[must_use]
    pub fn color_enabled(self) -> bool {
        self.color
    }
}

/// Compares two values and renders the differences, one line each.
///
/// Returns `Ok(None)` when the values do not differ.
///
/// ```
/// # use diffattr_core::{report, Value};
/// let reference = Value::from(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
/// let test = Value::from(vec![Value::Int(1), Value::Int(2), Value::Int(4)]);
/// assert_eq!(
///     report(&reference, &test)?.as_deref(),
///     Some("Path: , Ref: [1, 2, 3], Test: [1, 2, 4]\nPath: [2], Ref: 3, Test: 4"),
/// );
/// assert_eq!(report(&reference, &reference)?, None);
/// # Ok::<(), diffattr_core::DiffError>(())
/// ```
pub fn report(reference: &Value, test: &Value) -> Result<Option<String>, DiffError> {
    report_with(reference, test, &ReportConfig::default())
}

/// Like [`report`], with explicit rendering configuration.
pub fn report_with(
    reference: &Value,
    test: &Value,
    config: &ReportConfig,
) -> Result<Option<String>, DiffError> {
    let differences = compare(reference, test).collect::<Result<Vec<_>, _>>()?;
    Ok(render_differences(&differences, config))
}

/// Converts both sides through [`Diffable`] and reports their differences.
///
/// ```
/// # use diffattr_core::report_diffable;
/// let report = report_diffable(&vec![1, 2], &vec![1, 3])?;
/// assert_eq!(report.as_deref(), Some("Path: , Ref: [1, 2], Test: [1, 3]\nPath: [1], Ref: 2, Test: 3"));
/// # Ok::<(), diffattr_core::DiffError>(())
/// ```
pub fn report_diffable<R, T>(reference: &R, test: &T) -> Result<Option<String>, DiffError>
where
    R: Diffable + ?Sized,
    T: Diffable + ?Sized,
{
    report(&reference.to_value(), &test.to_value())
}

/// Renders already collected records; `None` when there are none.
#[must_use]
pub fn render_differences(
    differences: &[Difference<'_>],
    config: &ReportConfig,
) -> Option<String> {
    if differences.is_empty() {
        return None;
    }
    let lines: Vec<String> =
        differences.iter().map(|difference| render_line(difference, config)).collect();
    debug!(lines = lines.len(), "rendered difference report");
    Some(lines.join("\n"))
}

/// Serializes records as a JSON array of `{"path", "ref", "test"}` objects.
///
/// ```
/// # use diffattr_core::{compare, render_json, Value};
/// let reference = Value::map([("a", Value::Int(1))]);
/// let test = Value::map([("a", Value::Int(2))]);
/// let differences: Vec<_> = compare(&reference, &test).collect::<Result<_, _>>()?;
/// assert_eq!(
///     render_json(&differences)?,
///     r#"[{"path":"","ref":{"a":1},"test":{"a":2}},{"path":"[a]","ref":1,"test":2}]"#,
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn render_json(differences: &[Difference<'_>]) -> Result<String, serde_json::Error> {
    serde_json::to_string(differences)
}

fn render_line(difference: &Difference<'_>, config: &ReportConfig) -> String {
    if config.color_enabled() {
        format!(
            "Path: {}, Ref: {COLOR_RED}{}{COLOR_RESET}, Test: {COLOR_GREEN}{}{COLOR_RESET}",
            difference.path, difference.reference, difference.test
        )
    } else {
        format!(
            "Path: {}, Ref: {}, Test: {}",
            difference.path, difference.reference, difference.test
        )
    }
}

/// Panics with a difference report unless both values are the same.
///
/// Both arguments may be any [`crate::Diffable`] value.
///
/// ```
/// use diffattr_core::assert_no_differences;
///
/// assert_no_differences!(vec![1, 2, 3], vec![1, 2, 3]);
/// ```
///
/// ```should_panic
/// use diffattr_core::assert_no_differences;
///
/// assert_no_differences!(vec![1, 2, 3], vec![1, 2, 4]);
/// ```
#[macro_export]
macro_rules! assert_no_differences {
    ($reference:expr, $test:expr $(,)?) => {
        match $crate::report_diffable(&$reference, &$test) {
            ::core::result::Result::Ok(::core::option::Option::None) => {}
            ::core::result::Result::Ok(::core::option::Option::Some(report)) => {
                panic!("values differ:\n{}", report)
            }
            ::core::result::Result::Err(err) => panic!("comparison failed: {}", err),
        }
    };
}
