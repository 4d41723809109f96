use thiserror::Error;

/// Errors that abort a comparison.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DiffError {
    /// A value exposes no field set the differ could descend into.
    #[error("unsupported type: {type_name} (at path \"{path}\")")]
    UnsupportedType {
        /// Name of the offending type.
        type_name: String,
        /// Display form of the path where the value was found.
        path: String,
    },
}

/// Errors that can occur while loading external documents into [`crate::Value`].
#[derive(Debug, Error)]
pub enum ParseError {
    /// The provided JSON input was invalid.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The provided YAML input was invalid.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// An integer does not fit the signed 64-bit range.
    #[error("number {value} does not fit in a 64-bit signed integer")]
    NumberOutOfRange {
        /// The textual representation of the offending number.
        value: String,
    },
    /// YAML mapping keys must be scalars.
    #[error("unsupported YAML key: {found}")]
    UnsupportedYamlKey {
        /// A description of the key that triggered the error.
        found: String,
    },
    /// YAML tags carry no meaning in the value model.
    #[error("unsupported YAML tag: {tag}")]
    UnsupportedYamlTag {
        /// The tag identifier encountered in the document.
        tag: String,
    },
}
