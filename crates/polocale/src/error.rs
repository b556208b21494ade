//! Error types for catalog loading, formatting, and factory misuse.
//!
//! Missing translations are deliberately *not* represented here: a failed
//! lookup echoes the key back with `found = false` and never errors.

use std::fmt;

/// Errors from localization operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalizeError {
    /// A catalog resource failed to parse at load time. Fatal: the whole
    /// load is aborted and no partial catalog set is produced.
    Load {
        /// Name of the offending resource.
        resource: String,
        /// All error-severity diagnostics, joined with newlines.
        details: String,
    },
    /// Positional formatting of a translated string failed.
    Format(FormatError),
    /// The type-keyed factory construction form was invoked. It exists
    /// only for interface compatibility and always fails.
    TypeKeyedLocalizer,
}

impl fmt::Display for LocalizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load { resource, details } => {
                write!(f, "translation resource '{resource}' has errors: {details}")
            }
            Self::Format(e) => write!(f, "format error: {e}"),
            Self::TypeKeyedLocalizer => {
                write!(f, "type-keyed localizer construction is not supported")
            }
        }
    }
}

impl std::error::Error for LocalizeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Format(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FormatError> for LocalizeError {
    fn from(e: FormatError) -> Self {
        Self::Format(e)
    }
}

/// Errors from positional `{0}`-style placeholder substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// A placeholder index had no matching argument.
    MissingArgument {
        /// The index the template asked for.
        index: usize,
        /// How many arguments the caller supplied.
        provided: usize,
    },
    /// A placeholder token was not a decimal index.
    InvalidPlaceholder(String),
    /// A `{` was never closed.
    UnclosedPlaceholder,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingArgument { index, provided } => write!(
                f,
                "placeholder {{{index}}} has no matching argument ({provided} provided)"
            ),
            Self::InvalidPlaceholder(token) => {
                write!(f, "invalid placeholder '{{{token}}}'")
            }
            Self::UnclosedPlaceholder => write!(f, "unclosed '{{' in template"),
        }
    }
}

impl std::error::Error for FormatError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_error_names_resource_and_details() {
        let e = LocalizeError::Load {
            resource: "app.sv.ui.po".into(),
            details: "error at line 3: unterminated string".into(),
        };
        let text = e.to_string();
        assert!(text.contains("app.sv.ui.po"));
        assert!(text.contains("unterminated string"));
    }

    #[test]
    fn format_error_wraps_with_source() {
        use std::error::Error as _;
        let e = LocalizeError::from(FormatError::MissingArgument {
            index: 2,
            provided: 1,
        });
        assert!(e.source().is_some());
        assert!(e.to_string().contains("{2}"));
    }
}
