//! Positional `{0}`-style placeholder substitution.
//!
//! Single-pass: replaced text is never rescanned, so argument values
//! containing braces do not trigger further substitution. `{{` and `}}`
//! are literal braces. Unlike a UI-template interpolator, a placeholder
//! without a matching argument is an error, mirroring positional-format
//! semantics of the catalogs' source strings.

use crate::error::FormatError;

/// Substitute `{N}` placeholders in `template` with `args[N]`.
///
/// # Errors
///
/// [`FormatError::MissingArgument`] when a placeholder index is out of
/// range, [`FormatError::InvalidPlaceholder`] for a non-numeric token,
/// and [`FormatError::UnclosedPlaceholder`] for a dangling `{`.
pub fn format_positional(
    template: &str,
    args: &[&dyn std::fmt::Display],
) -> Result<String, FormatError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '{' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    out.push('{');
                    continue;
                }
                let mut token = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    token.push(c);
                }
                if !closed {
                    return Err(FormatError::UnclosedPlaceholder);
                }
                let index: usize = token
                    .parse()
                    .map_err(|_| FormatError::InvalidPlaceholder(token.clone()))?;
                let arg = args.get(index).ok_or(FormatError::MissingArgument {
                    index,
                    provided: args.len(),
                })?;
                out.push_str(&arg.to_string());
            }
            '}' => {
                if chars.peek() == Some(&'}') {
                    chars.next();
                }
                out.push('}');
            }
            _ => out.push(ch),
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_positional_args() {
        let result = format_positional("Hello {0}, you have {1} files", &[&"Alice", &42]);
        assert_eq!(result.unwrap(), "Hello Alice, you have 42 files");
    }

    #[test]
    fn repeated_placeholder() {
        let result = format_positional("{0} and {0}", &[&"x"]);
        assert_eq!(result.unwrap(), "x and x");
    }

    #[test]
    fn escaped_braces_are_literal() {
        let result = format_positional("{{0}} is not {0}", &[&"replaced"]);
        assert_eq!(result.unwrap(), "{0} is not replaced");
    }

    #[test]
    fn no_placeholders_passes_through() {
        assert_eq!(format_positional("plain", &[]).unwrap(), "plain");
    }

    #[test]
    fn missing_argument_is_error() {
        let err = format_positional("{1}", &[&"only one"]).unwrap_err();
        assert_eq!(
            err,
            FormatError::MissingArgument {
                index: 1,
                provided: 1
            }
        );
    }

    #[test]
    fn non_numeric_token_is_error() {
        let err = format_positional("{name}", &[&"x"]).unwrap_err();
        assert_eq!(err, FormatError::InvalidPlaceholder("name".into()));
    }

    #[test]
    fn unclosed_brace_is_error() {
        let err = format_positional("oops {0", &[&"x"]).unwrap_err();
        assert_eq!(err, FormatError::UnclosedPlaceholder);
    }

    #[test]
    fn argument_values_are_not_rescanned() {
        let result = format_positional("{0}", &[&"{1}"]);
        assert_eq!(result.unwrap(), "{1}");
    }
}
