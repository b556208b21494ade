//! Parser for gettext `.po` translation catalogs.
//!
//! Produces a [`Catalog`] plus severity-tagged diagnostics instead of
//! failing on the first problem, so a load step can report every error in
//! a resource at once.
//!
//! # Invariants
//!
//! 1. **Comments and the info header are skipped**: `#` lines and the
//!    `msgid ""` header entry never reach the catalog.
//!
//! 2. **Keys are platform-independent**: after escape decoding, `\r\n` in
//!    a msgid is normalized to `\n`.
//!
//! 3. **Untranslated entries are invisible**: an entry whose every
//!    `msgstr` is empty is dropped without a diagnostic, so lookups fall
//!    through to the default locale instead of returning `""`.
//!
//! # Failure Modes
//!
//! | Failure | Severity | Behavior |
//! |---------|----------|----------|
//! | Unterminated / malformed string literal | error | entry dropped |
//! | Text after a closing quote | error | entry dropped |
//! | `msgstr` or continuation with no open entry | error | line dropped |
//! | Duplicate `msgid` | error | later entry dropped |
//! | Entry without any `msgstr` | error | entry dropped |
//! | Malformed `msgstr[N]` index | error | line dropped |
//! | Unknown escape sequence | warning | kept literally |

use crate::catalog::Catalog;

/// Severity of a parse diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoSeverity {
    /// Tolerated; the catalog is still produced.
    Warning,
    /// Fatal for the resource; no catalog is produced.
    Error,
}

impl std::fmt::Display for PoSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A single parse diagnostic with its source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoDiagnostic {
    /// Diagnostic severity.
    pub severity: PoSeverity,
    /// One-based source line number.
    pub line: usize,
    /// Human-readable description.
    pub message: String,
}

impl std::fmt::Display for PoDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at line {}: {}", self.severity, self.line, self.message)
    }
}

/// Outcome of parsing one `.po` resource.
#[derive(Debug, Clone)]
pub struct PoParseResult {
    /// The parsed catalog; `None` when any error-severity diagnostic
    /// occurred.
    pub catalog: Option<Catalog>,
    /// All diagnostics, in source order.
    pub diagnostics: Vec<PoDiagnostic>,
}

impl PoParseResult {
    /// Whether parsing succeeded (warnings allowed).
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.catalog.is_some()
    }

    /// Error-severity diagnostics only.
    pub fn errors(&self) -> impl Iterator<Item = &PoDiagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == PoSeverity::Error)
    }
}

/// Which multi-line field a bare `"..."` continuation extends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Msgctxt,
    Msgid,
    MsgidPlural,
    Msgstr(usize),
}

/// An entry under construction.
struct EntryBuilder {
    line: usize,
    msgid: String,
    msgid_plural: Option<String>,
    msgstrs: Vec<(usize, String)>,
}

/// Parse `.po` text into a catalog for `locale`.
#[must_use]
pub fn parse(locale: &str, text: &str) -> PoParseResult {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut diagnostics = Vec::new();
    let mut catalog = Catalog::new(locale);
    let mut entry: Option<EntryBuilder> = None;
    let mut field: Option<Field> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(rest) = line.strip_prefix("msgid_plural") {
            field = None;
            if let Some(value) = literal(rest, line_no, &mut diagnostics) {
                if let Some(e) = entry.as_mut() {
                    e.msgid_plural = Some(value);
                    field = Some(Field::MsgidPlural);
                } else {
                    error(&mut diagnostics, line_no, "msgid_plural with no open msgid");
                }
            }
        } else if let Some(rest) = line.strip_prefix("msgid") {
            if let Some(done) = entry.take() {
                commit(done, &mut catalog, &mut diagnostics);
            }
            field = None;
            if let Some(value) = literal(rest, line_no, &mut diagnostics) {
                entry = Some(EntryBuilder {
                    line: line_no,
                    msgid: value,
                    msgid_plural: None,
                    msgstrs: Vec::new(),
                });
                field = Some(Field::Msgid);
            }
        } else if let Some(rest) = line.strip_prefix("msgstr[") {
            field = None;
            let Some(close) = rest.find(']') else {
                error(&mut diagnostics, line_no, "malformed plural index");
                continue;
            };
            let Ok(index) = rest[..close].parse::<usize>() else {
                error(
                    &mut diagnostics,
                    line_no,
                    format!("malformed plural index '{}'", &rest[..close]),
                );
                continue;
            };
            if let Some(value) = literal(&rest[close + 1..], line_no, &mut diagnostics) {
                msgstr(
                    &mut entry,
                    index,
                    value,
                    line_no,
                    &mut diagnostics,
                    &mut field,
                );
            }
        } else if let Some(rest) = line.strip_prefix("msgstr") {
            field = None;
            if let Some(value) = literal(rest, line_no, &mut diagnostics) {
                msgstr(&mut entry, 0, value, line_no, &mut diagnostics, &mut field);
            }
        } else if let Some(rest) = line.strip_prefix("msgctxt") {
            // Accepted for compatibility; contexts are not part of the key.
            field = None;
            if literal(rest, line_no, &mut diagnostics).is_some() {
                field = Some(Field::Msgctxt);
            }
        } else if line.starts_with('"') {
            let Some(value) = literal(line, line_no, &mut diagnostics) else {
                continue;
            };
            match (field, entry.as_mut()) {
                (Some(Field::Msgctxt), _) => {}
                (Some(Field::Msgid), Some(e)) => e.msgid.push_str(&value),
                (Some(Field::MsgidPlural), Some(e)) => {
                    if let Some(plural) = e.msgid_plural.as_mut() {
                        plural.push_str(&value);
                    }
                }
                (Some(Field::Msgstr(index)), Some(e)) => {
                    if let Some((_, text)) = e.msgstrs.iter_mut().find(|(i, _)| *i == index) {
                        text.push_str(&value);
                    }
                }
                _ => error(
                    &mut diagnostics,
                    line_no,
                    "string continuation with no preceding keyword",
                ),
            }
        } else {
            field = None;
            error(
                &mut diagnostics,
                line_no,
                format!("unrecognized line: '{line}'"),
            );
        }
    }

    if let Some(done) = entry.take() {
        commit(done, &mut catalog, &mut diagnostics);
    }

    let failed = diagnostics
        .iter()
        .any(|d| d.severity == PoSeverity::Error);
    PoParseResult {
        catalog: (!failed).then_some(catalog),
        diagnostics,
    }
}

/// Record a `msgstr` / `msgstr[N]` value on the open entry.
fn msgstr(
    entry: &mut Option<EntryBuilder>,
    index: usize,
    value: String,
    line_no: usize,
    diagnostics: &mut Vec<PoDiagnostic>,
    field: &mut Option<Field>,
) {
    let Some(e) = entry.as_mut() else {
        error(diagnostics, line_no, "msgstr with no preceding msgid");
        return;
    };
    if e.msgstrs.iter().any(|(i, _)| *i == index) {
        error(
            diagnostics,
            line_no,
            format!("duplicate msgstr[{index}] for '{}'", preview(&e.msgid)),
        );
        return;
    }
    e.msgstrs.push((index, value));
    *field = Some(Field::Msgstr(index));
}

/// Finish an entry and place it in the catalog.
fn commit(entry: EntryBuilder, catalog: &mut Catalog, diagnostics: &mut Vec<PoDiagnostic>) {
    // The info header carries metadata only.
    if entry.msgid.is_empty() {
        return;
    }
    if entry.msgstrs.is_empty() {
        error(
            diagnostics,
            entry.line,
            format!("entry '{}' has no msgstr", preview(&entry.msgid)),
        );
        return;
    }

    let mut msgstrs = entry.msgstrs;
    msgstrs.sort_by_key(|&(i, _)| i);
    let variants: Vec<String> = msgstrs.into_iter().map(|(_, s)| s).collect();

    // Untranslated entries fall through to the default locale instead of
    // rendering as empty strings.
    if variants.iter().all(String::is_empty) {
        return;
    }

    if catalog.get(&entry.msgid).is_some() {
        error(
            diagnostics,
            entry.line,
            format!("duplicate msgid '{}'", preview(&entry.msgid)),
        );
        return;
    }
    catalog.insert(entry.msgid, variants);
}

/// Decode the `"..."` literal on the remainder of a line.
///
/// Returns `None` (with an error diagnostic) for an unterminated literal,
/// a missing opening quote, or trailing text after the closing quote.
fn literal(rest: &str, line_no: usize, diagnostics: &mut Vec<PoDiagnostic>) -> Option<String> {
    let rest = rest.trim_start();
    let Some(body) = rest.strip_prefix('"') else {
        error(diagnostics, line_no, "expected string literal");
        return None;
    };

    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    loop {
        match chars.next() {
            None => {
                error(diagnostics, line_no, "unterminated string literal");
                return None;
            }
            Some('"') => break,
            Some('\\') => match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some('"') => out.push('"'),
                Some('\\') => out.push('\\'),
                Some(other) => {
                    diagnostics.push(PoDiagnostic {
                        severity: PoSeverity::Warning,
                        line: line_no,
                        message: format!("unknown escape '\\{other}'"),
                    });
                    out.push('\\');
                    out.push(other);
                }
                None => {
                    error(diagnostics, line_no, "unterminated string literal");
                    return None;
                }
            },
            Some(c) => out.push(c),
        }
    }

    let trailing = chars.as_str().trim();
    if !trailing.is_empty() {
        error(
            diagnostics,
            line_no,
            format!("unexpected text after string literal: '{trailing}'"),
        );
        return None;
    }
    Some(out)
}

fn error(diagnostics: &mut Vec<PoDiagnostic>, line: usize, message: impl Into<String>) {
    diagnostics.push(PoDiagnostic {
        severity: PoSeverity::Error,
        line,
        message: message.into(),
    });
}

/// Shorten long keys for diagnostics, keeping control characters readable.
fn preview(key: &str) -> String {
    let flat = key.replace('\n', "\\n");
    if flat.chars().count() > 40 {
        let short: String = flat.chars().take(40).collect();
        format!("{short}...")
    } else {
        flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_entries() {
        let result = parse(
            "sv",
            "msgid \"Save\"\nmsgstr \"Spara\"\n\nmsgid \"Open\"\nmsgstr \"Öppna\"\n",
        );
        assert!(result.is_success());
        let catalog = result.catalog.unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.translation("Save"), Some("Spara"));
        assert_eq!(catalog.translation("Open"), Some("Öppna"));
    }

    #[test]
    fn skips_comments_and_header() {
        let text = concat!(
            "# translator comment\n",
            "#: src/main.rs:10\n",
            "msgid \"\"\n",
            "msgstr \"Content-Type: text/plain\\n\"\n",
            "\n",
            "msgid \"Save\"\n",
            "msgstr \"Spara\"\n",
        );
        let result = parse("sv", text);
        assert!(result.is_success());
        let catalog = result.catalog.unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.translation(""), None);
    }

    #[test]
    fn continuation_lines_concatenate() {
        let text = concat!(
            "msgid \"\"\n",
            "\"first \"\n",
            "\"second\"\n",
            "msgstr \"\"\n",
            "\"första \"\n",
            "\"andra\"\n",
        );
        let result = parse("sv", text);
        let catalog = result.catalog.unwrap();
        assert_eq!(catalog.translation("first second"), Some("första andra"));
    }

    #[test]
    fn plural_entries_keep_index_order() {
        let text = concat!(
            "msgid \"one file\"\n",
            "msgid_plural \"many files\"\n",
            "msgstr[1] \"många filer\"\n",
            "msgstr[0] \"en fil\"\n",
        );
        let result = parse("sv", text);
        let catalog = result.catalog.unwrap();
        let entry = catalog.get("one file").unwrap();
        assert_eq!(
            entry.variants().to_vec(),
            vec!["en fil".to_string(), "många filer".to_string()]
        );
        assert_eq!(entry.primary(), "en fil");
    }

    #[test]
    fn escape_decoding() {
        let result = parse("sv", "msgid \"a\\tb\\\"c\\\\d\"\nmsgstr \"x\\ny\"\n");
        let catalog = result.catalog.unwrap();
        assert_eq!(catalog.translation("a\tb\"c\\d"), Some("x\ny"));
    }

    #[test]
    fn keys_platform_independent_after_decode() {
        let result = parse("sv", "msgid \"line1\\r\\nline2\"\nmsgstr \"rad\"\n");
        let catalog = result.catalog.unwrap();
        assert_eq!(catalog.translation("line1\nline2"), Some("rad"));
    }

    #[test]
    fn empty_msgstr_entry_is_skipped() {
        let result = parse("sv", "msgid \"Untranslated\"\nmsgstr \"\"\n");
        assert!(result.is_success());
        let catalog = result.catalog.unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn unknown_escape_is_warning_only() {
        let result = parse("sv", "msgid \"a\\qb\"\nmsgstr \"x\"\n");
        assert!(result.is_success());
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].severity, PoSeverity::Warning);
        assert_eq!(result.catalog.unwrap().translation("a\\qb"), Some("x"));
    }

    #[test]
    fn unterminated_literal_is_error() {
        let result = parse("sv", "msgid \"Save\nmsgstr \"Spara\"\n");
        assert!(!result.is_success());
        assert!(result.errors().next().is_some());
    }

    #[test]
    fn duplicate_msgid_is_error() {
        let text = concat!(
            "msgid \"Save\"\n",
            "msgstr \"Spara\"\n",
            "msgid \"Save\"\n",
            "msgstr \"Lagra\"\n",
        );
        let result = parse("sv", text);
        assert!(!result.is_success());
        let messages: Vec<String> = result.errors().map(ToString::to_string).collect();
        assert!(messages[0].contains("duplicate msgid"));
    }

    #[test]
    fn msgstr_without_msgid_is_error() {
        let result = parse("sv", "msgstr \"Spara\"\n");
        assert!(!result.is_success());
    }

    #[test]
    fn entry_without_msgstr_is_error() {
        let result = parse("sv", "msgid \"Save\"\n\nmsgid \"Open\"\nmsgstr \"Öppna\"\n");
        assert!(!result.is_success());
        assert!(result.errors().next().unwrap().message.contains("no msgstr"));
    }

    #[test]
    fn trailing_garbage_is_error() {
        let result = parse("sv", "msgid \"Save\" extra\nmsgstr \"Spara\"\n");
        assert!(!result.is_success());
    }

    #[test]
    fn malformed_plural_index_is_error() {
        let result = parse(
            "sv",
            "msgid \"f\"\nmsgid_plural \"fs\"\nmsgstr[x] \"bad\"\nmsgstr[0] \"ok\"\n",
        );
        assert!(!result.is_success());
    }

    #[test]
    fn msgctxt_is_ignored() {
        let text = concat!(
            "msgctxt \"menu\"\n",
            "msgid \"File\"\n",
            "msgstr \"Arkiv\"\n",
        );
        let result = parse("sv", text);
        assert!(result.is_success());
        assert_eq!(result.catalog.unwrap().translation("File"), Some("Arkiv"));
    }

    #[test]
    fn bom_is_stripped() {
        let result = parse("sv", "\u{feff}msgid \"Save\"\nmsgstr \"Spara\"\n");
        assert!(result.is_success());
        assert_eq!(result.catalog.unwrap().translation("Save"), Some("Spara"));
    }

    #[test]
    fn diagnostics_render_with_line_numbers() {
        let result = parse("sv", "bogus\n");
        let text = result.errors().next().unwrap().to_string();
        assert!(text.starts_with("error at line 1:"), "{text}");
    }
}
