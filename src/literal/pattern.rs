use crate::dataset::DelimitedDataset;
use crate::error::{FlashSyncError, Result};
use regex::{NoExpand, Regex};
use std::ops::Range;

/// Character bounding the literal in the script file.
pub const BOUNDING_QUOTE: char = '`';
/// Inserted before every bounding quote found inside the data.
pub const ESCAPE_MARKER: char = '\\';

pub const DEFAULT_IDENTIFIER: &str = "csvData";

// Body runs to the first backtick not preceded by a backslash. A bare
// trailing backslash is still accepted as the last resort so data ending
// in `\` stays matchable.
const BODY: &str = r"((?:[^`\\]|\\.|\\)*)";

/// Location of a matched literal within the file text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralMatch {
    /// Whole matched declaration, from `const` through the closing quote
    /// (and the `;` for declarations).
    pub span: Range<usize>,
    /// Text between the bounding quotes.
    pub body: Range<usize>,
}

impl LiteralMatch {
    pub fn body_text<'a>(&self, text: &'a str) -> &'a str {
        &text[self.body.clone()]
    }
}

/// Matches `const <identifier> = `...`;` declarations.
#[derive(Debug, Clone)]
pub struct ConstantPattern {
    identifier: String,
    declaration: Regex,
    literal: Regex,
}

impl ConstantPattern {
    pub fn new(identifier: &str) -> Result<Self> {
        if !is_js_identifier(identifier) {
            return Err(FlashSyncError::Config {
                message: format!("'{}' is not a valid constant identifier", identifier),
            });
        }

        let head = format!("(?s)const {} = `", regex::escape(identifier));
        let declaration = Regex::new(&format!("{}{}`;", head, BODY)).map_err(|e| {
            FlashSyncError::Config {
                message: format!("Failed to build constant pattern: {}", e),
            }
        })?;
        let literal = Regex::new(&format!("{}{}`", head, BODY)).map_err(|e| {
            FlashSyncError::Config {
                message: format!("Failed to build constant pattern: {}", e),
            }
        })?;

        Ok(Self {
            identifier: identifier.to_string(),
            declaration,
            literal,
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// First full declaration, terminating `;` included.
    pub fn find_declaration(&self, text: &str) -> Option<LiteralMatch> {
        Self::locate(&self.declaration, text)
    }

    /// First literal assignment; the terminating `;` is not required.
    pub fn find_literal(&self, text: &str) -> Option<LiteralMatch> {
        Self::locate(&self.literal, text)
    }

    /// Raw body of the constant. Escape markers are left in place.
    ///
    /// The full declaration is tried first so extraction sees the same span
    /// a rewrite replaced; a bare literal without `;` is the fallback.
    pub fn extract<'a>(&self, text: &'a str) -> Option<&'a str> {
        self.find_declaration(text)
            .or_else(|| self.find_literal(text))
            .map(|m| m.body_text(text))
    }

    /// Replace the first declaration with one carrying `dataset`, escaped.
    ///
    /// Returns `None` when no declaration is present.
    pub fn rewrite(&self, text: &str, dataset: &DelimitedDataset) -> Option<String> {
        self.find_declaration(text)?;

        let declaration = self.render_declaration(&dataset.escaped());
        Some(
            self.declaration
                .replacen(text, 1, NoExpand(&declaration))
                .into_owned(),
        )
    }

    pub fn render_declaration(&self, escaped_body: &str) -> String {
        format!(
            "const {} = {}{}{};",
            self.identifier, BOUNDING_QUOTE, escaped_body, BOUNDING_QUOTE
        )
    }

    fn locate(regex: &Regex, text: &str) -> Option<LiteralMatch> {
        let captures = regex.captures(text)?;
        let whole = captures.get(0)?;
        let body = captures.get(1)?;

        Some(LiteralMatch {
            span: whole.range(),
            body: body.range(),
        })
    }
}

/// Prefix every bounding quote with the escape marker.
pub fn escape_bounding_quotes(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if c == BOUNDING_QUOTE {
            escaped.push(ESCAPE_MARKER);
        }
        escaped.push(c);
    }
    escaped
}

pub fn is_js_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn csv_pattern() -> ConstantPattern {
        ConstantPattern::new(DEFAULT_IDENTIFIER).unwrap()
    }

    const APP_JS: &str = "// flashcards\nconst csvData = `old|row\nsecond|row`;\n\nparseFlashcards(csvData);\n";

    #[test]
    fn test_rewrite_example() {
        let pattern = csv_pattern();
        let dataset = DelimitedDataset::from_tsv("a\tb\nc\td");

        let updated = pattern
            .rewrite("const csvData = `old`;", &dataset)
            .unwrap();
        assert_eq!(updated, "const csvData = `a|b\nc|d`;");
    }

    #[test]
    fn test_rewrite_keeps_surrounding_text() {
        let pattern = csv_pattern();
        let dataset = DelimitedDataset::new("new|data");

        let updated = pattern.rewrite(APP_JS, &dataset).unwrap();
        assert_eq!(
            updated,
            "// flashcards\nconst csvData = `new|data`;\n\nparseFlashcards(csvData);\n"
        );
    }

    #[test]
    fn test_rewrite_missing_declaration() {
        let pattern = csv_pattern();
        let dataset = DelimitedDataset::new("x");

        assert!(pattern.rewrite("let csvData = 'old';", &dataset).is_none());
        // The `;` is part of the declaration.
        assert!(pattern.rewrite("const csvData = `old`", &dataset).is_none());
    }

    #[test]
    fn test_rewrite_only_first_occurrence() {
        let pattern = csv_pattern();
        let dataset = DelimitedDataset::new("fresh");
        let text = "const csvData = `one`;\nconst csvData = `two`;";

        let updated = pattern.rewrite(text, &dataset).unwrap();
        assert_eq!(updated, "const csvData = `fresh`;\nconst csvData = `two`;");
    }

    #[test]
    fn test_rewrite_does_not_expand_dollar_groups() {
        let pattern = csv_pattern();
        let dataset = DelimitedDataset::new("price|$1|${total}");

        let updated = pattern.rewrite("const csvData = `old`;", &dataset).unwrap();
        assert_eq!(updated, "const csvData = `price|$1|${total}`;");
    }

    #[test]
    fn test_escaping_on_rewrite() {
        let pattern = csv_pattern();
        let dataset = DelimitedDataset::new("use `let`|keyword");

        let updated = pattern.rewrite("const csvData = ``;", &dataset).unwrap();
        assert_eq!(updated, "const csvData = `use \\`let\\`|keyword`;");

        let body = pattern.extract(&updated).unwrap();
        assert_eq!(body, "use \\`let\\`|keyword");
        assert_eq!(body.matches("\\`").count(), body.matches('`').count());
    }

    #[test]
    fn test_round_trip_without_backticks() {
        let pattern = csv_pattern();
        let datasets = ["", "a|b\nc|d", "line\n\nafter blank\n", "中國語文|詞牌"];

        for raw in &datasets {
            let dataset = DelimitedDataset::new(*raw);
            let updated = pattern.rewrite(APP_JS, &dataset).unwrap();
            assert_eq!(pattern.extract(&updated), Some(*raw));
        }
    }

    #[test]
    fn test_extract_without_semicolon() {
        let pattern = csv_pattern();
        assert_eq!(pattern.extract("const csvData = `raw|text`\n"), Some("raw|text"));
    }

    #[test]
    fn test_extract_multiline_and_spans() {
        let pattern = csv_pattern();
        let found = pattern.find_declaration(APP_JS).unwrap();

        assert_eq!(found.body_text(APP_JS), "old|row\nsecond|row");
        assert!(APP_JS[found.span.clone()].starts_with("const csvData = `"));
        assert!(APP_JS[found.span.clone()].ends_with("`;"));
    }

    #[test]
    fn test_data_ending_in_backslash_still_matches() {
        let pattern = csv_pattern();
        let text = "const csvData = `path\\`;\nrest();";

        assert_eq!(pattern.extract(text), Some("path\\"));
    }

    #[test]
    fn test_trailing_backslash_round_trips_before_template_literal() {
        let pattern = csv_pattern();
        let text = "const csvData = `old`;\nalert(`${x}`);\n";
        let dataset = DelimitedDataset::new("card|path\\");

        let updated = pattern.rewrite(text, &dataset).unwrap();
        assert_eq!(updated, "const csvData = `card|path\\`;\nalert(`${x}`);\n");
        assert_eq!(pattern.extract(&updated), Some("card|path\\"));
    }

    #[test]
    fn test_escaped_backslash_backtick_extracts_whole_body() {
        let pattern = csv_pattern();
        let dataset = DelimitedDataset::new("a\\`b");

        let updated = pattern.rewrite("const csvData = `old`;", &dataset).unwrap();
        assert_eq!(updated, "const csvData = `a\\\\`b`;");

        let declaration = pattern.find_declaration(&updated).unwrap();
        assert_eq!(pattern.extract(&updated), Some(declaration.body_text(&updated)));
        assert_eq!(pattern.extract(&updated), Some("a\\\\`b"));
    }

    #[test]
    fn test_custom_identifier() {
        let pattern = ConstantPattern::new("deckData").unwrap();
        let text = "const csvData = `a`;\nconst deckData = `b`;";

        assert_eq!(pattern.extract(text), Some("b"));
        assert_eq!(pattern.identifier(), "deckData");
    }

    #[test]
    fn test_invalid_identifier() {
        assert!(ConstantPattern::new("").is_err());
        assert!(ConstantPattern::new("1data").is_err());
        assert!(ConstantPattern::new("csv.Data").is_err());
        assert!(is_js_identifier("$cards_2"));
    }

    #[test]
    fn test_escape_bounding_quotes() {
        assert_eq!(escape_bounding_quotes("no quotes"), "no quotes");
        assert_eq!(escape_bounding_quotes("``"), "\\`\\`");
    }
}
