use crate::literal::escape_bounding_quotes;

/// Field delimiter of the spreadsheet export.
pub const SOURCE_DELIMITER: char = '\t';
/// Field delimiter of the form stored in the script constant.
pub const STORED_DELIMITER: char = '|';

/// Rows of flashcard fields, newline separated, pipe delimited.
///
/// No structural validation is done: rows may have differing field counts
/// and empty lines are kept as they are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimitedDataset {
    text: String,
}

impl DelimitedDataset {
    /// Wrap text that is already in stored (pipe delimited) form.
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self { text: text.into() }
    }

    /// Convert a tab separated export into the stored form.
    ///
    /// Each line is converted on its own and every other character,
    /// including `\r` and surrounding whitespace, is left untouched.
    pub fn from_tsv(tsv: &str) -> Self {
        let text = tsv
            .split('\n')
            .map(convert_line)
            .collect::<Vec<_>>()
            .join("\n");

        Self { text }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of newline separated lines. An empty dataset counts as one line.
    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }

    /// Stored form with bounding quotes escaped, ready to sit inside the literal.
    pub fn escaped(&self) -> String {
        escape_bounding_quotes(&self.text)
    }
}

impl std::fmt::Display for DelimitedDataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

fn convert_line(line: &str) -> String {
    line.replace(SOURCE_DELIMITER, &STORED_DELIMITER.to_string())
}
