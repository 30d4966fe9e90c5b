/*!
A `Caret` names a location in a source document: which document, and a 1-based line and column
within it. Readers attach carets to diagnostics and, optionally, to statements; writers may choose
to ignore them entirely.
*/

use std::fmt::{Display, Formatter};

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

///
/// A 1-based `(line, column)` position within a named document.
///
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Caret {
    document: String,
    line: u32,
    column: u32,
}

// ------------------------------------------------------------------------------------------------
// Implementations
// ------------------------------------------------------------------------------------------------

impl Display for Caret {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.document, self.line, self.column)
    }
}

impl Caret {
    /// Constructs a new caret. `line` and `column` are 1-based; passing `0` for either is a
    /// programmer error (readers always report the first character of a document as `1:1`).
    pub fn new<S>(document: S, line: u32, column: u32) -> Self
    where
        S: Into<String>,
    {
        Self {
            document: document.into(),
            line,
            column,
        }
    }

    /// The caret at the very start of `document`.
    pub fn start_of<S>(document: S) -> Self
    where
        S: Into<String>,
    {
        Self::new(document, 1, 1)
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    /// Returns a new caret on the same document, advanced by one line, with the column reset.
    pub fn advance_line(&self) -> Self {
        Self::new(self.document.clone(), self.line + 1, 1)
    }

    /// Returns a new caret on the same document, advanced by `n` columns on the current line.
    pub fn advance_columns(&self, n: u32) -> Self {
        Self::new(self.document.clone(), self.line, self.column + n)
    }
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_as_name_line_column() {
        let caret = Caret::new("input.ttl", 12, 4);
        assert_eq!(caret.to_string(), "input.ttl:12:4");
    }

    #[test]
    fn advance_line_resets_column() {
        let caret = Caret::new("input.ttl", 3, 10).advance_line();
        assert_eq!(caret, Caret::new("input.ttl", 4, 1));
    }
}
