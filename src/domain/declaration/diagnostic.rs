use std::fmt;

use crate::common::error::OctoError;

/// How grammar violations in a declaration file are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Keep parsing and log each violation.
    #[default]
    Lenient,
    /// Fail on the first violation.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A top-level word other than `projects` or `workspace`.
    UnknownKeyword(String),
    /// A workspace alias not followed by `->`.
    MissingPointer { alias: String, found: String },
    /// A word where only a brace may appear.
    UnexpectedToken(String),
    /// A word longer than the token buffer; it was truncated.
    TokenTooLong,
    /// The stream ended inside a block or declaration.
    UnexpectedEndOfInput,
    /// A `#` after the start of a word; it was dropped and the word continues.
    HashInsideWord,
    /// A brace inside a comment; it still opens or closes a block.
    BraceInComment(char),
    /// A control or non-ASCII byte outside a comment; it was dropped.
    UnexpectedByte(u8),
}

/// A grammar violation and the line it was found on (1-based).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: usize,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(line: usize, kind: DiagnosticKind) -> Self {
        Self { line, kind }
    }

    pub fn message(&self) -> String {
        match &self.kind {
            DiagnosticKind::UnknownKeyword(word) => {
                format!("unknown keyword '{word}', expected 'projects' or 'workspace'")
            }
            DiagnosticKind::MissingPointer { alias, found } => {
                format!("expected '->' after alias '{alias}', found '{found}'")
            }
            DiagnosticKind::UnexpectedToken(word) => format!("unexpected '{word}'"),
            DiagnosticKind::TokenTooLong => "token too long, truncated".to_string(),
            DiagnosticKind::UnexpectedEndOfInput => "unexpected end of input".to_string(),
            DiagnosticKind::HashInsideWord => {
                "'#' inside a word ignored, comments start at a word boundary".to_string()
            }
            DiagnosticKind::BraceInComment(brace) => {
                format!("'{brace}' inside a comment is not commented out")
            }
            DiagnosticKind::UnexpectedByte(byte) => format!("unexpected byte 0x{byte:02x} ignored"),
        }
    }

    /// Converts into a [`OctoError::DeclarationError`].
    pub fn into_error(self, file_path: Option<std::path::PathBuf>) -> OctoError {
        OctoError::declaration_error(self.message(), self.line, file_path)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message())
    }
}
