//! Error codes for the pagedraw diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E1xx` - Syntax errors
//! - `E2xx` - Reference and branch validation errors
//! - `E3xx` - Definition errors

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Syntax Errors (E1xx)
    // =========================================================================
    /// Unparseable line.
    ///
    /// The line matches none of the statement forms of the grammar.
    E100,

    /// Empty diagram.
    ///
    /// The source contains no statements, only blank lines or comments.
    E101,

    /// Missing message text.
    ///
    /// A signal or note has no `: text` part.
    E102,

    // =========================================================================
    // Validation Errors (E2xx)
    // =========================================================================
    /// Undefined node.
    ///
    /// An edge references a flowchart node that has no definition.
    E200,

    /// Invalid branch for node type.
    ///
    /// `yes`/`no` used on a node that is not a condition, or `pathN` on a
    /// node that is not parallel.
    E201,

    /// Unlabelled condition branch.
    ///
    /// An edge leaving a condition node does not say whether it is the
    /// `yes` or the `no` branch.
    E202,

    /// Unknown node type.
    E203,

    // =========================================================================
    // Definition Errors (E3xx)
    // =========================================================================
    /// Duplicate node definition.
    E300,

    /// Unsupported syntax.
    ///
    /// The construct exists in the grammar family but is not supported here
    /// (for example per-edge line styles `@>`).
    E301,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
