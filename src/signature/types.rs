//! Core data types for parsed declarations.

use serde::Serialize;

// ─── Parameter ───────────────────────────────────────────────────────

/// One `type name` pair from a parameter list, in call order.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub type_name: String,
    /// Empty for unnamed parameters such as `(int)`.
    pub name: String,
}

impl Parameter {
    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }
}

// ─── Declaration ─────────────────────────────────────────────────────

/// One parsed method signature.
///
/// Built once per scanned line and discarded after code generation.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Every token before the method name, joined by a single space. May be empty.
    pub return_type: String,
    /// Unqualified method name; any `Class::` prefix is already stripped.
    pub method_name: String,
    pub parameters: Vec<Parameter>,
    /// The parameter list exactly as written, parentheses included.
    pub parameter_text: String,
    /// Declared `virtual`, or a member of an `__interface`.
    pub is_overridable: bool,
}

impl Declaration {
    /// First whitespace token of the return type, as used by `MOCK_METHOD`.
    /// Compound types like `const std::vector<int>&` collapse to `const`.
    pub fn leading_return_token(&self) -> &str {
        self.return_type.split_whitespace().next().unwrap_or("")
    }

    /// Parameter list without its enclosing parentheses.
    pub fn parameter_body(&self) -> &str {
        let text = self.parameter_text.as_str();
        text.strip_prefix('(')
            .and_then(|t| t.strip_suffix(')'))
            .unwrap_or(text)
    }
}

impl std::fmt::Display for Declaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.return_type.is_empty() {
            write!(f, "{}{}", self.method_name, self.parameter_text)
        } else {
            write!(f, "{} {}{}", self.return_type, self.method_name, self.parameter_text)
        }
    }
}
