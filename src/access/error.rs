// -----------------------------------------------------------------------------
// Parse error

/// An error produced while parsing a path expression.
///
/// Carries the byte offset the parser stopped at, relative to the original
/// path text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("encountered an error at offset {offset} while parsing `{path}`: {message}")]
pub struct ParseError {
    /// Position in `path`.
    pub offset: usize,
    /// The path that the error occurred in.
    pub path: Box<str>,
    /// What the parser expected.
    pub message: Box<str>,
}

impl ParseError {
    pub(crate) fn new(path: &str, offset: usize, message: impl Into<Box<str>>) -> Self {
        Self {
            offset,
            path: path.into(),
            message: message.into(),
        }
    }
}

// -----------------------------------------------------------------------------
// Access error

/// The reasons a path operation can fail.
///
/// All failures abort resolution immediately; no partial entry is ever
/// returned, and `get`/`set` surface the first failure verbatim.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AccessError {
    /// The path text failed to parse.
    #[error("invalid path: {0}")]
    Syntax(#[from] ParseError),

    /// A selector named a field excluded from reflection
    /// (`#[reflect(ignore)]`).
    #[error("cannot access unexported field")]
    NotAccessible {
        /// The hidden field's name.
        field: Box<str>,
    },

    /// The kind of the dereferenced container does not support the requested
    /// operation.
    #[error("{0}")]
    TypeMismatch(Box<str>),

    /// A selector named a field absent from the struct, including its
    /// flattened members.
    #[error("type `{type_path}` has no field named `{field}`")]
    FieldNotFound {
        type_path: &'static str,
        field: Box<str>,
    },

    /// A sequence index was at or past the end.
    #[error("index {index} out of range {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A bracketed literal cannot be converted to the map's declared key
    /// type.
    #[error("invalid map key {literal}")]
    InvalidMapKey {
        /// The literal's source text, quotes included.
        literal: Box<str>,
    },

    /// The resolved value cannot be produced, e.g. a missing value whose type
    /// has no zero value to materialize.
    #[error("invalid value")]
    InvalidValue,

    /// A write target cannot be mutated in place.
    #[error("value is unaddressable")]
    Unaddressable,

    /// A byte splice would leave the string invalid UTF-8.
    #[error("replacing byte {index} produces invalid UTF-8")]
    InvalidUtf8 { index: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err = AccessError::IndexOutOfRange { index: 10, len: 5 };
        assert_eq!(err.to_string(), "index 10 out of range 5");

        let err = AccessError::InvalidMapKey {
            literal: "\"1\"".into(),
        };
        assert_eq!(err.to_string(), "invalid map key \"1\"");

        let err = AccessError::NotAccessible {
            field: "buffer".into(),
        };
        assert_eq!(err.to_string(), "cannot access unexported field");

        let err = AccessError::FieldNotFound {
            type_path: "demo::Foo",
            field: "bar".into(),
        };
        assert_eq!(err.to_string(), "type `demo::Foo` has no field named `bar`");
    }

    #[test]
    fn parse_errors_wrap_into_access_errors() {
        let parse = ParseError::new("$.a[", 4, "expected a literal");
        let err = AccessError::from(parse.clone());
        assert_eq!(err, AccessError::Syntax(parse));
        assert!(err.to_string().starts_with("invalid path: "));
    }
}
