use core::fmt;

// -----------------------------------------------------------------------------
// Path

/// A parsed path expression.
///
/// A path is a sequence of [segments](Segment) applied left to right from the
/// root value. Parsing once and reusing the `Path` avoids re-parsing in hot
/// loops; all engine entry points have a `*_path` variant taking a `&Path`.
///
/// # Examples
///
/// ```
/// use reflect_access::Path;
///
/// let path = Path::parse(r#"$.servers[0].tags["zone"]"#).unwrap();
/// assert_eq!(path.segments().len(), 4);
/// assert!(Path::parse("$.servers[").is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// Parses a path expression.
    ///
    /// See the [crate docs](crate) for the grammar. A path may anchor
    /// explicitly with `$` or start with a bare field name; `$` alone (and
    /// only that) denotes the root itself.
    #[inline]
    pub fn parse(path: &str) -> Result<Self, super::ParseError> {
        super::parse::parse_path(path)
    }

    pub(crate) fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// The segments of this path, in application order.
    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.segments {
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Segment

/// One step of a [`Path`], with the byte offset it was parsed at.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// What the step does.
    pub kind: SegmentKind,
    /// Byte offset of this segment in the original path text.
    pub offset: usize,
}

/// The two step kinds of the path language.
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentKind {
    /// A named field access: `.name`.
    Field(Box<str>),
    /// A bracketed literal access: `[0]`, `["key"]`, `['k']`, `[1.5]`.
    Index(Literal),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            SegmentKind::Field(name) => write!(f, ".{name}"),
            SegmentKind::Index(literal) => write!(f, "[{}]", literal.raw()),
        }
    }
}

// -----------------------------------------------------------------------------
// Literal

/// A bracketed literal, keeping both its source text and its parsed value.
///
/// The source text (quotes included) feeds error messages; the parsed value
/// feeds sequence indexing and map-key coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    raw: Box<str>,
    value: LiteralValue,
}

/// The parsed value of a [`Literal`].
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A decimal integer literal, e.g. `42`.
    Int(i64),
    /// A floating literal, e.g. `1.5` or `1e3`.
    Float(f64),
    /// A single-quoted character literal, e.g. `'a'`.
    Char(char),
    /// A double-quoted string literal, e.g. `"key"`.
    Str(Box<str>),
}

impl Literal {
    pub(crate) fn new(raw: &str, value: LiteralValue) -> Self {
        Self {
            raw: raw.into(),
            value,
        }
    }

    /// The literal's source text, quotes included.
    #[inline]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The literal's parsed value.
    #[inline]
    pub fn value(&self) -> &LiteralValue {
        &self.value
    }
}

impl fmt::Display for Literal {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

// -----------------------------------------------------------------------------
// Literal coercion

/// Conversion from a path [`Literal`] into a map key type.
///
/// The conversions follow the numeric-conversion rules of the literal kinds:
/// integer literals convert to any integer type they fit in and to floats,
/// float literals truncate into integer keys, character literals convert to
/// their code point, and quoted literals convert to `String` and `char` keys.
/// A failed conversion surfaces as
/// [`InvalidMapKey`](crate::AccessError::InvalidMapKey).
///
/// # Examples
///
/// ```
/// use reflect_access::access::{FromLiteral, Literal};
///
/// let lit = Literal::parse("42").unwrap();
/// assert_eq!(u8::from_literal(&lit), Some(42));
/// assert_eq!(f64::from_literal(&lit), Some(42.0));
/// assert_eq!(String::from_literal(&lit), None);
/// ```
pub trait FromLiteral: Sized {
    /// Converts the literal into `Self`, or `None` if it cannot represent it.
    fn from_literal(literal: &Literal) -> Option<Self>;
}

impl Literal {
    /// Parses a standalone literal, exactly as it would appear in brackets.
    pub fn parse(text: &str) -> Result<Self, super::ParseError> {
        super::parse::parse_literal(text)
    }
}

macro_rules! impl_from_literal_int {
    ($($ty:ty),* $(,)?) => {$(
        impl FromLiteral for $ty {
            fn from_literal(literal: &Literal) -> Option<Self> {
                match literal.value() {
                    LiteralValue::Int(value) => Self::try_from(*value).ok(),
                    // Numeric conversion truncates, like `as` between
                    // primitive number types.
                    LiteralValue::Float(value) => Self::try_from(*value as i64).ok(),
                    LiteralValue::Char(value) => Self::try_from(*value as i64).ok(),
                    LiteralValue::Str(_) => None,
                }
            }
        }
    )*};
}

impl_from_literal_int!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

macro_rules! impl_from_literal_float {
    ($($ty:ty),* $(,)?) => {$(
        impl FromLiteral for $ty {
            fn from_literal(literal: &Literal) -> Option<Self> {
                match literal.value() {
                    LiteralValue::Int(value) => Some(*value as $ty),
                    LiteralValue::Float(value) => Some(*value as $ty),
                    LiteralValue::Char(value) => Some(*value as u32 as $ty),
                    LiteralValue::Str(_) => None,
                }
            }
        }
    )*};
}

impl_from_literal_float!(f32, f64);

impl FromLiteral for char {
    fn from_literal(literal: &Literal) -> Option<Self> {
        match literal.value() {
            LiteralValue::Char(value) => Some(*value),
            LiteralValue::Int(value) => char::from_u32(u32::try_from(*value).ok()?),
            _ => None,
        }
    }
}

impl FromLiteral for String {
    fn from_literal(literal: &Literal) -> Option<Self> {
        match literal.value() {
            LiteralValue::Str(value) => Some(value.to_string()),
            LiteralValue::Char(value) => Some(value.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(text: &str) -> Literal {
        Literal::parse(text).unwrap()
    }

    #[test]
    fn int_literal_coercion() {
        assert_eq!(i32::from_literal(&lit("42")), Some(42));
        assert_eq!(u8::from_literal(&lit("300")), None);
        assert_eq!(i64::from_literal(&lit("1.9")), Some(1));
        assert_eq!(u32::from_literal(&lit("'a'")), Some(97));
        assert_eq!(i32::from_literal(&lit("\"1\"")), None);
    }

    #[test]
    fn float_and_char_coercion() {
        assert_eq!(f64::from_literal(&lit("1.5")), Some(1.5));
        assert_eq!(f32::from_literal(&lit("2")), Some(2.0));
        assert_eq!(char::from_literal(&lit("'x'")), Some('x'));
        assert_eq!(char::from_literal(&lit("97")), Some('a'));
        assert_eq!(char::from_literal(&lit("\"xy\"")), None);
    }

    #[test]
    fn string_coercion() {
        assert_eq!(
            String::from_literal(&lit("\"key\"")),
            Some(String::from("key"))
        );
        assert_eq!(String::from_literal(&lit("'k'")), Some(String::from("k")));
        assert_eq!(String::from_literal(&lit("1")), None);
    }

    #[test]
    fn raw_text_keeps_quotes() {
        assert_eq!(lit("\"1\"").raw(), "\"1\"");
        assert_eq!(lit("'a'").raw(), "'a'");
        assert_eq!(lit("10").raw(), "10");
    }
}
