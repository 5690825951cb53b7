//! The path-expression parser.
//!
//! Grammar (ASCII, case-sensitive, whitespace tolerated between tokens):
//!
//! ```text
//! path     = '$' segment* | ident segment*
//! segment  = '.' ident | '[' literal ']'
//! ident    = [A-Za-z_][A-Za-z0-9_]*
//! literal  = integer | float | char | string
//! ```

use winnow::{
    Parser,
    ascii::{alpha1, alphanumeric1, digit1},
    branch::alt,
    combinator::{opt, repeat0},
    token::one_of,
};

use crate::access::path::{Literal, LiteralValue, Path, Segment, SegmentKind};
use crate::access::ParseError;

type IResult<'a, O> = winnow::IResult<&'a str, O>;

// -----------------------------------------------------------------------------
// Leaf parsers

fn ident(input: &str) -> IResult<'_, &str> {
    let repeat = repeat0::<_, _, (), _, _>;
    (alt((alpha1, "_")), repeat(alt((alphanumeric1, "_"))))
        .recognize()
        .parse_next(input)
}

fn number(input: &str) -> IResult<'_, &str> {
    let exponent = (one_of("eE"), opt(one_of("+-")), digit1);
    (digit1, opt(('.', digit1)), opt(exponent))
        .recognize()
        .parse_next(input)
}

// -----------------------------------------------------------------------------
// Driver

/// Parses a full path expression.
pub(crate) fn parse_path(path: &str) -> Result<Path, ParseError> {
    let offset = |rest: &str| path.len() - rest.len();
    let mut segments = Vec::new();
    let mut rest = path.trim_start();

    match rest.strip_prefix('$') {
        Some(after) => rest = after,
        None => {
            // A bare path anchors implicitly and must lead with a field name.
            let at = offset(rest);
            let (after, name) = ident(rest)
                .map_err(|_| ParseError::new(path, at, "expected a field name or `$`"))?;
            segments.push(Segment {
                kind: SegmentKind::Field(name.into()),
                offset: at,
            });
            rest = after;
        }
    }

    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }
        let at = offset(rest);
        if let Some(after) = rest.strip_prefix('.') {
            let after = after.trim_start();
            let name_at = offset(after);
            let (after, name) = ident(after)
                .map_err(|_| ParseError::new(path, name_at, "expected a field name after `.`"))?;
            segments.push(Segment {
                kind: SegmentKind::Field(name.into()),
                offset: at,
            });
            rest = after;
        } else if let Some(after) = rest.strip_prefix('[') {
            let after = after.trim_start();
            let (after, literal) = literal(path, after)?;
            let after = after.trim_start();
            let Some(after) = after.strip_prefix(']') else {
                return Err(ParseError::new(path, offset(after), "expected `]`"));
            };
            segments.push(Segment {
                kind: SegmentKind::Index(literal),
                offset: at,
            });
            rest = after;
        } else {
            return Err(ParseError::new(path, at, "expected `.` or `[`"));
        }
    }

    Ok(Path::from_segments(segments))
}

/// Parses a standalone literal, used by [`Literal::parse`].
pub(crate) fn parse_literal(text: &str) -> Result<Literal, ParseError> {
    let input = text.trim_start();
    let (rest, literal) = literal(text, input)?;
    if !rest.trim_start().is_empty() {
        let at = text.len() - rest.trim_start().len();
        return Err(ParseError::new(text, at, "unexpected trailing characters"));
    }
    Ok(literal)
}

// -----------------------------------------------------------------------------
// Literals

/// Parses one bracketed literal. `input` must be a suffix of `path` so error
/// offsets stay relative to the original text.
fn literal<'a>(path: &str, input: &'a str) -> Result<(&'a str, Literal), ParseError> {
    let at = path.len() - input.len();
    match input.chars().next() {
        Some('\'') => {
            let (rest, text, raw_len) = quoted(path, input, '\'')?;
            let mut chars = text.chars();
            let (Some(ch), None) = (chars.next(), chars.next()) else {
                return Err(ParseError::new(
                    path,
                    at,
                    "character literal must contain exactly one character",
                ));
            };
            let literal = Literal::new(&input[..raw_len], LiteralValue::Char(ch));
            Ok((rest, literal))
        }
        Some('"') => {
            let (rest, text, raw_len) = quoted(path, input, '"')?;
            let literal = Literal::new(&input[..raw_len], LiteralValue::Str(text.into()));
            Ok((rest, literal))
        }
        Some(c) if c.is_ascii_digit() => {
            let (rest, text) =
                number(input).map_err(|_| ParseError::new(path, at, "expected a literal"))?;
            let value = if text.contains(['.', 'e', 'E']) {
                let parsed = text
                    .parse::<f64>()
                    .map_err(|_| ParseError::new(path, at, "invalid float literal"))?;
                LiteralValue::Float(parsed)
            } else {
                let parsed = text
                    .parse::<i64>()
                    .map_err(|_| ParseError::new(path, at, "integer literal out of range"))?;
                LiteralValue::Int(parsed)
            };
            Ok((rest, Literal::new(text, value)))
        }
        _ => Err(ParseError::new(path, at, "expected a literal")),
    }
}

/// Scans a quoted literal with escapes, returning the remaining input, the
/// unescaped content and the byte length of the raw literal text.
fn quoted<'a>(
    path: &str,
    input: &'a str,
    quote: char,
) -> Result<(&'a str, String, usize), ParseError> {
    let at = path.len() - input.len();
    let mut out = String::new();
    let mut chars = input.char_indices();
    chars.next(); // the opening quote

    while let Some((i, c)) = chars.next() {
        match c {
            c if c == quote => {
                let end = i + c.len_utf8();
                return Ok((&input[end..], out, end));
            }
            '\\' => {
                let Some((j, esc)) = chars.next() else { break };
                let resolved = match esc {
                    'n' => '\n',
                    'r' => '\r',
                    't' => '\t',
                    '0' => '\0',
                    '\\' | '\'' | '"' => esc,
                    _ => return Err(ParseError::new(path, at + j, "unknown escape sequence")),
                };
                out.push(resolved);
            }
            c => out.push(c),
        }
    }
    Err(ParseError::new(path, at, "unterminated quoted literal"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(path: &Path, index: usize) -> &str {
        match &path.segments()[index].kind {
            SegmentKind::Field(name) => name,
            other => panic!("expected a field segment, got {other:?}"),
        }
    }

    fn index(path: &Path, at: usize) -> &Literal {
        match &path.segments()[at].kind {
            SegmentKind::Index(literal) => literal,
            other => panic!("expected an index segment, got {other:?}"),
        }
    }

    #[test]
    fn root_only() {
        assert!(parse_path("$").unwrap().segments().is_empty());
        assert!(parse_path("  $  ").unwrap().segments().is_empty());
    }

    #[test]
    fn rooted_and_bare_paths_agree() {
        let rooted = parse_path("$.Foo.Bar").unwrap();
        let bare = parse_path("Foo.Bar").unwrap();
        assert_eq!(field(&rooted, 0), "Foo");
        assert_eq!(field(&rooted, 1), "Bar");
        assert_eq!(rooted.segments().len(), bare.segments().len());
        assert_eq!(field(&bare, 0), "Foo");
    }

    #[test]
    fn mixed_segments() {
        let path = parse_path(r#"BarMap["b"].Foo.Name1"#).unwrap();
        assert_eq!(path.segments().len(), 4);
        assert_eq!(field(&path, 0), "BarMap");
        assert_eq!(index(&path, 1).raw(), "\"b\"");
        assert_eq!(field(&path, 2), "Foo");
        assert_eq!(field(&path, 3), "Name1");
    }

    #[test]
    fn whitespace_between_segments() {
        let path = parse_path("$ [0] . a [ 'x' ]").unwrap();
        assert_eq!(path.segments().len(), 3);
        assert_eq!(index(&path, 0).value(), &LiteralValue::Int(0));
        assert_eq!(field(&path, 1), "a");
        assert_eq!(index(&path, 2).value(), &LiteralValue::Char('x'));
    }

    #[test]
    fn literal_kinds() {
        let path = parse_path(r#"$[10][1.5][1e3]['a']["k\n"]"#).unwrap();
        assert_eq!(index(&path, 0).value(), &LiteralValue::Int(10));
        assert_eq!(index(&path, 1).value(), &LiteralValue::Float(1.5));
        assert_eq!(index(&path, 2).value(), &LiteralValue::Float(1e3));
        assert_eq!(index(&path, 3).value(), &LiteralValue::Char('a'));
        assert_eq!(index(&path, 4).value(), &LiteralValue::Str("k\n".into()));
        assert_eq!(index(&path, 4).raw(), r#""k\n""#);
    }

    #[test]
    fn offsets_point_into_the_source() {
        let path = parse_path("$.abc[0]").unwrap();
        assert_eq!(path.segments()[0].offset, 1);
        assert_eq!(path.segments()[1].offset, 5);
    }

    #[test]
    fn syntax_errors_carry_offsets() {
        let err = parse_path("$.foo[").unwrap_err();
        assert_eq!(err.offset, 6);

        let err = parse_path("$.foo[0").unwrap_err();
        assert_eq!(err.offset, 7);

        let err = parse_path("$..foo").unwrap_err();
        assert_eq!(err.offset, 2);

        let err = parse_path("").unwrap_err();
        assert_eq!(err.offset, 0);

        let err = parse_path("[0]").unwrap_err();
        assert_eq!(err.offset, 0);

        let err = parse_path("$.a!").unwrap_err();
        assert_eq!(err.offset, 3);
    }

    #[test]
    fn bad_literals() {
        assert!(parse_path("$['ab']").is_err());
        assert!(parse_path("$[\"open").is_err());
        assert!(parse_path("$[99999999999999999999]").is_err());
        assert!(parse_path(r#"$["\q"]"#).is_err());
    }

    #[test]
    fn display_round_trip() {
        let path = parse_path(r#"Foo[0]["key"]"#).unwrap();
        assert_eq!(path.to_string(), r#"$.Foo[0]["key"]"#);
    }
}
