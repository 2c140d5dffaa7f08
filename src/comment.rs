use crate::alphabet::check_payload;
use crate::charset::is_acceptable_charset;
use crate::GrammarError;
use std::fmt::{Display, Formatter};

const URL_KEY: &str = "sourceMappingURL=";
const LINE_LEAD_IN: &str = "//# ";
const BLOCK_LEAD_IN: &str = "/*# ";
const BLOCK_CLOSE: &str = " */";
const DATA_SCHEME: &str = "data:";
const MEDIA_TYPE: &str = "application/json";
const BASE64_MARKER: &str = ";base64,";

/// The comment flavour a source map annotation is written in.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum CommentSyntax {
    /// `//# sourceMappingURL=...`, used for JavaScript.
    #[default]
    Line,
    /// `/*# sourceMappingURL=... */`, used for CSS.
    Block,
}

impl CommentSyntax {
    fn lead_in(self) -> &'static str {
        match self {
            Self::Line => LINE_LEAD_IN,
            Self::Block => BLOCK_LEAD_IN,
        }
    }
}

/// What the comment points at.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CommentKind<'a> {
    /// A base64 data url holding the whole map.
    Inline {
        /// Charset token exactly as it was declared, if any.
        charset: Option<&'a str>,
        payload: &'a str,
    },
    /// A bare file name of an external map.
    Reference(&'a str),
}

/// A trailing `sourceMappingURL` annotation of a generated artifact.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SourceMapComment<'a> {
    pub syntax: CommentSyntax,
    pub kind: CommentKind<'a>,
}

impl<'a> SourceMapComment<'a> {
    pub const fn inline(syntax: CommentSyntax, payload: &'a str) -> Self {
        Self {
            syntax,
            kind: CommentKind::Inline {
                charset: None,
                payload,
            },
        }
    }

    pub const fn reference(syntax: CommentSyntax, name: &'a str) -> Self {
        Self {
            syntax,
            kind: CommentKind::Reference(name),
        }
    }

    /// Returns the base64 payload of an inline comment.
    #[inline]
    pub fn payload(&self) -> Option<&'a str> {
        match self.kind {
            CommentKind::Inline { payload, .. } => Some(payload),
            CommentKind::Reference(..) => None,
        }
    }

    #[inline]
    pub fn is_inline(&self) -> bool {
        matches!(self.kind, CommentKind::Inline { .. })
    }

    /// Renders the comment without a line terminator.
    ///
    /// Inline comments never carry a charset clause, whatever was recognized.
    pub fn format(&self) -> String {
        self.to_string()
    }
}

impl Display for SourceMapComment<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.syntax.lead_in())?;
        f.write_str(URL_KEY)?;
        match self.kind {
            CommentKind::Inline { payload, .. } => {
                write!(f, "{DATA_SCHEME}{MEDIA_TYPE}{BASE64_MARKER}{payload}")?
            }
            CommentKind::Reference(name) => f.write_str(name)?,
        }
        if self.syntax == CommentSyntax::Block {
            f.write_str(BLOCK_CLOSE)?;
        }
        Ok(())
    }
}

/// Recognizes a single `sourceMappingURL` comment line.
///
/// The whole line must match; a single trailing `\n` is allowed and ignored.
///
/// # Example
/// ```
/// # use smaplink::{recognize, CommentSyntax};
/// let comment = recognize("/*# sourceMappingURL=data:application/json;base64,e30= */\n").unwrap();
/// assert_eq!(comment.syntax, CommentSyntax::Block);
/// assert_eq!(comment.payload(), Some("e30="));
/// ```
pub fn recognize(line: &str) -> Result<SourceMapComment<'_>, GrammarError> {
    let body = line.strip_suffix('\n').unwrap_or(line);

    let (syntax, rest) = if let Some(rest) = body.strip_prefix(LINE_LEAD_IN) {
        (CommentSyntax::Line, rest)
    } else if let Some(rest) = body.strip_prefix(BLOCK_LEAD_IN) {
        (CommentSyntax::Block, rest)
    } else {
        return Err(GrammarError::MissingLeadIn);
    };
    let url = rest
        .strip_prefix(URL_KEY)
        .ok_or(GrammarError::MissingLeadIn)?;

    let url = match syntax {
        CommentSyntax::Block => url
            .strip_suffix(BLOCK_CLOSE)
            .ok_or(GrammarError::MismatchedDelimiters)?,
        CommentSyntax::Line if url.ends_with("*/") => {
            return Err(GrammarError::MismatchedDelimiters)
        }
        CommentSyntax::Line => url,
    };

    let kind = match url.strip_prefix(DATA_SCHEME) {
        Some(data) => recognize_data_url(data)?,
        None => {
            check_reference(url)?;
            CommentKind::Reference(url)
        }
    };

    Ok(SourceMapComment { syntax, kind })
}

// `data:` already stripped
fn recognize_data_url(data: &str) -> Result<CommentKind<'_>, GrammarError> {
    let params = data
        .strip_prefix(MEDIA_TYPE)
        .ok_or(GrammarError::UnsupportedMediaType)?;

    let (charset, params) = match params
        .strip_prefix(";charset=")
        .or_else(|| params.strip_prefix(";charset:"))
    {
        Some(declared) => {
            let end = memchr::memchr(b';', declared.as_bytes()).unwrap_or(declared.len());
            let (token, params) = declared.split_at(end);
            if !is_acceptable_charset(token) {
                return Err(GrammarError::UnsupportedCharset(token.to_owned()));
            }
            (Some(token), params)
        }
        None => (None, params),
    };

    let payload = params
        .strip_prefix(BASE64_MARKER)
        .ok_or(GrammarError::MissingBase64)?;
    check_payload(payload)?;

    Ok(CommentKind::Inline { charset, payload })
}

/// Checks that `name` can be written as the target of a reference comment.
pub(crate) fn check_reference(name: &str) -> Result<(), GrammarError> {
    if name.is_empty()
        || name.starts_with(DATA_SCHEME)
        || name.contains("*/")
        || name.chars().any(char::is_whitespace)
    {
        return Err(GrammarError::InvalidReference(name.to_owned()));
    }
    Ok(())
}

/// Whether the line opens like a source map comment, well-formed or not.
pub fn has_lead_in(line: &str) -> bool {
    [LINE_LEAD_IN, BLOCK_LEAD_IN].iter().any(|lead_in| {
        line.strip_prefix(lead_in)
            .is_some_and(|rest| rest.starts_with(URL_KEY))
    })
}

/// Whether the line refers to a source map anywhere.
pub fn mentions_source_map(line: &str) -> bool {
    memchr::memmem::find(line.as_bytes(), URL_KEY.as_bytes()).is_some()
}

#[cfg(test)]
mod tests {
    use super::{
        has_lead_in, mentions_source_map, recognize, CommentKind, CommentSyntax, SourceMapComment,
    };
    use crate::GrammarError;

    #[test]
    fn test_recognize_inline() {
        let comment =
            recognize("//# sourceMappingURL=data:application/json;charset=US-ASCII;base64,Zm9v")
                .unwrap();
        assert_eq!(comment.syntax, CommentSyntax::Line);
        assert_eq!(
            comment.kind,
            CommentKind::Inline {
                charset: Some("US-ASCII"),
                payload: "Zm9v"
            }
        );

        let comment =
            recognize("/*# sourceMappingURL=data:application/json;base64,css= */").unwrap();
        assert_eq!(comment.syntax, CommentSyntax::Block);
        assert_eq!(comment.payload(), Some("css="));
    }

    #[test]
    fn test_recognize_charset_colon() {
        let comment =
            recognize("//# sourceMappingURL=data:application/json;charset:utf8;base64,foo=\n")
                .unwrap();
        assert_eq!(
            comment.kind,
            CommentKind::Inline {
                charset: Some("utf8"),
                payload: "foo="
            }
        );
    }

    #[test]
    fn test_recognize_reference() {
        let comment = recognize("//# sourceMappingURL=a.js.map\n").unwrap();
        assert_eq!(comment, SourceMapComment::reference(CommentSyntax::Line, "a.js.map"));
        assert!(!comment.is_inline());

        let comment = recognize("/*# sourceMappingURL=../maps/site.css.map */").unwrap();
        assert_eq!(
            comment,
            SourceMapComment::reference(CommentSyntax::Block, "../maps/site.css.map")
        );
    }

    #[test]
    fn test_recognize_rejected() {
        let cases = [
            ("var x = 1;\n", GrammarError::MissingLeadIn),
            ("// sourceMappingURL=a.js.map", GrammarError::MissingLeadIn),
            ("//@ sourceMappingURL=a.js.map", GrammarError::MissingLeadIn),
            (" //# sourceMappingURL=a.js.map", GrammarError::MissingLeadIn),
            ("//# sourceMappingUrl=a.js.map", GrammarError::MissingLeadIn),
            (
                "//# sourceMappingURL=data:application/json;base64,Zm9v */",
                GrammarError::MismatchedDelimiters,
            ),
            (
                "/*# sourceMappingURL=data:application/json;base64,Zm9v",
                GrammarError::MismatchedDelimiters,
            ),
            (
                "/*# sourceMappingURL=data:application/json;base64,Zm9v*/",
                GrammarError::MismatchedDelimiters,
            ),
            (
                "//# sourceMappingURL=data:text/plain;base64,Zm9v",
                GrammarError::UnsupportedMediaType,
            ),
            (
                "//# sourceMappingURL=data:application/json;charset:latin1;base64,foo=",
                GrammarError::UnsupportedCharset("latin1".into()),
            ),
            (
                "//# sourceMappingURL=data:application/json;charset=;base64,foo=",
                GrammarError::UnsupportedCharset("".into()),
            ),
            (
                "//# sourceMappingURL=data:application/json;charset=utf-8",
                GrammarError::MissingBase64,
            ),
            (
                "//# sourceMappingURL=data:application/json,{}",
                GrammarError::MissingBase64,
            ),
            (
                "//# sourceMappingURL=data:application/json;charset:ascii;base64,foo",
                GrammarError::PayloadLength(3),
            ),
            (
                "//# sourceMappingURL=data:application/json;charset:ascii;base64,foo-",
                GrammarError::PayloadCharacter { offset: 3 },
            ),
            (
                "//# sourceMappingURL=data:application/json;base64,Zm9vYmFy\r\n",
                GrammarError::PayloadCharacter { offset: 8 },
            ),
            (
                "//# sourceMappingURL=data:application/json;base64,Zm9v\n\n",
                GrammarError::PayloadCharacter { offset: 4 },
            ),
            ("//# sourceMappingURL=", GrammarError::InvalidReference("".into())),
            (
                "//# sourceMappingURL=a.js.map trailing",
                GrammarError::InvalidReference("a.js.map trailing".into()),
            ),
        ];
        for (line, expected) in cases {
            assert_eq!(recognize(line), Err(expected), "{line:?}");
        }
    }

    #[test]
    fn test_format() {
        let inline = SourceMapComment::inline(CommentSyntax::Line, "e30=");
        insta::assert_snapshot!(inline.format(), @"//# sourceMappingURL=data:application/json;base64,e30=");
        let inline = SourceMapComment::inline(CommentSyntax::Block, "e30=");
        insta::assert_snapshot!(inline.format(), @"/*# sourceMappingURL=data:application/json;base64,e30= */");
        let reference = SourceMapComment::reference(CommentSyntax::Block, "a.css.map");
        insta::assert_snapshot!(reference.format(), @"/*# sourceMappingURL=a.css.map */");
    }

    #[test]
    fn test_format_drops_charset() {
        let line = "//# sourceMappingURL=data:application/json;charset=csUTF8;base64,e30=";
        let comment = recognize(line).unwrap();
        insta::assert_snapshot!(comment.format(), @"//# sourceMappingURL=data:application/json;base64,e30=");
        assert_eq!(recognize(&comment.format()).unwrap().payload(), Some("e30="));
    }

    #[test]
    fn test_lead_in() {
        assert!(has_lead_in("//# sourceMappingURL=data:application/json;charset=latin1;base64,x"));
        assert!(has_lead_in("/*# sourceMappingURL="));
        assert!(!has_lead_in("//@ sourceMappingURL=a.js.map"));
        assert!(mentions_source_map("//@ sourceMappingURL=a.js.map"));
        assert!(!mentions_source_map("var sourceMappingURL;"));
    }
}
