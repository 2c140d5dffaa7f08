use crate::comment::{has_lead_in, recognize, CommentSyntax, SourceMapComment};
use crate::json::SourceMapJson;
use crate::lines::{last_line, normalize, trim_trailing_blank};
use crate::{payload, Result};
use tracing::{debug, warn};

/// Options of [embed].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct EmbedOptions {
    pub(crate) syntax: CommentSyntax,
    pub(crate) trailing_newline: bool,
}

impl Default for EmbedOptions {
    fn default() -> Self {
        Self {
            syntax: CommentSyntax::Line,
            trailing_newline: true,
        }
    }
}

impl EmbedOptions {
    #[inline(always)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Comment syntax of the new comment, [CommentSyntax::Block] for CSS.
    #[inline(always)]
    pub fn with_syntax(self, syntax: CommentSyntax) -> Self {
        Self { syntax, ..self }
    }

    /// Whether the comment line ends with `\n`.
    ///
    /// Some concatenating tools choke on a newline after the comment.
    #[inline(always)]
    pub fn with_trailing_newline(self, trailing_newline: bool) -> Self {
        Self {
            trailing_newline,
            ..self
        }
    }

    #[inline]
    pub fn syntax(&self) -> CommentSyntax {
        self.syntax
    }

    #[inline]
    pub fn trailing_newline(&self) -> bool {
        self.trailing_newline
    }
}

/// Returns the well-formed source map comment ending the artifact, if any.
pub fn last_comment(lines: &[String]) -> Option<SourceMapComment<'_>> {
    last_line(lines).and_then(|(_, line)| recognize(line).ok())
}

/// Embeds `map` into the artifact as an inline source map comment.
///
/// A source map comment already ending the artifact is replaced, so embedding
/// the same map twice gives the same artifact as embedding it once.
///
/// # Example
/// ```
/// # use smaplink::{embed, EmbedOptions, SourceMapJson};
/// let mut buf = br#"{"version":3,"file":"a.js"}"#.to_vec();
/// let map = SourceMapJson::from_slice(&mut buf).unwrap();
/// let lines = embed(vec!["var x=1;".into()], map, &EmbedOptions::default()).unwrap();
/// assert_eq!(
///     lines,
///     ["var x=1;\n", "//# sourceMappingURL=data:application/json;base64,eyJ2ZXJzaW9uIjozfQ==\n"]
/// );
/// ```
pub fn embed(
    mut lines: Vec<String>,
    map: SourceMapJson,
    options: &EmbedOptions,
) -> Result<Vec<String>> {
    let payload = payload::encode(map)?;

    trim_trailing_blank(&mut lines);
    let supersede = match lines.last() {
        Some(last) => match recognize(last) {
            Ok(..) => true,
            Err(reason) if has_lead_in(last) => {
                warn!(line = lines.len(), %reason, "replacing malformed source map comment");
                true
            }
            Err(..) => false,
        },
        None => false,
    };
    if supersede {
        lines.pop();
    }
    normalize(&mut lines);

    let mut comment = SourceMapComment::inline(options.syntax, &payload).format();
    if options.trailing_newline {
        comment.push('\n');
    }
    debug!(
        syntax = ?options.syntax,
        payload_len = payload.len(),
        replaced = supersede,
        "embedded inline source map"
    );
    lines.push(comment);

    Ok(lines)
}
