use crate::comment::{
    check_reference, mentions_source_map, recognize, CommentSyntax, SourceMapComment,
};
use crate::json::SourceMapJson;
use crate::lines::{normalize, trim_trailing_blank};
use crate::{payload, Error, Result};
use tracing::debug;

/// The result of [extract].
#[derive(Debug, Clone)]
pub struct Extracted {
    /// The artifact, now ending with a reference comment.
    pub lines: Vec<String>,
    /// The decoded map, without its `file` key.
    pub map: SourceMapJson,
    /// Syntax of the inline comment, reused for the reference comment.
    pub syntax: CommentSyntax,
}

/// Moves the inline source map of an artifact out, leaving a comment that
/// references `reference` instead.
///
/// Fails with [Error::NoSourceMap] if the artifact does not end with an inline
/// source map, which includes an artifact that already references an external
/// map. A last line that mentions `sourceMappingURL=` but does not follow the
/// comment grammar fails with [Error::MalformedComment].
pub fn extract(mut lines: Vec<String>, reference: &str) -> Result<Extracted> {
    trim_trailing_blank(&mut lines);
    let last = lines.last().ok_or(Error::NoSourceMap)?;

    let comment = match recognize(last) {
        Ok(comment) => comment,
        Err(reason) if mentions_source_map(last) => {
            return Err(Error::MalformedComment {
                line: lines.len(),
                reason,
            })
        }
        Err(..) => return Err(Error::NoSourceMap),
    };
    let payload = comment.payload().ok_or(Error::NoSourceMap)?;
    let syntax = comment.syntax;

    check_reference(reference).map_err(|_| Error::InvalidReference(reference.to_owned()))?;
    let map = payload::decode(payload)?;
    debug!(?syntax, payload_len = payload.len(), reference, "extracted inline source map");

    lines.pop();
    normalize(&mut lines);
    let mut comment = SourceMapComment::reference(syntax, reference).format();
    comment.push('\n');
    lines.push(comment);

    Ok(Extracted { lines, map, syntax })
}
