use crate::json::SourceMapJson;
use crate::Result;
use base64::prelude::{Engine as _, BASE64_STANDARD};

/// Encodes a source map as the base64 payload of an inline comment.
///
/// The `file` key is dropped, the rest is written as compact JSON and
/// base64-encoded with the standard padded alphabet.
pub fn encode(mut map: SourceMapJson) -> Result<String> {
    map.strip_file();
    let json = map.to_compact()?;
    Ok(BASE64_STANDARD.encode(json))
}

/// Decodes the base64 payload of an inline comment.
///
/// Decoding is strict: non-alphabet characters or non-canonical padding fail
/// with [Error::MalformedPayload](crate::Error::MalformedPayload), as do invalid
/// UTF-8 and invalid JSON. The `file` key is dropped from the result.
///
/// A last symbol with non-zero unused bits (`e31=` instead of `e30=`) is
/// rejected too, although lenient decoders accept it. Encoders never emit one.
pub fn decode(payload: &str) -> Result<SourceMapJson> {
    let mut bytes = BASE64_STANDARD.decode(payload)?;
    std::str::from_utf8(&bytes)?;
    let mut map = SourceMapJson::from_slice(&mut bytes)?;
    map.strip_file();
    Ok(map)
}
