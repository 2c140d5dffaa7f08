use crate::GrammarError;

const BASE64_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
const BASE64_TABLE: [bool; 256] = get_base64_table();

const fn get_base64_table() -> [bool; 256] {
    let mut res = [false; 256];
    // `for in` is not allowed in const fn
    let mut idx = 0;
    while idx < 64 {
        res[BASE64_CHARS[idx] as usize] = true;
        idx += 1;
    }
    res
}

#[inline]
fn is_base64_char(byte: u8) -> bool {
    BASE64_TABLE[byte as usize]
}

/// Checks the shape of a base64 payload without decoding it.
///
/// The payload is made of complete 4-character groups of the standard
/// alphabet. Only the last group may be padded, as `xx==` or `xxx=`.
pub(crate) fn check_payload(payload: &str) -> Result<(), GrammarError> {
    let bytes = payload.as_bytes();
    let len = bytes.len();

    for (offset, &byte) in bytes.iter().enumerate() {
        if is_base64_char(byte) {
            continue;
        }
        let padding = byte == b'='
            && (offset + 1 == len || (offset + 2 == len && bytes[len - 1] == b'='));
        if !padding {
            return Err(GrammarError::PayloadCharacter { offset });
        }
    }

    if len % 4 != 0 {
        return Err(GrammarError::PayloadLength(len));
    }

    Ok(())
}
