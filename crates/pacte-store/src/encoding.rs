//! Conversion between file bytes and text in a configurable encoding.

use encoding_rs::DecoderResult;
pub use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};
use pacte_core::FileError;
use std::path::Path;

/// Resolve a WHATWG label such as `utf-8`, `latin1` or `shift_jis`.
pub fn for_label(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
}

/// Decode `bytes` strictly. A leading BOM is dropped when it matches `enc`.
pub fn decode(bytes: &[u8], enc: &'static Encoding, path: &Path) -> Result<String, FileError> {
    let (text, had_errors) = enc.decode_with_bom_removal(bytes);
    if had_errors {
        return Err(FileError::Decode {
            path: path.to_path_buf(),
            encoding: enc.name(),
        });
    }
    Ok(text.into_owned())
}

/// Encode `text`, failing on characters `enc` cannot represent.
pub fn encode(text: &str, enc: &'static Encoding, path: &Path) -> Result<Vec<u8>, FileError> {
    if enc == UTF_16LE {
        return Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect());
    }
    if enc == UTF_16BE {
        return Ok(text.encode_utf16().flat_map(u16::to_be_bytes).collect());
    }

    let (bytes, used, had_errors) = enc.encode(text);
    if had_errors || used != enc {
        return Err(FileError::Encode {
            path: path.to_path_buf(),
            encoding: enc.name(),
        });
    }
    Ok(bytes.into_owned())
}

/// True when `prefix` decodes cleanly in `enc`. A sequence cut off at the
/// end of `prefix` is allowed.
pub fn is_clean_prefix(prefix: &[u8], enc: &'static Encoding) -> bool {
    let mut decoder = enc.new_decoder_with_bom_removal();
    let mut out = String::with_capacity(prefix.len() * 3 + 16);
    let mut input = prefix;
    loop {
        let (result, read) = decoder.decode_to_string_without_replacement(input, &mut out, false);
        input = &input[read..];
        match result {
            DecoderResult::InputEmpty => return true,
            DecoderResult::Malformed(..) => return false,
            DecoderResult::OutputFull => out.clear(),
        }
    }
}
