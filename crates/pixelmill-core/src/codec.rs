//! Compact string form for spec sequences.
//!
//! A spec string is the JSON array of specs encoded as URL-safe base64
//! without padding, so it can travel in a URL path segment or query
//! parameter unescaped. Decoding validates each entry's operation tag and
//! reports the index of the first bad entry.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD as BASE64, Engine as _};

use crate::error::{OperatorError, SpecCodecError};
use crate::spec::{Spec, SpecKind};

/// Encode a spec sequence as a URL-safe spec string.
pub fn encode_spec_string(specs: &[Spec]) -> Result<String, SpecCodecError> {
    let json = serde_json::to_vec(specs)?;
    Ok(BASE64.encode(json))
}

/// Decode a spec string back into a spec sequence.
///
/// An empty sequence is valid and decodes to an empty `Vec`. An entry whose
/// `"op"` tag is missing or names no known operation is rejected as an empty
/// variant, with its zero-based index in the error.
pub fn decode_spec_string(s: &str) -> Result<Vec<Spec>, SpecCodecError> {
    let json = BASE64.decode(s)?;
    let entries: Vec<serde_json::Value> = serde_json::from_slice(&json)?;

    let mut specs = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match entry.get("op").and_then(|op| op.as_str()) {
            Some(tag) if SpecKind::from_tag(tag).is_some() => {}
            _ => {
                return Err(SpecCodecError::Entry {
                    index,
                    source: OperatorError::EmptyVariant,
                })
            }
        }
        specs.push(serde_json::from_value(entry)?);
    }
    Ok(specs)
}
