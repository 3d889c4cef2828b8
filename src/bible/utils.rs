//! Text decoding utilities for source files

use encoding_rs::{Encoding, UTF_8};
use log::{debug, warn};

/// Resolves an encoding label, falling back to UTF-8 for unknown labels.
///
/// Legacy Korean labels (`cp949`, `uhc`, `ks_c_5601-1987`, ...) all resolve
/// to the same Windows-949 superset that `euc-kr` names.
pub fn parse_encoding(label: &str) -> &'static Encoding {
    let label = label.trim();
    let normalized = match label.to_ascii_lowercase().as_str() {
        "cp949" | "uhc" | "ms949" | "windows-949" => "euc-kr",
        _ => label,
    };
    match Encoding::for_label(normalized.as_bytes()) {
        Some(encoding) => encoding,
        None => {
            warn!("Unknown encoding label '{}', using UTF-8", label);
            UTF_8
        }
    }
}

/// Decodes raw source bytes. A byte-order mark overrides `encoding`.
///
/// Malformed sequences become U+FFFD; that is logged but not an error, the
/// affected lines still go through normal line validation.
pub fn decode_source(bytes: &[u8], encoding: &'static Encoding, source_name: &str) -> String {
    let (text, used, had_errors) = encoding.decode(bytes);
    if used != encoding {
        debug!(
            "Byte-order mark in {}: decoding as {} instead of {}",
            source_name,
            used.name(),
            encoding.name()
        );
    }
    if had_errors {
        warn!(
            "Source {} contains bytes invalid for {}; replaced with U+FFFD",
            source_name,
            used.name()
        );
    }
    text.into_owned()
}
