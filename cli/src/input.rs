use std::io::Read;

/// Reads the whole hook payload from stdin.
pub fn read_stdin_text() -> Result<String, std::io::Error> {
    let mut buf = Vec::new();
    std::io::stdin().read_to_end(&mut buf)?;
    Ok(decode_payload(&buf))
}

/// Hosts send UTF-8 JSON. A BOM (UTF-8 or UTF-16, as some Windows shells
/// prepend) selects the encoding and is dropped; invalid sequences become
/// U+FFFD so the JSON parser reports them instead of the reader.
pub fn decode_payload(bytes: &[u8]) -> String {
    let (text, encoding, had_errors) = encoding_rs::UTF_8.decode(bytes);
    if encoding != encoding_rs::UTF_8 || had_errors {
        tracing::debug!(
            target: "anchorgate.input",
            encoding = encoding.name(),
            had_errors,
            len = bytes.len(),
            "payload was not clean UTF-8"
        );
    }
    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input() {
        assert_eq!(decode_payload(&[]), "");
    }

    #[test]
    fn plain_utf8() {
        let text = r#"{"tool_name":"Write","tool_input":{"file_path":"docs/ünïcode.md"}}"#;
        assert_eq!(decode_payload(text.as_bytes()), text);
    }

    #[test]
    fn utf8_bom_is_stripped() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"{}");
        assert_eq!(decode_payload(&bytes), "{}");
    }

    #[test]
    fn utf16le_bom_switches_encoding() {
        let mut bytes = vec![0xFF, 0xFE];
        bytes.extend("{\"a\":1}".encode_utf16().flat_map(|u| u.to_le_bytes()));
        assert_eq!(decode_payload(&bytes), "{\"a\":1}");
    }

    #[test]
    fn invalid_bytes_are_replaced() {
        assert_eq!(decode_payload(b"ls \xFF"), "ls \u{FFFD}");
    }
}
