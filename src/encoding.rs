use std::borrow::Cow;

use encoding_rs::Encoding;
use xhtmlchardet::detect;

use crate::error::Error;

pub(crate) fn encoding(data: &[u8], hint: Option<String>) -> Result<&'static Encoding, Error> {
    let mut cursor = std::io::Cursor::new(data);
    let charsets = detect(&mut cursor, hint)?;
    // no encoding detected
    let label = if charsets.is_empty() {
        "UTF-8"
    } else {
        &charsets[0]
    };
    Encoding::for_label(label.as_bytes()).ok_or_else(|| Error::UnknownEncoding(label.to_string()))
}

// malformed sequences are replaced, not reported
pub(crate) fn decode(data: &[u8]) -> Result<Cow<str>, Error> {
    let (text, _) = encoding(data, None)?.decode_with_bom_removal(data);
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8() {
        let data = b"<?xml version=\"1.0\" encoding=\"UTF-8\"?><a/>";
        let enc = encoding(data, None).unwrap();
        assert_eq!(enc.name(), "UTF-8");
    }

    #[test]
    fn test_utf8_without_declaration() {
        let data = b"<a/>";
        let enc = encoding(data, None).unwrap();
        assert_eq!(enc.name(), "UTF-8");
    }

    #[test]
    fn test_iso8859_1() {
        let data = b"<?xml version=\"1.0\" encoding=\"iso-8859-1\"?><a/>";
        let enc = encoding(data, None).unwrap();
        // windows-1252 is a superset of 8859-1
        assert_eq!(enc.name(), "windows-1252");
    }

    #[test]
    fn test_decode_latin1() {
        let data = b"<?xml version=\"1.0\" encoding=\"iso-8859-1\"?><a>caf\xe9</a>";
        let text = decode(data).unwrap();
        assert!(text.ends_with("<a>caf\u{e9}</a>"));
    }

    #[test]
    fn test_decode_strips_bom() {
        let data = b"\xef\xbb\xbf<a/>";
        assert_eq!(decode(data).unwrap(), "<a/>");
    }
}
