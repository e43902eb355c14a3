use std::borrow::Cow;

use crate::error::Error;

pub(crate) fn parse_entities(content: &str) -> Result<Cow<str>, Error> {
    if !content.contains('&') {
        return Ok(content.into());
    }
    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars();
    while let Some(c) = chars.next() {
        if c == '&' {
            let mut entity = String::new();
            let mut is_complete = false;
            for c in chars.by_ref() {
                if c == ';' {
                    is_complete = true;
                    break;
                }
                entity.push(c);
            }
            if !is_complete {
                return Err(Error::UnclosedEntity(entity));
            }
            match entity.as_str() {
                "amp" => result.push('&'),
                "apos" => result.push('\''),
                "gt" => result.push('>'),
                "lt" => result.push('<'),
                "quot" => result.push('"'),
                _ => match parse_char_reference(&entity) {
                    Some(c) => result.push(c),
                    None => return Err(Error::InvalidEntity(entity)),
                },
            }
        } else {
            result.push(c);
        }
    }
    Ok(result.into())
}

fn parse_char_reference(entity: &str) -> Option<char> {
    let digits = entity.strip_prefix('#')?;
    let code = if let Some(hex) = digits.strip_prefix('x') {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        digits.parse::<u32>().ok()?
    };
    char::from_u32(code)
}

pub(crate) fn serialize_text(content: &str) -> Cow<str> {
    serialize(content, |c| match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        _ => None,
    })
}

// whitespace other than the space character is escaped, otherwise attribute
// value normalization would turn it into spaces when parsed again
pub(crate) fn serialize_attribute(content: &str) -> Cow<str> {
    serialize(content, |c| match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '"' => Some("&quot;"),
        '\t' => Some("&#x9;"),
        '\n' => Some("&#xA;"),
        '\r' => Some("&#xD;"),
        _ => None,
    })
}

fn serialize(content: &str, escape: impl Fn(char) -> Option<&'static str>) -> Cow<str> {
    if !content.chars().any(|c| escape(c).is_some()) {
        return content.into();
    }
    let mut result = String::with_capacity(content.len());
    for c in content.chars() {
        match escape(c) {
            Some(entity) => result.push_str(entity),
            None => result.push(c),
        }
    }
    result.into()
}
