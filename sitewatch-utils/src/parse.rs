/// Parse a site id from a raw argument (`42` or `#42`).
pub fn parse_site_id(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    let numeric = trimmed.strip_prefix('#').unwrap_or(trimmed);
    numeric.parse::<u64>().ok()
}

/// Parse a compact duration token like `30s`, `10m`, `2h`, `1d`, or plain seconds.
pub fn parse_duration_seconds(raw: &str) -> Option<u64> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    let mut chars = value.chars();
    let unit = chars.next_back();

    let (number_raw, multiplier) = match unit {
        Some('s') | Some('S') => (chars.as_str(), 1_u64),
        Some('m') | Some('M') => (chars.as_str(), 60_u64),
        Some('h') | Some('H') => (chars.as_str(), 60_u64 * 60),
        Some('d') | Some('D') => (chars.as_str(), 60_u64 * 60 * 24),
        Some(last) if last.is_ascii_digit() => (value, 1_u64),
        _ => return None,
    };

    let number = number_raw.parse::<u64>().ok()?;
    if number == 0 {
        return None;
    }

    number.checked_mul(multiplier)
}

/// Look up a query-string parameter (`p=2&n=20`) by key.
///
/// Keys without a value (`q`) yield an empty string.
pub fn query_param<'a>(query: &'a str, key: &str) -> Option<&'a str> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .find_map(|pair| {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            (name == key).then_some(value)
        })
}

/// Percent-encode a query-string value.
///
/// Unreserved characters (`A-Z a-z 0-9 - . _ ~`) and `/` pass through; every
/// other byte becomes `%XX`.
pub fn encode_query_value(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'/' => {
                encoded.push(char::from(byte));
            }
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}

/// Decode a percent-encoded query-string value (`+` reads as a space).
///
/// Malformed escapes are kept as written; invalid UTF-8 is replaced.
pub fn decode_query_value(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'+' => decoded.push(b' '),
            b'%' => {
                let escaped = raw
                    .get(i + 1..i + 3)
                    .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok());
                match escaped {
                    Some(byte) => {
                        decoded.push(byte);
                        i += 2;
                    }
                    None => decoded.push(b'%'),
                }
            }
            byte => decoded.push(byte),
        }
        i += 1;
    }

    String::from_utf8_lossy(&decoded).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_ids() {
        assert_eq!(parse_site_id("42"), Some(42));
        assert_eq!(parse_site_id(" #7 "), Some(7));
        assert_eq!(parse_site_id("abc"), None);
    }

    #[test]
    fn durations() {
        assert_eq!(parse_duration_seconds("5s"), Some(5));
        assert_eq!(parse_duration_seconds("2m"), Some(120));
        assert_eq!(parse_duration_seconds("10"), Some(10));
        assert_eq!(parse_duration_seconds("0s"), None);
        assert_eq!(parse_duration_seconds("5x"), None);
    }

    #[test]
    fn query_params() {
        assert_eq!(query_param("?p=3&n=50", "p"), Some("3"));
        assert_eq!(query_param("p=3&n=50", "n"), Some("50"));
        assert_eq!(query_param("q&p=1", "q"), Some(""));
        assert_eq!(query_param("p=1", "n"), None);
    }

    #[test]
    fn query_values_survive_encoding() {
        for value in ["down", "a&b=c", "50% off", "#tag?x", "héllo"] {
            let encoded = encode_query_value(value);
            assert!(!encoded.contains(['&', '=', ' ', '#', '?']), "{encoded}");
            assert_eq!(decode_query_value(&encoded), value);
        }
        assert_eq!(encode_query_value("a&b=c"), "a%26b%3Dc");
        assert_eq!(encode_query_value("/settings"), "/settings");
    }

    #[test]
    fn loose_query_values_decode() {
        assert_eq!(decode_query_value("two+words"), "two words");
        assert_eq!(decode_query_value("100%"), "100%");
        assert_eq!(decode_query_value("%zz"), "%zz");
        assert_eq!(decode_query_value("%-1"), "%-1");
    }
}
