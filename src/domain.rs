//! Syntax checks for the two kinds of tokens a list file can carry.

use hickory_proto::rr::Name;
use std::net::IpAddr;

const MAX_NAME_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// Returns true if `s` is a syntactically valid domain name.
///
/// A single trailing `.` (root qualification) is allowed. Labels are 1-63 bytes
/// of letters, digits, `-` and `_`, and may not start or end with `-`. A name
/// made only of digits and dots (an IPv4 literal, for instance) is rejected, as
/// is the bare root `.`. Wildcard `*` labels and `\` escapes, which
/// `Name::from_ascii` would accept, are rejected too: lists hold plain names.
pub fn is_domain_name(s: &str) -> bool {
    let name = s.strip_suffix('.').unwrap_or(s);
    if name.is_empty() || name.len() > MAX_NAME_LEN {
        return false;
    }

    has_plain_labels(name) && Name::from_ascii(s).is_ok()
}

fn has_plain_labels(name: &str) -> bool {
    let mut non_numeric = false;
    for label in name.split('.') {
        if label.is_empty() || label.len() > MAX_LABEL_LEN {
            return false;
        }
        if label.starts_with('-') || label.ends_with('-') {
            return false;
        }
        for b in label.bytes() {
            match b {
                b'a'..=b'z' | b'A'..=b'Z' | b'_' | b'-' => non_numeric = true,
                b'0'..=b'9' => {}
                _ => return false,
            }
        }
    }

    non_numeric
}

/// Parses an IPv4 or IPv6 literal.
pub fn parse_ip(s: &str) -> Option<IpAddr> {
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(is_domain_name("example.com"));
        assert!(is_domain_name("example.com."));
        assert!(is_domain_name("EXAMPLE.com"));
        assert!(is_domain_name("localhost"));
        assert!(is_domain_name("_dmarc.example.com"));
        assert!(is_domain_name("a-b.c0.net"));
        assert!(is_domain_name("123.example"));
    }

    #[test]
    fn test_invalid_names() {
        assert!(!is_domain_name(""));
        assert!(!is_domain_name("."));
        assert!(!is_domain_name("bad domain"));
        assert!(!is_domain_name("example..com"));
        assert!(!is_domain_name(".example.com"));
        assert!(!is_domain_name("-example.com"));
        assert!(!is_domain_name("example-.com"));
        assert!(!is_domain_name("example.com "));
        assert!(!is_domain_name("server=/a.com/1.1.1.1"));
        assert!(!is_domain_name("1.2.3.4"));
    }

    #[test]
    fn test_wildcards_and_escapes_rejected() {
        assert!(Name::from_ascii("*.example.com").is_ok());
        assert!(!is_domain_name("*.example.com"));
        assert!(!is_domain_name("ads.*.example.com"));
        assert!(!is_domain_name("a\\.b.example.com"));
    }

    #[test]
    fn test_length_limits() {
        let label = "a".repeat(63);
        assert!(is_domain_name(&format!("{}.com", label)));
        assert!(!is_domain_name(&format!("{}a.com", label)));

        // 4 * 63 + 3 dots = 255 bytes
        let long = [label.as_str(); 4].join(".");
        assert!(!is_domain_name(&long));
        assert!(is_domain_name(&long[..253]));
    }

    #[test]
    fn test_parse_ip() {
        assert!(parse_ip("127.0.0.1").is_some());
        assert!(parse_ip("::1").is_some());
        assert!(parse_ip("2001:db8::53").is_some());
        assert!(parse_ip("not-an-ip").is_none());
        assert!(parse_ip("1.2.3").is_none());
    }
}
