use super::names::NameSet;
use crate::domain::{is_domain_name, parse_ip};
use std::io::BufRead;
use tracing::{debug, warn};

const DIRECTIVE_PREFIX: &str = "server=";

/// One accepted line of a list file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEntry {
    /// A bare domain name on its own line.
    Domain(String),
    /// The domain of a `server=/<domain>/<ip>` resolver directive.
    Server(String),
}

impl ListEntry {
    /// The lowercased name without its trailing root dot.
    pub fn name(&self) -> &str {
        let (ListEntry::Domain(name) | ListEntry::Server(name)) = self;
        name.strip_suffix('.').unwrap_or(name)
    }
}

/// Classifies a single line. Returns None for blank, commented and malformed
/// lines.
pub fn parse_line(line: &str) -> Option<ListEntry> {
    let line = match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    };
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let domain = line.to_lowercase();
    if is_domain_name(&domain) {
        return Some(ListEntry::Domain(domain));
    }

    parse_directive(line)
}

fn parse_directive(line: &str) -> Option<ListEntry> {
    let fields: Vec<&str> = line.split('/').filter(|f| !f.is_empty()).collect();
    let [prefix, domain, ip] = fields.as_slice() else {
        return None;
    };

    if *prefix != DIRECTIVE_PREFIX {
        return None;
    }

    let domain = domain.to_lowercase();
    if !is_domain_name(&domain) {
        warn!("{} isn't a domain name, skipping directive", domain);
        return None;
    }

    parse_ip(ip)?;
    Some(ListEntry::Server(domain))
}

/// Reads every line of `reader` and collects the accepted names.
///
/// Lines are split on `\n` as raw bytes, so invalid UTF-8 only spoils the line
/// it appears on. A read error ends the scan; names gathered up to that point
/// are kept.
pub fn parse<R: BufRead>(reader: R) -> NameSet {
    let mut names = NameSet::new();
    let mut lines = 0usize;
    let mut duplicates = 0usize;

    for line in reader.split(b'\n') {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("Stopped reading list after {} lines: {}", lines, e);
                break;
            }
        };
        lines += 1;

        let line = String::from_utf8_lossy(&line);
        if let Some(entry) = parse_line(&line) {
            if !names.insert(entry.name()) {
                duplicates += 1;
            }
        }
    }

    debug!(
        "Name added: {} / {} ({} duplicates)",
        names.len(),
        lines,
        duplicates
    );

    names
}
