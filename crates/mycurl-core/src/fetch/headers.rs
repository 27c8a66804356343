//! Parse HTTP response header lines into ResponseMeta.

/// Metadata of one HTTP response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseMeta {
    /// Status code (from the status line; the engine overwrites it with curl's view).
    pub status: u32,
    /// `Content-Length`, if present and numeric.
    pub content_length: Option<u64>,
    pub content_type: Option<String>,
    /// Redirect target, unresolved.
    pub location: Option<String>,
}

impl ResponseMeta {
    /// False only when the server announced a length and `received` differs.
    pub fn length_matches(&self, received: usize) -> bool {
        self.content_length.map_or(true, |n| n == received as u64)
    }
}

/// One raw header line from the transport. Bytes that are not UTF-8 are
/// replaced rather than dropping the line.
pub(crate) fn header_line(data: &[u8]) -> String {
    String::from_utf8_lossy(data).trim_end().to_string()
}

/// Parse collected header lines into ResponseMeta.
///
/// A status line (`HTTP/...`) starts a fresh response, so interim responses
/// such as `100 Continue` do not leak their headers into the final one.
pub(crate) fn parse_headers(lines: &[String]) -> ResponseMeta {
    let mut meta = ResponseMeta::default();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            meta = ResponseMeta {
                status: parse_status_line(line).unwrap_or(0),
                ..ResponseMeta::default()
            };
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-length") {
                meta.content_length = value.parse::<u64>().ok();
            } else if name.eq_ignore_ascii_case("content-type") {
                meta.content_type = Some(value.to_string());
            } else if name.eq_ignore_ascii_case("location") {
                meta.location = Some(value.to_string());
            }
        }
    }

    meta
}

fn parse_status_line(line: &str) -> Option<u32> {
    line.split_whitespace().nth(1)?.parse().ok()
}
