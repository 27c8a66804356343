//! URL decomposition: raw string to [`Url`].
//!
//! Single forward scan, no backtracking. Both host branches (bracketed IPv6
//! and plain) produce the same borrowed parts, which [`finalize`] turns into a
//! record by applying the scheme's default port and validating it.

use super::{Scheme, Url, UrlError};

/// Host, port and path as sliced out of the input, before defaults.
struct RawParts<'a> {
    host: &'a str,
    port: Option<&'a str>,
    path: Option<&'a str>,
}

/// Decomposes `raw` into scheme, host, port and path.
///
/// Only the scheme is matched case-insensitively; host, port and path are
/// copied as written. A missing or empty port becomes the scheme default, a
/// missing path becomes `/`.
///
/// An unbracketed IPv6 literal is not recognized: its first colon is taken
/// as the host/port split, which normally ends in [`UrlError::InvalidPort`].
///
/// # Examples
///
/// - `parse("https://[2001:db8::1]:8443/p")` → `https`, `[2001:db8::1]`, `8443`, `/p`
/// - `parse("http://example.com:8080")` → `http`, `example.com`, `8080`, `/`
pub fn parse(raw: &str) -> Result<Url, UrlError> {
    let (candidate, rest) = raw.split_once("://").ok_or(UrlError::MissingSeparator)?;
    let scheme = Scheme::from_candidate(candidate)?;

    let parts = if rest.starts_with('[') {
        split_bracketed(rest)?
    } else {
        split_plain(rest)
    };

    if parts.host.is_empty() {
        return Err(UrlError::EmptyHost);
    }

    finalize(scheme, parts)
}

/// `[v6]`, `[v6]:port`, each optionally followed by a path.
fn split_bracketed(rest: &str) -> Result<RawParts<'_>, UrlError> {
    let close = rest.find(']').ok_or(UrlError::UnterminatedIpv6)?;
    let host = &rest[..=close];
    let after = &rest[close + 1..];

    if let Some(port_and_path) = after.strip_prefix(':') {
        let (port, path) = split_at_slash(port_and_path);
        return Ok(RawParts {
            host,
            port: Some(port),
            path,
        });
    }

    // Anything between `]` and the first `/` is skipped.
    let path = after.find('/').map(|i| &after[i..]);
    Ok(RawParts {
        host,
        port: None,
        path,
    })
}

/// `host`, `host:port`, each optionally followed by a path.
fn split_plain(rest: &str) -> RawParts<'_> {
    let (authority, path) = split_at_slash(rest);
    let (host, port) = match authority.split_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (authority, None),
    };
    RawParts { host, port, path }
}

/// Splits at the first `/`; the path half keeps its leading slash.
fn split_at_slash(s: &str) -> (&str, Option<&str>) {
    match s.find('/') {
        Some(i) => (&s[..i], Some(&s[i..])),
        None => (s, None),
    }
}

/// Applies defaults and validates the port, whichever branch produced `parts`.
fn finalize(scheme: Scheme, parts: RawParts<'_>) -> Result<Url, UrlError> {
    let port = match parts.port {
        Some(p) if !p.is_empty() => p,
        _ => scheme.default_port(),
    };
    if !port.bytes().all(|b| b.is_ascii_digit()) {
        return Err(UrlError::InvalidPort(port.to_string()));
    }

    let path = match parts.path {
        Some(p) if !p.is_empty() => p,
        _ => "/",
    };

    Ok(Url {
        scheme,
        host: parts.host.to_string(),
        port: port.to_string(),
        path: path.to_string(),
    })
}
