//! Redirect target resolution against the current URL.

use super::{parse, Url, UrlError};

impl Url {
    /// Resolves a `Location` header value against `self`.
    ///
    /// Absolute values (`scheme://...`) are parsed from scratch, so a redirect
    /// to an unsupported scheme fails the same way user input would.
    /// Scheme-relative values (`//host/x`) inherit the current scheme. Absolute
    /// paths keep scheme, host and port. Anything else is joined with the
    /// directory of the current path, collapsing `.` and `..`.
    pub fn resolve(&self, location: &str) -> Result<Url, UrlError> {
        let location = location.trim();
        if location.is_empty() {
            return Ok(self.clone());
        }
        if is_absolute(location) {
            return parse(location);
        }
        if location.starts_with("//") {
            return parse(&format!("{}:{}", self.scheme, location));
        }

        let path = if location.starts_with('/') {
            location.to_string()
        } else {
            join_relative(&self.path, location)
        };
        Ok(Url {
            path,
            ..self.clone()
        })
    }
}

/// `scheme://` before any path or query character.
fn is_absolute(location: &str) -> bool {
    match location.find("://") {
        Some(i) => !location[..i].contains(&['/', '?', '#'][..]),
        None => false,
    }
}

fn join_relative(base_path: &str, relative: &str) -> String {
    let base_dir = match base_path.rfind('/') {
        Some(i) => &base_path[..i],
        None => "",
    };

    let mut segments: Vec<&str> = base_dir.split('/').filter(|s| !s.is_empty()).collect();
    for seg in relative.split('/') {
        match seg {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(seg),
        }
    }

    let mut path = format!("/{}", segments.join("/"));
    let ends_in_dir = relative.ends_with('/') || relative.ends_with("/.") || relative.ends_with("..");
    if ends_in_dir && !path.ends_with('/') {
        path.push('/');
    }
    path
}
