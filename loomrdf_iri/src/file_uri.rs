/*!
Constructs `file:` URIs from local file system paths, per the percent-encoding algebra used by
`serd`-family RDF libraries for round-tripping paths that may contain characters RFC 3986 path
segments do not directly allow.
*/

use crate::authority::Authority;
use crate::error::{ErrorKind, Result as IriResult};
use crate::parse;
use crate::path::Path;
use crate::scheme::Scheme;
use crate::uri::UriView;

// ------------------------------------------------------------------------------------------------
// Public Functions
// ------------------------------------------------------------------------------------------------

///
/// Builds a `file:` URI from `path`, which must be either an absolute POSIX path (starting with
/// `/`) or a Windows drive path (`X:\...` or `X:/...`). `hostname`, if given, becomes the
/// authority component (`file://hostname/...`); when absent the authority is empty
/// (`file:///...`).
///
/// Backslashes in `path` are converted to `/`. Every byte not in `unreserved ∪ sub-delims ∪
/// {':', '@', '/'}` is percent-encoded; a literal `%` byte is emitted as the sentinel `%%`
/// rather than `%25`, matching the convention used by libraries that read these URIs back.
///
pub fn file_uri_from_path(path: &str, hostname: Option<&str>) -> IriResult<UriView> {
    if !(is_posix_absolute(path) || is_windows_drive(path)) {
        return Err(ErrorKind::NotAnAbsolutePath(path.to_string()).into());
    }

    let forward_slashed = path.replace('\\', "/");
    let mut encoded = String::with_capacity(forward_slashed.len());
    if is_windows_drive(path) {
        encoded.push('/');
    }
    encoded.push_str(&percent_encode_file_path(&forward_slashed));

    let authority = Authority::new(hostname.unwrap_or_default().to_string());

    Ok(UriView::from_parts(
        Some(Scheme::file()),
        Some(authority),
        Path::new_unchecked(encoded),
    ))
}

// ------------------------------------------------------------------------------------------------
// Private Functions
// ------------------------------------------------------------------------------------------------

fn is_posix_absolute(path: &str) -> bool {
    path.starts_with('/')
}

fn is_windows_drive(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes[2] == b'\\' || bytes[2] == b'/')
}

fn is_file_path_unreserved(c: char) -> bool {
    parse::is_unreserved(c) || parse::is_sub_delims(c) || c == ':' || c == '@' || c == '/'
}

fn percent_encode_file_path(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c == '%' {
            out.push_str("%%");
        } else if is_file_path_unreserved(c) {
            out.push(c);
        } else {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).as_bytes() {
                out.push_str(&format!("%{byte:02X}"));
            }
        }
    }
    out
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posix_path_without_hostname() {
        let uri = file_uri_from_path("/home/user/a file.ttl", None).unwrap();
        assert_eq!(uri.to_string(), "file:///home/user/a%20file.ttl");
    }

    #[test]
    fn posix_path_with_hostname() {
        let uri = file_uri_from_path("/srv/data.nt", Some("fileserver")).unwrap();
        assert_eq!(uri.to_string(), "file://fileserver/srv/data.nt");
    }

    #[test]
    fn windows_drive_path_gains_leading_slash() {
        let uri = file_uri_from_path("C:\\Users\\name\\data.ttl", None).unwrap();
        assert_eq!(uri.to_string(), "file:///C:/Users/name/data.ttl");
    }

    #[test]
    fn literal_percent_is_doubled() {
        let uri = file_uri_from_path("/tmp/100%done.ttl", None).unwrap();
        assert_eq!(uri.to_string(), "file:///tmp/100%%done.ttl");
    }

    #[test]
    fn relative_path_is_rejected() {
        assert!(file_uri_from_path("relative/path.ttl", None).is_err());
    }
}
