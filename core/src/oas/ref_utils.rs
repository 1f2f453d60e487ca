//! # Reference Utilities
//!
//! Maps OpenAPI `$ref` strings onto graph document ids.
//!
//! Only `#/components/schemas/<Name>` targets become named references. An
//! absolute reference counts as local when its document part matches the
//! document's `$self` URI. Nothing is ever fetched.

use percent_encoding::percent_decode_str;
use url::Url;

/// Section of `components` holding schema definitions.
pub(crate) const SCHEMAS_SECTION: &str = "schemas";

/// Splits a reference into its document part and fragment (without `#`).
fn split_reference(ref_str: &str) -> (&str, Option<&str>) {
    match ref_str.split_once('#') {
        Some((document, fragment)) => (document, Some(fragment)),
        None => (ref_str, None),
    }
}

/// The JSON pointer of a reference into the current document, if it is one.
pub(crate) fn local_pointer<'a>(ref_str: &'a str, self_uri: Option<&str>) -> Option<&'a str> {
    let (document, fragment) = split_reference(ref_str);
    let fragment = fragment?;
    if document.is_empty() {
        return Some(fragment);
    }
    let self_uri = self_uri?;
    same_document(document, self_uri).then_some(fragment)
}

/// Name of the component a reference points to inside `section`.
pub(crate) fn component_name(ref_str: &str, self_uri: Option<&str>, section: &str) -> Option<String> {
    let pointer = local_pointer(ref_str, self_uri)?;
    let mut segments = pointer.trim_start_matches('/').split('/');
    if segments.next()? != "components" || segments.next()? != section {
        return None;
    }
    let name = decode_pointer_segment(segments.next()?);
    if name.is_empty() || segments.next().is_some() {
        None
    } else {
        Some(name)
    }
}

/// Decodes a JSON pointer segment (`~1` → `/`, `~0` → `~`, then percent escapes).
pub(crate) fn decode_pointer_segment(segment: &str) -> String {
    let unescaped = segment.replace("~1", "/").replace("~0", "~");
    percent_decode_str(&unescaped)
        .decode_utf8_lossy()
        .into_owned()
}

fn same_document(document: &str, self_uri: &str) -> bool {
    if document == self_uri {
        return true;
    }
    match (Url::parse(document), Url::parse(self_uri)) {
        (Ok(doc), Ok(own)) => {
            doc.scheme() == own.scheme()
                && doc.host() == own.host()
                && doc.port() == own.port()
                && doc.path() == own.path()
        }
        // `$self` given as an absolute path.
        (Ok(doc), Err(_)) if self_uri.starts_with('/') => doc.path() == self_uri,
        _ => false,
    }
}
