use quick_xml::Reader;
use quick_xml::errors::IllFormedError;
use quick_xml::events::Event;

use crate::core::EvatrError;

/// Element path from the root to a `value` entry of a param array.
const ENTRY_PATH: [&str; 4] = ["param", "value", "array", "data"];

/// One `<param>` of an eVatR response: the `string` leaves of its array,
/// in document order. Well-formed responses carry exactly two entries,
/// `[name, value]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Param {
    pub entries: Vec<String>,
}

impl Param {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }
}

/// Generic form of an eVatR XML-RPC response.
///
/// ```xml
/// <params>
///   <param><value><array><data>
///     <value><string>ErrorCode</string></value>
///     <value><string>200</string></value>
///   </data></array></value></param>
/// </params>
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseDocument {
    pub params: Vec<Param>,
}

impl ResponseDocument {
    /// Parse a raw response body.
    ///
    /// Elements outside the `param/value/array/data/value/string` path are
    /// ignored; the root element name is not checked.
    ///
    /// # Errors
    ///
    /// Returns [`EvatrError::Decode`] with the parser's error if the body is
    /// not well-formed XML, including a body that ends inside an open
    /// element, and [`EvatrError::MalformedResponse`] if it has no root
    /// element.
    pub fn parse(xml: &[u8]) -> Result<Self, EvatrError> {
        let mut reader = Reader::from_reader(xml);
        let mut buf = Vec::new();
        let mut doc = ResponseDocument::default();
        let mut path: Vec<String> = Vec::new();
        let mut seen_root = false;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                    doc.open(&path, &name);
                    seen_root = true;
                    path.push(name);
                }
                Event::Empty(ref e) => {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                    doc.open(&path, &name);
                    seen_root = true;
                }
                Event::Text(ref e) => {
                    if is_string_leaf(&path) {
                        doc.append_text(&e.unescape()?);
                    }
                }
                Event::CData(ref e) => {
                    if is_string_leaf(&path) {
                        let text = e.decode().map_err(quick_xml::Error::from)?;
                        doc.append_text(&text);
                    }
                }
                Event::End(_) => {
                    path.pop();
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if !seen_root {
            return Err(EvatrError::MalformedResponse("no root element".into()));
        }
        if let Some(open) = path.pop() {
            return Err(quick_xml::Error::from(IllFormedError::MissingEndTag(open)).into());
        }

        Ok(doc)
    }

    /// Value of the field called `name`, or `None` if no array carries it.
    ///
    /// The array holding `name` is read at index 1, wherever `name` itself
    /// sits in it. Arrays too short to have an index 1 are skipped.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .filter(|p| p.entries.iter().any(|e| e == name))
            .find_map(|p| p.entries.get(1))
            .map(String::as_str)
    }

    /// Like [`value`](Self::value), with a missing field read as `""`.
    pub fn value_or_empty(&self, name: &str) -> &str {
        self.value(name).unwrap_or_default()
    }

    /// An element called `name` starts under `path`.
    fn open(&mut self, path: &[String], name: &str) {
        if path.len() == 1 && name == "param" {
            self.params.push(Param::default());
        } else if name == "value" && is_below(path, &ENTRY_PATH) {
            if let Some(param) = self.params.last_mut() {
                param.entries.push(String::new());
            }
        }
    }

    fn append_text(&mut self, text: &str) {
        if let Some(entry) = self.params.last_mut().and_then(|p| p.entries.last_mut()) {
            entry.push_str(text);
        }
    }
}

/// `path` is the root followed by exactly `tail`.
fn is_below(path: &[String], tail: &[&str]) -> bool {
    path.len() == tail.len() + 1 && path[1..].iter().zip(tail).all(|(a, b)| a == b)
}

fn is_string_leaf(path: &[String]) -> bool {
    path.len() == ENTRY_PATH.len() + 3
        && is_below(&path[..ENTRY_PATH.len() + 1], &ENTRY_PATH)
        && path[ENTRY_PATH.len() + 1] == "value"
        && path[ENTRY_PATH.len() + 2] == "string"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(params: &[&[&str]]) -> ResponseDocument {
        ResponseDocument {
            params: params.iter().map(|p| Param::new(p.iter().copied())).collect(),
        }
    }

    #[test]
    fn value_found() {
        let d = doc(&[&["UstId_1", "DE123456789"], &["ErrorCode", "200"]]);
        assert_eq!(d.value("ErrorCode"), Some("200"));
        assert_eq!(d.value("UstId_1"), Some("DE123456789"));
    }

    #[test]
    fn value_absent() {
        let d = doc(&[&["ErrorCode", "200"]]);
        assert_eq!(d.value("Erg_Name"), None);
        assert_eq!(d.value_or_empty("Erg_Name"), "");
    }

    #[test]
    fn value_reads_index_one_only() {
        let d = doc(&[&["x", "y", "Target", "z"]]);
        assert_eq!(d.value("Target"), Some("y"));
    }

    #[test]
    fn value_matches_second_slot_too() {
        // A value equal to the sought name still selects its own array.
        let d = doc(&[&["Druck", "ErrorCode"], &["ErrorCode", "200"]]);
        assert_eq!(d.value("ErrorCode"), Some("ErrorCode"));
    }

    #[test]
    fn short_array_skipped() {
        let d = doc(&[&["ErrorCode"], &["ErrorCode", "201"]]);
        assert_eq!(d.value("ErrorCode"), Some("201"));
        assert_eq!(doc(&[&["ErrorCode"]]).value("ErrorCode"), None);
    }

    #[test]
    fn empty_value_is_distinct_from_absent() {
        let d = doc(&[&["Gueltig_ab", ""]]);
        assert_eq!(d.value("Gueltig_ab"), Some(""));
        assert_eq!(d.value("Gueltig_bis"), None);
    }

    #[test]
    fn parse_minimal() {
        let xml = br#"<?xml version="1.0"?>
<params>
<param>
<value><array><data>
<value><string>ErrorCode</string></value>
<value><string>200</string></value>
</data></array></value>
</param>
</params>"#;
        let d = ResponseDocument::parse(xml).unwrap();
        assert_eq!(d, doc(&[&["ErrorCode", "200"]]));
    }

    #[test]
    fn parse_empty_string_leaf() {
        let xml = br#"<params><param><value><array><data>
<value><string>Gueltig_ab</string></value>
<value><string/></value>
</data></array></value></param></params>"#;
        let d = ResponseDocument::parse(xml).unwrap();
        assert_eq!(d.value("Gueltig_ab"), Some(""));
    }

    #[test]
    fn parse_unescapes_entities() {
        let xml = br#"<params><param><value><array><data>
<value><string>Firmenname</string></value>
<value><string>M&amp;M S.A R.L.</string></value>
</data></array></value></param></params>"#;
        let d = ResponseDocument::parse(xml).unwrap();
        assert_eq!(d.value("Firmenname"), Some("M&M S.A R.L."));
    }

    #[test]
    fn parse_ignores_strings_outside_the_array_path() {
        let xml = br#"<params><param><value><string>ErrorCode</string></value></param></params>"#;
        let d = ResponseDocument::parse(xml).unwrap();
        assert_eq!(d.params, vec![Param::default()]);
    }

    #[test]
    fn parse_mismatched_tags_fails() {
        let err = ResponseDocument::parse(b"<params><param></params>").unwrap_err();
        assert!(matches!(
            err,
            EvatrError::Decode(quick_xml::Error::IllFormed(IllFormedError::MismatchedEndTag { .. }))
        ));
    }

    #[test]
    fn parse_error_message_is_the_parsers_own() {
        let err = ResponseDocument::parse(b"<params><param></params>").unwrap_err();
        assert_eq!(
            err.to_string(),
            "ill-formed document: expected `</param>`, but `</params>` was found"
        );
    }

    #[test]
    fn parse_empty_body_fails() {
        let err = ResponseDocument::parse(b"").unwrap_err();
        assert!(matches!(err, EvatrError::MalformedResponse(_)));
        assert_eq!(err.to_string(), "malformed eVatR response: no root element");
    }

    #[test]
    fn parse_truncated_body_fails() {
        let err = ResponseDocument::parse(b"<params><param>").unwrap_err();
        assert!(matches!(
            err,
            EvatrError::Decode(quick_xml::Error::IllFormed(IllFormedError::MissingEndTag(ref tag)))
                if tag == "param"
        ));
        assert!(err.is_decode_error());
    }
}
