//! Response envelope decoding
//!
//! The `{method}Response` element is re-emitted without namespace prefixes
//! or attributes and handed to `quick-xml`'s serde deserializer, so the typed
//! shapes in the version modules only describe element names.

use super::fault::decode_fault;
use super::xml::XmlWriter;
use crate::api::error::ApiError;
use roxmltree::{Document, Node};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Body of a decoded response
#[derive(Debug)]
pub enum SoapBody<T> {
    Value(T),
    Fault(ApiError),
}

/// Single `rval`
#[derive(Debug, Deserialize)]
pub struct Rval<T> {
    pub rval: T,
}

/// Zero or more `rval` elements
#[derive(Debug, Deserialize)]
pub struct RvalList<T> {
    #[serde(default = "Vec::new")]
    pub rval: Vec<T>,
}

fn element_child<'a, 'input>(node: Node<'a, 'input>) -> Option<Node<'a, 'input>> {
    node.children().find(|c| c.is_element())
}

fn strip_namespaces(node: Node<'_, '_>, w: &mut XmlWriter) {
    let name = node.tag_name().name();
    w.open(name);
    for child in node.children() {
        if child.is_element() {
            strip_namespaces(child, w);
        } else if child.is_text() {
            match child.text() {
                Some(text) if !text.trim().is_empty() => w.text(text),
                _ => {}
            }
        }
    }
    w.close(name);
}

/// Decode the envelope returned for `method`
///
/// A fault anywhere under `Body` wins over a result. Errors are plain
/// messages; the caller classifies them.
pub fn parse_response<R: DeserializeOwned>(xml: &str, method: &str) -> Result<SoapBody<R>, String> {
    let doc = Document::parse(xml).map_err(|e| format!("response is not XML: {}", e))?;

    let envelope = doc.root_element();
    if envelope.tag_name().name() != "Envelope" {
        return Err(format!(
            "expected a SOAP Envelope, found <{}>",
            envelope.tag_name().name()
        ));
    }

    let body = envelope
        .children()
        .find(|c| c.is_element() && c.tag_name().name() == "Body")
        .ok_or_else(|| "envelope has no Body".to_string())?;

    let payload = element_child(body).ok_or_else(|| "Body is empty".to_string())?;

    if payload.tag_name().name() == "Fault" {
        return Ok(SoapBody::Fault(decode_fault(payload)));
    }

    let expected = format!("{}Response", method);
    if payload.tag_name().name() != expected {
        return Err(format!(
            "expected <{}>, found <{}>",
            expected,
            payload.tag_name().name()
        ));
    }

    let mut w = XmlWriter::new();
    strip_namespaces(payload, &mut w);
    let normalized = w.into_string();

    quick_xml::de::from_str::<R>(&normalized)
        .map(SoapBody::Value)
        .map_err(|e| format!("cannot decode {}: {}", expected, e))
}

/// Peek for a fault without knowing the method; used on non-2xx replies
pub fn find_fault(xml: &str) -> Option<ApiError> {
    let doc = Document::parse(xml).ok()?;
    doc.descendants()
        .find(|n| n.is_element() && n.tag_name().name() == "Fault")
        .map(decode_fault)
}
