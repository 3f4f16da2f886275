//! SOAP 1.1 request envelopes

use super::xml::XmlWriter;
use crate::api::constants::{self, SOAP_ACTOR_NEXT, SOAP_ENVELOPE_NS, XSI_NS};

/// Values sent in the `RequestHeader` of every call
#[derive(Debug, Clone, Copy)]
pub struct RequestHeader<'a> {
    pub network_code: u64,
    pub application_name: &'a str,
}

/// Write a full envelope for `method` at `version`; `body` writes the
/// method's parameters
pub fn write_envelope<F>(version: &str, header: RequestHeader<'_>, method: &str, body: F) -> String
where
    F: FnOnce(&mut XmlWriter),
{
    let namespace = constants::namespace(version);
    let mut w = XmlWriter::new();

    w.declaration();
    w.open_with(
        "soapenv:Envelope",
        &[("xmlns:soapenv", SOAP_ENVELOPE_NS), ("xmlns:xsi", XSI_NS)],
    );

    w.open("soapenv:Header");
    w.open_with(
        "RequestHeader",
        &[
            ("xmlns", namespace.as_str()),
            ("soapenv:actor", SOAP_ACTOR_NEXT),
            ("soapenv:mustUnderstand", "0"),
        ],
    );
    w.text_element("networkCode", &header.network_code.to_string());
    w.text_element("applicationName", header.application_name);
    w.close("RequestHeader");
    w.close("soapenv:Header");

    w.open("soapenv:Body");
    w.open_with(method, &[("xmlns", namespace.as_str())]);
    body(&mut w);
    w.close(method);
    w.close("soapenv:Body");

    w.close("soapenv:Envelope");
    w.into_string()
}
