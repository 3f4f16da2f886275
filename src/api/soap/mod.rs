//! SOAP plumbing: envelopes out, typed values or faults back

pub mod envelope;
pub mod fault;
pub mod response;
pub mod transport;
pub mod xml;

pub use envelope::{RequestHeader, write_envelope};
pub use response::{Rval, RvalList, SoapBody, find_fault, parse_response};
pub use transport::{HttpSettings, HttpTransport, SoapTransport, WireFailure, WireRequest, WireResponse};
pub use xml::XmlWriter;
