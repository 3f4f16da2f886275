//! SOAP fault decoding

use crate::api::constants::XSI_NS;
use crate::api::error::{ApiError, ApiErrorDetail};
use roxmltree::Node;

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|c| c.is_element() && c.tag_name().name() == name)
}

fn child_text(node: Node<'_, '_>, name: &str) -> Option<String> {
    child(node, name)
        .and_then(|c| c.text())
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

fn strip_prefix(qualified: &str) -> &str {
    qualified.rsplit(':').next().unwrap_or(qualified)
}

fn decode_detail(errors: Node<'_, '_>) -> ApiErrorDetail {
    let error_type = errors
        .attribute((XSI_NS, "type"))
        .map(|t| strip_prefix(t).to_string());
    let reason = child_text(errors, "reason");

    let code = child_text(errors, "errorString").unwrap_or_else(|| match (&error_type, &reason) {
        (Some(t), Some(r)) => format!("{}.{}", t, r),
        (Some(t), None) => t.clone(),
        (None, Some(r)) => r.clone(),
        (None, None) => "UNKNOWN".to_string(),
    });

    ApiErrorDetail {
        error_type,
        code,
        reason,
        field_path: child_text(errors, "fieldPath"),
        trigger: child_text(errors, "trigger"),
    }
}

/// Decode a `<Fault>` element
pub fn decode_fault(fault: Node<'_, '_>) -> ApiError {
    let fault_code = child_text(fault, "faultcode").unwrap_or_else(|| "Server".to_string());
    let fault_string = child_text(fault, "faultstring");

    let exception = child(fault, "detail")
        .and_then(|detail| detail.children().find(|c| c.is_element()));

    let errors = exception
        .map(|e| {
            e.children()
                .filter(|c| c.is_element() && c.tag_name().name() == "errors")
                .map(decode_detail)
                .collect()
        })
        .unwrap_or_default();

    let message = exception
        .and_then(|e| child_text(e, "message"))
        .or(fault_string)
        .unwrap_or_else(|| fault_code.clone());

    ApiError {
        fault_code,
        message,
        errors,
    }
}
