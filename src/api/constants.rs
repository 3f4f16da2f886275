//! API Constants and Configuration for the Ad Manager SOAP API

/// Default API host
pub const DEFAULT_BASE_URL: &str = "https://ads.google.com";

/// Path prefix shared by every publisher service endpoint
pub const API_BASE_PATH: &str = "/apis/ads/publisher";

/// Namespace root; the version tag is appended to form a version's namespace
pub const NAMESPACE_ROOT: &str = "https://www.google.com/apis/ads/publisher";

/// OAuth2 scope granting access to the ad-management API
pub const AD_MANAGER_SCOPE: &str = "https://www.googleapis.com/auth/dfp";

/// Default OAuth2 token endpoint for service accounts
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Grant type for the service-account JWT bearer flow
pub const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime requested for a signed assertion
pub const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Token lifetime assumed when the identity provider omits `expires_in`
pub const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 3600;

/// Longest token lifetime accepted; larger `expires_in` values are capped
pub const MAX_TOKEN_LIFETIME_SECS: u64 = 86_400;

/// Refresh a cached token this long before it actually expires
pub const DEFAULT_REFRESH_MARGIN_SECS: u64 = 60;

/// SOAP 1.1 envelope namespace
pub const SOAP_ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// XML Schema instance namespace, carries `xsi:type`
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// SOAP actor for the request header
pub const SOAP_ACTOR_NEXT: &str = "http://schemas.xmlsoap.org/soap/actor/next";

/// Standard headers for SOAP requests
pub mod headers {
    /// Content type for SOAP 1.1 requests
    pub const CONTENT_TYPE_XML: &str = "text/xml; charset=utf-8";

    /// SOAPAction header name; the API expects an empty value
    pub const SOAP_ACTION: &str = "SOAPAction";

    /// Correlation header attached to each call for log matching
    pub const X_CORRELATION_ID: &str = "X-Correlation-ID";

    pub const USER_AGENT: &str = "ad-manager-rs/0.1";
}

/// XML namespace of one API version
pub fn namespace(version: &str) -> String {
    format!("{}/{}", NAMESPACE_ROOT, version)
}

/// Build the endpoint URL of a service at a version
pub fn service_endpoint(base_url: &str, version: &str, service: &str) -> String {
    format!(
        "{}{}/{}/{}",
        base_url.trim_end_matches('/'),
        API_BASE_PATH,
        version,
        service
    )
}
