use super::auth::CredentialProvider;
use super::constants::{self, headers};
use super::error::{Error, Result, TransportError, TransportErrorKind};
use super::operations::{Action, ActionResult, UpdateResult};
use super::query::{PageResult, Statement};
use super::resilience::{CallContext, CallLogger};
use super::soap::{
    RequestHeader, Rval, RvalList, SoapBody, SoapTransport, WireRequest, XmlWriter, find_fault,
    parse_response, write_envelope,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// One service method invocation
pub trait SoapRequest: Send + Sync {
    fn method(&self) -> &'static str;

    /// Whether repeating the call cannot duplicate server-side effects
    fn idempotent(&self) -> bool {
        true
    }

    /// Statement to validate before anything is sent
    fn statement(&self) -> Option<&Statement> {
        None
    }

    fn write_params(&self, w: &mut XmlWriter);
}

/// Request without parameters, e.g. `getCurrentNetwork`
#[derive(Debug, Clone, Copy)]
pub struct NoArgs {
    pub method: &'static str,
}

impl SoapRequest for NoArgs {
    fn method(&self) -> &'static str {
        self.method
    }

    fn write_params(&self, _w: &mut XmlWriter) {}
}

/// Request carrying one statement, e.g. `getUsersByStatement`
#[derive(Debug, Clone, Copy)]
pub struct StatementRequest<'a> {
    pub method: &'static str,
    /// Element name of the statement parameter, usually `filterStatement`
    pub parameter: &'static str,
    pub statement: &'a Statement,
}

impl SoapRequest for StatementRequest<'_> {
    fn method(&self) -> &'static str {
        self.method
    }

    fn statement(&self) -> Option<&Statement> {
        Some(self.statement)
    }

    fn write_params(&self, w: &mut XmlWriter) {
        self.statement.write_xml(self.parameter, w);
    }
}

/// Bulk action over the entities a statement selects. Never idempotent.
#[derive(Debug, Clone, Copy)]
pub struct ActionRequest<'a, A: Action> {
    pub method: &'static str,
    pub action: A,
    pub statement: &'a Statement,
}

impl<A: Action> SoapRequest for ActionRequest<'_, A> {
    fn method(&self) -> &'static str {
        self.method
    }

    fn idempotent(&self) -> bool {
        false
    }

    fn statement(&self) -> Option<&Statement> {
        Some(self.statement)
    }

    fn write_params(&self, w: &mut XmlWriter) {
        self.action.write_xml(w);
        self.statement.write_xml("filterStatement", w);
    }
}

/// State shared by every service handle of one `AdManagerClient`
pub struct ClientContext {
    network_code: u64,
    application_name: String,
    base_url: String,
    credentials: Arc<CredentialProvider>,
    transport: Arc<dyn SoapTransport>,
    call_timeout: Duration,
    logger: CallLogger,
}

impl ClientContext {
    pub fn new(
        network_code: u64,
        application_name: impl Into<String>,
        base_url: impl Into<String>,
        credentials: Arc<CredentialProvider>,
        transport: Arc<dyn SoapTransport>,
    ) -> Self {
        Self {
            network_code,
            application_name: application_name.into(),
            base_url: base_url.into(),
            credentials,
            transport,
            call_timeout: Duration::from_secs(60),
            logger: CallLogger::default(),
        }
    }

    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    pub fn with_logger(mut self, logger: CallLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn network_code(&self) -> u64 {
        self.network_code
    }

    pub fn application_name(&self) -> &str {
        &self.application_name
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &Arc<CredentialProvider> {
        &self.credentials
    }

    /// Bind a client to one service endpoint of one version
    pub fn bind(self: &Arc<Self>, version: &'static str, service: &'static str) -> SoapClient {
        SoapClient {
            endpoint: constants::service_endpoint(&self.base_url, version, service),
            context: Arc::clone(self),
            version,
            service,
        }
    }
}

/// SOAP client for a single service of a single API version
///
/// Cheap to clone; every clone shares the context it was bound from.
#[derive(Clone)]
pub struct SoapClient {
    context: Arc<ClientContext>,
    version: &'static str,
    service: &'static str,
    endpoint: String,
}

impl SoapClient {
    pub fn version(&self) -> &'static str {
        self.version
    }

    pub fn service(&self) -> &'static str {
        self.service
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send `request` and decode the whole `{method}Response` element as `D`
    pub async fn call<R, D>(&self, request: &R) -> Result<D>
    where
        R: SoapRequest,
        D: DeserializeOwned,
    {
        if let Some(statement) = request.statement() {
            statement.validate()?;
        }

        let context = self
            .context
            .logger
            .start_call(self.version, self.service, request.method());
        let result = self.dispatch(request, &context).await;

        let error = result.as_ref().err().map(|e| e.to_string());
        self.context.logger.complete_call(&context, error.as_deref());
        result
    }

    /// Call a method returning a single `rval`
    pub async fn call_rval<R, T>(&self, request: &R) -> Result<T>
    where
        R: SoapRequest,
        T: DeserializeOwned,
    {
        let Rval { rval } = self.call::<R, Rval<T>>(request).await?;
        Ok(rval)
    }

    /// Call a method returning zero or more `rval` elements
    pub async fn call_list<R, T>(&self, request: &R) -> Result<Vec<T>>
    where
        R: SoapRequest,
        T: DeserializeOwned,
    {
        let RvalList { rval } = self.call::<R, RvalList<T>>(request).await?;
        Ok(rval)
    }

    /// `get*ByStatement` methods
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        method: &'static str,
        parameter: &'static str,
        statement: &Statement,
    ) -> Result<PageResult<T>> {
        let request = StatementRequest {
            method,
            parameter,
            statement,
        };
        self.call_rval(&request).await
    }

    /// `perform*Action` methods
    pub async fn perform<A: Action>(
        &self,
        method: &'static str,
        action: A,
        statement: &Statement,
    ) -> Result<ActionResult> {
        let request = ActionRequest {
            method,
            action,
            statement,
        };
        let result: UpdateResult = self.call_rval(&request).await?;
        Ok(result.into())
    }

    async fn dispatch<R, D>(&self, request: &R, context: &CallContext) -> Result<D>
    where
        R: SoapRequest,
        D: DeserializeOwned,
    {
        let method = request.method();
        let idempotent = request.idempotent();
        let token = self.context.credentials.access_token().await?;

        let header = RequestHeader {
            network_code: self.context.network_code,
            application_name: &self.context.application_name,
        };
        let body = write_envelope(self.version, header, method, |w| request.write_params(w));

        let request_headers = vec![
            ("Authorization".to_string(), format!("Bearer {}", token.bearer())),
            (headers::SOAP_ACTION.to_string(), "\"\"".to_string()),
            ("Content-Type".to_string(), headers::CONTENT_TYPE_XML.to_string()),
            (headers::X_CORRELATION_ID.to_string(), context.correlation_id.clone()),
        ];
        self.context
            .logger
            .log_request(context, &self.endpoint, &request_headers);

        let wire = WireRequest {
            endpoint: self.endpoint.clone(),
            headers: request_headers,
            body,
        };

        let response = match tokio::time::timeout(self.context.call_timeout, self.context.transport.send(wire)).await {
            Err(_) => {
                return Err(TransportError::new(
                    method,
                    TransportErrorKind::Timeout,
                    idempotent,
                    format!("no reply within {:?}", self.context.call_timeout),
                )
                .into());
            }
            Ok(Err(failure)) => {
                return Err(TransportError::new(method, failure.kind, idempotent, failure.message).into());
            }
            Ok(Ok(response)) => response,
        };

        self.context.logger.log_response(context, response.status);
        let success = (200..300).contains(&response.status);

        if response.status == 401 {
            // Rejected token; the next call fetches a fresh one
            self.context.credentials.invalidate().await;
        }

        match parse_response::<D>(&response.body, method) {
            Ok(SoapBody::Fault(fault)) => Err(Error::Api(fault)),
            Ok(SoapBody::Value(value)) if success => Ok(value),
            Ok(SoapBody::Value(_)) => Err(TransportError::new(
                method,
                TransportErrorKind::Status(response.status),
                idempotent,
                "result envelope with a failure status",
            )
            .into()),
            Err(reason) if success => Err(TransportError::new(
                method,
                TransportErrorKind::MalformedResponse,
                idempotent,
                reason,
            )
            .into()),
            Err(reason) => match find_fault(&response.body) {
                Some(fault) => Err(Error::Api(fault)),
                None => Err(TransportError::new(
                    method,
                    TransportErrorKind::Status(response.status),
                    idempotent,
                    summarize(&response.body, &reason),
                )
                .into()),
            },
        }
    }
}

/// First line of a non-SOAP error body, or the decode error when it is empty
fn summarize(body: &str, reason: &str) -> String {
    let line = body.lines().map(str::trim).find(|l| !l.is_empty());
    match line {
        Some(line) if line.chars().count() > 200 => {
            format!("{}...", line.chars().take(200).collect::<String>())
        }
        Some(line) => line.to_string(),
        None => reason.to_string(),
    }
}
