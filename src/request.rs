use std::fmt;

use crate::Parameters;

/// HTTP method of a request descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Describes one HTTP call before execution.
///
/// Implemented by [`ApiRequest`]; callers may implement it on their own
/// descriptor types to execute them directly.
pub trait NetworkRequest {
    /// Absolute URL text. Validated at execution time.
    fn endpoint(&self) -> &str;
    fn method(&self) -> Method;
    /// Query parameters for `GET`, JSON body for `POST`, ignored otherwise.
    fn parameters(&self) -> Option<&Parameters>;
    /// Extra headers, appended in order after the automatic ones.
    fn headers(&self) -> Option<&[(String, String)]>;
}

/// Plain request descriptor.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    endpoint: String,
    method: Method,
    parameters: Option<Parameters>,
    headers: Option<Vec<(String, String)>>,
}

impl ApiRequest {
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method,
            parameters: None,
            headers: None,
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::Get, endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::Post, endpoint)
    }

    /// Sets the parameter map, replacing any previous one.
    pub fn with_parameters(mut self, parameters: impl Into<Parameters>) -> Self {
        self.parameters = Some(parameters.into());
        self
    }

    /// Appends a header. Repeated names are all sent.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(Vec::new)
            .push((name.into(), value.into()));
        self
    }
}

impl NetworkRequest for ApiRequest {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn method(&self) -> Method {
        self.method
    }

    fn parameters(&self) -> Option<&Parameters> {
        self.parameters.as_ref()
    }

    fn headers(&self) -> Option<&[(String, String)]> {
        self.headers.as_deref()
    }
}
