use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    error::RequestFailure,
    transport::{TransportRequest, TransportResponse},
    Method, NetworkError, NetworkRequest, Parameters,
};

const CONTENT_TYPE: &str = "Content-Type";
const APPLICATION_JSON: &str = "application/json";

/// Builds the transport request for one attempt.
pub(crate) fn build_transport_request<R>(
    request: &R,
    timeout: Duration,
) -> Result<TransportRequest, NetworkError>
where
    R: NetworkRequest + ?Sized,
{
    let method = request.method();
    let url = build_url(request.endpoint(), method, request.parameters())?;

    let mut headers = Vec::new();
    let mut body = None;

    if let (Method::Post, Some(parameters)) = (method, request.parameters()) {
        body = Some(
            parameters
                .to_json_body()
                .map_err(NetworkError::EncodingFailed)?,
        );
        headers.push((CONTENT_TYPE.to_owned(), APPLICATION_JSON.to_owned()));
    }

    if let Some(extra) = request.headers() {
        headers.extend(extra.iter().cloned());
    }

    Ok(TransportRequest {
        method,
        url,
        headers,
        body,
        timeout,
    })
}

pub(crate) fn build_url(
    endpoint: &str,
    method: Method,
    parameters: Option<&Parameters>,
) -> Result<Url, NetworkError> {
    let invalid = |reason: String| NetworkError::InvalidUrl {
        endpoint: endpoint.to_owned(),
        reason,
    };

    let mut url = Url::parse(endpoint.trim()).map_err(|err| invalid(err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host".to_owned()));
    }

    if let (Method::Get, Some(parameters)) = (method, parameters) {
        let items = parameters.query_items();
        if !items.is_empty() {
            url.set_query(None);
            url.query_pairs_mut().extend_pairs(items);
        }
    }

    Ok(url)
}

/// Outcome of inspecting one transport response.
#[derive(Debug)]
pub(crate) enum ResponseOutcome<T> {
    Success(T),
    /// Non-success status; eligible for retry.
    Retryable(RequestFailure),
    Failed(NetworkError),
}

pub(crate) fn decode_response<T: DeserializeOwned>(
    response: TransportResponse,
) -> ResponseOutcome<T> {
    let status = match StatusCode::from_u16(response.status) {
        Ok(status) => status,
        Err(_) => {
            return ResponseOutcome::Failed(NetworkError::InvalidResponse {
                status: response.status,
            })
        }
    };

    if !status.is_success() {
        return ResponseOutcome::Retryable(RequestFailure::Status {
            status: status.as_u16(),
            body: String::from_utf8_lossy(&response.body).into_owned(),
        });
    }

    if response.body.is_empty() {
        return ResponseOutcome::Failed(NetworkError::InvalidData {
            status: status.as_u16(),
        });
    }

    match serde_json::from_slice::<T>(&response.body) {
        Ok(value) => ResponseOutcome::Success(value),
        Err(err) => ResponseOutcome::Failed(NetworkError::DecodingFailed(err)),
    }
}
