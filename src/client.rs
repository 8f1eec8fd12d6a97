use std::{fmt, sync::Arc, time::Duration};

use serde::de::DeserializeOwned;
use tokio::{task::JoinHandle, time::sleep};

use crate::{
    decode::{build_transport_request, decode_response, ResponseOutcome},
    error::RequestFailure,
    transport::{ReqwestTransport, Transport},
    ClientOptions, NetworkError, NetworkRequest, NetworkResponse, Result,
};

#[derive(Clone)]
/// Executes request descriptors against a shared [`Transport`].
///
/// Cloning is cheap: clones share the same transport handle.
pub struct NetworkClient {
    transport: Arc<dyn Transport>,
    options: ClientOptions,
}

impl fmt::Debug for NetworkClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkClient")
            .field("transport", &"<dyn Transport>")
            .field("options", &self.options)
            .finish()
    }
}

impl Default for NetworkClient {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkClient {
    /// Creates a client on a default `reqwest` transport.
    pub fn new() -> Self {
        Self::with_transport(Arc::new(ReqwestTransport::default()))
    }

    /// Creates a client on the given transport.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use netreq_http::{NetworkClient, ReqwestTransport};
    ///
    /// let http = reqwest::Client::builder().build().expect("client must build");
    /// let client = NetworkClient::with_transport(Arc::new(ReqwestTransport::new(http)));
    /// ```
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            options: ClientOptions::default(),
        }
    }

    /// Creates a client on a default transport with options read from the
    /// environment (see [`ClientOptions::from_env`]).
    pub fn from_env() -> std::result::Result<Self, String> {
        Ok(Self::new().with_options(ClientOptions::from_env()?))
    }

    /// Applies client options such as timeout and retry behavior.
    pub fn with_options(mut self, opts: ClientOptions) -> Self {
        self.options = opts;
        self
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Performs `request` and decodes the success body into `T`.
    ///
    /// Transport errors and non-2xx statuses are retried up to
    /// [`ClientOptions::max_retries`] times; every other failure is returned
    /// on the attempt that produced it.
    pub async fn execute<T, R>(&self, request: &R) -> Result<T>
    where
        T: DeserializeOwned,
        R: NetworkRequest + ?Sized,
    {
        let timeout = Duration::from_millis(self.options.timeout_ms);
        let mut attempt = 0usize;
        loop {
            // Rebuilt on every attempt.
            let transport_request = build_transport_request(request, timeout)?;

            let failure = match self.transport.perform(transport_request).await {
                Ok(response) => match decode_response(response) {
                    ResponseOutcome::Success(value) => return Ok(value),
                    ResponseOutcome::Failed(err) => {
                        #[cfg(feature = "tracing")]
                        tracing::debug!(attempt, error = %err, "request failed without retry");
                        return Err(err);
                    }
                    ResponseOutcome::Retryable(failure) => failure,
                },
                Err(err) => RequestFailure::Transport(err),
            };

            if attempt >= self.options.max_retries {
                #[cfg(feature = "tracing")]
                tracing::debug!(attempt, error = %failure, "retries exhausted");
                return Err(NetworkError::RequestFailed {
                    attempts: attempt + 1,
                    failure,
                });
            }

            self.wait_before_retry(attempt, &failure).await;
            attempt += 1;
        }
    }

    /// Like [`execute`](Self::execute), with the output type bound by a
    /// [`NetworkResponse`] envelope such as [`ApiResponse`](crate::ApiResponse).
    pub async fn request<P, R>(&self, request: &R) -> Result<P::Output>
    where
        P: NetworkResponse,
        R: NetworkRequest + ?Sized,
    {
        self.execute::<P::Output, R>(request).await
    }

    /// Spawns the request on the tokio runtime and hands the outcome to
    /// `on_complete` exactly once.
    ///
    /// # Panics
    ///
    /// Panics if called from outside a tokio runtime, like `tokio::spawn`.
    pub fn execute_with<T, R, F>(&self, request: R, on_complete: F) -> JoinHandle<()>
    where
        T: DeserializeOwned + Send + 'static,
        R: NetworkRequest + Send + Sync + 'static,
        F: FnOnce(Result<T>) + Send + 'static,
    {
        let client = self.clone();
        tokio::spawn(async move {
            let outcome = client.execute::<T, R>(&request).await;
            on_complete(outcome);
        })
    }

    /// Waits before the next retry attempt.
    ///
    /// With a zero base backoff the retry is immediate; otherwise the delay
    /// doubles with every attempt.
    async fn wait_before_retry(&self, attempt: usize, failure: &RequestFailure) {
        let exp = attempt.min(16) as u32;
        let multiplier = 1u64 << exp;
        let delay_ms = self.options.retry_backoff_ms.saturating_mul(multiplier);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            attempt,
            error = %failure,
            "retrying request after {} ms",
            delay_ms
        );
        #[cfg(not(feature = "tracing"))]
        let _ = failure;

        if delay_ms > 0 {
            sleep(Duration::from_millis(delay_ms)).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::Arc,
        time::{Duration, Instant},
    };

    use async_trait::async_trait;

    use super::NetworkClient;
    use crate::{
        transport::{Transport, TransportError, TransportRequest, TransportResponse},
        ApiRequest, ClientOptions, NetworkError,
    };

    struct Unreachable;

    #[async_trait]
    impl Transport for Unreachable {
        async fn perform(
            &self,
            _request: TransportRequest,
        ) -> Result<TransportResponse, TransportError> {
            Err(TransportError::other("unreachable"))
        }
    }

    #[test]
    fn debug_hides_transport() {
        let client = NetworkClient::with_transport(Arc::new(Unreachable));
        let debug = format!("{client:?}");
        assert!(debug.contains("<dyn Transport>"));
        assert!(debug.contains("max_retries: 3"));
    }

    #[test]
    fn with_options_replaces_defaults() {
        let options = ClientOptions {
            timeout_ms: 5,
            max_retries: 0,
            retry_backoff_ms: 1,
        };
        let client =
            NetworkClient::with_transport(Arc::new(Unreachable)).with_options(options.clone());
        assert_eq!(client.options(), &options);
    }

    #[tokio::test]
    async fn backoff_delays_retry_when_configured() {
        let client =
            NetworkClient::with_transport(Arc::new(Unreachable)).with_options(ClientOptions {
                timeout_ms: 5,
                max_retries: 2,
                retry_backoff_ms: 10,
            });
        let started = Instant::now();
        let err = client
            .execute::<serde_json::Value, _>(&ApiRequest::get("https://a.test/"))
            .await
            .expect_err("transport always fails");
        // 10 ms + 20 ms of backoff before the second and third attempts.
        assert!(started.elapsed() >= Duration::from_millis(30));
        assert!(matches!(err, NetworkError::RequestFailed { attempts: 3, .. }));
    }
}
