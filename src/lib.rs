//! `netreq-http` is an async HTTP request client with bounded retry and
//! typed JSON decoding.
//!
//! Describe a call with [`ApiRequest`] (or any [`NetworkRequest`]) and hand
//! it to [`NetworkClient::execute`]:
//! - `GET` parameters become URL query items
//! - `POST` parameters become a JSON body
//! - transport errors and non-2xx statuses are retried, everything else fails fast
//!
//! ```no_run
//! use netreq_http::{ApiRequest, NetworkClient};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Repo {
//!     name: String,
//! }
//!
//! # async fn run() -> netreq_http::Result<()> {
//! let client = NetworkClient::new();
//! let request = ApiRequest::get("https://api.example.com/repos/1")
//!     .with_header("Accept", "application/json");
//! let repo: Repo = client.execute(&request).await?;
//! println!("{}", repo.name);
//! # Ok(())
//! # }
//! ```

mod client;
mod decode;
mod error;
mod options;
mod params;
mod request;
mod response;
pub mod transport;
mod value;

pub use client::NetworkClient;
pub use error::{NetworkError, RequestFailure};
pub use options::ClientOptions;
pub use params::Parameters;
pub use request::{ApiRequest, Method, NetworkRequest};
pub use response::{ApiResponse, NetworkResponse};
pub use transport::{ReqwestTransport, Transport, TransportError};
pub use value::Value;

pub type Result<T> = std::result::Result<T, NetworkError>;
