use std::{fmt, marker::PhantomData};

use serde::de::DeserializeOwned;

/// Binds a decoded output type to an execution call.
pub trait NetworkResponse {
    type Output: DeserializeOwned;
}

/// Zero-sized response envelope decoding into `T`.
pub struct ApiResponse<T>(PhantomData<fn() -> T>);

impl<T: DeserializeOwned> NetworkResponse for ApiResponse<T> {
    type Output = T;
}

impl<T> fmt::Debug for ApiResponse<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiResponse")
    }
}
