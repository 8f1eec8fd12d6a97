use serde::{ser::Error as _, Serialize, Serializer};

/// Scalar request parameter value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Value {
    pub fn null() -> Self {
        Self::Null
    }

    pub fn bool(value: bool) -> Self {
        Self::Bool(value)
    }

    pub fn integer(value: i64) -> Self {
        Self::Integer(value)
    }

    pub fn float(value: f64) -> Self {
        Self::Float(value)
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// String form used for URL query items.
    ///
    /// `Null` and non-finite floats have no string form and yield `None`.
    pub fn to_query_value(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Bool(value) => Some(value.to_string()),
            Self::Integer(value) => Some(value.to_string()),
            Self::Float(value) if value.is_finite() => Some(value.to_string()),
            Self::Float(_) => None,
            Self::Text(value) => Some(value.clone()),
        }
    }
}

// JSON has no representation for NaN or infinities; serde_json would quietly
// write `null`, so reject them here instead.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Integer(value) => serializer.serialize_i64(*value),
            Self::Float(value) if value.is_finite() => serializer.serialize_f64(*value),
            Self::Float(value) => Err(S::Error::custom(format!(
                "float value {value} cannot be represented in JSON"
            ))),
            Self::Text(value) => serializer.serialize_str(value),
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use crate::Value;

    #[test]
    fn helper_constructors() {
        assert_eq!(Value::null(), Value::Null);
        assert_eq!(Value::bool(true), Value::Bool(true));
        assert_eq!(Value::integer(7), Value::Integer(7));
        assert_eq!(Value::float(1.25), Value::Float(1.25));
        assert_eq!(Value::text("abc"), Value::Text("abc".to_owned()));
        assert_eq!(Value::from(None::<i64>), Value::Null);
    }

    #[test]
    fn query_value_coercion() {
        assert_eq!(Value::text("a b").to_query_value().as_deref(), Some("a b"));
        assert_eq!(Value::integer(-3).to_query_value().as_deref(), Some("-3"));
        assert_eq!(Value::float(2.5).to_query_value().as_deref(), Some("2.5"));
        assert_eq!(Value::bool(false).to_query_value().as_deref(), Some("false"));
        assert_eq!(Value::null().to_query_value(), None);
        assert_eq!(Value::float(f64::NAN).to_query_value(), None);
    }

    #[test]
    fn serializes_scalars_as_json() {
        let json = serde_json::to_string(&[
            Value::null(),
            Value::bool(true),
            Value::integer(1),
            Value::float(0.5),
            Value::text("x"),
        ])
        .expect("finite values must serialize");
        assert_eq!(json, r#"[null,true,1,0.5,"x"]"#);
    }

    #[test]
    fn non_finite_float_fails_to_serialize() {
        assert!(serde_json::to_vec(&Value::float(f64::INFINITY)).is_err());
    }
}
