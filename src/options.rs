use std::str::FromStr;

/// Configures HTTP timeout and retry behavior.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientOptions {
    /// Per-attempt timeout in milliseconds, enforced by the transport.
    pub timeout_ms: u64,
    /// Maximum number of retries after the initial attempt.
    pub max_retries: usize,
    /// Base retry backoff in milliseconds (exponential strategy).
    /// Zero retries immediately.
    pub retry_backoff_ms: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            max_retries: 3,
            retry_backoff_ms: 0,
        }
    }
}

impl ClientOptions {
    /// Reads overrides from the environment.
    ///
    /// Reads (each optional, unset keeps the default):
    /// - `NETREQ_TIMEOUT_MS`
    /// - `NETREQ_MAX_RETRIES`
    /// - `NETREQ_RETRY_BACKOFF_MS`
    ///
    /// Returns an error naming the variable if a value does not parse.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            timeout_ms: parse_var(&lookup, "NETREQ_TIMEOUT_MS")?.unwrap_or(defaults.timeout_ms),
            max_retries: parse_var(&lookup, "NETREQ_MAX_RETRIES")?
                .unwrap_or(defaults.max_retries),
            retry_backoff_ms: parse_var(&lookup, "NETREQ_RETRY_BACKOFF_MS")?
                .unwrap_or(defaults.retry_backoff_ms),
        })
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|err| format!("invalid {key} value '{raw}': {err}")),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::ClientOptions;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_allow_three_immediate_retries() {
        let options = ClientOptions::default();
        assert_eq!(options.max_retries, 3);
        assert_eq!(options.retry_backoff_ms, 0);
    }

    #[test]
    fn empty_environment_keeps_defaults() {
        let options = ClientOptions::from_lookup(lookup(&[])).expect("must parse");
        assert_eq!(options, ClientOptions::default());
    }

    #[test]
    fn environment_overrides_are_applied() {
        let options = ClientOptions::from_lookup(lookup(&[
            ("NETREQ_TIMEOUT_MS", "250"),
            ("NETREQ_MAX_RETRIES", " 1 "),
            ("NETREQ_RETRY_BACKOFF_MS", ""),
        ]))
        .expect("must parse");
        assert_eq!(options.timeout_ms, 250);
        assert_eq!(options.max_retries, 1);
        assert_eq!(options.retry_backoff_ms, 0);
    }

    #[test]
    fn invalid_value_names_the_variable() {
        let err = ClientOptions::from_lookup(lookup(&[("NETREQ_MAX_RETRIES", "many")]))
            .expect_err("must fail");
        assert!(err.contains("NETREQ_MAX_RETRIES"));
    }
}
