//! requests the service would send
use std::fmt;

/// A request against the service api, described but not sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRequest {
    /// the base url the path is appended to
    pub base_url: String,
    /// the api path, e.g. `/posts/add`
    pub path: String,
    /// query parameters in the order they're sent
    pub params: Vec<(String, String)>,
}

impl ServiceRequest {
    /// make a new request without parameters
    pub fn new(base_url: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            path: path.into(),
            params: Vec::new(),
        }
    }

    /// add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// get the first value of a query parameter
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// the full url with an encoded query string
    pub fn url(&self) -> String {
        let mut url = format!("{}{}", self.base_url.trim_end_matches('/'), self.path);

        for (i, (key, value)) in self.params.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(&urlencoding::encode(key));
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }

        url
    }
}

impl fmt::Display for ServiceRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url())
    }
}
