use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Where the listings backend lives.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// Backend started locally with its default port.
    #[default]
    Local,
    /// Any other deployment, addressed by its base URL.
    Custom { backend_url: String },
}

impl Environment {
    /// Returns the backend base URL, without a trailing slash.
    pub fn backend_url(&self) -> String {
        match self {
            Environment::Local => "http://localhost:5000".to_string(),
            Environment::Custom { backend_url } => backend_url.trim_end_matches('/').to_string(),
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("local") {
            return Ok(Environment::Local);
        }
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            return Ok(Environment::Custom {
                backend_url: trimmed.to_string(),
            });
        }
        Err(format!(
            "Invalid backend URL: {}. Expected 'local' or an http(s) URL.",
            s
        ))
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "local ({})", self.backend_url()),
            Environment::Custom { .. } => write!(f, "{}", self.backend_url()),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "Environment::Local, URL: {}", self.backend_url()),
            Environment::Custom { .. } => {
                write!(f, "Environment::Custom, URL: {}", self.backend_url())
            }
        }
    }
}
