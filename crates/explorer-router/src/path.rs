//! Path pattern matching.

use regex::Regex;

use crate::error::{Result, RouterError};
use crate::request::PathParams;

/// A compiled path pattern for matching URLs.
#[derive(Debug, Clone)]
pub struct PathPattern {
    /// The original pattern string.
    pattern: String,
    /// Compiled regex for matching.
    regex: Regex,
    /// Parameter names in order.
    param_names: Vec<String>,
}

impl PathPattern {
    /// Parses a path pattern string.
    ///
    /// Pattern syntax:
    /// - `/` - The root
    /// - `/tables` - Literal path
    /// - `/{table}/{id}` - Path with parameters; a parameter matches one
    ///   non-empty segment
    ///
    /// # Example
    ///
    /// ```
    /// use explorer_router::PathPattern;
    ///
    /// let pattern = PathPattern::new("/{table}/{id}").unwrap();
    /// let params = pattern.match_path("/items/42").unwrap();
    /// assert_eq!(params.get("table"), Some("items"));
    /// assert_eq!(params.get("id"), Some("42"));
    /// ```
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidPattern`] for an empty or repeated parameter
    /// name.
    pub fn new(pattern: &str) -> Result<Self> {
        let mut param_names = Vec::new();
        let mut regex_str = String::from("^");

        for part in pattern.split('/').filter(|s| !s.is_empty()) {
            regex_str.push('/');

            if let Some(param) = part.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                if param.is_empty() || param_names.iter().any(|n| n == param) {
                    return Err(RouterError::InvalidPattern(pattern.to_string()));
                }
                param_names.push(param.to_string());
                regex_str.push_str("([^/]+)");
            } else {
                regex_str.push_str(&regex::escape(part));
            }
        }

        regex_str.push_str("/?$");

        let regex =
            Regex::new(&regex_str).map_err(|_| RouterError::InvalidPattern(pattern.to_string()))?;

        Ok(Self {
            pattern: pattern.to_string(),
            regex,
            param_names,
        })
    }

    /// Attempts to match a path against this pattern.
    ///
    /// Returns extracted parameters if the path matches.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<PathParams> {
        let caps = self.regex.captures(path)?;

        let mut params = PathParams::new();

        for (i, name) in self.param_names.iter().enumerate() {
            if let Some(value) = caps.get(i + 1) {
                params.insert(name.clone(), value.as_str().to_string());
            }
        }

        Some(params)
    }

    /// Returns the original pattern string.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the parameter names.
    #[must_use]
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }
}
