use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

/// Supported response formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    /// Picks the format from an `Accept` header value.
    pub fn from_accept(accept: Option<&str>) -> Self {
        let Some(accept) = accept else {
            return Self::Json;
        };

        let accept = accept.to_ascii_lowercase();
        if accept.contains("application/x-yaml")
            || accept.contains("application/yaml")
            || accept.contains("text/yaml")
        {
            Self::Yaml
        } else {
            Self::Json
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Yaml => "application/x-yaml",
        }
    }
}

/// Extractor for the negotiated [`OutputFormat`].
pub struct AcceptFormat(pub OutputFormat);

impl<S> FromRequestParts<S> for AcceptFormat
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let accept = parts
            .headers
            .get(header::ACCEPT)
            .and_then(|v| v.to_str().ok());

        Ok(AcceptFormat(OutputFormat::from_accept(accept)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_accept() {
        assert_eq!(OutputFormat::from_accept(None), OutputFormat::Json);
        assert_eq!(OutputFormat::from_accept(Some("*/*")), OutputFormat::Json);
        assert_eq!(
            OutputFormat::from_accept(Some("application/json")),
            OutputFormat::Json
        );
        assert_eq!(
            OutputFormat::from_accept(Some("Application/X-YAML")),
            OutputFormat::Yaml
        );
        assert_eq!(
            OutputFormat::from_accept(Some("text/html, text/yaml;q=0.9")),
            OutputFormat::Yaml
        );
    }
}
