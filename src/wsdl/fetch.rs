use std::fs;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use super::error::GeneratorError;

/// The mechanism used to obtain document text for a location. The resolver
/// never embeds network policy; callers inject an implementation, and tests
/// substitute an in-memory map.
pub trait DocumentFetcher {
    fn fetch(&self, location: &str) -> Result<String, GeneratorError>;
}

/// Network configuration for [`StreamFetcher`], owned by the caller.
#[derive(Clone, Debug, Default)]
pub struct FetchConfig {
    /// Proxy URL applied to all remote fetches.
    pub proxy: Option<String>,
    /// Additional headers sent with every remote fetch.
    pub headers: Vec<(String, String)>,
}

/// Fetches `http(s)` locations over HTTP and everything else from the
/// filesystem, so a local root document can still reference remote schemas.
pub struct StreamFetcher {
    client: Client,
}

impl StreamFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, GeneratorError> {
        let config_error = |reason: String| GeneratorError::Load {
            location: "fetch configuration".to_string(),
            reason,
        };

        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| config_error(e.to_string()))?;
            let value = HeaderValue::from_str(value).map_err(|e| config_error(e.to_string()))?;
            headers.insert(name, value);
        }

        let mut builder = Client::builder().default_headers(headers);
        if let Some(proxy) = &config.proxy {
            let proxy =
                reqwest::Proxy::all(proxy.as_str()).map_err(|e| config_error(e.to_string()))?;
            builder = builder.proxy(proxy);
        }
        let client = builder.build().map_err(|e| config_error(e.to_string()))?;

        Ok(Self { client })
    }
}

impl DocumentFetcher for StreamFetcher {
    fn fetch(&self, location: &str) -> Result<String, GeneratorError> {
        let load_error = |reason: String| GeneratorError::Load {
            location: location.to_string(),
            reason,
        };

        if location.starts_with("http://") || location.starts_with("https://") {
            self.client
                .get(location)
                .send()
                .and_then(|response| response.error_for_status())
                .and_then(|response| response.text())
                .map_err(|e| load_error(e.to_string()))
        } else {
            fs::read_to_string(location).map_err(|e| load_error(e.to_string()))
        }
    }
}

/// Resolves a reference location against the parent document's base path.
/// A reference containing `//` is taken to be absolute and used as-is.
pub fn resolve_location(parent: &str, reference: &str) -> String {
    if reference.contains("//") {
        reference.to_string()
    } else {
        format!("{}/{}", parent_directory(parent), reference)
    }
}

fn parent_directory(location: &str) -> &str {
    match location.rsplit_once('/') {
        Some(("", _)) => "/",
        Some((directory, _)) => directory,
        None => ".",
    }
}

/// In-memory fetcher used by the unit tests in place of the filesystem.
#[cfg(test)]
pub(crate) struct MapFetcher(std::collections::HashMap<String, String>);

#[cfg(test)]
impl MapFetcher {
    pub fn new<const N: usize>(entries: [(&str, &str); N]) -> Self {
        Self::new_owned(
            entries
                .into_iter()
                .map(|(location, text)| (location.to_string(), text.to_string()))
                .collect(),
        )
    }

    pub fn new_owned(entries: Vec<(String, String)>) -> Self {
        Self(entries.into_iter().collect())
    }
}

#[cfg(test)]
impl DocumentFetcher for MapFetcher {
    fn fetch(&self, location: &str) -> Result<String, GeneratorError> {
        self.0
            .get(location)
            .cloned()
            .ok_or_else(|| GeneratorError::Load {
                location: location.to_string(),
                reason: "no such document".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_references_resolve_against_the_parent_directory() {
        assert_eq!(
            resolve_location("schemas/service.wsdl", "types.xsd"),
            "schemas/types.xsd"
        );
        assert_eq!(
            resolve_location("http://example.com/api/service.wsdl", "types.xsd"),
            "http://example.com/api/types.xsd"
        );
        assert_eq!(resolve_location("service.wsdl", "types.xsd"), "./types.xsd");
    }

    #[test]
    fn absolute_references_are_used_as_is() {
        assert_eq!(
            resolve_location("schemas/service.wsdl", "http://example.com/types.xsd"),
            "http://example.com/types.xsd"
        );
    }

    #[test]
    fn missing_documents_fail_with_a_load_error() {
        let fetcher = MapFetcher::new([("a.xsd", "<x/>")]);
        assert!(fetcher.fetch("a.xsd").is_ok());
        let err = fetcher.fetch("b.xsd").unwrap_err();
        assert!(matches!(err, GeneratorError::Load { .. }));
    }
}
