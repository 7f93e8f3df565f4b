use crate::constant::*;
use crate::error::ConfigError;

/// Ordered keyword to affiliate URL table. Keywords are lower-cased on load
/// and scanned in insertion order; the reserved `default` key lives apart
/// from the scanned routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffiliateRoutes {
    routes: Vec<(String, String)>,
    default_url: String,
}

impl Default for AffiliateRoutes {
    fn default() -> Self {
        Self::new(AFFILIATE_ROUTES, DEFAULT_AFFILIATE_URL)
    }
}

impl AffiliateRoutes {
    pub fn new(routes: &[(impl AsRef<str>, impl AsRef<str>)], default_url: impl Into<String>) -> Self {
        Self {
            routes: routes
                .iter()
                .map(|(k, v)| (k.as_ref().to_lowercase(), v.as_ref().to_string()))
                .filter(|(k, _)| k != DEFAULT_ROUTE_KEY)
                .collect(),
            default_url: default_url.into(),
        }
    }

    /// Parses `"default=https://..,diaper=https://.."`. The `default` key is
    /// required and may appear anywhere.
    pub fn parse(table: &str) -> Result<Self, ConfigError> {
        let mut routes = Vec::new();
        let mut default_url = None;

        for pair in table.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (keyword, url) = pair
                .split_once('=')
                .ok_or_else(|| ConfigError::Routes(format!("expected key=url, got {pair:?}")))?;
            let keyword = keyword.trim().to_lowercase();
            let url = url.trim();
            if keyword.is_empty() || url.is_empty() {
                return Err(ConfigError::Routes(format!("empty key or url in {pair:?}")));
            }

            if keyword == DEFAULT_ROUTE_KEY {
                default_url = Some(url.to_string());
            } else {
                routes.push((keyword, url.to_string()));
            }
        }

        let default_url = default_url
            .ok_or_else(|| ConfigError::Routes(format!("missing `{DEFAULT_ROUTE_KEY}` key")))?;
        Ok(Self {
            routes,
            default_url,
        })
    }

    pub fn default_url(&self) -> &str {
        &self.default_url
    }

    /// Plain substring match on the lower-cased `title + " " + summary`, so
    /// "mom" also hits "moment".
    pub fn route(&self, title: &str, summary: &str) -> &str {
        let text = format!("{title} {summary}").to_lowercase();
        for (keyword, url) in &self.routes {
            if text.contains(keyword.as_str()) {
                tracing::debug!("Matched affiliate keyword {:?}", keyword);
                return url;
            }
        }
        &self.default_url
    }
}
