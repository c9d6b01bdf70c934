//! Share link recognition and construction.
//!
//! Three link shapes carry a token:
//!
//! | Shape | Scheme | Host | Path |
//! |---|---|---|---|
//! | [`LinkShape::Web`] | `https` | web host or a subdomain | `/s` or `/s/` |
//! | [`LinkShape::AppScheme`] | app scheme | `s` | empty or `/` |
//! | [`LinkShape::AppSchemeLegacyHost`] | app scheme | anything or none | `/s` or `/s/` |
//!
//! The token lives in the fragment. Some app handoffs strip fragments, so a
//! `?p=` query parameter is accepted when the fragment is missing or empty.
//! Only the web shape is ever produced.

use url::Url;

use crate::codec::base58;
use crate::codec::deflate::{Compressor, Deflate};
use crate::codec::payload::{build_payload_with, parse_payload_with};
use crate::error::DecodeError;
use crate::format::{
    DEFAULT_APP_HOST, DEFAULT_APP_SCHEME, DEFAULT_QUERY_PARAM, DEFAULT_SHARE_PATH,
    DEFAULT_WEB_HOST,
};

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Hosts, scheme and path that identify share links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkConfig {
    web_host: String,
    app_scheme: String,
    app_host: String,
    share_path: String,
    query_param: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            web_host: DEFAULT_WEB_HOST.to_string(),
            app_scheme: DEFAULT_APP_SCHEME.to_string(),
            app_host: DEFAULT_APP_HOST.to_string(),
            share_path: DEFAULT_SHARE_PATH.to_string(),
            query_param: DEFAULT_QUERY_PARAM.to_string(),
        }
    }
}

impl LinkConfig {
    /// Creates the production configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the canonical web host. Subdomains of it are accepted too.
    pub fn with_web_host(mut self, host: impl Into<String>) -> Self {
        self.web_host = host.into();
        self
    }

    /// Sets the custom app scheme.
    pub fn with_app_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.app_scheme = scheme.into();
        self
    }

    /// Sets the host label of custom-scheme links.
    pub fn with_app_host(mut self, host: impl Into<String>) -> Self {
        self.app_host = host.into();
        self
    }

    /// Sets the share path. A leading `/` is added if missing.
    pub fn with_share_path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.share_path = if path.starts_with('/') {
            path
        } else {
            format!("/{}", path)
        };
        self
    }

    /// Sets the legacy query parameter name.
    pub fn with_query_param(mut self, param: impl Into<String>) -> Self {
        self.query_param = param.into();
        self
    }

    pub fn web_host(&self) -> &str {
        &self.web_host
    }

    pub fn app_scheme(&self) -> &str {
        &self.app_scheme
    }

    pub fn app_host(&self) -> &str {
        &self.app_host
    }

    pub fn share_path(&self) -> &str {
        &self.share_path
    }

    pub fn query_param(&self) -> &str {
        &self.query_param
    }
}

// =============================================================================
// SHAPES
// =============================================================================

/// Recognized share link shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkShape {
    /// `https://vaultaire.app/s#token`, or a subdomain of the web host.
    Web,
    /// `vaultaire://s#token`.
    AppScheme,
    /// `vaultaire:/s#token` or `vaultaire://<any>/s#token`.
    AppSchemeLegacyHost,
}

type ShapeMatcher = fn(&LinkConfig, &Url) -> bool;

/// Shapes in match order.
const SHAPES: &[(LinkShape, ShapeMatcher)] = &[
    (LinkShape::Web, is_web_link),
    (LinkShape::AppScheme, is_app_link),
    (LinkShape::AppSchemeLegacyHost, is_legacy_app_link),
];

fn is_web_link(config: &LinkConfig, url: &Url) -> bool {
    url.scheme().eq_ignore_ascii_case("https")
        && url
            .host_str()
            .is_some_and(|host| is_same_or_subdomain(host, &config.web_host))
        && is_share_path(url.path(), &config.share_path)
}

fn is_app_link(config: &LinkConfig, url: &Url) -> bool {
    url.scheme().eq_ignore_ascii_case(&config.app_scheme)
        && url
            .host_str()
            .is_some_and(|host| host.eq_ignore_ascii_case(&config.app_host))
        && matches!(url.path(), "" | "/")
}

fn is_legacy_app_link(config: &LinkConfig, url: &Url) -> bool {
    url.scheme().eq_ignore_ascii_case(&config.app_scheme)
        && is_share_path(url.path(), &config.share_path)
}

fn is_same_or_subdomain(host: &str, base: &str) -> bool {
    if host.eq_ignore_ascii_case(base) {
        return true;
    }
    let Some(split) = host.len().checked_sub(base.len() + 1) else {
        return false;
    };
    // Requires at least one label in front of ".{base}".
    split > 0
        && host.get(split..split + 1) == Some(".")
        && host
            .get(split + 1..)
            .is_some_and(|suffix| suffix.eq_ignore_ascii_case(base))
}

fn is_share_path(path: &str, share_path: &str) -> bool {
    path == share_path || path.strip_suffix('/') == Some(share_path)
}

// =============================================================================
// TOKEN SOURCES
// =============================================================================

type TokenExtractor = fn(&LinkConfig, &Url) -> Option<String>;

/// Token locations in priority order. The query is a fallback for handoffs
/// that drop the fragment.
const TOKEN_SOURCES: &[TokenExtractor] = &[token_from_fragment, token_from_query];

fn token_from_fragment(_config: &LinkConfig, url: &Url) -> Option<String> {
    url.fragment()
        .filter(|fragment| !fragment.is_empty())
        .map(str::to_string)
}

fn token_from_query(config: &LinkConfig, url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, value)| key == config.query_param.as_str() && !value.is_empty())
        .map(|(_, value)| value.into_owned())
}

// =============================================================================
// SHARE LINKS
// =============================================================================

/// Builds and reads share links for one [`LinkConfig`].
#[derive(Debug, Clone, Default)]
pub struct ShareLinks<C = Deflate> {
    config: LinkConfig,
    compressor: C,
}

impl ShareLinks<Deflate> {
    /// Creates a link codec with the default compressor.
    pub fn new(config: LinkConfig) -> Self {
        Self::with_compressor(config, Deflate::default())
    }
}

impl<C: Compressor> ShareLinks<C> {
    /// Creates a link codec with a custom compressor.
    pub fn with_compressor(config: LinkConfig, compressor: C) -> Self {
        Self { config, compressor }
    }

    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Returns the first shape `url` matches, if any.
    pub fn classify(&self, url: &Url) -> Option<LinkShape> {
        SHAPES
            .iter()
            .find(|(_, matches)| matches(&self.config, url))
            .map(|(shape, _)| *shape)
    }

    /// Returns true if `url` is a recognized share link.
    pub fn is_supported(&self, url: &Url) -> bool {
        self.classify(url).is_some()
    }

    /// Returns the token carried by `url`: the fragment if non-empty, else the
    /// query parameter if non-empty.
    ///
    /// This does not check the link shape; see [`is_supported`](Self::is_supported).
    pub fn extract_token(&self, url: &Url) -> Option<String> {
        TOKEN_SOURCES
            .iter()
            .find_map(|extract| extract(&self.config, url))
    }

    /// Encodes a phrase as a base58 token.
    pub fn token_for(&self, phrase: &str) -> String {
        base58::encode(&build_payload_with(phrase, &self.compressor))
    }

    /// Builds the canonical web share link for a phrase.
    pub fn build_url(&self, phrase: &str) -> String {
        format!(
            "https://{}{}#{}",
            self.config.web_host,
            self.config.share_path,
            self.token_for(phrase)
        )
    }

    /// Recovers the phrase from a share link, reporting why it failed.
    pub fn try_phrase_from_url(&self, url: &Url) -> Result<String, DecodeError> {
        if !self.is_supported(url) {
            return Err(DecodeError::UnsupportedUrl);
        }
        let token = self.extract_token(url).ok_or(DecodeError::TokenAbsent)?;
        let payload = base58::decode(&token)?;
        parse_payload_with(&payload, &self.compressor)
    }

    /// Parses `url` and recovers its phrase, reporting why it failed.
    ///
    /// Text that is not a URL at all is reported as [`DecodeError::UnsupportedUrl`].
    pub fn try_phrase_from_str(&self, url: &str) -> Result<String, DecodeError> {
        let url = Url::parse(url).map_err(|_| DecodeError::UnsupportedUrl)?;
        self.try_phrase_from_url(&url)
    }

    /// Recovers the phrase from a share link.
    ///
    /// Foreign or malformed links yield `None`; the reason is only logged.
    pub fn phrase_from_url(&self, url: &Url) -> Option<String> {
        self.try_phrase_from_url(url).map_err(log_rejection).ok()
    }

    /// Parses `url` and recovers its phrase. See [`phrase_from_url`](Self::phrase_from_url).
    pub fn phrase_from_str(&self, url: &str) -> Option<String> {
        self.try_phrase_from_str(url).map_err(log_rejection).ok()
    }
}

fn log_rejection(err: DecodeError) {
    tracing::debug!(stage = err.stage().label(), error = %err, "ignoring share link");
}
