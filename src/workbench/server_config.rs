use strum_macros::{Display, EnumString};

pub(crate) const DEFAULT_HOST: &str = "localhost";
pub(crate) const DEFAULT_PORT: u16 = 8090;
pub(crate) const DEFAULT_DOC_ROOT: &str = "vss/api/v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub(crate) enum Scheme {
    Http,
    Https,
}

/// The server address fields the operator edits between dispatches.
/// Lives for the process session only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ServerConfig {
    scheme: Scheme,
    host: String,
    port: u16,
    doc_root: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            scheme: Scheme::Http,
            host: String::from(DEFAULT_HOST),
            port: DEFAULT_PORT,
            doc_root: String::from(DEFAULT_DOC_ROOT),
        }
    }
}

impl ServerConfig {
    /// Applies a `host[:port]` override, e.g. from `VSS_SERVER_ADDR`.
    /// Fields that do not parse keep their defaults.
    pub(crate) fn with_addr(addr: &str) -> Self {
        let mut config = Self::default();
        match addr.split_once(':') {
            Some((host, port)) => {
                if !host.is_empty() {
                    config.host = host.to_string();
                }
                if let Ok(port) = port.parse::<u16>() {
                    config.port = port;
                }
            }
            None if !addr.is_empty() => config.host = addr.to_string(),
            None => {}
        }
        config
    }

    pub(crate) fn scheme(&self) -> Scheme { self.scheme }
    pub(crate) fn host(&self) -> &str { self.host.as_str() }
    pub(crate) fn port(&self) -> u16 { self.port }
    pub(crate) fn doc_root(&self) -> &str { self.doc_root.as_str() }

    pub(crate) fn set_scheme(&mut self, scheme: Scheme) { self.scheme = scheme; }
    pub(crate) fn set_host(&mut self, host: &str) { self.host = host.to_string(); }
    pub(crate) fn set_port(&mut self, port: u16) { self.port = port; }
    pub(crate) fn set_doc_root(&mut self, doc_root: &str) { self.doc_root = doc_root.to_string(); }

    /// A dispatch needs at least a host and a non-zero port.
    pub(crate) fn has_server(&self) -> bool { !self.host.is_empty() && self.port != 0 }

    /// Assembles `scheme://host:port/doc_root`, collapsing stray slashes so
    /// an empty doc root does not produce `//` in request URLs.
    pub(crate) fn base_url(&self) -> String {
        let doc_root = self.doc_root.trim_matches('/');
        if doc_root.is_empty() {
            format!("{}://{}:{}", self.scheme, self.host, self.port)
        } else {
            format!("{}://{}:{}/{doc_root}", self.scheme, self.host, self.port)
        }
    }
}
