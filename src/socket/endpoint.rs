use std::fmt;

use url::Url;

pub const SOCKET_IO_PATH: &str = "socket.io/";
pub const WEBSOCKET_QUERY: &str = "EIO=4&transport=websocket";

/// Remote endpoint of one socket: the master's base address plus the
/// namespace derived from the module identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    base: Url,
    namespace: String,
}

impl Endpoint {
    pub fn new(master: &Url, identity: &str) -> Self {
        Self {
            base: master.clone(),
            namespace: format!("/{}", identity),
        }
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Socket.IO namespace, always starting with `/`.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// `{master}{namespace}`, the path the relay is addressed by.
    pub fn path(&self) -> String {
        format!("{}{}", self.base.as_str().trim_end_matches('/'), self.namespace)
    }

    /// The websocket address the transport actually dials.
    pub fn websocket_url(&self) -> Url {
        let mut url = self.base.clone();

        let scheme = match url.scheme() {
            "https" | "wss" => "wss",
            _ => "ws",
        };
        let _ = url.set_scheme(scheme);

        let path = format!("{}/{}", url.path().trim_end_matches('/'), SOCKET_IO_PATH);
        url.set_path(&path);
        url.set_query(Some(WEBSOCKET_QUERY));
        url.set_fragment(None);
        url
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}
