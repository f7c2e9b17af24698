//! HTTP server configuration object.

use std::net::SocketAddr;

use catalog::inbound::http::state::HttpState;

/// Everything `create_server` needs besides the health flag.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) http_state: HttpState,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, http_state: HttpState) -> Self {
        Self {
            bind_addr,
            http_state,
        }
    }
}
