//! Network infrastructure: implements `EndpointProbe` with a plain TCP connect.

use std::net::Shutdown;
use std::time::Duration;

use tokio::net::TcpStream;

use crate::application::ports::EndpointProbe;

/// Production probe: one TCP connection attempt, closed immediately on
/// success. Reachable means the connection was accepted, nothing more.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpEndpointProbe {
    connect_timeout: Option<Duration>,
}

impl TcpEndpointProbe {
    /// Probe bounded only by the operating system's connect timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Probe that gives up after `timeout`.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            connect_timeout: Some(timeout),
        }
    }

    #[must_use]
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout
    }
}

impl EndpointProbe for TcpEndpointProbe {
    async fn probe(&self, address: &str, port: u16) -> bool {
        let connect = TcpStream::connect((address, port));
        let result = match self.connect_timeout {
            Some(limit) => match tokio::time::timeout(limit, connect).await {
                Ok(res) => res,
                Err(_) => {
                    tracing::debug!(address, port, "probe timed out");
                    return false;
                }
            },
            None => connect.await,
        };

        match result {
            Ok(stream) => {
                // Close right away; the service never sees a payload.
                if let Ok(std_stream) = stream.into_std() {
                    let _ = std_stream.shutdown(Shutdown::Both);
                }
                tracing::debug!(address, port, "probe connected");
                true
            }
            Err(e) => {
                tracing::debug!(address, port, error = %e, "probe failed");
                false
            }
        }
    }
}
