//! In-memory stand-in for the product REST API
//!
//! Mirrors the backend's observable behaviour (status codes, error
//! messages, `X-Api-Key` checks, price bands, buy decrementing stock) so the
//! client can be tested over real HTTP. Every request is recorded for
//! header assertions.

mod api;
mod state;

pub use api::{MAX_BODY_BYTES, router};
pub use state::{
    BuyError, MockState, ProductFields, REQUEST_LOG_CAPACITY, RecordedRequest, StoredProduct,
};

use std::net::SocketAddr;
use std::sync::Arc;

/// A running mock bound on a loopback port
pub struct MockServer {
    pub addr: SocketAddr,
    pub state: Arc<MockState>,
    handle: tokio::task::JoinHandle<()>,
}

impl MockServer {
    /// Bind `127.0.0.1:0` and serve in the background
    pub async fn start(api_key: impl Into<String>) -> std::io::Result<Self> {
        let state = Arc::new(MockState::new(api_key));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let app = router(state.clone());

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("Mock server error: {}", e);
            }
        });

        tracing::debug!("Mock product API listening on {}", addr);
        Ok(Self {
            addr,
            state,
            handle,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
