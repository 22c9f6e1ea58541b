use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use log::info;
use warp::http::{HeaderMap, HeaderValue};
use warp::Filter;

use super::api_routes::routes;
use crate::ai::ResponseDrafter;

pub struct WebUI {
    drafter: Arc<ResponseDrafter>,
    addr: SocketAddr,
}

impl WebUI {
    pub fn new(drafter: Arc<ResponseDrafter>, port: u16) -> Self {
        WebUI {
            drafter,
            addr: SocketAddr::from(([127, 0, 0, 1], port)),
        }
    }

    pub async fn run(
        &self,
        shutdown_signal: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let routes = routes(self.drafter.clone())
            .with(warp::log::custom(|info| {
                info!(
                    "Request: {} {} {}",
                    info.method(),
                    info.path(),
                    info.status().as_u16()
                );
            }))
            .with(warp::reply::with::headers(header_map()));

        let (addr, server) =
            warp::serve(routes).try_bind_with_graceful_shutdown(self.addr, shutdown_signal)?;
        info!("Web UI listening on http://{}", addr);

        server.await;

        info!("Web UI server has shut down.");
        Ok(())
    }
}

fn header_map() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("X-Content-Type-Options", HeaderValue::from_static("nosniff"));
    headers.insert(
        "Content-Security-Policy",
        HeaderValue::from_static("frame-ancestors 'self'"),
    );
    headers
}
