//! Hyper glue: one spawned task per connection, each request handed to the
//! router.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use explorer_router::{Method, Request, Response, Router};
use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request as HyperRequest, Response as HyperResponse, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

/// Accepts connections on `listener` until ctrl-c is received.
///
/// # Errors
///
/// Fails when accepting a connection or installing the signal handler fails.
pub async fn serve(listener: TcpListener, router: Arc<Router>) -> std::io::Result<()> {
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        let (stream, peer) = tokio::select! {
            accepted = listener.accept() => accepted?,
            signal = &mut shutdown => {
                signal?;
                info!("shutting down");
                return Ok(());
            }
        };
        debug!(%peer, "connection accepted");

        let io = TokioIo::new(stream);
        let router = router.clone();

        tokio::task::spawn(async move {
            let service = service_fn(move |req| {
                let router = router.clone();
                handle_request(req, router)
            });

            if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                warn!(%peer, error = %err, "error serving connection");
            }
        });
    }
}

/// Binds `addr` and serves until shutdown.
///
/// # Errors
///
/// Fails when `addr` cannot be bound, or as [`serve`] does.
pub async fn run(addr: SocketAddr, router: Router) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    serve(listener, Arc::new(router)).await
}

async fn handle_request(
    req: HyperRequest<Incoming>,
    router: Arc<Router>,
) -> Result<HyperResponse<Full<Bytes>>, Infallible> {
    let Some(method) = Method::parse(req.method().as_str()) else {
        return Ok(into_hyper(Response::method_not_allowed()));
    };
    let mut request = Request::new(method, req.uri().path());

    if let Some(query) = req.uri().query() {
        request.query = Request::parse_query_string(query);
    }

    for (key, value) in req.headers() {
        if let Ok(v) = value.to_str() {
            request.headers.insert(key.to_string(), v.to_string());
        }
    }

    request.body = match req.collect().await {
        Ok(body) => body.to_bytes().to_vec(),
        Err(err) => {
            warn!(error = %err, "unable to read request body");
            return Ok(into_hyper(Response::error(400, "unable to read request body")));
        }
    };

    Ok(into_hyper(router.handle(request).await))
}

fn into_hyper(response: Response) -> HyperResponse<Full<Bytes>> {
    let mut hyper_response = HyperResponse::new(Full::new(Bytes::from(response.body)));
    *hyper_response.status_mut() =
        StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let headers = hyper_response.headers_mut();
    for (key, value) in &response.headers {
        match (
            hyper::header::HeaderName::from_bytes(key.as_bytes()),
            hyper::header::HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => warn!(header = %key, "dropping invalid response header"),
        }
    }

    hyper_response
}
