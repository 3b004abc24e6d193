use std::fs;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use experiment_server::config::{AppState, Config};
use experiment_server::server::{create_listener, run_server, SignalHandler};
use http_body_util::{BodyExt, Empty};
use hyper::body::Bytes;
use hyper::client::conn::http1;
use hyper::{Request, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;

async fn fetch(addr: SocketAddr, path: &str) -> (StatusCode, String, Bytes) {
    let stream = TcpStream::connect(addr).await.unwrap();
    let (mut sender, conn) = http1::handshake(TokioIo::new(stream)).await.unwrap();
    tokio::spawn(conn);

    let req = Request::builder()
        .uri(path)
        .header("host", addr.to_string())
        .body(Empty::<Bytes>::new())
        .unwrap();
    let resp = sender.send_request(req).await.unwrap();
    let status = resp.status();
    let content_type = resp.headers()["content-type"].to_str().unwrap().to_string();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    (status, content_type, body)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_requests_over_tcp() {
    let dir = tempfile::tempdir().unwrap();
    let site = dir.path().join("site");
    fs::create_dir_all(&site).unwrap();
    fs::create_dir_all(dir.path().join("dist")).unwrap();
    fs::write(site.join("index.html"), "<html>OK</html>").unwrap();
    fs::write(dir.path().join("dist/sdk.js"), vec![b'x'; 4 * 1024 * 1024]).unwrap();

    let mut config = Config::load_from("no-such-settings-file").unwrap();
    config.server.root = site;
    let state = Arc::new(AppState::new(config).unwrap());

    let listener = create_listener("127.0.0.1:0".parse().unwrap()).unwrap();
    let addr = listener.local_addr().unwrap();
    let signals = Arc::new(SignalHandler::new());
    let server = tokio::spawn(run_server(listener, state, Arc::clone(&signals.shutdown)));

    let (large, index) = tokio::join!(fetch(addr, "/dist/sdk.js"), fetch(addr, "/"));

    assert_eq!(large.0, StatusCode::OK);
    assert_eq!(large.1, "text/javascript");
    assert_eq!(large.2.len(), 4 * 1024 * 1024);

    assert_eq!(index.0, StatusCode::OK);
    assert_eq!(index.1, "text/html");
    assert_eq!(index.2, "<html>OK</html>");

    let missing = fetch(addr, "/missing.png").await;
    assert_eq!(missing.0, StatusCode::NOT_FOUND);

    signals.request_shutdown();
    tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("accept loop should stop after shutdown")
        .unwrap();
}
