//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use haproxy_check::CheckConfig;

/// Request heads received by a mock stats endpoint.
pub type Requests = Arc<Mutex<Vec<String>>>;

/// A realistic stats dump: two `api` servers (one down), one in maintenance,
/// an unrelated `web` proxy and the aggregate rows.
pub const STATS_CSV: &str = "\
# pxname,svname,qcur,qmax,scur,smax,slim,stot,bin,bout,dreq,dresp,ereq,econ,eresp,wretr,wredis,status,weight,act,bck,chkfail,chkdown,lastchg,downtime,qlimit,pid,iid,sid,throttle,lbtot,tracked,type,rate,rate_lim,rate_max,check_status,check_code,check_duration,
stats,FRONTEND,,,1,2,2000,10,0,0,0,0,0,,,,,OPEN,,,,,,,,,1,1,0,,,,0,0,0,1,,,,
api,FRONTEND,,,3,10,2000,50,0,0,0,0,0,,,,,OPEN,,,,,,,,,1,2,0,,,,0,0,0,5,,,,
api,api1,0,0,2,8,100,25,0,0,,0,,0,0,0,0,UP,1,1,0,0,0,100,0,,1,3,1,,25,,2,0,,4,L7OK,200,1,
api,api2,0,0,1,5,100,25,0,0,,0,,0,0,0,0,UP,1,1,0,0,0,100,0,,1,3,2,,25,,2,0,,4,L7OK,200,1,
api,api3,0,0,0,0,100,25,0,0,,0,,0,0,0,0,UP,1,1,0,0,0,100,0,,1,3,3,,25,,2,0,,4,L7OK,200,1,
api,api4,0,0,0,0,100,25,0,0,,0,,0,0,0,0,DOWN,1,1,0,3,1,10,10,,1,3,4,,25,,2,0,,4,L4CON,,0,
api,api5,0,0,0,0,100,0,0,0,,0,,0,0,0,0,MAINT,1,1,0,0,1,10,10,,1,3,5,,0,,2,0,,0,,,,
api,BACKEND,0,0,3,10,400,50,0,0,0,0,,0,0,0,0,UP,4,4,0,,0,100,0,,1,3,0,,50,,1,0,,5,,,,
web,web1,0,0,0,0,100,0,0,0,,0,,0,0,0,0,DOWN,1,1,0,3,1,10,10,,1,4,1,,0,,2,0,,0,L4TOUT,,2001,
web,BACKEND,0,0,0,0,100,0,0,0,0,0,,0,0,0,0,DOWN,0,0,0,,1,10,10,,1,4,0,,0,,1,0,,0,,,,
";

/// Configuration pointing at a local mock endpoint.
pub fn config_for(addr: SocketAddr, service: &str) -> CheckConfig {
    CheckConfig {
        hostname: addr.ip().to_string(),
        port: addr.port(),
        path: "/haproxy".into(),
        service: service.into(),
        ..Default::default()
    }
}

/// Start a mock stats endpoint that always answers with `status` and `body`.
///
/// Returns the bound address and the request heads it has seen.
pub async fn start_stats_backend(status: u16, body: &'static str) -> (SocketAddr, Requests) {
    let status_text = match status {
        200 => "200 OK",
        401 => "401 Unauthorized",
        404 => "404 Not Found",
        500 => "500 Internal Server Error",
        503 => "503 Service Unavailable",
        _ => "200 OK",
    };
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_text,
        body.len(),
        body
    );
    start_raw_backend(response).await
}

/// Start a mock endpoint that writes `response` verbatim and closes the
/// connection, whether or not the response is well formed.
pub async fn start_raw_backend(response: String) -> (SocketAddr, Requests) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests: Requests = Arc::new(Mutex::new(Vec::new()));
    let seen = requests.clone();
    let response = Arc::new(response);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let seen = seen.clone();
                    let response = response.clone();
                    tokio::spawn(async move {
                        let mut buf = Vec::new();
                        let mut chunk = [0u8; 1024];
                        while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                            match socket.read(&mut chunk).await {
                                Ok(0) | Err(_) => break,
                                Ok(n) => buf.extend_from_slice(&chunk[..n]),
                            }
                        }
                        seen.lock().unwrap().push(String::from_utf8_lossy(&buf).into_owned());

                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, requests)
}

/// An address nothing is listening on.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}
