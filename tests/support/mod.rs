// Minimal in-process stand-in for a BlooCoin server: accepts one
// connection per scripted reply, captures what the client sent, answers
// as told.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use bloo_sdk::Endpoint;

// Not every test file exercises every reply shape.
#[allow(dead_code)]
pub enum Reply {
    /// Write the whole body, then close the connection.
    Full(&'static str),
    /// Write the body in `usize`-byte chunks with pauses, then close.
    Chunked(&'static str, usize),
    /// Read the request but never answer; hold the connection open for a
    /// while so the client's timeout fires first.
    Stall,
}

pub struct MockServer {
    addr: SocketAddr,
    requests: Receiver<Vec<u8>>,
}

pub fn spawn(replies: Vec<Reply>) -> MockServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock server");
    let addr = listener.local_addr().expect("local addr");
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        for reply in replies {
            let (mut stream, _) = match listener.accept() {
                Ok(conn) => conn,
                Err(_) => return,
            };
            stream
                .set_read_timeout(Some(Duration::from_secs(2)))
                .expect("server read timeout");
            let mut buf = [0u8; 64 * 1024];
            let n = stream.read(&mut buf).unwrap_or(0);
            let _ = tx.send(buf[..n].to_vec());

            match reply {
                Reply::Full(body) => {
                    let _ = stream.write_all(body.as_bytes());
                }
                Reply::Chunked(body, step) => {
                    for chunk in body.as_bytes().chunks(step) {
                        let _ = stream.write_all(chunk);
                        let _ = stream.flush();
                        thread::sleep(Duration::from_millis(20));
                    }
                }
                Reply::Stall => thread::sleep(Duration::from_millis(500)),
            }
        }
    });

    MockServer { addr, requests: rx }
}

impl MockServer {
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new("127.0.0.1", self.addr.port())
    }

    /// The next request the server saw, parsed as JSON.
    pub fn next_request(&self) -> serde_json::Value {
        let bytes = self
            .requests
            .recv_timeout(Duration::from_secs(2))
            .expect("no request reached the mock server");
        serde_json::from_slice(&bytes).expect("client sent invalid JSON")
    }
}
