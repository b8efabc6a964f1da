//! In-process HTTP stub standing in for the static map provider

#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener};
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use image::{ImageOutputFormat, Rgba, RgbaImage};

pub struct StubResponse {
    pub status: u16,
    pub reason: &'static str,
    pub body: Vec<u8>,
}

impl StubResponse {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            reason: "OK",
            body: body.into(),
        }
    }

    pub fn status(status: u16, reason: &'static str) -> Self {
        Self {
            status,
            reason,
            body: reason.as_bytes().to_vec(),
        }
    }
}

/// Serves the given responses in order, one per connection, and reports the
/// request target (path + query) of every request it saw.
pub struct StubServer {
    pub addr: SocketAddr,
    requests: Receiver<String>,
    handle: Option<JoinHandle<()>>,
}

impl StubServer {
    pub fn start(responses: Vec<StubResponse>) -> Self {
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            for response in responses {
                let (mut stream, _) = match listener.accept() {
                    Ok(conn) => conn,
                    Err(_) => return,
                };
                let mut reader = BufReader::new(stream.try_clone().unwrap());

                let mut request_line = String::new();
                reader.read_line(&mut request_line).unwrap();
                loop {
                    let mut header = String::new();
                    if reader.read_line(&mut header).unwrap() == 0 || header == "\r\n" {
                        break;
                    }
                }
                let target = request_line
                    .split_whitespace()
                    .nth(1)
                    .unwrap_or_default()
                    .to_string();
                let _ = tx.send(target);

                let head = format!(
                    "HTTP/1.1 {} {}\r\nContent-Type: image/png\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    response.status,
                    response.reason,
                    response.body.len()
                );
                stream.write_all(head.as_bytes()).unwrap();
                stream.write_all(&response.body).unwrap();
                stream.flush().unwrap();
            }
        });

        Self {
            addr,
            requests: rx,
            handle: Some(handle),
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Request targets received so far
    pub fn requests(&self) -> Vec<String> {
        self.requests.try_iter().collect()
    }

    /// Waits until every queued response has been served
    pub fn join(mut self) -> Vec<String> {
        if let Some(handle) = self.handle.take() {
            handle.join().unwrap();
        }
        self.requests()
    }
}

/// A small valid PNG
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([200, 220, 240, 255]));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, ImageOutputFormat::Png).unwrap();
    out.into_inner()
}
