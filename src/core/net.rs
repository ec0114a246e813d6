// src/core/net.rs
// HTTP/1.0 GET over plain TCP, std-only. HTTP/1.0 with Connection: close
// means the server ends the body by closing the socket, so no chunked
// transfer decoding is needed.

use std::io::{Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use crate::config::consts::HOST;
use crate::error::{Result, ScrapeError};

const TIMEOUT: Duration = Duration::from_secs(15);

/// Fetch `path` (absolute, starting with `/`) from the catalog host and
/// return the response body.
pub fn http_get(path: &str) -> Result<String> {
    let fail = |reason: String| ScrapeError::Retrieval {
        url: format!("http://{HOST}{path}"),
        reason,
    };

    let mut stream = TcpStream::connect((HOST, 80)).map_err(|e| fail(e.to_string()))?;
    stream
        .set_read_timeout(Some(TIMEOUT))
        .and_then(|()| stream.set_write_timeout(Some(TIMEOUT)))
        .map_err(|e| fail(e.to_string()))?;

    let request = format!(
        "GET {path} HTTP/1.0\r\nHost: {HOST}\r\nUser-Agent: dac_scrape/0.1\r\nConnection: close\r\n\r\n"
    );
    stream
        .write_all(request.as_bytes())
        .and_then(|()| stream.flush())
        .map_err(|e| fail(e.to_string()))?;

    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).map_err(|e| fail(e.to_string()))?;
    let response = String::from_utf8_lossy(&buf);

    let status = response.split("\r\n").next().unwrap_or("");
    if !status.contains("200") {
        return Err(fail(format!("HTTP error: {status}")));
    }

    let body = response
        .find("\r\n\r\n")
        .map(|i| response[i + 4..].to_string())
        .ok_or_else(|| fail("malformed HTTP response".into()))?;
    Ok(body)
}
