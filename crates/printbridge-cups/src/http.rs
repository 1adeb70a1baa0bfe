// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Minimal HTTP/1.1 client framing for PPD downloads.
//
// CUPS serves PPDs at `GET /printers/<name>.ppd` and honours
// `If-Modified-Since`.  Only what that exchange needs is implemented: the
// request line, a status line plus headers, and Content-Length, chunked, or
// read-until-close bodies.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use printbridge_core::error::{PrintBridgeError, Result};

/// Upper bound on header lines, so a misbehaving peer cannot stall us.
const MAX_HEADERS: usize = 128;

/// Parsed status line and headers of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHead {
    pub status: u16,
    pub headers: Vec<(String, String)>,
}

/// How the body following a [`ResponseHead`] is delimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFraming {
    Empty,
    Length(u64),
    Chunked,
    /// No framing: the body runs until the server closes the connection.
    UntilClose,
}

impl ResponseHead {
    /// Case-insensitive header lookup; first occurrence wins.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn framing(&self) -> Result<BodyFraming> {
        // 1xx, 204 and 304 never carry a body.
        if self.status < 200 || self.status == 204 || self.status == 304 {
            return Ok(BodyFraming::Empty);
        }
        if self
            .header("transfer-encoding")
            .is_some_and(|te| te.to_ascii_lowercase().contains("chunked"))
        {
            return Ok(BodyFraming::Chunked);
        }
        match self.header("content-length") {
            Some(len) => len
                .trim()
                .parse()
                .map(BodyFraming::Length)
                .map_err(|_| PrintBridgeError::Protocol(format!("bad Content-Length '{len}'"))),
            None => Ok(BodyFraming::UntilClose),
        }
    }

    /// Whether the connection can carry another request after this response.
    pub fn keep_alive(&self) -> bool {
        let close = self
            .header("connection")
            .is_some_and(|c| c.eq_ignore_ascii_case("close"));
        !close && !matches!(self.framing(), Ok(BodyFraming::UntilClose) | Err(_))
    }
}

/// Build a GET request.  `if_modified_since` makes it conditional.
pub fn get_request(path: &str, host: &str, if_modified_since: Option<&str>) -> String {
    let mut request = format!(
        "GET {path} HTTP/1.1\r\nHost: {host}\r\nUser-Agent: printbridge/{}\r\nConnection: keep-alive\r\n",
        env!("CARGO_PKG_VERSION"),
    );
    if let Some(since) = if_modified_since {
        request.push_str(&format!("If-Modified-Since: {since}\r\n"));
    }
    request.push_str("\r\n");
    request
}

/// Percent-encode a printer name for use as a single URL path segment.
pub fn encode_path_segment(segment: &str) -> String {
    let mut encoded = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}

async fn read_line<R: AsyncBufRead + Unpin>(reader: &mut R, line: &mut String) -> Result<()> {
    line.clear();
    let n = reader.read_line(line).await?;
    if n == 0 {
        return Err(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "connection closed mid-response",
        )
        .into());
    }
    let trimmed = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed);
    Ok(())
}

/// Read the status line and headers, leaving the reader at the body.
pub async fn read_response_head<R: AsyncBufRead + Unpin>(reader: &mut R) -> Result<ResponseHead> {
    let mut line = String::new();
    read_line(reader, &mut line).await?;

    let mut parts = line.splitn(3, ' ');
    let version = parts.next().unwrap_or_default();
    if !version.starts_with("HTTP/1.") {
        return Err(PrintBridgeError::Protocol(format!("unexpected status line '{line}'")));
    }
    let status = parts
        .next()
        .and_then(|code| code.parse().ok())
        .ok_or_else(|| PrintBridgeError::Protocol(format!("unexpected status line '{line}'")))?;

    let mut headers = Vec::new();
    loop {
        read_line(reader, &mut line).await?;
        if line.is_empty() {
            break;
        }
        if headers.len() == MAX_HEADERS {
            return Err(PrintBridgeError::Protocol("too many response headers".into()));
        }
        let Some((name, value)) = line.split_once(':') else {
            return Err(PrintBridgeError::Protocol(format!("malformed header '{line}'")));
        };
        headers.push((name.trim().to_owned(), value.trim().to_owned()));
    }

    Ok(ResponseHead { status, headers })
}

/// Copy exactly `len` bytes, failing if the peer stops short.
async fn copy_exact<R, W>(reader: &mut R, writer: &mut W, len: u64) -> Result<u64>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let copied = tokio::io::copy(&mut (&mut *reader).take(len), writer).await?;
    if copied != len {
        return Err(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            format!("body ended after {copied} of {len} bytes"),
        )
        .into());
    }
    Ok(copied)
}

/// Copy the response body into `writer`.  Returns the number of body bytes.
pub async fn copy_body<R, W>(reader: &mut R, head: &ResponseHead, writer: &mut W) -> Result<u64>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let total = match head.framing()? {
        BodyFraming::Empty => 0,
        BodyFraming::Length(len) => copy_exact(reader, writer, len).await?,
        BodyFraming::UntilClose => tokio::io::copy(reader, writer).await?,
        BodyFraming::Chunked => {
            let mut total = 0;
            let mut line = String::new();
            loop {
                read_line(reader, &mut line).await?;
                let size = line.split(';').next().unwrap_or_default().trim();
                let size = u64::from_str_radix(size, 16).map_err(|_| {
                    PrintBridgeError::Protocol(format!("bad chunk size '{line}'"))
                })?;
                if size == 0 {
                    break;
                }
                total += copy_exact(reader, writer, size).await?;
                read_line(reader, &mut line).await?;
                if !line.is_empty() {
                    return Err(PrintBridgeError::Protocol("missing CRLF after chunk".into()));
                }
            }
            // Trailer section, terminated by an empty line.
            loop {
                read_line(reader, &mut line).await?;
                if line.is_empty() {
                    break;
                }
            }
            total
        }
    };
    writer.flush().await?;
    Ok(total)
}

/// Read and discard the body so the connection can be reused.
pub async fn drain_body<R: AsyncBufRead + Unpin>(reader: &mut R, head: &ResponseHead) -> Result<()> {
    copy_body(reader, head, &mut tokio::io::sink()).await.map(drop)
}
