// src/core/net.rs
//
// HTTP for the pipeline: multipart upload, url-encoded form POST, plain GET.
// One attempt per request; a failed step fails the run.

use std::path::Path;
use std::time::Duration;

use reqwest::blocking::{multipart, Client, Response};

use crate::config::consts::USER_AGENT;
use crate::core::form::FormData;
use crate::error::{IsoError, Result};

/// The three kinds of request the ISODISTORT forms need.
/// `HttpTransport` talks to the network; tests script their own.
pub trait Transport {
    /// Multipart POST of `fields` plus the file at `path` under `file_field`.
    fn upload(&self, url: &str, fields: &FormData, file_field: &str, path: &Path) -> Result<String>;

    /// URL-encoded POST of `fields`.
    fn post_form(&self, url: &str, fields: &FormData) -> Result<String>;

    /// GET raw bytes (archives).
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| IsoError::transport("(client setup)", e))?;
        Ok(Self { client })
    }
}

/// Anything but 2xx is an error; the body of an error page is not useful here.
fn check_status(url: &str, resp: Response) -> Result<Response> {
    let status = resp.status();
    if !status.is_success() {
        return Err(IsoError::Http { url: s!(url), status: status.as_u16() });
    }
    Ok(resp)
}

impl Transport for HttpTransport {
    fn upload(&self, url: &str, fields: &FormData, file_field: &str, path: &Path) -> Result<String> {
        let mut form = multipart::Form::new();
        for (k, v) in fields.iter() {
            form = form.text(s!(k), s!(v));
        }
        let form = form
            .file(s!(file_field), path)
            .map_err(|e| IsoError::io(path, e))?;

        let resp = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .map_err(|e| IsoError::transport(url, e))?;
        check_status(url, resp)?
            .text()
            .map_err(|e| IsoError::transport(url, e))
    }

    fn post_form(&self, url: &str, fields: &FormData) -> Result<String> {
        let resp = self
            .client
            .post(url)
            .form(fields.as_pairs())
            .send()
            .map_err(|e| IsoError::transport(url, e))?;
        check_status(url, resp)?
            .text()
            .map_err(|e| IsoError::transport(url, e))
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| IsoError::transport(url, e))?;
        let bytes = check_status(url, resp)?
            .bytes()
            .map_err(|e| IsoError::transport(url, e))?;
        Ok(bytes.to_vec())
    }
}
