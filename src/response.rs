use reqwest::{header, Response, StatusCode};
use serde_json::Value;

use crate::error::{Error, Result};

/// Anything but `200 OK` is an API error, including other 2xx codes.
pub fn ensure_ok(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status == StatusCode::OK {
        Ok(resp)
    } else {
        log::debug!("{} answered {}", resp.url(), status);
        Err(Error::api(status))
    }
}

pub fn get_content_type(resp: &Response) -> Option<String> {
    resp.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}

/// Check the status and decode the body as JSON.
pub async fn read_json(resp: Response) -> Result<Value> {
    let resp = ensure_ok(resp)?;
    if let Some(content_type) = get_content_type(&resp)
        && !content_type.contains("json")
    {
        log::debug!("Unexpected content type '{}', decoding as JSON anyway", content_type);
    }
    let bytes = resp.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
