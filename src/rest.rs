//! Authenticated JSON REST dispatcher.

use std::time::Duration;

use reqwest::blocking::{Client as HttpClient, Response};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap};
use reqwest::{Method, StatusCode, Url};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, FieldError};

const JSON_MIME: &str = "application/json";

pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub(crate) const USER_AGENT: &str = concat!("luadns/", env!("CARGO_PKG_VERSION"));

/// A REST client speaking JSON with Basic authentication.
///
/// Every request carries `Accept: application/json` and the stored
/// credentials; responses are classified by status code before the body is
/// handed back as raw bytes for the resource layer to decode.
#[derive(Clone, Debug)]
pub struct RestClient {
    http: HttpClient,
    username: String,
    password: String,
    timeout: Option<Duration>,
}

impl RestClient {
    /// Creates a dispatcher with the default timeout and user agent.
    pub fn new(username: &str, password: &str) -> Result<Self, reqwest::Error> {
        Self::with_config(username, password, DEFAULT_TIMEOUT, USER_AGENT)
    }

    pub(crate) fn with_config(
        username: &str,
        password: &str,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, reqwest::Error> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            http,
            username: username.to_string(),
            password: password.to_string(),
            timeout: None,
        })
    }

    /// Returns a copy of the dispatcher whose requests run under `timeout`
    /// instead of the construction-time default.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        let mut client = self.clone();
        client.timeout = Some(timeout);
        client
    }

    /// Executes a GET request and returns the JSON response body.
    pub fn get(&self, url: Url) -> Result<Vec<u8>, Error> {
        self.dispatch(Method::GET, url, None, None)
    }

    /// Executes a GET request, passing the response headers to `handler`
    /// after the body has been read.
    pub fn get_with<F>(&self, url: Url, mut handler: F) -> Result<Vec<u8>, Error>
    where
        F: FnMut(&HeaderMap),
    {
        self.dispatch(Method::GET, url, None, Some(&mut handler))
    }

    /// Executes a POST request with a JSON body and returns the JSON
    /// response body.
    pub fn post<T>(&self, url: Url, attrs: &T) -> Result<Vec<u8>, Error>
    where
        T: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(attrs).map_err(Error::Serialize)?;
        self.dispatch(Method::POST, url, Some(body), None)
    }

    /// Executes a PUT request with a JSON body and returns the JSON response
    /// body.
    pub fn put<T>(&self, url: Url, attrs: &T) -> Result<Vec<u8>, Error>
    where
        T: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(attrs).map_err(Error::Serialize)?;
        self.dispatch(Method::PUT, url, Some(body), None)
    }

    /// Executes a PATCH request with a JSON body and returns the JSON
    /// response body.
    pub fn patch<T>(&self, url: Url, attrs: &T) -> Result<Vec<u8>, Error>
    where
        T: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(attrs).map_err(Error::Serialize)?;
        self.dispatch(Method::PATCH, url, Some(body), None)
    }

    /// Executes a DELETE request and returns the JSON response body.
    pub fn delete(&self, url: Url) -> Result<Vec<u8>, Error> {
        self.dispatch(Method::DELETE, url, None, None)
    }

    fn dispatch(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
        handler: Option<&mut dyn FnMut(&HeaderMap)>,
    ) -> Result<Vec<u8>, Error> {
        let mut req = self
            .http
            .request(method, url)
            .basic_auth(&self.username, Some(&self.password))
            .header(ACCEPT, JSON_MIME);
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }
        if let Some(body) = body {
            req = req.header(CONTENT_TYPE, JSON_MIME).body(body);
        }

        let resp = check_status(req.send()?)?;

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if !content_type.starts_with(JSON_MIME) {
            return Err(Error::BadContentType(content_type.to_string()));
        }

        let headers = resp.headers().clone();
        let body = resp.bytes()?.to_vec();

        if let Some(handler) = handler {
            handler(&headers);
        }

        Ok(body)
    }
}

/// Maps a non-200 status code to the corresponding error, decoding the
/// response body where the status carries one.
fn check_status(resp: Response) -> Result<Response, Error> {
    match resp.status() {
        StatusCode::OK => Ok(resp),
        StatusCode::BAD_REQUEST => Err(bad_request(&resp.bytes()?)),
        StatusCode::FORBIDDEN => {
            let body: ForbiddenBody =
                serde_json::from_slice(&resp.bytes()?).map_err(Error::Deserialize)?;
            Err(Error::Forbidden {
                status: body.status,
                message: body.message,
            })
        }
        StatusCode::TOO_MANY_REQUESTS => {
            let limit = ratelimit_value(resp.headers(), "x-ratelimit-limit")?;
            let reset = ratelimit_value(resp.headers(), "x-ratelimit-reset")?;
            Err(Error::TooManyRequests { limit, reset })
        }
        status => Err(Error::BadStatusCode(status.as_u16())),
    }
}

/// Decodes a 400 body. The server normally returns an array of validation
/// errors but some endpoints reply with a single bare object.
fn bad_request(body: &[u8]) -> Error {
    match serde_json::from_slice::<Vec<FieldError>>(body) {
        Ok(errors) => Error::BadRequest(errors),
        Err(_) => match serde_json::from_slice::<FieldError>(body) {
            Ok(error) => Error::BadRequest(vec![error]),
            Err(err) => Error::Deserialize(err),
        },
    }
}

/// Parses an `X-Ratelimit-*` header. A missing header is a malformed 429
/// and surfaces as a parse error.
fn ratelimit_value(headers: &HeaderMap, name: &str) -> Result<i64, Error> {
    let value = headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    Ok(value.parse()?)
}

#[derive(Debug, Deserialize)]
struct ForbiddenBody {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: String,
}
