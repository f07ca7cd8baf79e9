use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::errors::{ClientBuilderError, Error};
use crate::params::{ListMeta, ListParams};
use crate::record::{RR, Record};
use crate::rest::{DEFAULT_TIMEOUT, RestClient, USER_AGENT};
use crate::user::User;
use crate::zone::Zone;

/// Builder for a [Client] that handles default values.
pub struct ClientBuilder {
    endpoint: Option<Url>,
    email: Option<String>,
    api_key: Option<String>,
    timeout: Option<Duration>,
    product: Option<String>,
}

impl ClientBuilder {
    fn new() -> Self {
        Self {
            endpoint: None,
            email: None,
            api_key: None,
            timeout: None,
            product: None,
        }
    }

    /// Sets the API endpoint to the one given.
    pub fn endpoint(mut self, endpoint: &Url) -> Self {
        self.endpoint = Some(endpoint.clone());
        self
    }

    /// In the case that `endpoint` is the Some variant, sets the API endpoint to it.
    pub fn endpoint_if_some(mut self, endpoint: Option<&Url>) -> Self {
        if let Some(endpoint) = endpoint {
            self.endpoint = Some(endpoint.clone());
        }
        self
    }

    /// Sets the account email address used for authentication.
    pub fn email(mut self, email: &str) -> Self {
        self.email = Some(email.to_string());
        self
    }

    /// Sets the API key used for authentication.
    pub fn api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    /// Sets the request timeout, replacing the default of 10 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Appends product text to the User-Agent header sent with every request.
    pub fn user_agent(mut self, product: &str) -> Self {
        if !product.is_empty() {
            self.product = Some(product.to_string());
        }
        self
    }

    /// Builds a [Client] from the builder.
    ///
    /// In the case that no API endpoint is set, the default endpoint of
    /// `https://api.luadns.com/v1/` is used. A trailing slash is appended to
    /// the endpoint path if missing, as [Url]'s join semantics require one.
    ///
    /// # Errors
    /// - `MissingField` if a required field isn't added to the builder.
    /// - `UrlParse` if the default API endpoint fails to parse. This shouldn't happen.
    /// - `Http` if the underlying HTTP client fails to initialize.
    pub fn build(self) -> Result<Client, ClientBuilderError> {
        let mut endpoint = match self.endpoint {
            Some(endpoint) => endpoint,
            None => "https://api.luadns.com/v1/".parse()?,
        };
        if !endpoint.path().ends_with('/') {
            let path = format!("{}/", endpoint.path());
            endpoint.set_path(&path);
        }
        let email = self
            .email
            .ok_or_else(|| ClientBuilderError::MissingField("email".to_string()))?;
        let api_key = self
            .api_key
            .ok_or_else(|| ClientBuilderError::MissingField("api_key".to_string()))?;

        let user_agent = match self.product {
            Some(product) => format!("{USER_AGENT} {product}"),
            None => USER_AGENT.to_string(),
        };
        let rest = RestClient::with_config(
            &email,
            &api_key,
            self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            &user_agent,
        )?;

        Ok(Client { endpoint, rest })
    }
}

/// API client.
///
/// Holds the credentials and the underlying HTTP transport. All fields are
/// write-once at construction, so a single client may be shared freely
/// across threads; cloning is cheap.
#[derive(Clone, Debug)]
pub struct Client {
    endpoint: Url,
    rest: RestClient,
}

impl Client {
    /// Creates a new Client with the default endpoint, timeout and user
    /// agent. Use [Client::builder] to override any of them.
    ///
    /// # Errors
    /// - `Http` if the underlying HTTP client fails to initialize.
    pub fn new(email: &str, api_key: &str) -> Result<Self, ClientBuilderError> {
        Self::builder().email(email).api_key(api_key).build()
    }

    /// Returns a builder for a Client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Returns a copy of the client whose requests run under `timeout`
    /// instead of the construction-time default, for callers that need a
    /// deadline on a specific operation.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self {
            endpoint: self.endpoint.clone(),
            rest: self.rest.with_timeout(timeout),
        }
    }

    /// Creates a [Url] from the endpoint and the path segments.
    fn build_url(&self, path: &[&str]) -> Result<Url, Error> {
        Ok(self.endpoint.join(&path.join("/"))?)
    }

    /// Creates a [Url] for a list endpoint, attaching the serialized params
    /// as the query string.
    fn build_list_url(&self, path: &[&str], params: &ListParams) -> Result<Url, Error> {
        let mut url = self.build_url(path)?;
        let query = params.query_string();
        if !query.is_empty() {
            url.set_query(Some(&query));
        }
        Ok(url)
    }

    /// Returns the profile of the authenticated account.
    pub fn me(&self) -> Result<User, Error> {
        let url = self.build_url(&["users", "me"])?;

        decode(&self.rest.get(url)?)
    }

    /// Lists the zones on the account, filtered by `params`.
    ///
    /// Pagination details from the response headers are written to `meta` if
    /// given.
    pub fn list_zones(
        &self,
        params: &ListParams,
        meta: Option<&mut ListMeta>,
    ) -> Result<Vec<Zone>, Error> {
        let url = self.build_list_url(&["zones"], params)?;

        let body = match meta {
            Some(meta) => self.rest.get_with(url, meta.capture())?,
            None => self.rest.get(url)?,
        };
        decode(&body)
    }

    /// Creates a new zone using the supplied attributes.
    pub fn create_zone(&self, attrs: &Zone) -> Result<Zone, Error> {
        let url = self.build_url(&["zones"])?;

        decode(&self.rest.post(url, attrs)?)
    }

    /// Retrieves the zone identified by `zone_id`.
    pub fn get_zone(&self, zone_id: i64) -> Result<Zone, Error> {
        let url = self.build_url(&["zones", &zone_id.to_string()])?;

        decode(&self.rest.get(url)?)
    }

    /// Updates the zone identified by `zone_id` using the supplied
    /// attributes.
    pub fn update_zone(&self, zone_id: i64, attrs: &Zone) -> Result<Zone, Error> {
        let url = self.build_url(&["zones", &zone_id.to_string()])?;

        decode(&self.rest.put(url, attrs)?)
    }

    /// Deletes the zone identified by `zone_id`, returning its last state.
    pub fn delete_zone(&self, zone_id: i64) -> Result<Zone, Error> {
        let url = self.build_url(&["zones", &zone_id.to_string()])?;

        decode(&self.rest.delete(url)?)
    }

    /// Lists the records in the zone identified by `zone_id`, filtered by
    /// `params`.
    ///
    /// Pagination details from the response headers are written to `meta` if
    /// given.
    pub fn list_records(
        &self,
        zone_id: i64,
        params: &ListParams,
        meta: Option<&mut ListMeta>,
    ) -> Result<Vec<Record>, Error> {
        let url = self.build_list_url(&["zones", &zone_id.to_string(), "records"], params)?;

        let body = match meta {
            Some(meta) => self.rest.get_with(url, meta.capture())?,
            None => self.rest.get(url)?,
        };
        decode(&body)
    }

    /// Creates a record in the zone identified by `zone_id` using the
    /// supplied attributes.
    pub fn create_record(&self, zone_id: i64, attrs: &Record) -> Result<Record, Error> {
        let url = self.build_url(&["zones", &zone_id.to_string(), "records"])?;

        decode(&self.rest.post(url, attrs)?)
    }

    /// Retrieves the record identified by `record_id`.
    pub fn get_record(&self, zone_id: i64, record_id: i64) -> Result<Record, Error> {
        let url = self.build_url(&[
            "zones",
            &zone_id.to_string(),
            "records",
            &record_id.to_string(),
        ])?;

        decode(&self.rest.get(url)?)
    }

    /// Updates the record identified by `record_id` using the supplied
    /// attributes.
    pub fn update_record(
        &self,
        zone_id: i64,
        record_id: i64,
        attrs: &Record,
    ) -> Result<Record, Error> {
        let url = self.build_url(&[
            "zones",
            &zone_id.to_string(),
            "records",
            &record_id.to_string(),
        ])?;

        decode(&self.rest.put(url, attrs)?)
    }

    /// Deletes the record identified by `record_id`, returning its last
    /// state.
    pub fn delete_record(&self, zone_id: i64, record_id: i64) -> Result<Record, Error> {
        let url = self.build_url(&[
            "zones",
            &zone_id.to_string(),
            "records",
            &record_id.to_string(),
        ])?;

        decode(&self.rest.delete(url)?)
    }

    /// Creates all the given resource records in one request, returning the
    /// created records.
    pub fn create_many_records(&self, zone_id: i64, rrs: &[RR]) -> Result<Vec<Record>, Error> {
        let url = self.build_url(&["zones", &zone_id.to_string(), "records", "create_many"])?;

        decode(&self.rest.post(url, rrs)?)
    }

    /// Replaces the records matching each given record's name and type with
    /// that record, leaving unrelated records untouched, and returns the
    /// affected records.
    pub fn update_many_records(&self, zone_id: i64, rrs: &[RR]) -> Result<Vec<Record>, Error> {
        let url = self.build_url(&["zones", &zone_id.to_string(), "records", "update_many"])?;

        decode(&self.rest.patch(url, rrs)?)
    }

    /// Deletes the records matching the supplied fields of each given
    /// record, returning the deleted records. The name is mandatory; type,
    /// content and TTL narrow the match when present.
    pub fn delete_many_records(&self, zone_id: i64, rrs: &[RR]) -> Result<Vec<Record>, Error> {
        let url = self.build_url(&["zones", &zone_id.to_string(), "records", "delete_many"])?;

        decode(&self.rest.post(url, rrs)?)
    }
}

/// Deserializes a response body into the expected shape.
fn decode<T: for<'de> Deserialize<'de>>(body: &[u8]) -> Result<T, Error> {
    serde_json::from_slice(body).map_err(Error::Deserialize)
}
