use reqwest::{header, Client};
use serde::Serialize;
use serde_json::Value;

use crate::auth::Credentials;
use crate::contacts::ContactsService;
use crate::customers::CustomersService;
use crate::error::{Error, Result};
use crate::response::{ensure_ok, read_json};

pub fn build_client(credentials: &Credentials) -> Result<Client> {
    let mut headers = header::HeaderMap::new();

    let user_agent = format!("syncro-export/{}", env!("CARGO_PKG_VERSION"));
    headers.insert(header::USER_AGENT, header::HeaderValue::from_str(&user_agent)
        .map_err(|_| Error::InvalidInput("Invalid user agent".to_string()))?);

    headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

    let mut auth = header::HeaderValue::from_str(credentials.api_key().expose())
        .map_err(|_| Error::InvalidInput("API key is not a valid header value".to_string()))?;
    auth.set_sensitive(true);
    headers.insert(header::AUTHORIZATION, auth);

    Ok(Client::builder().default_headers(headers).build()?)
}

/// Authenticated handle on one Syncro tenant.
///
/// Every request carries the API key and `Accept: application/json`, is sent
/// once and is never retried.
pub struct SyncroClient {
    http: Client,
    base_url: String,
}

impl SyncroClient {
    pub fn new(credentials: &Credentials) -> Result<Self> {
        Ok(Self {
            http: build_client(credentials)?,
            base_url: credentials.base_url(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn contacts(&self) -> ContactsService<'_> {
        ContactsService::new(self)
    }

    pub fn customers(&self) -> CustomersService<'_> {
        CustomersService::new(self)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET `path` and decode the JSON body.
    ///
    /// The parameters go out twice: as the query string and as a JSON body,
    /// which is what the Syncro list endpoints read.
    pub async fn fetch<Q>(&self, path: &str, query: &Q) -> Result<Value>
    where
        Q: Serialize + ?Sized,
    {
        let url = self.url(path);
        let resp = self
            .http
            .get(&url)
            .query(query)
            .json(query)
            .send()
            .await?;
        read_json(resp).await
    }

    /// POST `form` as `application/x-www-form-urlencoded`.
    pub async fn post_form<F>(&self, path: &str, form: &F) -> Result<()>
    where
        F: Serialize + ?Sized,
    {
        let url = self.url(path);
        log::debug!("Posting --> {}", url);
        let resp = self.http.post(&url).form(form).send().await?;
        ensure_ok(resp)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credentials(server: &MockServer) -> Credentials {
        Credentials::new("acme".parse().unwrap(), "secret-key".parse().unwrap())
            .with_base_url(server.uri())
    }

    #[test]
    fn test_build_client_basic() {
        let creds = Credentials::new("acme".parse().unwrap(), "key".parse().unwrap());
        assert!(build_client(&creds).is_ok());
    }

    #[tokio::test]
    async fn fetch_sends_auth_headers_query_and_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/contacts"))
            .and(header("Authorization", "secret-key"))
            .and(header("Accept", "application/json"))
            .and(query_param("page", "3"))
            .and(body_json(json!({ "page": 3 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .expect(1)
            .mount(&server)
            .await;

        let client = SyncroClient::new(&credentials(&server)).unwrap();
        let body = client
            .fetch("/contacts", &json!({ "page": 3 }))
            .await
            .unwrap();
        assert_eq!(body, json!({ "ok": true }));
    }

    #[tokio::test]
    async fn fetch_maps_non_200_to_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = SyncroClient::new(&credentials(&server)).unwrap();
        let err = client
            .fetch("/contacts", &json!({ "page": 1 }))
            .await
            .unwrap_err();
        assert!(err.is_api());
        assert_eq!(err.status(), Some(401));
    }

    #[tokio::test]
    async fn fetch_treats_other_2xx_as_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = SyncroClient::new(&credentials(&server)).unwrap();
        let err = client
            .fetch("/customers", &json!({ "page": 1 }))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(204));
    }

    #[tokio::test]
    async fn fetch_reports_malformed_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let client = SyncroClient::new(&credentials(&server)).unwrap();
        let err = client
            .fetch("/contacts", &json!({ "page": 1 }))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
