#![allow(dead_code)]

use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_KEY: &str = "test-api-key";

pub fn contact(id: u64, name: &str, email: &str) -> Value {
    json!({ "id": id, "name": name, "email": email })
}

pub fn contacts_page(contacts: Vec<Value>, page: i64, total_pages: i64) -> Value {
    json!({
        "contacts": contacts,
        "meta": { "page": page, "total_pages": total_pages }
    })
}

/// Two pages of two contacts each.
pub fn two_pages() -> Vec<Value> {
    vec![
        contacts_page(
            vec![
                contact(1, "Alice", "alice@example.com"),
                contact(2, "Bob", "bob@example.com"),
            ],
            1,
            2,
        ),
        contacts_page(
            vec![
                contact(3, "Carol", "carol@example.com"),
                contact(4, "Dave", "dave@example.com"),
            ],
            2,
            2,
        ),
    ]
}

/// Serve `pages` from `/contacts`, page N answering `page=N`.
pub async fn mount_contacts(server: &MockServer, pages: Vec<Value>) {
    for (i, body) in pages.into_iter().enumerate() {
        Mock::given(method("GET"))
            .and(path("/contacts"))
            .and(query_param("page", (i + 1).to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }
}

pub async fn mount_failure(server: &MockServer, status: u16) {
    Mock::given(method("GET"))
        .and(path("/contacts"))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Serve `body` for page 1 and answer page 2 with `status`.
pub async fn mount_failing_second_page(server: &MockServer, body: Value, status: u16) {
    mount_contacts(server, vec![body]).await;
    Mock::given(method("GET"))
        .and(path("/contacts"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// A base URL whose host can never resolve.
pub const UNRESOLVABLE_URL: &str = "http://no-such-host.syncro-export.invalid/api/v1";
