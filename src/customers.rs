use futures_util::stream::{BoxStream, StreamExt};
use serde::Serialize;

use crate::client::SyncroClient;
use crate::error::Result;
use crate::paginate::{paginate, Record};

const CUSTOMERS_PATH: &str = "/customers";
const CUSTOMERS_KEY: &str = "customers";

#[derive(Debug, Clone, Serialize)]
struct CustomerQuery {}

/// Read-only access to `/customers`.
pub struct CustomersService<'a> {
    client: &'a SyncroClient,
}

impl<'a> CustomersService<'a> {
    pub(crate) fn new(client: &'a SyncroClient) -> Self {
        Self { client }
    }

    /// Every customer, one batch per page.
    pub fn all(&self) -> BoxStream<'a, Result<Vec<Record>>> {
        paginate(self.client, CUSTOMERS_PATH, CustomerQuery {})
            .map(|page| page.and_then(|p| p.into_collection(CUSTOMERS_KEY)))
            .boxed()
    }
}
