//! Contacts endpoint: listing, header discovery and creation.

use futures_util::stream::{BoxStream, StreamExt};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::client::SyncroClient;
use crate::error::{Error, Result};
use crate::paginate::{paginate, Page, Record};

const CONTACTS_PATH: &str = "/contacts";
const CONTACTS_KEY: &str = "contacts";

/// Fields Syncro accepts when creating a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContactField {
    CustomerId,
    Name,
    Address1,
    Address2,
    City,
    State,
    Zip,
    Email,
    Phone,
    Mobile,
    Notes,
}

impl ContactField {
    pub const ALL: [ContactField; 11] = [
        ContactField::CustomerId,
        ContactField::Name,
        ContactField::Address1,
        ContactField::Address2,
        ContactField::City,
        ContactField::State,
        ContactField::Zip,
        ContactField::Email,
        ContactField::Phone,
        ContactField::Mobile,
        ContactField::Notes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactField::CustomerId => "customer_id",
            ContactField::Name => "name",
            ContactField::Address1 => "address1",
            ContactField::Address2 => "address2",
            ContactField::City => "city",
            ContactField::State => "state",
            ContactField::Zip => "zip",
            ContactField::Email => "email",
            ContactField::Phone => "phone",
            ContactField::Mobile => "mobile",
            ContactField::Notes => "notes",
        }
    }

    /// Exact, case-sensitive lookup by wire name.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == key)
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of a contact creation request, restricted to [`ContactField`]s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewContact {
    fields: BTreeMap<ContactField, String>,
}

impl NewContact {
    /// Keep the allow-listed keys of `fields` and silently drop the rest.
    pub fn from_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut kept = BTreeMap::new();
        for (key, value) in fields {
            match ContactField::from_key(key.as_ref()) {
                Some(field) => {
                    kept.insert(field, value.into());
                }
                None => log::debug!("Dropping unsupported contact field '{}'", key.as_ref()),
            }
        }
        Self { fields: kept }
    }

    pub fn set(mut self, field: ContactField, value: impl Into<String>) -> Self {
        self.fields.insert(field, value.into());
        self
    }

    pub fn get(&self, field: ContactField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn form(&self) -> Vec<(&'static str, &str)> {
        self.fields
            .iter()
            .map(|(field, value)| (field.as_str(), value.as_str()))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
struct ContactQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    customer_id: Option<String>,
}

/// Operations on `/contacts`.
pub struct ContactsService<'a> {
    client: &'a SyncroClient,
}

impl<'a> ContactsService<'a> {
    pub(crate) fn new(client: &'a SyncroClient) -> Self {
        Self { client }
    }

    /// Raw pages of the contact listing, optionally filtered by customer.
    pub fn pages(&self, customer_id: Option<&str>) -> BoxStream<'a, Result<Page>> {
        let query = ContactQuery {
            customer_id: customer_id.map(str::to_string),
        };
        paginate(self.client, CONTACTS_PATH, query)
    }

    /// Contacts, one batch per page. Without `customer_id` every contact is listed.
    pub fn all(&self, customer_id: Option<&str>) -> BoxStream<'a, Result<Vec<Record>>> {
        self.pages(customer_id)
            .map(|page| page.and_then(|p| p.into_collection(CONTACTS_KEY)))
            .boxed()
    }

    /// Column names taken from the first contact of the first page.
    ///
    /// Uses its own listing and stops after one page, so it never disturbs a
    /// listing used for the data itself.
    pub async fn headers(&self, customer_id: Option<&str>) -> Result<Vec<String>> {
        let mut pages = self.all(customer_id);
        let first = match pages.next().await {
            Some(batch) => batch?,
            None => Vec::new(),
        };

        match first.first() {
            Some(record) => Ok(record.keys().cloned().collect()),
            None => Err(Error::NoRecords(CONTACTS_PATH.to_string())),
        }
    }

    /// Create a contact from arbitrary fields; anything off the allow-list is dropped.
    pub async fn create<I, K, V>(&self, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        self.create_contact(&NewContact::from_fields(fields)).await
    }

    pub async fn create_contact(&self, contact: &NewContact) -> Result<()> {
        self.client.post_form(CONTACTS_PATH, &contact.form()).await
    }
}

// ============================================================================
// Tests
// ============================================================================
