use anyhow::Result;
use clap::Parser;
use reqwest::Url;
use std::path::PathBuf;

use crate::auth::{ApiKey, Credentials, Subdomain};

/// Export contacts from Syncro RMM to a CSV file
///
/// The API key needs permissions for both contacts and customers.
///
/// Examples:
///   # Every contact in the account
///   syncro-export -s acme -k T0ken -o contacts.csv
///
///   # Only the contacts of one customer
///   syncro-export -s acme -k T0ken -o contacts.csv -c 123456
#[derive(Parser, Debug, Clone)]
#[clap(version)]
pub struct Cli {
    /// Your Syncro API key
    #[arg(
        short = 'k',
        long = "api-key",
        env = "SYNCRO_API_KEY",
        hide_env_values = true,
        value_parser = parse_api_key
    )]
    pub api_key: ApiKey,

    /// Your Syncro subdomain (the part before syncromsp.com, ie. {subdomain}.syncromsp.com)
    #[arg(short = 's', long = "subdomain", value_parser = parse_subdomain)]
    pub subdomain: Subdomain,

    /// The path to the csv file to save to (overwrites existing files)
    #[arg(short = 'o', long = "outfile")]
    pub outfile: PathBuf,

    /// Only export contacts for this customer ID
    #[arg(short = 'c', long = "customer-id", value_parser = parse_customer_id)]
    pub customer_id: Option<String>,

    /// Use this API base URL instead of https://{subdomain}.syncromsp.com/api/v1
    #[arg(long = "base-url", value_name = "URL", value_parser = parse_url)]
    pub base_url: Option<String>,

    /// Verbose mode: log every request
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Cli {
    pub fn credentials(&self) -> Credentials {
        let creds = Credentials::new(self.subdomain.clone(), self.api_key.clone());
        match &self.base_url {
            Some(url) => creds.with_base_url(url.clone()),
            None => creds,
        }
    }

    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

// ============================================================================
// Parse Function
// ============================================================================

fn parse_url(s: &str) -> Result<String> {
    let _url: Url = s.parse()?;
    Ok(s.into())
}

fn parse_api_key(s: &str) -> Result<ApiKey> {
    s.parse()
}

fn parse_subdomain(s: &str) -> Result<Subdomain> {
    s.parse()
}

fn parse_customer_id(s: &str) -> Result<String> {
    let s = s.trim();
    if s.is_empty() {
        anyhow::bail!("Customer ID cannot be empty");
    }
    Ok(s.to_string())
}

// ============================================================================
// Tests
// ============================================================================
