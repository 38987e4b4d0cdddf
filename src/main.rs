use clap::Parser;
use colored::Colorize;

use syncro_export::{export_contacts, Cli, Error, SyncroClient};

fn print_hint(err: &Error) {
    match err.status() {
        Some(401) | Some(403) => {
            eprintln!("{}", "💡 Possible causes:".yellow());
            eprintln!("   - Check that the API key is correct");
            eprintln!("   - The key needs permissions for both contacts and customers");
        }
        Some(404) => {
            eprintln!("{}", "💡 Possible causes:".yellow());
            eprintln!("   - Check the subdomain ({{subdomain}}.syncromsp.com)");
            eprintln!("   - Check the customer ID");
        }
        _ => {}
    }

    if err.is_dns_failure() {
        eprintln!("{}", "💡 Possible causes:".yellow());
        eprintln!("   - Check if the subdomain is correct");
        eprintln!("   - Check your network connection");
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .init();

    let result = match SyncroClient::new(&cli.credentials()) {
        Ok(client) => export_contacts(&client, &cli.outfile, cli.customer_id.as_deref()).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(summary) => {
            log::info!("{}", summary);
            println!(
                "{} {}",
                "Contacts saved to".green().bold(),
                cli.outfile.display()
            );
        }
        Err(e) => {
            if e.is_api() {
                log::error!("There was an error loading the contacts from the Syncro API ({})", e);
            } else {
                log::error!("An unknown error occurred ({})", e);
            }
            print_hint(&e);
            std::process::exit(1);
        }
    }
}
