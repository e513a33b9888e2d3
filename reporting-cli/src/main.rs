//! Reporting CLI
//!
//! Command-line interface for the Reporting API.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::{Parser, Subcommand};

use reporting_client::{ClientError, ReportingClient};
use reporting_types::{ComissionQuery, CustomerId};

#[derive(Parser)]
#[command(name = "reporting")]
#[command(author, version, about = "Reporting API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Reporting API
    #[arg(
        long,
        env = "REPORTING_API_URL",
        default_value = "http://localhost:3000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Customer lookups
    Customer {
        #[command(subcommand)]
        action: CustomerCommands,
    },
    /// Transaction search
    Transaction {
        #[command(subcommand)]
        action: TransactionCommands,
    },
    /// Commission lookups
    Commission {
        #[command(subcommand)]
        action: CommissionCommands,
    },
    /// Check API health
    Health,
}

#[derive(Subcommand)]
enum CustomerCommands {
    /// Get customer details
    Get {
        /// Customer ID (UUID)
        id: String,
    },
    /// Get a customer with accounts and transactions
    Full {
        /// Customer ID (UUID)
        id: String,
    },
    /// Find the customer owning an account
    ByAccount {
        /// Account ID (UUID)
        id: String,
    },
    /// Find the customer owning a transaction
    ByTransaction {
        /// Transaction ID (UUID)
        id: String,
    },
    /// Add a customer
    Add {
        /// Customer name
        name: String,
        #[arg(long)]
        email: String,
    },
}

#[derive(Subcommand)]
enum TransactionCommands {
    /// Search a customer's transactions
    ByCustomer {
        /// Customer ID (UUID)
        id: String,
        /// First day, YYYY-MM-DD or RFC 3339
        #[arg(long)]
        from: Option<String>,
        /// Last day, YYYY-MM-DD or RFC 3339
        #[arg(long)]
        to: Option<String>,
    },
    /// List the transactions of an account
    ByAccount {
        /// Account ID (UUID)
        id: String,
    },
}

#[derive(Subcommand)]
enum CommissionCommands {
    /// Get commission details
    Get {
        /// Commission ID (UUID)
        id: String,
    },
    /// Get the commission charged on a transaction
    ByTransaction {
        /// Transaction ID (UUID)
        id: String,
    },
    /// List commissions
    List {
        #[arg(long)]
        customer: Option<String>,
        #[arg(long)]
        account: Option<String>,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
}

fn parse_id<T: std::str::FromStr>(s: &str, what: &str) -> Result<T> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Invalid {} ID: {}", what, s))
}

/// Accepts RFC 3339 or a bare date, which expands to `time` on that day.
fn parse_bound(s: &str, time: NaiveTime) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Invalid date: {}. Use YYYY-MM-DD or RFC 3339", s))?;
    Ok(date.and_time(time).and_utc())
}

fn parse_from(s: Option<String>) -> Result<Option<DateTime<Utc>>> {
    s.map(|s| parse_bound(&s, NaiveTime::MIN)).transpose()
}

fn parse_to(s: Option<String>) -> Result<Option<DateTime<Utc>>> {
    let end_of_day = NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999)
        .ok_or_else(|| anyhow::anyhow!("invalid end-of-day time"))?;
    s.map(|s| parse_bound(&s, end_of_day)).transpose()
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let client = ReportingClient::new(&cli.api_url);

    match run(&client, cli.command).await {
        Err(err)
            if err
                .downcast_ref::<ClientError>()
                .is_some_and(ClientError::is_not_found) =>
        {
            eprintln!("✗ {}", err);
            std::process::exit(1);
        }
        result => result,
    }
}

async fn run(client: &ReportingClient, command: Commands) -> Result<()> {
    match command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Customer { action } => match action {
            CustomerCommands::Get { id } => {
                let customer_id: CustomerId = parse_id(&id, "customer")?;
                print_json(&client.get_customer(customer_id).await?)?;
            }
            CustomerCommands::Full { id } => {
                let customer_id: CustomerId = parse_id(&id, "customer")?;
                print_json(&client.get_full_customer(customer_id).await?)?;
            }
            CustomerCommands::ByAccount { id } => {
                let account_id = parse_id(&id, "account")?;
                print_json(&client.get_customer_by_account(account_id).await?)?;
            }
            CustomerCommands::ByTransaction { id } => {
                let transaction_id = parse_id(&id, "transaction")?;
                print_json(&client.get_customer_by_transaction(transaction_id).await?)?;
            }
            CustomerCommands::Add { name, email } => {
                print_json(&client.add_customer(&name, &email).await?)?;
            }
        },

        Commands::Transaction { action } => match action {
            TransactionCommands::ByCustomer { id, from, to } => {
                let customer_id = parse_id(&id, "customer")?;
                let transactions = client
                    .search_transactions(customer_id, parse_from(from)?, parse_to(to)?)
                    .await?;
                print_json(&transactions)?;
            }
            TransactionCommands::ByAccount { id } => {
                let account_id = parse_id(&id, "account")?;
                print_json(&client.transactions_by_account(account_id).await?)?;
            }
        },

        Commands::Commission { action } => match action {
            CommissionCommands::Get { id } => {
                let commission_id = parse_id(&id, "commission")?;
                print_json(&client.get_commission(commission_id).await?)?;
            }
            CommissionCommands::ByTransaction { id } => {
                let transaction_id = parse_id(&id, "transaction")?;
                print_json(&client.get_commission_by_transaction(transaction_id).await?)?;
            }
            CommissionCommands::List {
                customer,
                account,
                from,
                to,
            } => {
                let query = ComissionQuery {
                    customer_id: customer.map(|c| parse_id(&c, "customer")).transpose()?,
                    account_id: account.map(|a| parse_id(&a, "account")).transpose()?,
                    date_start: parse_from(from)?,
                    date_end: parse_to(to)?,
                };
                print_json(&client.list_commissions(&query).await?)?;
            }
        },
    }

    Ok(())
}
