//! List registered accounts and search recent credit mutations.
//!
//! Reads `CEKMUTASI_API_KEY` and `CEKMUTASI_API_SIGNATURE` (and optionally
//! `CEKMUTASI_BASE_URL`) from the environment.
//!
//! ```sh
//! RUST_LOG=debug cargo run --example bank_accounts -- bca 1234567890
//! ```

use cekmutasi::{Bank, BankConfig, BankSearch, DateRange, RequestBuilder};
use chrono::{Duration, Local};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let service_code = args.next().unwrap_or_else(|| "bca".to_string());
    let account_number = args.next().unwrap_or_default();

    let template = RequestBuilder::new()
        .with_timeout(15.0)
        .verify_peer(true)
        .as_json_response(false);
    let bank = Bank::new(BankConfig::from_env()?, template);

    let accounts = bank.lists(&service_code, &account_number)?;
    if let Some(error) = &accounts.error {
        eprintln!("❌ API unreachable: {error}");
        return Ok(());
    }
    println!("📋 accounts (HTTP {}):", accounts.status);
    println!("{}", serde_json::to_string_pretty(&accounts.content)?);

    let now = Local::now().naive_local();
    let mutations = bank.search_bank(&BankSearch {
        date: DateRange::new(now - Duration::days(7), now),
        amount: 0.0,
        kind: "credit".to_string(),
        description: String::new(),
        service_code,
        account_number,
    })?;
    println!("💰 credit mutations of the last 7 days (HTTP {}):", mutations.status);
    println!("{}", serde_json::to_string_pretty(&mutations)?);

    Ok(())
}
