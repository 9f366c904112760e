//! Twitter Search Script
//!
//! This script runs a paginated Twitter search for a term you enter and
//! prints the resulting tweet table, the most common hashtags and mentions,
//! and an estimate of how often the term is tweeted.
//!
//! Credentials are read from the `xapi_*` environment variables.

use std::io::{self, Write};

use tweezers::{ResultType, SearchParams, SearchType, Tweezers, TwitterConfig};

/// Prompts on stdout and reads one trimmed line from stdin.
fn prompt(message: &str) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    env_logger::init();

    println!("🔎 Twitter Search Tool");
    println!("======================");

    let config = TwitterConfig::from_env()?;

    let search_term = prompt("📝 Enter your search term: ")?;
    if search_term.is_empty() {
        println!("❌ Search term cannot be empty!");
        return Err("Search term is required".into());
    }

    let total = prompt("🔢 How many tweets? [100]: ")?;
    let total: usize = if total.is_empty() { 100 } else { total.parse()? };

    let phrase = prompt("🧩 Match as an exact phrase? [y/N]: ")?;
    let search_type = if phrase.eq_ignore_ascii_case("y") {
        SearchType::Phrase
    } else {
        SearchType::Words
    };

    let mut tweezers = Tweezers::new(config).await?;
    println!("🔑 {}", tweezers.auth().verify_message());

    let params = SearchParams::new(search_term)
        .total(total)
        .search_type(search_type)
        .result_type(ResultType::Recent);

    println!("\n🚀 Searching...");
    let search = tweezers.search(params).await?;

    println!(
        "\n📊 {} tweets requested, {} tweets returned in {:.2}s of API time\n",
        total,
        search.result_count(),
        search.completed_in()
    );
    println!("{}", search.table());

    for col in ["hashtags", "ats"] {
        let counts = search.count_list_col_values(col)?;
        if counts.is_empty() {
            continue;
        }
        println!("🏷️  Top {}:", col);
        for (value, count) in counts.iter().take(10) {
            println!("    {:<30} {}", value, count);
        }
    }

    match search.tweets_per_week() {
        Some(per_week) => println!("\n📈 Roughly {} tweets per week", per_week),
        None => println!("\n📈 Not enough spread in timestamps to estimate tweets per week"),
    }

    Ok(())
}
