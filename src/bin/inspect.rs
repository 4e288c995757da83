//! Quote table inspector
//!
//! Terminal companion to the dashboard: prints a dataset summary and the
//! pivoted surface grids for one observation date as ASCII tables.

use chrono::NaiveDate;

use iv_dash::prelude::*;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "data/quotes.csv".to_string());
    let date_arg = args.next();

    println!("Options IV Dashboard - Quote Table Inspector");
    println!("============================================\n");

    let dataset = match load_quotes(&path) {
        Ok(dataset) => dataset,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let observation_dates = dataset.observation_dates();
    let expiration_dates = dataset.expiration_dates();

    println!("File: {}", path);
    println!("Rows: {}", dataset.len());
    println!(
        "Observation dates: {} ({} to {})",
        observation_dates.len(),
        observation_dates.first().map(|d| d.to_string()).unwrap_or_default(),
        observation_dates.last().map(|d| d.to_string()).unwrap_or_default(),
    );
    println!(
        "Expiration dates: {} ({} to {})",
        expiration_dates.len(),
        expiration_dates.first().map(|d| d.to_string()).unwrap_or_default(),
        expiration_dates.last().map(|d| d.to_string()).unwrap_or_default(),
    );

    let date = match date_arg {
        Some(s) => match NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
            Ok(d) => d,
            Err(e) => {
                eprintln!("Error: invalid date '{}': {}", s, e);
                std::process::exit(1);
            }
        },
        None => match observation_dates.first() {
            Some(&d) => d,
            None => {
                println!("\nNo rows in the table; nothing to pivot.");
                return;
            }
        },
    };

    for side in [OptionSide::Call, OptionSide::Put] {
        println!("\n{} IV Surface for {}:", side.label(), date);

        match VolGrid::build(&dataset, date, side) {
            Ok(grid) => print_grid(&grid),
            Err(e) => println!("  {}", e),
        }
    }

    println!("\n--- Done ---");
}

/// Strikes down, DTEs across, like the dashboard's surface view.
fn print_grid(grid: &VolGrid) {
    print!("Strike\\DTE |");
    for dte in &grid.dtes {
        print!(" {:>6}", dte);
    }
    println!();

    print!("-----------+");
    for _ in &grid.dtes {
        print!("-------");
    }
    println!();

    for (si, strike) in grid.strikes.iter().enumerate() {
        print!("  {:>8.1} |", strike);
        for ti in 0..grid.dtes.len() {
            match grid.value(si, ti) {
                Some(iv) => print!(" {:>6.3}", iv),
                None => print!(" {:>6}", "-"),
            }
        }
        println!();
    }
}
