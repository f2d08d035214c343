//! Prints a text summary of a dashboard data directory.
//!
//! Usage: `cargo run --example dashboard_summary -- path/to/data [CODE] [YEAR] [MONTH]`

use meteoforecaster::{Dashboard, DashboardError, Parameter};
use std::env;
use std::process;
use std::str::FromStr;

#[tokio::main]
async fn main() -> Result<(), DashboardError> {
    configure_polars_display();
    let mut args = env::args().skip(1);
    let data_dir = args.next().unwrap_or_else(|| ".".to_string());
    let parameter = match args.next() {
        Some(code) => code.parse::<Parameter>()?,
        None => Parameter::MinTemperature,
    };
    let year: i32 = numeric_arg(args.next(), "YEAR", 2030);
    let month: u32 = numeric_arg(args.next(), "MONTH", 6);

    let dashboard = Dashboard::with_data_dir(data_dir).await?;

    // --- Catalog ---
    println!("--- Parameters ---");
    for p in dashboard.parameters() {
        println!("{:>10}  {}", p.code(), p.label());
    }

    // --- Model information ---
    println!("\n--- Model ---");
    for entry in dashboard.metadata_entries()? {
        println!("{}: {}", entry.label, entry.value.as_deref().unwrap_or("-"));
    }
    match dashboard.metrics(parameter)? {
        Some(m) => println!(
            "{}: RMSE {:?}, MAE {:?}, R2 {:?}",
            parameter, m.rmse, m.mae, m.r2
        ),
        None => println!("{}: no metrics", parameter),
    }

    // --- Point prediction ---
    println!("\n--- Prediction ---");
    match dashboard
        .point_prediction()
        .parameter(parameter)
        .year(year)
        .month(month)
        .call()?
    {
        Some(p) => println!("{} in {}: {:.2}", parameter.label(), p.date, p.value),
        None => println!("No data for this period."),
    }

    // --- Series ---
    println!("\n--- Series ---");
    if let Some(range) = dashboard.default_range() {
        println!("Default range: {} to {}", range.start, range.end);
    }
    let series = dashboard.full_series(parameter)?;
    println!("{} points for {}", series.len(), parameter);

    let residuals = dashboard.residuals(parameter)?;
    let values: Vec<f64> = residuals.values().collect();
    if !values.is_empty() {
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        println!(
            "{} residuals over the test period, mean {:.3}",
            values.len(),
            mean
        );
    }

    let export = dashboard.forecast_export(parameter)?;
    println!("\n--- {} ---", export.file_name());
    println!("{}", export.frame.head(Some(5)));

    Ok(())
}

/// Parses an optional positional argument, exiting with a message if it is not a number.
fn numeric_arg<T: FromStr>(arg: Option<String>, name: &str, default: T) -> T {
    match arg {
        None => default,
        Some(text) => text.parse().unwrap_or_else(|_| {
            eprintln!("{} must be a number, got '{}'", name, text);
            process::exit(2);
        }),
    }
}

fn configure_polars_display() {
    // show every column
    env::set_var("POLARS_FMT_MAX_COLS", "-1");
    // show 20 rows
    env::set_var("POLARS_FMT_MAX_ROWS", "20");
}
