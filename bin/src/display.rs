//! Display utilities and output formatting for the footfall CLI.

use anyhow::Result;
use clap::ValueEnum;
use footfall_lib::prelude::*;
use serde_json::json;

/// Output format for command results.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Table,
    Json,
}

/// Print a resource plan.
pub(crate) fn print_plan(footfall: Footfall, plan: &ResourcePlan, format: Format) -> Result<()> {
    match format {
        Format::Table => {
            println!(
                "Resource plan for {} visitors\n",
                format_footfall(footfall)
            );
            print_plan_table(plan);
        }
        Format::Json => println!("{}", serde_json::to_string_pretty(plan)?),
    }
    Ok(())
}

/// Print a prediction together with its plan.
pub(crate) fn print_prediction(
    response: &PredictionResponse,
    plan: &ResourcePlan,
    format: Format,
) -> Result<()> {
    let prediction = &response.prediction;

    if let Format::Json = format {
        let body = json!({
            "prediction": prediction,
            "resources": plan,
            "timestamp": response.timestamp,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!("Location:   {}", prediction.location);
    println!("Period:     {}-{:02}", prediction.year, prediction.month);
    println!(
        "Footfall:   {}",
        ResourceEstimator::format_count(prediction.predicted_footfall.round() as u64)
    );
    println!("Confidence: {:.0}%", prediction.confidence * 100.0);

    let weather = &prediction.weather;
    println!(
        "Weather:    {:.1}°C mean ({:.1} to {:.1}), {:.0} mm rain, {:.0} cm snow",
        weather.temperature_mean,
        weather.temperature_min,
        weather.temperature_max,
        weather.precipitation,
        weather.snowfall,
    );
    let holidays = &prediction.holidays;
    println!(
        "Holidays:   {} ({} long weekends)",
        holidays.count, holidays.long_weekends
    );

    for (title, lines) in [
        ("Insights", &prediction.insights),
        ("Suggestions", &prediction.resource_suggestions),
    ] {
        if !lines.is_empty() {
            println!("\n{title}:");
            for line in lines {
                println!("  - {line}");
            }
        }
    }

    println!();
    print_plan_table(plan);
    Ok(())
}

/// Print stored predictions.
pub(crate) fn print_records(records: &[PredictionRecord], format: Format) -> Result<()> {
    if let Format::Json = format {
        println!("{}", serde_json::to_string_pretty(records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No predictions found.");
        return Ok(());
    }

    println!(
        "{:<36}  {:<16} {:<8} {:>12} {:>6}  {:<16}",
        "ID", "LOCATION", "PERIOD", "FOOTFALL", "CONF", "RECORDED"
    );
    println!("{}", "-".repeat(102));

    for record in records {
        println!(
            "{:<36}  {:<16} {:<8} {:>12} {:>5.0}%  {:<16}",
            record.id,
            record.location,
            format!("{}-{:02}", record.year, record.month),
            ResourceEstimator::format_count(record.predicted_footfall.round() as u64),
            record.confidence * 100.0,
            record.created_at.format("%Y-%m-%d %H:%M"),
        );
    }

    println!("\nTotal: {} predictions", records.len());
    Ok(())
}

fn print_plan_table(plan: &ResourcePlan) {
    for line in ResourceEstimator::format_plan(plan).lines() {
        println!("  {line}");
    }
}

fn format_footfall(footfall: Footfall) -> String {
    let visitors = footfall.get();
    if visitors.fract() == 0.0 {
        ResourceEstimator::format_count(visitors as u64)
    } else {
        format!("{visitors}")
    }
}
