use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;
use std::time::Duration;

use coldroute_game::ShipmentStatus;

use super::simulation::{JourneyAggregate, JourneySummary};

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: &'a JourneyAggregate,
    journeys: &'a [JourneySummary],
}

fn status_badge(status: ShipmentStatus) -> colored::ColoredString {
    match status {
        ShipmentStatus::Delivered => "✅ DELIVERED".green(),
        ShipmentStatus::Spoiled => "❌ SPOILED".red(),
        ShipmentStatus::Halted => "⏹  HALTED".yellow(),
        ShipmentStatus::InTransit => "⏳ IN TRANSIT".yellow(),
    }
}

fn delivery_rate(aggregate: &JourneyAggregate) -> f64 {
    if aggregate.runs == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let rate = (aggregate.delivered as f64 / aggregate.runs as f64) * 100.0;
    rate
}

pub fn generate_console_report(
    out: &mut dyn Write,
    journeys: &[JourneySummary],
    aggregate: &JourneyAggregate,
    verbose: bool,
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Journey Results Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "==========================".cyan())?;
    writeln!(out, "Total journeys: {}", aggregate.runs)?;
    writeln!(out, "Delivered: {}", aggregate.delivered.to_string().green())?;
    writeln!(out, "Spoiled: {}", aggregate.spoiled.to_string().red())?;
    writeln!(out, "Halted: {}", aggregate.halted)?;
    writeln!(out, "Delivery rate: {:.1}%", delivery_rate(aggregate))?;
    writeln!(out, "Mean cost: {:.1}", aggregate.mean_cost)?;
    writeln!(out, "Mean reroutes: {:.2}", aggregate.mean_reroutes)?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for journey in journeys {
        writeln!(
            out,
            "{} seed {} at {}",
            status_badge(journey.status),
            journey.seed,
            journey.final_location.bold()
        )?;
        writeln!(out, "   Planned: {}", journey.initial_route.join(" -> "))?;
        writeln!(
            out,
            "   Cost: {}  Shelf life left: {}  Turns: {}  Reroutes: {}",
            journey.cost, journey.shelf_life, journey.turns, journey.reroutes
        )?;
        if !journey.disruptions.is_empty() {
            writeln!(out, "   Disruptions:")?;
            for entry in &journey.disruptions {
                writeln!(out, "     • {}", entry.yellow())?;
            }
        }
        if verbose {
            for (turn, status) in journey.timeline.iter().enumerate() {
                writeln!(out, "   --- turn {turn} ---")?;
                for line in status.lines() {
                    writeln!(out, "   {line}")?;
                }
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn generate_json_report(
    out: &mut dyn Write,
    journeys: &[JourneySummary],
    aggregate: &JourneyAggregate,
) -> Result<()> {
    let report = JsonReport {
        summary: aggregate,
        journeys,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

pub fn generate_markdown_report(
    out: &mut dyn Write,
    journeys: &[JourneySummary],
    aggregate: &JourneyAggregate,
) -> Result<()> {
    writeln!(out, "# Coldroute Journey Results\n")?;
    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Total journeys**: {}", aggregate.runs)?;
    writeln!(out, "- **Delivered**: {}", aggregate.delivered)?;
    writeln!(out, "- **Spoiled**: {}", aggregate.spoiled)?;
    writeln!(out, "- **Halted**: {}", aggregate.halted)?;
    writeln!(out, "- **Delivery rate**: {:.1}%", delivery_rate(aggregate))?;
    writeln!(out, "- **Mean cost**: {:.1}\n", aggregate.mean_cost)?;

    writeln!(out, "## Journeys\n")?;
    writeln!(out, "| Seed | Status | Final stop | Cost | Shelf life | Reroutes |")?;
    writeln!(out, "|------|--------|------------|------|------------|----------|")?;
    for journey in journeys {
        writeln!(
            out,
            "| {} | {} | {} | {} | {} | {} |",
            journey.seed,
            journey.status.label(),
            journey.final_location,
            journey.cost,
            journey.shelf_life,
            journey.reroutes
        )?;
    }
    Ok(())
}
