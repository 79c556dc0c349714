use anyhow::{Context, Result};
use clap::Parser;

use statgrid::cli::CliArgs;
use statgrid::config::AppConfig;
use statgrid::csv::{render_table, write_file};
use statgrid::data::{stats, DataType, Table};
use statgrid::session::Session;

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

fn print_stats(table: &Table) -> Result<()> {
    for column in table.columns_iter() {
        if column.data_type() != DataType::Numeric {
            continue;
        }
        let fmt = |value: Option<f64>| value.map_or_else(|| "-".to_string(), |v| v.to_string());
        println!(
            "{}: min {} max {} range {}",
            column.name(),
            fmt(stats::minimum(column)?),
            fmt(stats::maximum(column)?),
            fmt(stats::range(column)?)
        );
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    statgrid::tracing::init();

    let args = CliArgs::parse();
    let run = args
        .into_config(AppConfig::load())
        .map_err(anyhow::Error::msg)?;

    let mut session = Session::new("statgrid");
    for path in &run.files {
        let sample = if run.detect {
            Some(
                std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
            )
        } else {
            None
        };
        let options = run.options_for(path, sample.as_deref());
        let index = session
            .open_file(path, &options)
            .with_context(|| format!("failed to import {}", path.display()))?;

        let Some(table) = session.table(index) else {
            continue;
        };

        if run.json {
            println!("{}", serde_json::to_string_pretty(table)?);
        } else {
            print!("{}", render_table(table, &run.render));
        }
        if run.stats {
            print_stats(table)?;
        }
        if let Some(output) = &run.output {
            write_file(table, output, &options)
                .with_context(|| format!("failed to write {}", output.display()))?;
            eprintln!("saved {}", output.display());
        }
    }

    Ok(())
}
