//! Store connectivity check: reads a few rows from each catalog table and reports per table.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre;
use tracing_subscriber::EnvFilter;

use vintager_store::{SmokeReport, StoreClient};

#[derive(Debug, Parser)]
#[command(
	version = vintager_cli::VERSION,
	rename_all = "kebab",
	styles = vintager_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	#[arg(long, value_name = "N", default_value_t = 3)]
	pub limit: u32,
	/// Print the reports as JSON instead of one line per table.
	#[arg(long)]
	pub json: bool,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = vintager_config::load(&args.config)?;
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
	let client = StoreClient::new(&config.store)?;
	let reports = client.smoke(args.limit).await;

	if args.json {
		println!("{}", serde_json::to_string_pretty(&reports)?);
	} else {
		for report in &reports {
			println!("{}", render(report));
		}
	}

	let failed = reports.iter().filter(|report| !report.is_ok()).count();

	if failed > 0 {
		return Err(eyre::eyre!("{failed} of {} tables failed the smoke check.", reports.len()));
	}

	tracing::info!(tables = reports.len(), "Store smoke check passed.");

	Ok(())
}

fn render(report: &SmokeReport) -> String {
	match (&report.error, report.rows) {
		(Some(error), _) => format!("ERROR {}: {error}", report.table),
		(None, Some(rows)) => format!("OK    {}: {rows} rows", report.table),
		(None, None) => format!("OK    {}", report.table),
	}
}

#[cfg(test)]
mod tests {
	use vintager_store::SmokeReport;

	use crate::render;

	#[test]
	fn renders_success_and_failure_lines() {
		let ok = SmokeReport { table: "wine".to_string(), rows: Some(3), error: None };
		let failed = SmokeReport {
			table: "wine_tast_note".to_string(),
			rows: None,
			error: Some("404 Not Found".to_string()),
		};

		assert_eq!(render(&ok), "OK    wine: 3 rows");
		assert_eq!(render(&failed), "ERROR wine_tast_note: 404 Not Found");
	}
}
