use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = vintager_smoke::Args::parse();

	vintager_smoke::run(args).await
}
