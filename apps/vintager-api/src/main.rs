use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = vintager_api::Args::parse();

	vintager_api::run(args).await
}
