use anyhow::Result;
use crashplate::cli::App;

#[tokio::main]
async fn main() -> Result<()> {
    let args = crashplate::cli::Args::parse_args();
    let mut app = App::from_args(&args)?;

    app.run(args).await?;

    Ok(())
}
