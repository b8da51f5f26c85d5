mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use benefits_screener::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
