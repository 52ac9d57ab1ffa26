mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use salary_insight::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
