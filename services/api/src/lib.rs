mod cli;
mod commands;
mod infra;
mod routes;
mod server;

use farm_schemes::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
