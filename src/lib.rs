pub mod calculators;
pub mod commands;
pub mod models;

use commands::dispatch::{handle_line, AppContext};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

const DATA_DIR_ENV: &str = "FINLENS_DATA_DIR";
const DEFAULT_DATA_DIR: &str = ".finlens";

pub fn run() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            log::error!("failed to start runtime: {e}");
            std::process::exit(1);
        }
    };

    let data_dir = std::env::var(DATA_DIR_ENV).unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
    if let Err(e) = runtime.block_on(serve(AppContext::new(data_dir))) {
        log::error!("command loop stopped: {e}");
        std::process::exit(1);
    }
}

async fn serve(ctx: AppContext) -> std::io::Result<()> {
    log::info!("finlens ready, data dir {}", ctx.data_dir);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let response = handle_line(&ctx, &line).await;
        stdout.write_all(response.to_string().as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    Ok(())
}
