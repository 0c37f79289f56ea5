// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::Parser;
use harvestrs::application::use_cases::fetch_batch::FetchBatchUseCase;
use harvestrs::config::settings::Settings;
use harvestrs::engines::reqwest_engine::ReqwestFetcher;
use harvestrs::infrastructure::database::connection;
use harvestrs::infrastructure::repositories::url_response_repo_impl::UrlResponseRepositoryImpl;
use harvestrs::utils::{telemetry, url_utils};
use harvestrs::workers::DispatchOptions;
use migration::{Migrator, MigratorTrait};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "harvestrs", version, about = "Fetch URLs concurrently and store every response")]
struct Cli {
    /// Comma-separated list of URLs to fetch
    #[arg(long, default_value = "")]
    urls: String,

    /// Maximum number of URLs processed at the same time (unbounded when unset)
    #[arg(long)]
    max_concurrency: Option<usize>,

    /// Cancel fetches still running after this many seconds
    #[arg(long)]
    deadline_secs: Option<u64>,

    /// Print the full report as JSON instead of the summary line
    #[arg(long)]
    json: bool,

    /// Do not run database migrations on start
    #[arg(long)]
    skip_migrations: bool,
}

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并执行一个抓取批次
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // 1. Load configuration
    let settings = Settings::new()?;

    // 2. Initialize logging
    telemetry::init_telemetry(settings.log.format);
    info!("Starting harvestrs...");

    let urls = url_utils::split_url_list(&cli.urls);
    if urls.is_empty() {
        println!("Please provide URLs with the --urls flag.");
        return Ok(());
    }

    // 3. Connect to database
    let db = Arc::new(connection::create_pool(&settings.database).await?);
    info!("Database connection established");

    if settings.database.run_migrations && !cli.skip_migrations {
        info!("Running database migrations...");
        Migrator::up(db.as_ref(), None).await?;
        info!("Database migrations applied");
    }

    // 4. Wire the pipeline
    let fetcher = Arc::new(ReqwestFetcher::from_settings(&settings.fetch)?);
    let repository = Arc::new(UrlResponseRepositoryImpl::new(db.clone()));

    let mut options = DispatchOptions::from(&settings.dispatch);
    if let Some(limit) = cli.max_concurrency {
        options.max_concurrency = Some(limit).filter(|limit| *limit > 0);
    }
    if let Some(secs) = cli.deadline_secs {
        options.deadline = Some(Duration::from_secs(secs));
    }

    let use_case = FetchBatchUseCase::new(fetcher, repository, options);

    let token = use_case.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Received Ctrl+C, cancelling outstanding fetches");
            token.cancel();
        }
    });

    // 5. Run the batch
    let report = use_case.execute(&urls).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "Success count = {}, Failure count = {}",
            report.succeeded(),
            report.failed()
        );
    }

    Ok(())
}
