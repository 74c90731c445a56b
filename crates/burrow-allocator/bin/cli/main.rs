mod cli;

use crate::cli::{Command, LogFormatArg, StorageBackendArg, CLI};
use burrow_allocator::{Allocator, AllocatorService, AllocatorSettings};
use burrow_storage::{InMemoryRepository, MySqlRepository, Repository};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CLI::try_parse()?;

    init_tracing(config.log_format);

    let settings = config.allocator_settings();
    info!(
        storage_backend = %config.storage,
        code_length = settings.code_length,
        idempotent = settings.idempotent,
        max_collision_retries = settings.max_collision_retries,
        "starting burrow"
    );

    match config.storage {
        StorageBackendArg::InMemory => {
            run(InMemoryRepository::new(), settings, &config).await?;
        }
        StorageBackendArg::Mysql => {
            let mysql_dsn = config
                .mysql_dsn
                .as_deref()
                .ok_or("mysql dsn is required when storage backend is mysql")?;
            let repository = MySqlRepository::connect(mysql_dsn).await?;
            run(repository, settings, &config).await?;
        }
    }

    Ok(())
}

fn init_tracing(format: LogFormatArg) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormatArg::Text => builder.init(),
        LogFormatArg::Json => builder.json().init(),
    }
}

async fn run<R: Repository>(
    repository: R,
    settings: AllocatorSettings,
    config: &CLI,
) -> Result<(), Box<dyn std::error::Error>> {
    let allocator = AllocatorService::new(repository, settings)?;

    match &config.command {
        Command::Shorten { urls } => {
            for url in urls {
                let code = allocator.allocate(url).await?;
                println!("{}\t{}", code, code.to_url(&config.base_url));
            }
        }
        Command::Resolve { codes } => {
            for code in codes {
                let url = allocator.resolve(code).await?;
                println!("{}", url);
            }
        }
    }

    Ok(())
}
