use burrow_allocator::settings::{DEFAULT_CODE_LENGTH, DEFAULT_MAX_COLLISION_RETRIES};
use burrow_allocator::AllocatorSettings;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::fmt::{Display, Formatter};

pub const STORAGE_BACKEND_ENV: &str = "BURROW_STORAGE_BACKEND";
pub const MYSQL_DSN_ENV: &str = "BURROW_MYSQL_DSN";
pub const CODE_LENGTH_ENV: &str = "BURROW_CODE_LENGTH";
pub const MAX_COLLISION_RETRIES_ENV: &str = "BURROW_MAX_COLLISION_RETRIES";
pub const IDEMPOTENT_ENV: &str = "BURROW_IDEMPOTENT";
pub const BASE_URL_ENV: &str = "BURROW_BASE_URL";
pub const LOG_FORMAT_ENV: &str = "BURROW_LOG_FORMAT";

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "mysql")]
    Mysql,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Mysql => write!(f, "mysql"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Allocate short codes for one or more URLs.
    Shorten {
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// Print the URL stored under each code.
    Resolve {
        #[arg(required = true)]
        codes: Vec<String>,
    },
}

#[derive(Debug, Parser)]
#[command(name = "burrow", about = "Allocate and resolve short codes")]
pub struct CLI {
    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = MYSQL_DSN_ENV, required_if_eq("storage", "mysql"))]
    pub mysql_dsn: Option<String>,

    #[arg(long, env = CODE_LENGTH_ENV, default_value_t = DEFAULT_CODE_LENGTH)]
    pub code_length: usize,

    #[arg(
        long,
        env = MAX_COLLISION_RETRIES_ENV,
        default_value_t = DEFAULT_MAX_COLLISION_RETRIES
    )]
    pub max_collision_retries: u32,

    #[arg(
        long,
        env = IDEMPOTENT_ENV,
        action = ArgAction::Set,
        default_value_t = true
    )]
    pub idempotent: bool,

    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormatArg::Text)]
    pub log_format: LogFormatArg,

    #[command(subcommand)]
    pub command: Command,
}

impl CLI {
    pub fn allocator_settings(&self) -> AllocatorSettings {
        AllocatorSettings::builder()
            .code_length(self.code_length)
            .idempotent(self.idempotent)
            .max_collision_retries(self.max_collision_retries)
            .build()
    }
}
