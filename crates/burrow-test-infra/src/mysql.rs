use crate::{Result, TestInfraError};
use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;
use std::time::Duration;
use testcontainers::core::{IntoContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::ImageExt;
use testcontainers::{ContainerAsync, GenericImage};
use typed_builder::TypedBuilder;

const MYSQL_PORT: u16 = 3306;

/// Container and connection settings for [`MySqlServer`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct MysqlConfig {
    #[builder(default = "burrow".to_string())]
    database: String,
    #[builder(default = "burrow".to_string())]
    username: String,
    #[builder(default = "burrow".to_string())]
    password: String,
    #[builder(default = "8.4".to_string())]
    tag: String,
    /// DDL statements run once the server accepts connections.
    #[builder(default, setter(into))]
    schema: Vec<String>,
    #[builder(default = 8)]
    max_connections: u32,
    /// The log line MySQL prints is not a guarantee the user is set up yet.
    #[builder(default = 20)]
    connect_attempts: u32,
    #[builder(default = Duration::from_millis(500))]
    connect_backoff: Duration,
}

/// A disposable MySQL server with a schema already applied.
///
/// The container is stopped when the server is dropped, so keep it alive for
/// as long as the pool is in use.
pub struct MySqlServer {
    _container: ContainerAsync<GenericImage>,
    pool: MySqlPool,
}

impl MySqlServer {
    /// Starts the container, connects, and runs `config.schema`.
    pub async fn start(config: MysqlConfig) -> Result<Self> {
        let container = GenericImage::new("mysql", config.tag.as_str())
            .with_exposed_port(MYSQL_PORT.tcp())
            .with_wait_for(WaitFor::message_on_stderr("ready for connections"))
            .with_env_var("MYSQL_DATABASE", config.database.as_str())
            .with_env_var("MYSQL_USER", config.username.as_str())
            .with_env_var("MYSQL_PASSWORD", config.password.as_str())
            .with_env_var("MYSQL_ROOT_PASSWORD", "root")
            .start()
            .await?;

        let host = container.get_host().await?;
        let port = container.get_host_port_ipv4(MYSQL_PORT).await?;
        let url = format!(
            "mysql://{}:{}@{}:{}/{}",
            config.username, config.password, host, port, config.database
        );

        let pool = connect(&url, &config).await?;
        for statement in &config.schema {
            sqlx::query(statement).execute(&pool).await?;
        }

        Ok(Self {
            _container: container,
            pool,
        })
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

async fn connect(url: &str, config: &MysqlConfig) -> Result<MySqlPool> {
    let mut attempt = 1;
    loop {
        match MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(url)
            .await
        {
            Ok(pool) => return Ok(pool),
            Err(source) if attempt >= config.connect_attempts => {
                return Err(TestInfraError::Unreachable {
                    attempts: attempt,
                    source,
                });
            }
            Err(_) => {
                attempt += 1;
                tokio::time::sleep(config.connect_backoff).await;
            }
        }
    }
}
