//! Redis Store Module
//!
//! Presents the store contract over a remote Redis service. Every call is
//! bounded by a configured timeout, and the connection is health-checked
//! at construction time.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use serde_json::Value;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::config::StoreOptions;
use crate::error::{CacheError, Result};
use crate::store::{Expiry, Store};

// == Defaults ==
const DEFAULT_ADDRESS: &str = "localhost:6379";
const DEFAULT_MAX_RETRIES: u32 = 5;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

// == Redis Config ==
/// Connection parameters for the Redis backend.
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Server address as `host:port`
    pub address: String,
    /// Authentication credential, empty for none
    pub password: String,
    /// Logical database index
    pub database: i64,
    /// Maximum number of connection attempts during init
    pub max_retries: u32,
    /// Bound on every read-side operation
    pub read_timeout: Duration,
    /// Bound on every write-side operation
    pub write_timeout: Duration,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            password: String::new(),
            database: 0,
            max_retries: DEFAULT_MAX_RETRIES,
            read_timeout: DEFAULT_TIMEOUT,
            write_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl RedisConfig {
    /// Builds a config from construction options, validating each field.
    /// Anything left unset keeps its default.
    pub fn from_options(options: &StoreOptions) -> Result<Self> {
        let mut config = Self::default();

        if let Some(address) = &options.address {
            if address.is_empty() {
                return Err(CacheError::Config("redis address must not be empty".into()));
            }
            config.address = address.clone();
        }
        if let Some(password) = &options.password {
            config.password = password.clone();
        }
        if let Some(database) = options.database {
            if database < 0 {
                return Err(CacheError::Config(format!(
                    "redis database index must not be negative, got {database}"
                )));
            }
            config.database = database;
        }
        if let Some(max_retries) = options.max_retries {
            config.max_retries = max_retries;
        }
        if let Some(read_timeout) = options.read_timeout {
            if read_timeout.is_zero() {
                return Err(CacheError::Config("redis read timeout must be positive".into()));
            }
            config.read_timeout = read_timeout;
        }
        if let Some(write_timeout) = options.write_timeout {
            if write_timeout.is_zero() {
                return Err(CacheError::Config("redis write timeout must be positive".into()));
            }
            config.write_timeout = write_timeout;
        }

        Ok(config)
    }

    fn url(&self) -> String {
        if self.password.is_empty() {
            format!("redis://{}/{}", self.address, self.database)
        } else {
            format!("redis://:{}@{}/{}", self.password, self.address, self.database)
        }
    }
}

/// Expiration in milliseconds for `PSETEX`, preserving sub-second
/// precision. Redis rejects a zero expiry, and a zero would alias the
/// forever sentinel, so the result is clamped to at least 1ms.
fn expiry_millis(duration: Duration) -> u64 {
    (duration.as_millis() as u64).max(1)
}

// == Redis Store ==
/// Remote store adapter over Redis.
///
/// The remote service owns expiration enforcement, so `flush_expired`
/// keeps the no-op default. Values are stored as JSON text.
pub struct RedisStore {
    config: RedisConfig,
    connection: Option<MultiplexedConnection>,
}

impl RedisStore {
    // == Constructor ==
    /// Creates an unconnected store; [`Store::init`] establishes and
    /// health-checks the connection.
    pub fn new(config: RedisConfig) -> Self {
        Self {
            config,
            connection: None,
        }
    }

    /// Registry constructor.
    pub fn construct(options: &StoreOptions) -> Result<Box<dyn Store>> {
        Ok(Box::new(Self::new(RedisConfig::from_options(options)?)))
    }

    /// A clone of the multiplexed connection; cheap, shares the socket.
    fn connection(&self) -> Result<MultiplexedConnection> {
        self.connection
            .clone()
            .ok_or_else(|| CacheError::Connection("redis store is not initialized".into()))
    }

    async fn connect_and_ping(&self) -> Result<MultiplexedConnection> {
        let client = redis::Client::open(self.config.url())
            .map_err(|e| CacheError::Connection(format!("failed to create redis client: {e}")))?;
        let mut connection = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| CacheError::Connection(format!("failed to connect to redis: {e}")))?;
        redis::cmd("PING")
            .query_async::<String>(&mut connection)
            .await
            .map_err(|e| CacheError::Connection(format!("redis ping failed: {e}")))?;
        Ok(connection)
    }
}

#[async_trait]
impl Store for RedisStore {
    async fn init(&mut self) -> Result<()> {
        let attempts = self.config.max_retries.max(1);
        let mut last_error = None;

        for attempt in 1..=attempts {
            match timeout(self.config.read_timeout, self.connect_and_ping()).await {
                Ok(Ok(connection)) => {
                    info!("connected to redis at {}", self.config.address);
                    self.connection = Some(connection);
                    return Ok(());
                }
                Ok(Err(err)) => {
                    warn!("redis connection attempt {}/{} failed: {}", attempt, attempts, err);
                    last_error = Some(err);
                }
                Err(_) => {
                    warn!("redis connection attempt {}/{} timed out", attempt, attempts);
                    last_error = Some(CacheError::Timeout("init"));
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| CacheError::Connection("redis connection failed".into())))
    }

    async fn has(&self, key: &str) -> Result<bool> {
        let mut connection = self.connection()?;
        let exists = timeout(self.config.read_timeout, connection.exists::<_, bool>(key))
            .await
            .map_err(|_| CacheError::Timeout("has"))?
            .map_err(|e| CacheError::Backend(format!("redis exists failed: {e}")))?;
        Ok(exists)
    }

    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let mut connection = self.connection()?;
        // A nil reply decodes to None: service-reported miss, not an error.
        let payload = timeout(self.config.read_timeout, connection.get::<_, Option<String>>(key))
            .await
            .map_err(|_| CacheError::Timeout("get"))?
            .map_err(|e| CacheError::Backend(format!("redis get failed: {e}")))?;

        match payload {
            Some(text) => {
                let value = serde_json::from_str(&text).map_err(|e| {
                    CacheError::Serialization(format!("invalid cached payload for `{key}`: {e}"))
                })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn put(&self, key: &str, value: Value, expiry: Expiry) -> Result<()> {
        let mut connection = self.connection()?;
        let payload = serde_json::to_string(&value).map_err(|e| {
            CacheError::Serialization(format!("failed to encode value for `{key}`: {e}"))
        })?;

        let write = async {
            match expiry {
                Expiry::After(duration) => {
                    connection
                        .pset_ex::<_, _, ()>(key, payload, expiry_millis(duration))
                        .await
                }
                Expiry::Never => connection.set::<_, _, ()>(key, payload).await,
            }
        };

        timeout(self.config.write_timeout, write)
            .await
            .map_err(|_| CacheError::Timeout("put"))?
            .map_err(|e| CacheError::Backend(format!("redis set failed: {e}")))?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut connection = self.connection()?;
        timeout(self.config.write_timeout, connection.del::<_, ()>(key))
            .await
            .map_err(|_| CacheError::Timeout("delete"))?
            .map_err(|e| CacheError::Backend(format!("redis del failed: {e}")))?;
        Ok(())
    }

    async fn flush(&self) -> Result<()> {
        let mut connection = self.connection()?;
        timeout(
            self.config.write_timeout,
            redis::cmd("FLUSHDB").query_async::<()>(&mut connection),
        )
        .await
        .map_err(|_| CacheError::Timeout("flush"))?
        .map_err(|e| CacheError::Backend(format!("redis flushdb failed: {e}")))?;
        debug!("flushed redis database {}", self.config.database);
        Ok(())
    }
}
