//! # Platform Configuration
//!
//! The deployment manifest as a typed struct: project settings (database,
//! HTTP, Redis, worker mode) and the registered modules (Redis-backed cache,
//! event bus and workflow engine, S3 file storage, tax provider), plus the
//! keep-alive job.
//!
//! Fixed values from the manifest (database name and schema, SSL policy,
//! S3 region and bucket) are defaults; the environment supplies endpoints
//! and credentials.

use url::Url;

use crate::error::ConfigError;
use crate::keep_alive::KeepAliveConfig;
use crate::secret::Secret;
use crate::tax::TaxModuleConfig;
use crate::vars::Vars;

const DEFAULT_DATABASE_NAME: &str = "defaultdb";
const DEFAULT_DATABASE_SCHEMA: &str = "public";
const DEFAULT_REDIS_PREFIX: &str = "medusa";
const INSECURE_DEFAULT_SECRET: &str = "supersecret";
const DEFAULT_S3_REGION: &str = "ap-south-1";
const DEFAULT_S3_BUCKET: &str = "medusa";

/// Resolution path of the Redis cache module.
pub const CACHE_REDIS_MODULE: &str = "@medusajs/medusa/cache-redis";
/// Resolution path of the Redis event bus module.
pub const EVENT_BUS_REDIS_MODULE: &str = "@medusajs/medusa/event-bus-redis";
/// Resolution path of the Redis workflow engine module.
pub const WORKFLOW_ENGINE_REDIS_MODULE: &str = "@medusajs/medusa/workflow-engine-redis";
/// Resolution path of the S3 file provider.
pub const S3_FILE_PROVIDER: &str = "@medusajs/medusa/file-s3";

/// How the server process participates in background work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkerMode {
    /// Serves HTTP and runs background jobs.
    Shared,
    /// Runs background jobs only.
    Worker,
    /// Serves HTTP only.
    #[default]
    Server,
}

impl WorkerMode {
    /// Return the string representation of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shared => "shared",
            Self::Worker => "worker",
            Self::Server => "server",
        }
    }
}

impl std::str::FromStr for WorkerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "shared" => Ok(Self::Shared),
            "worker" => Ok(Self::Worker),
            "server" => Ok(Self::Server),
            other => Err(format!(
                "unknown worker mode {other:?}; expected shared, worker or server"
            )),
        }
    }
}

impl std::fmt::Display for WorkerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Database connection settings.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Connection URL. May embed credentials.
    pub url: Url,
    /// Database name.
    pub name: String,
    /// Schema searched for platform tables.
    pub schema: String,
    /// SSL host override.
    pub host: Option<String>,
    /// SSL port override.
    pub port: Option<u16>,
    /// Whether to reject servers with unverifiable certificates.
    pub reject_unauthorized: bool,
    /// Whether to log queries.
    pub logging: bool,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &redact_url(&self.url))
            .field("name", &self.name)
            .field("schema", &self.schema)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("reject_unauthorized", &self.reject_unauthorized)
            .field("logging", &self.logging)
            .finish()
    }
}

/// HTTP layer settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    /// Origins allowed on the storefront API.
    pub store_cors: Vec<String>,
    /// Origins allowed on the admin API.
    pub admin_cors: Vec<String>,
    /// Origins allowed on the auth routes.
    pub auth_cors: Vec<String>,
    /// Key used to sign session tokens.
    pub jwt_secret: Secret,
    /// Key used to sign cookies.
    pub cookie_secret: Secret,
}

/// Shared Redis connection.
#[derive(Clone, PartialEq, Eq)]
pub struct RedisConfig {
    /// Connection URL. May embed credentials.
    pub url: Url,
    /// Key prefix for everything the platform stores.
    pub prefix: String,
}

impl std::fmt::Debug for RedisConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisConfig")
            .field("url", &redact_url(&self.url))
            .field("prefix", &self.prefix)
            .finish()
    }
}

/// A module backed by the shared Redis connection.
#[derive(Clone, PartialEq, Eq)]
pub struct RedisModuleConfig {
    /// Module resolution path.
    pub resolve: &'static str,
    /// Connection URL shared with [`RedisConfig`].
    pub redis_url: Url,
}

impl std::fmt::Debug for RedisModuleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisModuleConfig")
            .field("resolve", &self.resolve)
            .field("redis_url", &redact_url(&self.redis_url))
            .finish()
    }
}

/// S3-compatible file storage provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3FileProviderConfig {
    /// Provider id within the file module.
    pub id: String,
    /// Public base URL of stored files.
    pub file_url: Url,
    /// Access key id.
    pub access_key_id: String,
    /// Secret access key.
    pub secret_access_key: Secret,
    /// Bucket region.
    pub region: String,
    /// Bucket name.
    pub bucket: String,
    /// Custom S3 endpoint, for S3-compatible stores.
    pub endpoint: Option<Url>,
}

/// Registered modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModulesConfig {
    /// Redis cache module.
    pub cache: RedisModuleConfig,
    /// Redis event bus module.
    pub event_bus: RedisModuleConfig,
    /// Redis workflow engine module.
    pub workflow_engine: RedisModuleConfig,
    /// File storage. `None` when no S3 credentials are configured.
    pub file: Option<S3FileProviderConfig>,
    /// Tax provider selection.
    pub tax: TaxModuleConfig,
}

/// Complete platform configuration, validated once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Database connection.
    pub database: DatabaseConfig,
    /// CORS origins and signing secrets.
    pub http: HttpConfig,
    /// Shared Redis connection.
    pub redis: RedisConfig,
    /// Role of this process.
    pub worker_mode: WorkerMode,
    /// Registered modules.
    pub modules: ModulesConfig,
    /// Scheduled keep-alive ping.
    pub keep_alive: KeepAliveConfig,
}

impl PlatformConfig {
    /// Load from the process environment.
    ///
    /// Variables:
    /// - `DATABASE_URL` (required), `DATABASE_HOST`, `DATABASE_PORT`
    /// - `STORE_CORS`, `ADMIN_CORS`, `AUTH_CORS` (required, comma-separated)
    /// - `JWT_SECRET`, `COOKIE_SECRET` (default: insecure placeholder, warned)
    /// - `REDIS_URL` (required), `REDIS_PREFIX` (default: `medusa`)
    /// - `WORKER_MODE` (default: `server`)
    /// - `S3_FILE_URL`, `S3_ACCESS_KEY_ID`, `S3_SECRET_ACCESS_KEY` (all or none),
    ///   `S3_REGION` (default: `ap-south-1`), `S3_BUCKET` (default: `medusa`),
    ///   `S3_ENDPOINT`
    /// - tax module and keep-alive variables, see [`TaxModuleConfig`] and
    ///   [`KeepAliveConfig`]
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let vars = Vars::new(&lookup);

        let redis = RedisConfig {
            url: vars.required_url("REDIS_URL")?,
            prefix: vars.or_default("REDIS_PREFIX", DEFAULT_REDIS_PREFIX),
        };

        let config = Self {
            database: load_database(&vars)?,
            http: load_http(&vars)?,
            worker_mode: vars.parsed::<WorkerMode>("WORKER_MODE")?.unwrap_or_default(),
            modules: ModulesConfig {
                cache: redis_module(CACHE_REDIS_MODULE, &redis),
                event_bus: redis_module(EVENT_BUS_REDIS_MODULE, &redis),
                workflow_engine: redis_module(WORKFLOW_ENGINE_REDIS_MODULE, &redis),
                file: load_s3(&vars)?,
                tax: TaxModuleConfig::load(&vars)?,
            },
            keep_alive: KeepAliveConfig::load(&vars)?,
            redis,
        };

        tracing::debug!(
            worker_mode = %config.worker_mode,
            file_storage = config.modules.file.is_some(),
            tax_provider = %config.modules.tax.provider_id,
            "platform configuration loaded"
        );

        Ok(config)
    }
}

fn load_database(vars: &Vars<'_>) -> Result<DatabaseConfig, ConfigError> {
    Ok(DatabaseConfig {
        url: vars.required_url("DATABASE_URL")?,
        name: DEFAULT_DATABASE_NAME.to_string(),
        schema: DEFAULT_DATABASE_SCHEMA.to_string(),
        host: vars.optional("DATABASE_HOST"),
        port: vars.parsed::<u16>("DATABASE_PORT")?,
        reject_unauthorized: false,
        logging: true,
    })
}

fn load_http(vars: &Vars<'_>) -> Result<HttpConfig, ConfigError> {
    Ok(HttpConfig {
        store_cors: vars.required_list("STORE_CORS")?,
        admin_cors: vars.required_list("ADMIN_CORS")?,
        auth_cors: vars.required_list("AUTH_CORS")?,
        jwt_secret: secret_or_placeholder(vars, "JWT_SECRET"),
        cookie_secret: secret_or_placeholder(vars, "COOKIE_SECRET"),
    })
}

fn secret_or_placeholder(vars: &Vars<'_>, key: &str) -> Secret {
    match vars.optional(key) {
        Some(value) => Secret::new(value),
        None => {
            tracing::warn!(variable = key, "secret not set; using insecure placeholder");
            Secret::new(INSECURE_DEFAULT_SECRET)
        }
    }
}

fn redis_module(resolve: &'static str, redis: &RedisConfig) -> RedisModuleConfig {
    RedisModuleConfig {
        resolve,
        redis_url: redis.url.clone(),
    }
}

fn load_s3(vars: &Vars<'_>) -> Result<Option<S3FileProviderConfig>, ConfigError> {
    const KEYS: [&str; 3] = ["S3_FILE_URL", "S3_ACCESS_KEY_ID", "S3_SECRET_ACCESS_KEY"];

    let missing: Vec<String> = KEYS
        .iter()
        .filter(|key| vars.optional(key).is_none())
        .map(|key| key.to_string())
        .collect();
    if missing.len() == KEYS.len() {
        return Ok(None);
    }
    if !missing.is_empty() {
        return Err(ConfigError::Incomplete {
            group: "S3 file provider",
            missing,
        });
    }

    Ok(Some(S3FileProviderConfig {
        id: "s3".to_string(),
        file_url: vars.required_url("S3_FILE_URL")?,
        access_key_id: vars.required("S3_ACCESS_KEY_ID")?,
        secret_access_key: Secret::new(vars.required("S3_SECRET_ACCESS_KEY")?),
        region: vars.or_default("S3_REGION", DEFAULT_S3_REGION),
        bucket: vars.or_default("S3_BUCKET", DEFAULT_S3_BUCKET),
        endpoint: vars.url("S3_ENDPOINT")?,
    }))
}

/// Render a URL with any password replaced.
fn redact_url(url: &Url) -> String {
    if url.password().is_none() {
        return url.to_string();
    }
    let mut redacted = url.clone();
    // Only fails for cannot-be-a-base URLs, which carry no password.
    if redacted.set_password(Some("REDACTED")).is_err() {
        return "[REDACTED]".to_string();
    }
    redacted.to_string()
}
