use std::fmt;

use config::{Config, ConfigError, Environment, Map};
use serde::Deserialize;

pub const DEFAULT_PYTHON_VERSION: &str = "3.6";
pub const DEFAULT_PIP_DEPS: &str = "-e .[dev]";
pub const DEFAULT_TEST_CPU_VERSION: &str = "latest";
pub const DEFAULT_CONTAINER_TOOL: &str = "docker";
pub const DEFAULT_COMPOSE_TOOL: &str = "docker-compose";

/// Arguments attaching the test container to the network shared with the Neo4j sidecar.
pub const NEO4J_NETWORK: [&str; 2] = ["--net", "grph_net"];

/// A `"0"`/`"1"` switch read from the environment.
///
/// The raw value is kept so it can be forwarded to the test container untouched; only the
/// exact string `"1"` turns the switch on.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct Flag(String);

impl Flag {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn is_enabled(&self) -> bool {
        self.0 == "1"
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Launch options, resolved once from the environment.
///
/// Every variable that is unset or empty falls back to its default. Values are never
/// parsed, so `PYTHON_VERSION=3.10` stays `"3.10"`.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    pub python_version: String,
    pub pip_deps: String,
    pub with_neo4j: Flag,
    pub with_lint: Flag,
    pub with_typecheck: Flag,
    pub with_build: Flag,
    pub test_cpu_version: String,
    pub container_tool: String,
    pub compose_tool: String,
}

impl EnvConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::build(Environment::default().ignore_empty(true))
    }

    /// Reads the configuration from an explicit set of variables instead of the process
    /// environment. Keys use the same upper-case names as the environment.
    pub fn from_vars<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Result<Self, ConfigError>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let source: Map<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::build(
            Environment::default()
                .ignore_empty(true)
                .source(Some(source)),
        )
    }

    fn build(environment: Environment) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("python_version", DEFAULT_PYTHON_VERSION)?
            .set_default("pip_deps", DEFAULT_PIP_DEPS)?
            .set_default("with_neo4j", "0")?
            .set_default("with_lint", "1")?
            .set_default("with_typecheck", "1")?
            .set_default("with_build", "1")?
            .set_default("test_cpu_version", DEFAULT_TEST_CPU_VERSION)?
            .set_default("container_tool", DEFAULT_CONTAINER_TOOL)?
            .set_default("compose_tool", DEFAULT_COMPOSE_TOOL)?
            .add_source(environment)
            .build()?;
        config.try_deserialize()
    }

    /// Network attachment arguments for the test container; empty unless Neo4j is enabled.
    pub fn network(&self) -> Vec<String> {
        if self.with_neo4j.is_enabled() {
            NEO4J_NETWORK.iter().map(|s| s.to_string()).collect()
        } else {
            Vec::new()
        }
    }

    pub fn image(&self) -> String {
        format!("graphistry/test-cpu:{}", self.test_cpu_version)
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            python_version: DEFAULT_PYTHON_VERSION.to_string(),
            pip_deps: DEFAULT_PIP_DEPS.to_string(),
            with_neo4j: Flag::new("0"),
            with_lint: Flag::new("1"),
            with_typecheck: Flag::new("1"),
            with_build: Flag::new("1"),
            test_cpu_version: DEFAULT_TEST_CPU_VERSION.to_string(),
            container_tool: DEFAULT_CONTAINER_TOOL.to_string(),
            compose_tool: DEFAULT_COMPOSE_TOOL.to_string(),
        }
    }
}
