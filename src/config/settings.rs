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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// 部署环境中沿用的数据库环境变量及其对应的配置键
const LEGACY_DATABASE_VARS: [(&str, &str); 5] = [
    ("DB_USER", "database.user"),
    ("DB_PASS", "database.password"),
    ("DB_NAME", "database.name"),
    ("DB_HOST", "database.host"),
    ("DB_PORT", "database.port"),
];

/// 应用程序配置设置
///
/// 包含数据库、抓取、批量调度和日志等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 数据库配置
    pub database: DatabaseSettings,
    /// 抓取配置
    pub fetch: FetchSettings,
    /// 批量调度配置
    #[serde(default)]
    pub dispatch: DispatchSettings,
    /// 日志配置
    pub log: LogSettings,
}

/// 数据库配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// 数据库连接URL，设置后优先于分项配置
    pub url: Option<String>,
    /// 数据库用户名
    pub user: Option<String>,
    /// 数据库密码
    pub password: Option<String>,
    /// 数据库名称
    pub name: Option<String>,
    /// 数据库主机
    pub host: String,
    /// 数据库端口
    pub port: u16,
    /// 最大连接数
    pub max_connections: Option<u32>,
    /// 最小连接数
    pub min_connections: Option<u32>,
    /// 连接超时时间（秒）
    pub connect_timeout: Option<u64>,
    /// 空闲连接超时时间（秒）
    pub idle_timeout: Option<u64>,
    /// 启动时是否执行数据库迁移
    pub run_migrations: bool,
}

impl DatabaseSettings {
    /// 获取数据库连接URL
    ///
    /// 优先使用 `database.url`，否则由用户名、密码、主机、端口和库名拼接 Postgres 连接串
    ///
    /// # 返回值
    ///
    /// * `Ok(String)` - 连接URL
    /// * `Err(ConfigError)` - 缺少用户名或库名
    pub fn connection_url(&self) -> Result<String, ConfigError> {
        if let Some(url) = self.url.as_ref().filter(|url| !url.trim().is_empty()) {
            return Ok(url.clone());
        }

        let user = self
            .user
            .as_deref()
            .filter(|user| !user.is_empty())
            .ok_or_else(|| ConfigError::NotFound("database.user".to_string()))?;
        let name = self
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ConfigError::NotFound("database.name".to_string()))?;
        let password = self.password.as_deref().unwrap_or_default();

        Ok(format!(
            "postgres://{}:{}@{}:{}/{}?sslmode=disable",
            urlencoding::encode(user),
            urlencoding::encode(password),
            self.host,
            self.port,
            name
        ))
    }
}

/// 抓取配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct FetchSettings {
    /// 单次抓取超时时间（秒）
    pub timeout_secs: u64,
    /// 请求使用的 User-Agent
    pub user_agent: String,
}

impl FetchSettings {
    /// 单次抓取超时时间
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// 批量调度配置设置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DispatchSettings {
    /// 同时执行的最大任务数，未设置时不限制
    pub max_concurrency: Option<usize>,
    /// 整个批次的截止时间（秒），未设置时不限制
    pub deadline_secs: Option<u64>,
}

/// 日志输出格式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// 人类可读格式
    #[default]
    Pretty,
    /// JSON 格式
    Json,
}

/// 日志配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// 日志输出格式
    pub format: LogFormat,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从进程环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_env(std::env::vars().collect())
    }

    /// 从给定的环境变量集合加载配置
    ///
    /// 优先级从低到高：内置默认值、`DB_*` 环境变量、`config/` 目录下的配置文件、
    /// `HARVESTRS__` 前缀的环境变量
    pub fn from_env(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let env = vars
            .get("APP_ENVIRONMENT")
            .cloned()
            .unwrap_or_else(|| "default".to_string());

        let mut builder = Config::builder()
            // Default DB settings
            .set_default("database.host", "db")?
            .set_default("database.port", 5432)?
            .set_default("database.max_connections", 20)?
            .set_default("database.min_connections", 1)?
            .set_default("database.connect_timeout", 10)?
            .set_default("database.idle_timeout", 300)?
            .set_default("database.run_migrations", true)?
            // Default fetch settings
            .set_default("fetch.timeout_secs", 30)?
            .set_default(
                "fetch.user_agent",
                "Mozilla/5.0 (compatible; harvestrs/0.1)",
            )?
            // Default log settings
            .set_default("log.format", "pretty")?;

        for (var, key) in LEGACY_DATABASE_VARS {
            if let Some(value) = vars.get(var).filter(|value| !value.is_empty()) {
                builder = builder.set_default(key, value.as_str())?;
            }
        }

        builder
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("HARVESTRS")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(vars)),
            )
            .build()?
            .try_deserialize()
    }
}
