use chrono_tz::Tz;
use std::path::PathBuf;

/// 收银台配置 - 所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./work_dir | 工作目录 (报表数据库、日志、导出文件) |
/// | REPORT_DB_FILE | reports.redb | 报表数据库文件名 |
/// | BUSINESS_TZ | UTC | 业务时区 (决定日/月报表键) |
/// | MAX_TABLES | 10 | 最大桌台数 |
/// | INITIAL_TABLES | 4 | 启动时创建的桌台数 |
/// | EXPORT_FILE | report.json | 默认导出文件名 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_JSON | false | JSON 日志格式 |
/// | LOG_DIR | (unset) | 文件日志目录 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/till BUSINESS_TZ=Asia/Kathmandu till shell
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录
    pub work_dir: String,
    /// 报表数据库文件名 (位于工作目录下)
    pub report_db_file: String,
    /// 业务时区
    pub timezone: Tz,
    /// 最大桌台数
    pub max_tables: usize,
    /// 启动时创建的桌台数
    pub initial_tables: usize,
    /// 默认导出文件名
    pub export_file: String,
    /// 日志级别
    pub log_level: String,
    /// 是否使用 JSON 日志
    pub log_json: bool,
    /// 文件日志目录
    pub log_dir: Option<String>,
}

pub const DEFAULT_MAX_TABLES: usize = 10;

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let max_tables = lookup("MAX_TABLES")
            .and_then(|v| v.parse().ok())
            .filter(|n: &usize| *n > 0)
            .unwrap_or(DEFAULT_MAX_TABLES);

        Self {
            work_dir: lookup("WORK_DIR").unwrap_or_else(|| "./work_dir".into()),
            report_db_file: lookup("REPORT_DB_FILE").unwrap_or_else(|| "reports.redb".into()),
            timezone: lookup("BUSINESS_TZ")
                .map(|tz| parse_timezone(&tz))
                .unwrap_or(Tz::UTC),
            max_tables,
            initial_tables: lookup("INITIAL_TABLES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(4)
                .min(max_tables),
            export_file: lookup("EXPORT_FILE").unwrap_or_else(|| "report.json".into()),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: lookup("LOG_JSON")
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: lookup("LOG_DIR").filter(|v| !v.is_empty()),
        }
    }

    /// 使用自定义工作目录覆盖配置
    ///
    /// 常用于测试场景
    pub fn with_work_dir(work_dir: impl Into<String>) -> Self {
        let mut config = Self::from_lookup(|_| None);
        config.work_dir = work_dir.into();
        config
    }

    /// Full path of the report database
    pub fn report_db_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join(&self.report_db_file)
    }

    /// Full path of the default export artifact
    pub fn export_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join(&self.export_file)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn parse_timezone(name: &str) -> Tz {
    name.parse().unwrap_or_else(|e| {
        tracing::warn!(timezone = %name, error = %e, "Unknown BUSINESS_TZ, falling back to UTC");
        Tz::UTC
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.work_dir, "./work_dir");
        assert_eq!(config.max_tables, 10);
        assert_eq!(config.initial_tables, 4);
        assert_eq!(config.timezone, Tz::UTC);
        assert_eq!(config.export_file, "report.json");
        assert!(!config.log_json);
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("WORK_DIR", "/tmp/till"),
            ("BUSINESS_TZ", "Asia/Kathmandu"),
            ("MAX_TABLES", "6"),
            ("INITIAL_TABLES", "2"),
            ("LOG_JSON", "true"),
        ]);
        assert_eq!(config.timezone, chrono_tz::Asia::Kathmandu);
        assert_eq!(config.max_tables, 6);
        assert_eq!(config.initial_tables, 2);
        assert!(config.log_json);
        assert_eq!(
            config.report_db_path(),
            PathBuf::from("/tmp/till/reports.redb")
        );
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = config_from(&[
            ("BUSINESS_TZ", "Mars/Olympus"),
            ("MAX_TABLES", "lots"),
            ("INITIAL_TABLES", "50"),
        ]);
        assert_eq!(config.timezone, Tz::UTC);
        assert_eq!(config.max_tables, DEFAULT_MAX_TABLES);
        // clamped to the cap
        assert_eq!(config.initial_tables, DEFAULT_MAX_TABLES);
    }
}
