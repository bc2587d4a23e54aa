//! Till - 收银台订单与报表
//!
//! # 架构概述
//!
//! - **订单** (`orders`): 当前桌台的待确认订单、桌台账本
//! - **报表** (`reports`): 日报/月报聚合、redb 持久化、导出
//! - **控制器** (`manager`): 持有全部状态的 `TillManager`
//! - **计算器** (`calculator`): 安全的算术表达式求值
//!
//! # 模块结构
//!
//! ```text
//! till/src/
//! ├── core/          # 配置、启动环境
//! ├── orders/        # OrderBuilder、TableLedgers
//! ├── reports/       # 聚合、编解码、存储、导出
//! ├── manager/       # TillManager
//! ├── calculator/    # 词法 → 语法树 → 求值
//! ├── shell.rs       # 命令行交互
//! └── utils/         # 日志、时间
//! ```

pub mod calculator;
pub mod core;
pub mod manager;
pub mod orders;
pub mod reports;
pub mod shell;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, load_dotenv, setup_environment};
pub use manager::{ManagerError, ManagerResult, OrderSnapshot, SaveSummary, TillManager};
pub use reports::{ReportStorage, ReportStore};
pub use shared::error::{AppError, ErrorCode};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger_with_file};
