use clap::{Parser, Subcommand};
use shared::report::ReportKind;
use std::path::PathBuf;
use till::shell::{Shell, render_report};
use till::{AppError, Config, TillManager, load_dotenv, setup_environment};

#[derive(Parser)]
#[command(name = "till", version)]
#[command(about = "Restaurant till: table orders and daily / monthly sales reports")]
struct Cli {
    /// Work directory (report database, exports)
    #[arg(long, global = true, env = "WORK_DIR")]
    work_dir: Option<String>,

    /// Log level
    #[arg(long, global = true, env = "LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive order entry (default)
    Shell,
    /// Print a report
    Report {
        #[arg(default_value = "daily")]
        kind: ReportKind,
    },
    /// Write the `{ daily, monthly }` export document
    Export {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Erase all persisted reports
    ClearReports,
    /// Evaluate an arithmetic expression
    Calc {
        #[arg(required = true, num_args = 1..)]
        expr: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    // 1. 加载 .env, 解析参数
    load_dotenv();
    let cli = Cli::parse();

    // calculator needs no state
    if let Some(Commands::Calc { expr }) = &cli.command {
        let value = till::calculator::evaluate(&expr.join(" ")).map_err(AppError::from)?;
        println!("{}", value);
        return Ok(());
    }

    // 2. 加载配置 (命令行参数优先)
    let mut config = Config::from_env();
    if let Some(dir) = cli.work_dir {
        config.work_dir = dir;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    // 3. 设置环境 (工作目录, 日志)
    setup_environment(&config)?;
    tracing::info!(work_dir = %config.work_dir, "Till starting");

    // 4. 打开报表数据库
    let mut manager = TillManager::open(&config).map_err(AppError::from)?;

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            let stdin = std::io::stdin();
            let mut shell = Shell::new(manager, config.export_path());
            shell.run(stdin.lock(), std::io::stdout())?;
        }
        Commands::Report { kind } => {
            for notice in manager.startup_notices() {
                eprintln!("! {}", notice);
            }
            println!("{}", render_report(kind, &manager.report_rows(kind)));
        }
        Commands::Export { out } => {
            let path = out.unwrap_or_else(|| config.export_path());
            let written = manager.export_to_file(&path).map_err(AppError::from)?;
            println!("exported to {}", written.display());
        }
        Commands::ClearReports => {
            manager.clear_all_reports().map_err(AppError::from)?;
            println!("all reports cleared");
        }
        // handled before the database is opened
        Commands::Calc { .. } => {}
    }

    Ok(())
}
