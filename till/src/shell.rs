//! Line-oriented operator shell
//!
//! Each input line is parsed into a [`ShellCommand`] and executed against the
//! [`TillManager`]. Errors are printed as notices; none of them end the
//! session.

use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::order::LineItem;
use shared::report::{ReportKind, ReportRow};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::calculator;
use crate::manager::TillManager;

pub const HELP: &str = "\
commands:
  tables                   list tables and their running bills
  add-table                create the next table
  select <table>           select a table (id or number)
  add <name> <price>       add one unit of an item
  remove <name>            remove an item line
  clear                    empty the pending order
  order                    show the pending order
  confirm                  move the pending order to the table
  rows [table]             show a table's confirmed rows
  save [table]             save a table into the reports
  report [daily|monthly]   show a report
  export [path]            write the report export
  clear-reports            erase all reports
  calc <expr>              evaluate arithmetic
  help                     show this help
  quit                     leave the shell";

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Tables,
    AddTable,
    Select(String),
    Add { name: String, price: Decimal },
    Remove(String),
    Clear,
    Order,
    Confirm,
    Rows(Option<String>),
    Save(Option<String>),
    Report(ReportKind),
    Export(Option<PathBuf>),
    ClearReports,
    Calc(String),
    Help,
    Quit,
}

/// `3` and `table-3` both name the third table
fn table_id(arg: &str) -> String {
    if arg.chars().all(|c| c.is_ascii_digit()) {
        format!("table-{}", arg)
    } else {
        arg.to_string()
    }
}

fn usage(text: &str) -> AppError {
    AppError::validation(format!("usage: {}", text))
}

impl ShellCommand {
    /// Parse one input line; blank lines yield `None`
    pub fn parse(line: &str) -> Result<Option<Self>, AppError> {
        let line = line.trim();
        let Some((verb, rest)) = line
            .split_once(char::is_whitespace)
            .map(|(v, r)| (v, r.trim()))
            .or_else(|| (!line.is_empty()).then_some((line, "")))
        else {
            return Ok(None);
        };
        let arg = (!rest.is_empty()).then(|| rest.to_string());

        let cmd = match verb.to_ascii_lowercase().as_str() {
            "tables" => Self::Tables,
            "add-table" => Self::AddTable,
            "select" => Self::Select(table_id(&arg.ok_or_else(|| usage("select <table>"))?)),
            "add" => {
                let (name, price) = rest
                    .rsplit_once(char::is_whitespace)
                    .ok_or_else(|| usage("add <name> <price>"))?;
                let price = price.trim().parse::<Decimal>().map_err(|_| {
                    AppError::with_message(
                        ErrorCode::InvalidFormat,
                        format!("not a price: {}", price.trim()),
                    )
                })?;
                Self::Add {
                    name: name.trim().to_string(),
                    price,
                }
            }
            "remove" => Self::Remove(arg.ok_or_else(|| usage("remove <name>"))?),
            "clear" => Self::Clear,
            "order" => Self::Order,
            "confirm" => Self::Confirm,
            "rows" => Self::Rows(arg.as_deref().map(table_id)),
            "save" => Self::Save(arg.as_deref().map(table_id)),
            "report" => Self::Report(match arg {
                Some(kind) => kind
                    .parse()
                    .map_err(|e: String| AppError::with_message(ErrorCode::InvalidFormat, e))?,
                None => ReportKind::Daily,
            }),
            "export" => Self::Export(arg.map(PathBuf::from)),
            "clear-reports" => Self::ClearReports,
            "calc" => Self::Calc(arg.ok_or_else(|| usage("calc <expr>"))?),
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => {
                return Err(AppError::with_message(
                    ErrorCode::InvalidFormat,
                    format!("unknown command: {} (try `help`)", other),
                ));
            }
        };
        Ok(Some(cmd))
    }
}

// ========== Rendering ==========

pub fn render_lines(lines: &[LineItem]) -> String {
    if lines.is_empty() {
        return "(empty)".to_string();
    }
    lines
        .iter()
        .map(|l| format!("{:<20} x{:<4} {:>10}", l.name, l.qty, l.total_price))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_report(kind: ReportKind, rows: &[ReportRow]) -> String {
    if rows.is_empty() {
        return format!("no {} report yet", kind.label());
    }
    rows.iter()
        .map(|r| {
            format!(
                "{:<16} {:<20} x{:<4} {:>10}",
                r.period_key, r.name, r.qty, r.total_price
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_notice(err: &AppError) -> String {
    format!("! [{}] {}", err.code.code(), err.message)
}

// ========== Execution ==========

pub struct Shell {
    manager: TillManager,
    export_path: PathBuf,
}

/// What the shell should do after a command
#[derive(Debug, PartialEq)]
pub enum Flow {
    Continue(String),
    Quit,
}

impl Shell {
    pub fn new(manager: TillManager, export_path: PathBuf) -> Self {
        Self {
            manager,
            export_path,
        }
    }

    pub fn manager(&self) -> &TillManager {
        &self.manager
    }

    fn target_table(&self, arg: Option<String>) -> Result<String, AppError> {
        arg.or_else(|| self.manager.active_table().map(str::to_string))
            .ok_or_else(|| AppError::new(ErrorCode::NoTableSelected))
    }

    /// Execute one command
    pub fn execute(&mut self, cmd: ShellCommand) -> Result<Flow, AppError> {
        let out = match cmd {
            ShellCommand::Tables => self
                .manager
                .tables()
                .iter()
                .map(|t| {
                    let marker = if self.manager.active_table() == Some(t.id.as_str()) {
                        "*"
                    } else {
                        " "
                    };
                    format!("{} {:<10} rows={:<3} bill={}", marker, t.id, t.rows.len(), t.total())
                })
                .collect::<Vec<_>>()
                .join("\n"),
            ShellCommand::AddTable => format!("added {}", self.manager.add_table()?),
            ShellCommand::Select(id) => {
                self.manager.select_table(&id)?;
                format!("selected {}", id)
            }
            ShellCommand::Add { name, price } => {
                let line = self.manager.add_item(&name, price)?;
                format!("{} x{} = {}", line.name, line.qty, line.total_price)
            }
            ShellCommand::Remove(name) => {
                if self.manager.remove_item(&name) {
                    format!("removed {}", name)
                } else {
                    format!("{} is not in the order", name)
                }
            }
            ShellCommand::Clear => {
                self.manager.clear_order();
                "order cleared".to_string()
            }
            ShellCommand::Order => {
                let order = self.manager.order_snapshot();
                format!("{}\ntotal: {}", render_lines(&order.lines), order.total)
            }
            ShellCommand::Confirm => {
                let appended = self.manager.confirm_order()?;
                format!("confirmed {} line(s)", appended)
            }
            ShellCommand::Rows(arg) => {
                let id = self.target_table(arg)?;
                render_lines(self.manager.table_rows(&id)?)
            }
            ShellCommand::Save(arg) => {
                let id = self.target_table(arg)?;
                let summary = self.manager.save_and_clear_table(&id)?;
                format!(
                    "saved {} ({} rows, {}) into {} / {}",
                    summary.table_id,
                    summary.rows,
                    summary.total,
                    summary.keys.daily,
                    summary.keys.monthly
                )
            }
            ShellCommand::Report(kind) => render_report(kind, &self.manager.report_rows(kind)),
            ShellCommand::Export(path) => {
                let path = path.unwrap_or_else(|| self.export_path.clone());
                let written = self.manager.export_to_file(&path)?;
                format!("exported to {}", written.display())
            }
            ShellCommand::ClearReports => {
                self.manager.clear_all_reports()?;
                "all reports cleared".to_string()
            }
            ShellCommand::Calc(expr) => calculator::evaluate(&expr)?.to_string(),
            ShellCommand::Help => HELP.to_string(),
            ShellCommand::Quit => return Ok(Flow::Quit),
        };
        Ok(Flow::Continue(out))
    }

    /// Read commands until EOF or `quit`
    pub fn run(&mut self, input: impl BufRead, mut output: impl Write) -> std::io::Result<()> {
        for notice in self.manager.startup_notices() {
            writeln!(output, "{}", render_notice(notice))?;
        }
        writeln!(output, "till ready, type `help` for commands")?;

        for line in input.lines() {
            let line = line?;
            let result = ShellCommand::parse(&line).and_then(|cmd| match cmd {
                Some(cmd) => self.execute(cmd),
                None => Ok(Flow::Continue(String::new())),
            });
            match result {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue(text)) if text.is_empty() => {}
                Ok(Flow::Continue(text)) => writeln!(output, "{}", text)?,
                Err(e) => writeln!(output, "{}", render_notice(&e))?,
            }
        }
        Ok(())
    }
}
