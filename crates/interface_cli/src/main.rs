//! Obligation Ledger - Terminal Interface
//!
//! Thin presentation layer over the ledger core: subcommands map one-to-one
//! onto the company registry, the operation lifecycle engine, and the
//! financial rollup engine. No business rule lives here.
//!
//! # Usage
//!
//! ```bash
//! ledger company add --name "Acme Supplies" --tax-id 98-7654321
//! ledger op add --kind purchase --company CMP-... --amount 1500.00 --term-days 30
//! ledger op settle OPR-...
//! ledger report summary
//! ```
//!
//! # Environment Variables
//!
//! * `LEDGER_DATABASE_URL` - PostgreSQL connection string
//! * `LEDGER_LOG_LEVEL` - Log level: trace, debug, info, warn, error

mod config;
mod render;

use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use core_kernel::{Clock, CompanyId, OperationId, SystemClock};
use domain_ledger::{
    CompanyService, CreateOperation, OperationFilter, OperationKind, OperationService,
    OperationStatus, RollupService,
};
use infra_db::{create_pool_from_url, run_migrations, PostgresLedgerStore};

use crate::config::CliConfig;

#[derive(Parser, Debug)]
#[command(name = "ledger")]
#[command(about = "Accounts payable/receivable obligation ledger")]
struct Cli {
    /// Emit JSON instead of plain text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage counterparty companies
    Company {
        #[command(subcommand)]
        command: CompanyCommand,
    },
    /// Record and transition purchase/sale operations
    Op {
        #[command(subcommand)]
        command: OpCommand,
    },
    /// Financial reports derived from the current operation set
    Report {
        #[command(subcommand)]
        command: ReportCommand,
    },
}

#[derive(Subcommand, Debug)]
enum CompanyCommand {
    /// Register a new company
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        tax_id: Option<String>,
    },
    /// List companies (active only unless --all)
    List {
        #[arg(long)]
        all: bool,
    },
    /// Deactivate a company; its operations stay untouched
    Deactivate { id: CompanyId },
}

#[derive(Subcommand, Debug)]
enum OpCommand {
    /// Record a new operation
    Add {
        #[arg(long, value_enum)]
        kind: KindArg,
        #[arg(long)]
        company: CompanyId,
        #[arg(long)]
        amount: Decimal,
        /// Days until due (default 7)
        #[arg(long)]
        term_days: Option<u32>,
        /// Operation date (default today)
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Settle an open operation
    Settle {
        id: OperationId,
        /// Settlement date (default today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Cancel an open operation
    Cancel { id: OperationId },
    /// Show one operation
    Show { id: OperationId },
    /// List operations, due date ascending
    List {
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
        #[arg(long)]
        company: Option<CompanyId>,
    },
}

#[derive(Subcommand, Debug)]
enum ReportCommand {
    /// Accounts payable (open purchases unless --all)
    Payables {
        #[arg(long)]
        all: bool,
    },
    /// Accounts receivable (open sales unless --all)
    Receivables {
        #[arg(long)]
        all: bool,
    },
    /// Open operations strictly past their due date
    Overdue {
        /// Reference date (default today)
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
    /// Aggregate payable/receivable/overdue figures
    Summary {
        /// Reference date (default today)
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Purchase,
    Sale,
}

impl From<KindArg> for OperationKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Purchase => OperationKind::Purchase,
            KindArg::Sale => OperationKind::Sale,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StatusArg {
    Open,
    Settled,
    Canceled,
}

impl From<StatusArg> for OperationStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Open => OperationStatus::Open,
            StatusArg::Settled => OperationStatus::Settled,
            StatusArg::Canceled => OperationStatus::Canceled,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present, useful for local development
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = CliConfig::from_env()?;
    init_tracing(&config.log_level);

    let pool = create_pool_from_url(&config.database_url).await?;
    run_migrations(&pool).await?;

    let store = Arc::new(PostgresLedgerStore::new(pool));
    let clock = Arc::new(SystemClock);

    let companies = CompanyService::new(store.clone());
    let operations = OperationService::new(store.clone(), clock.clone());
    let reports = RollupService::new(store);

    match cli.command {
        Command::Company { command } => match command {
            CompanyCommand::Add { name, tax_id } => {
                let company = companies.register(&name, tax_id).await?;
                emit(cli.json, &company, || render::company_line(&company));
            }
            CompanyCommand::List { all } => {
                let listed = companies.list(!all).await?;
                emit_list(cli.json, &listed, render::company_line);
            }
            CompanyCommand::Deactivate { id } => {
                if companies.deactivate(id).await? {
                    println!("company {id} deactivated");
                } else {
                    refuse(&format!("company {id} not found"));
                }
            }
        },
        Command::Op { command } => match command {
            OpCommand::Add {
                kind,
                company,
                amount,
                term_days,
                date,
                description,
                notes,
            } => {
                let mut request = CreateOperation::new(kind.into(), company, amount);
                request.term_days = term_days;
                request.operation_date = date;
                request.description = description;
                request.notes = notes;

                let operation = operations.create(request).await?;
                emit(cli.json, &operation, || render::operation_line(&operation));
            }
            OpCommand::Settle { id, date } => {
                if operations.settle(id, date).await? {
                    println!("operation {id} settled");
                } else {
                    refuse(&format!("operation {id} not found or not open"));
                }
            }
            OpCommand::Cancel { id } => {
                if operations.cancel(id).await? {
                    println!("operation {id} canceled");
                } else {
                    refuse(&format!("operation {id} not found or not open"));
                }
            }
            OpCommand::Show { id } => match operations.get(id).await? {
                Some(operation) => {
                    emit(cli.json, &operation, || render::operation_line(&operation))
                }
                None => refuse(&format!("operation {id} not found")),
            },
            OpCommand::List {
                status,
                kind,
                company,
            } => {
                let filter = OperationFilter {
                    status: status.map(Into::into),
                    kind: kind.map(Into::into),
                    company_id: company,
                };
                let listed = operations.list(filter).await?;
                emit_list(cli.json, &listed, render::operation_line);
            }
        },
        Command::Report { command } => match command {
            ReportCommand::Payables { all } => {
                let listed = reports.payables(!all).await?;
                emit_list(cli.json, &listed, render::operation_line);
            }
            ReportCommand::Receivables { all } => {
                let listed = reports.receivables(!all).await?;
                emit_list(cli.json, &listed, render::operation_line);
            }
            ReportCommand::Overdue { as_of } => {
                let today = as_of.unwrap_or_else(|| clock.today());
                let listed = reports.overdue(today).await?;
                emit_list(cli.json, &listed, render::operation_line);
            }
            ReportCommand::Summary { as_of } => {
                let today = as_of.unwrap_or_else(|| clock.today());
                let summary = reports.summary(today).await?;
                emit(cli.json, &summary, || render::summary_block(&summary));
            }
        },
    }

    Ok(())
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn emit<T: Serialize>(json: bool, record: &T, line: impl FnOnce() -> String) {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(record).expect("records serialize")
        );
    } else {
        println!("{}", line());
    }
}

fn emit_list<T: Serialize>(json: bool, records: &[T], line: impl Fn(&T) -> String) {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(records).expect("records serialize")
        );
    } else if records.is_empty() {
        println!("(none)");
    } else {
        for record in records {
            println!("{}", line(record));
        }
    }
}

/// Reports a refused mutation and exits non-zero so scripts can branch
fn refuse(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}
