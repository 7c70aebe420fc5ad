use bcr_ebill_client::constants::{DEFAULT_LEDGER_URL, DEFAULT_REQUEST_TIMEOUT_SECS};
use bcr_ebill_core::balance::BillsFilterRole;
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;

#[derive(Debug, Clone, Parser)]
#[command(version, about = "Bitcredit E-Bill client")]
pub struct Config {
    /// Base URL of the ledger HTTP API
    #[arg(long, env = "BCR_LEDGER_URL", default_value_t = DEFAULT_LEDGER_URL.to_string())]
    pub ledger_url: String,

    /// Sent to the ledger as a bearer token
    #[arg(long, env = "BCR_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    #[arg(long, env = "BCR_REQUEST_TIMEOUT_SECS", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub request_timeout_secs: u64,

    #[arg(long, env = "BCR_LOG_LEVEL", default_value = "warn")]
    pub log_level: LogLevel,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show, create or change the local identity
    #[command(subcommand)]
    Identity(IdentityCommand),
    /// Manage contacts
    #[command(subcommand)]
    Contacts(ContactsCommand),
    /// List bills, newest first
    Bills {
        #[arg(long, value_enum, default_value = "all")]
        role: RoleArg,
    },
    /// Show or act on a single bill
    #[command(subcommand)]
    Bill(BillCommand),
    /// Issue a new bill
    Issue(IssueArgs),
    /// Show the sums of all bills per role
    Balance,
    /// List the operation codes the ledger knows
    Opcodes,
}

#[derive(Debug, Clone, Subcommand)]
pub enum IdentityCommand {
    Show,
    Create(IdentityArgs),
    Change(IdentityArgs),
}

#[derive(Debug, Clone, Args)]
pub struct IdentityArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    /// yyyy-mm-dd
    #[arg(long)]
    pub date_of_birth: String,
    #[arg(long)]
    pub city_of_birth: String,
    #[arg(long)]
    pub country_of_birth: String,
    #[arg(long)]
    pub postal_address: String,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum ContactsCommand {
    List,
    Add {
        name: String,
        peer_id: String,
    },
    Edit {
        old_name: String,
        name: String,
        peer_id: String,
    },
    Remove {
        name: String,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum BillCommand {
    Show { name: String },
    /// Show the chain of custody
    Chain { name: String },
    /// List the actions the local peer may take
    Actions { name: String },
    Pay { name: String },
    Accept { name: String },
    Endorse { name: String, endorsee: String },
    Sell { name: String, buyer: String, amount: u64 },
    Buy { name: String },
    RequestToAccept { name: String },
    RequestToPay { name: String },
}

impl BillCommand {
    pub fn bill_name(&self) -> &str {
        match self {
            BillCommand::Show { name }
            | BillCommand::Chain { name }
            | BillCommand::Actions { name }
            | BillCommand::Pay { name }
            | BillCommand::Accept { name }
            | BillCommand::Endorse { name, .. }
            | BillCommand::Sell { name, .. }
            | BillCommand::Buy { name }
            | BillCommand::RequestToAccept { name }
            | BillCommand::RequestToPay { name } => name,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct IssueArgs {
    /// yyyy-mm-dd
    #[arg(long)]
    pub date_of_issue: String,
    /// yyyy-mm-dd
    #[arg(long)]
    pub maturity_date: String,
    #[arg(long)]
    pub drawer_name: String,
    #[arg(long, default_value = "")]
    pub payee_name: String,
    #[arg(long, default_value = "")]
    pub drawee_name: String,
    #[arg(long)]
    pub drawer_is_payee: bool,
    #[arg(long)]
    pub drawer_is_drawee: bool,
    #[arg(long)]
    pub amount: u64,
    #[arg(long, default_value = "sat")]
    pub currency_code: String,
    #[arg(long)]
    pub place_of_drawing: String,
    #[arg(long)]
    pub place_of_payment: String,
    #[arg(long)]
    pub bill_jurisdiction: String,
    #[arg(long, default_value = "en")]
    pub language: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    All,
    Payee,
    Drawer,
    Drawee,
}

impl From<RoleArg> for BillsFilterRole {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::All => BillsFilterRole::All,
            RoleArg::Payee => BillsFilterRole::Payee,
            RoleArg::Drawer => BillsFilterRole::Drawer,
            RoleArg::Drawee => BillsFilterRole::Drawee,
        }
    }
}
