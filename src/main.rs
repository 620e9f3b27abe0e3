//! Command-line diagnostics for the email agent's guard utilities.
//!
//! # Usage
//!
//! ```bash
//! # Classify an address the way contact research does
//! cargo run -- check email jane@acme.com
//!
//! # Check a domain against the SSRF block list (JSON output)
//! cargo run -- check domain intranet.corp --json
//!
//! # Persist a setup flag
//! cargo run -- env set LINKED_GMAIL true
//!
//! # Show effective configuration
//! cargo run -- config
//! ```
//!
//! # Environment Variables
//!
//! See [`email_agent_guard::config`] for the full list. A `.env` file in the
//! working directory is loaded first.

use email_agent_guard::config::{self, Config};
use email_agent_guard::domain::{
    DomainClassifier, ResearchTarget, extract_domain, validate_email_syntax,
};
use email_agent_guard::infrastructure::EnvFile;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Diagnostics for email classification, SSRF checks and setup flags.
#[derive(Parser)]
#[command(name = "email-agent")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Classify emails and domains
    Check {
        #[command(subcommand)]
        target: CheckTarget,
    },

    /// Manage persistent flags in the env file
    Env {
        #[command(subcommand)]
        action: EnvAction,
    },

    /// Show effective configuration
    Config,
}

/// Classification subcommands.
#[derive(Subcommand)]
enum CheckTarget {
    /// Validate an address and decide whether its domain may be researched
    Email {
        address: String,

        /// Print a JSON report instead of text
        #[arg(long)]
        json: bool,
    },

    /// Check a domain against the SSRF block list
    Domain {
        domain: String,

        /// Print a JSON report instead of text
        #[arg(long)]
        json: bool,
    },
}

/// Env flag subcommands.
#[derive(Subcommand)]
enum EnvAction {
    /// Set a flag, replacing any existing value
    Set {
        key: String,
        value: String,

        /// Env file to write (defaults to EMAIL_AGENT_ENV_FILE or .env)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Skip confirmation when overwriting an existing value
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Print the value of a flag
    Get {
        key: String,

        /// Env file to read (defaults to EMAIL_AGENT_ENV_FILE or .env)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct EmailReport<'a> {
    email: &'a str,
    valid_syntax: bool,
    domain: Option<String>,
    personal: bool,
    research: ResearchTarget,
}

#[derive(Serialize)]
struct DomainReport<'a> {
    domain: &'a str,
    safe: bool,
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;
    init_tracing(&config);

    let classifier = DomainClassifier::global();

    match cli.command {
        Commands::Check { target } => match target {
            CheckTarget::Email { address, json } => check_email(classifier, &address, json)?,
            CheckTarget::Domain { domain, json } => check_domain(classifier, &domain, json)?,
        },
        Commands::Env { action } => handle_env_action(action, &config)?,
        Commands::Config => show_config(&config),
    }

    Ok(())
}

/// Installs the global subscriber. Logs go to stderr so JSON reports on
/// stdout stay machine-readable.
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Prints syntax, domain, provider and research decision for an address.
fn check_email(classifier: &DomainClassifier, address: &str, json: bool) -> Result<()> {
    let report = EmailReport {
        email: address,
        valid_syntax: validate_email_syntax(address),
        domain: extract_domain(address),
        personal: classifier.is_personal_email(address),
        research: classifier.research_target(address),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", "📧 Email Check".bright_blue().bold());
    println!();
    println!("  Address:  {}", address.cyan());
    println!("  Syntax:   {}", yes_no(report.valid_syntax, "valid", "invalid"));
    println!(
        "  Domain:   {}",
        match &report.domain {
            Some(d) if d.is_empty() => "(empty)".yellow(),
            Some(d) => d.as_str().cyan(),
            None => "(none)".red(),
        }
    );
    println!("  Personal: {}", if report.personal { "yes".yellow() } else { "no".green() });
    println!();

    let decision = match &report.research {
        ResearchTarget::InvalidEmail => "❌ Invalid email, nothing to research".red(),
        ResearchTarget::PersonalDomain { domain } => {
            format!("ℹ️  Personal email domain ({domain}), no company website").yellow()
        }
        ResearchTarget::Blocked { domain } => {
            format!("⛔ {domain} is blocked for security").red().bold()
        }
        ResearchTarget::Fetch { url, .. } => format!("✅ Safe to research: {url}").green().bold(),
    };
    println!("  {decision}");
    println!();

    Ok(())
}

/// Prints whether a domain passes the SSRF guard.
fn check_domain(classifier: &DomainClassifier, domain: &str, json: bool) -> Result<()> {
    let report = DomainReport {
        domain,
        safe: classifier.is_safe_domain(domain),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", "🛡️  Domain Check".bright_blue().bold());
    println!();
    println!("  Domain: {}", domain.trim().cyan());
    println!("  Status: {}", yes_no(report.safe, "SAFE", "BLOCKED"));
    println!();

    Ok(())
}

/// Dispatches env flag commands.
fn handle_env_action(action: EnvAction, config: &Config) -> Result<()> {
    match action {
        EnvAction::Set {
            key,
            value,
            file,
            yes,
        } => {
            let env_file = EnvFile::new(file.unwrap_or_else(|| config.env_file.clone()));
            set_flag(&env_file, &key, &value, yes)?;
        }
        EnvAction::Get { key, file } => {
            let env_file = EnvFile::new(file.unwrap_or_else(|| config.env_file.clone()));
            let value = env_file
                .get_flag(&key)
                .with_context(|| format!("Failed to read {}", env_file.path().display()))?;

            match value {
                Some(v) => println!("{v}"),
                None => {
                    eprintln!(
                        "{}",
                        format!("⚠️  {key} is not set in {}", env_file.path().display()).yellow()
                    );
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

/// Writes a flag, asking before overwriting a different existing value
/// (unless `--yes`).
fn set_flag(env_file: &EnvFile, key: &str, value: &str, skip_confirm: bool) -> Result<()> {
    let current = env_file
        .get_flag(key)
        .with_context(|| format!("Failed to read {}", env_file.path().display()))?;

    if let Some(current) = &current {
        if current == value {
            println!("{}", format!("✨ {key} is already {value}").green());
            return Ok(());
        }

        if !skip_confirm {
            let confirmed = Confirm::new()
                .with_prompt(format!("Overwrite {key} (currently '{current}')?"))
                .default(false)
                .interact()?;

            if !confirmed {
                println!("{}", "❌ Cancelled".red());
                return Ok(());
            }
        }
    }

    env_file
        .set_flag(key, value)
        .with_context(|| format!("Failed to set {key}"))?;

    println!(
        "{} {}={} in {}",
        "✅ Set".green().bold(),
        key.cyan(),
        value.bright_yellow(),
        env_file.path().display()
    );

    Ok(())
}

/// Prints the effective configuration.
fn show_config(config: &Config) {
    let policy = config.retry_policy();
    let delays: Vec<String> = policy
        .schedule()
        .map(|d| format!("{:.2}s", d.as_secs_f64()))
        .collect();

    println!("{}", "⚙️  Configuration".bright_blue().bold());
    println!();
    println!(
        "  Retry attempts:    {}",
        policy.max_attempts().to_string().bright_white().bold()
    );
    println!(
        "  Backoff delays:    {}",
        if delays.is_empty() {
            "(none)".bright_black()
        } else {
            delays.join(", ").bright_white()
        }
    );
    println!("  Max page content:  {}", config.max_page_content);
    println!("  Max email preview: {}", config.max_email_preview);
    println!("  Max body preview:  {}", config.max_body_preview);
    println!("  Env file:          {}", config.env_file.display().to_string().cyan());
    println!("  Log level:         {}", config.log_level);
    println!("  Log format:        {}", config.log_format);
    println!();

    config.print_summary();
}

fn yes_no(ok: bool, good: &str, bad: &str) -> ColoredString {
    if ok {
        good.green().bold()
    } else {
        bad.red().bold()
    }
}
