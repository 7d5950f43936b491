mod cli;
mod config;
mod core;
mod store;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use crate::cli::{AssessArgs, Cli, Commands, ListArgs, ShowArgs, SubmissionsSubcommand};
use crate::config::{CONFIG_FILE_NAME, Config, load_config, write_default_config};
use crate::core::input::read_submission;
use crate::core::report::{self, JsonReport};
use crate::store::{NewSubmission, SubmissionStore, open_store, parse_submission_id};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    init_tracing();

    let exit_code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            2
        }
    };

    std::process::exit(exit_code);
}

/// `RATEMYSTARTUP_LOG` takes an `EnvFilter` directive;
/// `RATEMYSTARTUP_LOG_FORMAT=json` switches to machine-readable lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("RATEMYSTARTUP_LOG")
        .unwrap_or_else(|_| EnvFilter::new("ratemystartup=warn"));
    let json = std::env::var("RATEMYSTARTUP_LOG_FORMAT").is_ok_and(|format| format == "json");

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Assess(args) => run_assess(args),
        Commands::Init(args) => {
            if args.config.is_some() {
                eprintln!(
                    "warning: --config is ignored by `ratemystartup init`; writing ./{}",
                    CONFIG_FILE_NAME
                );
            }

            let path = std::env::current_dir()?.join(CONFIG_FILE_NAME);
            write_default_config(&path)?;
            println!("created {}", path.display());
            Ok(0)
        }
        Commands::Submissions { command } => match command {
            SubmissionsSubcommand::List(args) => run_list(args),
            SubmissionsSubcommand::Show(args) => run_show(args),
        },
    }
}

struct Session {
    config: Config,
    store: Box<dyn SubmissionStore>,
}

fn open_session(config_path: Option<&std::path::Path>) -> Result<Session> {
    let cwd = std::env::current_dir()?;
    let loaded = load_config(config_path, &cwd)?;
    if let Some(source) = &loaded.source {
        info!(path = %source.display(), "loaded config");
    }

    let store = open_store(&loaded.config, &cwd);
    info!(backend = store.name(), "opened submission store");
    Ok(Session {
        config: loaded.config,
        store,
    })
}

fn run_assess(args: AssessArgs) -> Result<i32> {
    let session = open_session(args.common.config.as_deref())?;
    let partial = read_submission(&args.input)?;
    let assessment = crate::core::assess(partial, &session.config.scoring_params())
        .with_context(|| format!("invalid submission {}", args.input.display()))?;

    let submission_id = if args.save {
        let user_id = args
            .user
            .unwrap_or_else(|| session.config.general.default_user.clone());
        let id = session
            .store
            .save(NewSubmission {
                user_id,
                input: assessment.input.clone(),
                result: assessment.result.clone(),
            })
            .context("failed to save submission")?;
        Some(id)
    } else {
        None
    };

    if args.common.json || session.config.general.json {
        let json_report = JsonReport::new(
            assessment.input.company_name.clone(),
            &assessment.result,
            submission_id,
        );
        println!("{}", serde_json::to_string_pretty(&json_report)?);
    } else {
        report::print_human(&assessment.input.company_name, &assessment.result);
        if let Some(id) = submission_id {
            println!();
            println!("saved as {}", id);
        }
    }

    Ok(0)
}

fn run_list(args: ListArgs) -> Result<i32> {
    let session = open_session(args.common.config.as_deref())?;
    let user_id = args
        .user
        .unwrap_or_else(|| session.config.general.default_user.clone());
    let records = session.store.list_by_user(&user_id)?;

    if args.common.json || session.config.general.json {
        let reports: Vec<JsonReport> = records.iter().map(JsonReport::from).collect();
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        report::print_submission_list(&user_id, &records);
    }

    Ok(0)
}

fn run_show(args: ShowArgs) -> Result<i32> {
    let session = open_session(args.common.config.as_deref())?;
    let id = parse_submission_id(&args.id)?;
    let record = session.store.get_by_id(id)?;

    if args.common.json || session.config.general.json {
        println!("{}", serde_json::to_string_pretty(&JsonReport::from(&record))?);
    } else {
        println!(
            "submission {} by {} at {}",
            record.id,
            record.user_id,
            record.created_at.to_rfc3339()
        );
        println!();
        report::print_human(&record.input.company_name, &record.result);
    }

    Ok(0)
}
