// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ftl`: the library-caller binary described in SPEC_FULL.md §6.X. Thin
//! over `ftl::controller::Controller` — all orchestration logic lives in the
//! engine-layer crates.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ftl::commands::{modules, run};
use ftl::config::{self, CliOverrides};
use ftl::error::Error;

#[derive(Parser)]
#[command(name = "ftl", version, about = "Distributed automation controller")]
struct Cli {
    /// Path to ftl.toml. Defaults to ./ftl.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Execute a module invocation across a set of target hosts.
    Run {
        /// Comma-separated host-name list (a stand-in for inventory resolution).
        #[arg(long)]
        target: String,
        /// Fully qualified or bare module name.
        #[arg(long)]
        module: String,
        /// Module arguments as a JSON object.
        #[arg(long)]
        args: Option<String>,
        #[arg(long)]
        chunk_size: Option<usize>,
        #[arg(long)]
        fail_fast: bool,
        /// Dry-run: pass check_mode through to every module.
        #[arg(long)]
        check: bool,
    },
    /// Enumerate native and discoverable external modules.
    Modules {
        #[command(subcommand)]
        command: ModulesCommand,
    },
}

#[derive(Subcommand)]
enum ModulesCommand {
    List {
        /// Extra module search roots, in addition to ftl.toml's module_roots.
        #[arg(long = "roots")]
        roots: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let filter = tracing_subscriber::EnvFilter::try_from_env("FTL_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run_cli().await {
        Ok(code) => std::process::ExitCode::from(code),
        Err(err) => {
            tracing::error!(error = %err, "ftl exited with an error");
            eprintln!("ftl: {err}");
            std::process::ExitCode::from(2)
        }
    }
}

async fn run_cli() -> Result<u8, Error> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run { target, module, args, chunk_size, fail_fast, check } => {
            let overrides = CliOverrides { chunk_size, fail_fast: fail_fast.then_some(true), dry_run: check.then_some(true), module_roots: None };
            let config = config::load(cli.config.as_deref(), overrides)?;
            let run_args = run::RunArgs { target, module, args, chunk_size, fail_fast, check };
            let code = run::run(config, run_args).await?;
            Ok(code as u8)
        }
        Command::Modules { command: ModulesCommand::List { roots } } => {
            let overrides =
                CliOverrides { module_roots: (!roots.is_empty()).then_some(roots), ..CliOverrides::default() };
            let config = config::load(cli.config.as_deref(), overrides)?;
            modules::list(&config);
            Ok(0)
        }
    }
}
