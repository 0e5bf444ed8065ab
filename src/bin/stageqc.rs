use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "stageqc", version, about = "Check media against a multi-screen stage layout")]
struct Cli {
    /// Log debug details to stderr (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check image/video files against the stage resolution.
    Check(CheckArgs),
    /// Print stage zones projected onto a display surface, as JSON.
    Layout(LayoutArgs),
    /// Print the validated stage geometry, as JSON.
    Stage(StageArgs),
}

#[derive(Args, Debug)]
struct StageOpt {
    /// Stage definition JSON (default: 4140x1080 five-screen stage).
    #[arg(long)]
    stage: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Files to check (png, jpg, jpeg, mp4, mov, m4v).
    #[arg(required = true)]
    files: Vec<PathBuf>,

    #[command(flatten)]
    stage: StageOpt,

    /// Emit a JSON array instead of text.
    #[arg(long)]
    json: bool,

    /// Treat the WARNING tier (right aspect ratio, wrong resolution) as a failure.
    #[arg(long)]
    deny_warnings: bool,
}

#[derive(Args, Debug)]
struct LayoutArgs {
    /// Display surface size, WIDTHxHEIGHT.
    #[arg(long)]
    surface: stageqc::Dimensions,

    /// Asset size, WIDTHxHEIGHT.
    #[arg(long)]
    asset: stageqc::Dimensions,

    #[command(flatten)]
    stage: StageOpt,
}

#[derive(Args, Debug)]
struct StageArgs {
    #[command(flatten)]
    stage: StageOpt,

    /// Print the default stage definition (a starting point for --stage files).
    #[arg(long, conflicts_with = "stage")]
    dump_default: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Layout(args) => cmd_layout(args).map(|()| ExitCode::SUCCESS),
        Command::Stage(args) => cmd_stage(args).map(|()| ExitCode::SUCCESS),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "stageqc=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_stage(opt: &StageOpt) -> anyhow::Result<stageqc::StageSpec> {
    match &opt.stage {
        Some(path) => stageqc::StageSpec::from_path(path)
            .with_context(|| format!("load stage '{}'", path.display())),
        None => Ok(stageqc::StageSpec::default()),
    }
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<ExitCode> {
    let spec = load_stage(&args.stage)?;

    let mut failed = false;
    let mut json_out = Vec::with_capacity(args.files.len());
    for (idx, path) in args.files.iter().enumerate() {
        match stageqc::check_file(path, &spec) {
            Ok(report) => {
                failed |= match report.tier {
                    stageqc::QcTier::Pass => false,
                    stageqc::QcTier::Warning => args.deny_warnings,
                    stageqc::QcTier::Fail => true,
                };
                if args.json {
                    json_out.push(serde_json::to_value(&report).context("serialize report")?);
                } else {
                    if idx > 0 {
                        println!();
                    }
                    println!("{report}");
                }
            }
            Err(err) => {
                failed = true;
                tracing::warn!(path = %path.display(), error = %err, "file not checked");
                if args.json {
                    json_out.push(error_entry(path, &err));
                } else {
                    if idx > 0 {
                        println!();
                    }
                    println!("[ERROR] {}\n  {err}", path.display());
                }
            }
        }
    }

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json_out).context("serialize reports")?
        );
    }
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn error_entry(path: &Path, err: &stageqc::StageQcError) -> serde_json::Value {
    serde_json::json!({
        "file_name": path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string()),
        "error": err.to_string(),
    })
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let spec = load_stage(&args.stage)?;
    if !args.asset.is_positive() {
        anyhow::bail!("asset dimensions must be > 0, got {}", args.asset);
    }
    let layout = stageqc::project(&spec, args.surface.to_size(), args.asset);
    println!(
        "{}",
        serde_json::to_string_pretty(&layout).context("serialize layout")?
    );
    Ok(())
}

fn cmd_stage(args: StageArgs) -> anyhow::Result<()> {
    let out = if args.dump_default {
        serde_json::to_string_pretty(&stageqc::StageDef::five_screen())
    } else {
        serde_json::to_string_pretty(&load_stage(&args.stage)?)
    }
    .context("serialize stage")?;
    println!("{out}");
    Ok(())
}
