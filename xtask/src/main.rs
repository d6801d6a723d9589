use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

const LAMBDA_PACKAGE: &str = "sample_lambda";
const LAMBDA_BINARY: &str = "sample_lambda";
const DIST_DIR: &str = "dist";

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the common framework workspace",
    long_about = "A unified CLI for running tests, benchmarks, CI checks,\n\
                  and packaging the sample lambda."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all workspace tests
    Test,
    /// Run Criterion benchmarks for the framework helpers
    Bench,
    /// Run CI checks (fmt, clippy, tests, benchmarks)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
    /// Build the sample lambda and package it as a `bootstrap` zip
    ServerlessPackage {
        /// Compilation target triple for the Lambda binary
        #[arg(long, default_value = "x86_64-unknown-linux-gnu")]
        target: String,
        /// Build profile used for the binary
        #[arg(value_enum, long, default_value_t = BuildProfile::Release)]
        profile: BuildProfile,
    },
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting, clippy, and tests
    Check,
    /// Run benchmarks
    Bench,
    /// Run check + bench
    All,
}

#[derive(Clone, Copy, ValueEnum)]
enum BuildProfile {
    Debug,
    Release,
}

impl BuildProfile {
    fn dir_name(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
        }
    }

    fn as_cargo_flag(self) -> Option<&'static str> {
        match self {
            Self::Debug => None,
            Self::Release => Some("--release"),
        }
    }
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn cargo(args: &[&str]) -> ExitStatus {
    eprintln!("+ cargo {}", args.join(" "));
    Command::new("cargo")
        .args(args)
        .status()
        .expect("failed to execute cargo")
}

fn run_cargo(args: &[&str]) {
    let status = cargo(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn package_serverless_lambda(target: &str, profile: BuildProfile) {
    ensure_rust_target_installed(target);

    step("Build sample lambda binary");

    let mut cargo_args = vec![
        "build",
        "-p",
        LAMBDA_PACKAGE,
        "--target",
        target,
        "--bin",
        LAMBDA_BINARY,
    ];
    if let Some(flag) = profile.as_cargo_flag() {
        cargo_args.push(flag);
    }
    run_cargo(&cargo_args);

    step("Package lambda zip artifact");
    let target_dir = Path::new("target").join(target).join(profile.dir_name());
    let dist_dir = Path::new(DIST_DIR);
    fs::create_dir_all(dist_dir).expect("failed to create lambda dist directory");

    let zip_path = dist_dir.join(format!("{LAMBDA_BINARY}.zip"));
    package_lambda_zip(&target_dir.join(LAMBDA_BINARY), &zip_path);

    eprintln!("\nPackaged artifact:\n- {}", zip_path.display());
}

/// A missing rustup only warns; a missing target exits.
fn ensure_rust_target_installed(target: &str) {
    let output = match Command::new("rustup")
        .args(["target", "list", "--installed"])
        .output()
    {
        Ok(output) if output.status.success() => output,
        Ok(output) => {
            eprintln!(
                "warning: `rustup target list --installed` failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return;
        }
        Err(error) => {
            eprintln!("warning: could not run rustup ({error}); skipping target preflight");
            return;
        }
    };

    let installed = String::from_utf8_lossy(&output.stdout);
    if !installed.lines().any(|line| line.trim() == target) {
        eprintln!("error: rust target `{target}` is not installed; run `rustup target add {target}`");
        exit(1);
    }
}

/// The provided.al2023 runtime executes an entry named `bootstrap`.
fn package_lambda_zip(binary_path: &Path, zip_path: &Path) {
    let binary = fs::read(binary_path).unwrap_or_else(|error| {
        panic!("failed to read lambda binary '{}': {error}", binary_path.display())
    });
    let file = fs::File::create(zip_path).expect("failed to create lambda zip");
    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o755);
    zip.start_file("bootstrap", options)
        .expect("failed to start bootstrap entry in lambda zip");
    zip.write_all(&binary)
        .expect("failed to write bootstrap entry");
    zip.finish().expect("failed to finish lambda zip");
}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_check() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);

    step("Test test_common_framework");
    run_cargo(&["test", "-p", "test_common_framework"]);

    step("Test sample_lambda");
    run_cargo(&["test", "-p", LAMBDA_PACKAGE]);
}

fn ci_bench() {
    step("Run benchmarks");
    run_cargo(&["bench", "--package", "test_common_framework", "--bench", "helpers"]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Test => {
            run_cargo(&["test", "--workspace"]);
        }
        Commands::Bench => ci_bench(),
        Commands::Ci { job } => {
            match job {
                CiJob::Check => ci_check(),
                CiJob::Bench => ci_bench(),
                CiJob::All => {
                    ci_check();
                    ci_bench();
                }
            }
            eprintln!("\nCI job passed.");
        }
        Commands::ServerlessPackage { target, profile } => {
            package_serverless_lambda(&target, profile);
        }
    }
}
