// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Command-line front end.
//!
//! Exit status: 0 when the certificate holds, 2 when it fails, 1 on any error.

use clap::{Parser, Subcommand};
use miette::{Context, IntoDiagnostic};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use collatz_cert::config::{
    AvoidanceParams, GateCycleParams, TowerParams, DEFAULT_ALPHA, DEFAULT_HORIZON, DEFAULT_LIFTS,
    DEFAULT_M0, DEFAULT_S0, DEFAULT_THRESHOLD, MIN_DEPTH,
};
use collatz_cert::engine::{
    run_certificate, AvoidanceCertificate, GateCycleCertificate, TowerCertificate, Verdict,
    EXIT_ERROR,
};
use collatz_cert::report::{self, AvoidanceOptions, WitnessFingerprint, WitnessLog};

#[derive(Debug, Parser)]
#[command(
    name = "collatz-cert",
    about = "Exhaustive finite-certificate verifiers for the odd Collatz map"
)]
struct Cli {
    /// Only log warnings and errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Print the outcome as JSON instead of the text report.
    #[arg(long, global = true)]
    json: bool,

    /// Also write the report to this file and print its SHA-256.
    #[arg(long, global = true)]
    save_output: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check that every odd residue mod 2^m0 has a spike witness.
    Avoidance {
        /// Base resolution m0.
        #[arg(long, default_value_t = DEFAULT_M0)]
        m0: u32,

        /// Horizon J (steps per lift).
        #[arg(long = "horizon", short = 'J', default_value_t = DEFAULT_HORIZON)]
        horizon: u32,

        /// Spike threshold K (b >= K).
        #[arg(long = "threshold", short = 'K', default_value_t = DEFAULT_THRESHOLD)]
        threshold: u32,

        /// Number of lifts L.
        #[arg(long, short = 'L', default_value_t = DEFAULT_LIFTS)]
        lifts: u32,

        /// Compute the SHA-256 of the witness stream.
        #[arg(long)]
        hash: bool,

        /// Print the first N witnesses.
        #[arg(long, default_value_t = 0)]
        print_sample: usize,

        /// List every survivor residue.
        #[arg(long)]
        print_survivors: bool,
    },

    /// Build and prune the truncated (T, q) tower graph.
    Tower {
        /// Base depth-control scale s0.
        #[arg(long, default_value_t = DEFAULT_S0)]
        s0: u32,

        /// Extra precision bits alpha.
        #[arg(long, default_value_t = DEFAULT_ALPHA)]
        alpha: u32,

        /// Smallest depth in the window.
        #[arg(long, default_value_t = MIN_DEPTH)]
        t_min: u32,

        /// Largest depth in the window [default: s0 + alpha + 2].
        #[arg(long)]
        t_max: Option<u32>,

        /// q is tracked modulo 2^q_bits [default: s0 + alpha].
        #[arg(long)]
        q_bits: Option<u32>,
    },

    /// Check that no eventual cycle of the lift-state map meets the gate.
    GateCycle {
        /// Residues are taken modulo 2^m.
        #[arg(long, default_value_t = DEFAULT_M0)]
        m: u32,

        /// Number of lifts (power of two).
        #[arg(long, default_value_t = DEFAULT_LIFTS)]
        lifts: u32,

        /// List the eventual cycle of every gate state.
        #[arg(long)]
        verbose: bool,
    },
}

fn render<R: serde::Serialize>(
    json: bool,
    outcome: &collatz_cert::Outcome<R>,
    text: impl FnOnce() -> String,
) -> miette::Result<String> {
    if json {
        let mut out = report::render_json(outcome).into_diagnostic()?;
        out.push('\n');
        Ok(out)
    } else {
        Ok(text())
    }
}

fn run(cli: Cli) -> miette::Result<Verdict> {
    let (verdict, text) = match cli.command {
        Commands::Avoidance {
            m0,
            horizon,
            threshold,
            lifts,
            hash,
            print_sample,
            print_survivors,
        } => {
            let params = AvoidanceParams {
                m0,
                horizon,
                threshold,
                lifts,
            };
            let fingerprint = hash.then(|| WitnessFingerprint::new(m0));
            let mut log = WitnessLog::new(fingerprint, print_sample);
            let outcome =
                run_certificate(AvoidanceCertificate::new(params, &mut log)).into_diagnostic()?;
            let options = AvoidanceOptions { print_survivors };
            let text = render(cli.json, &outcome, || {
                report::render_avoidance(&outcome, &log, options)
            })?;
            (outcome.verdict, text)
        }
        Commands::Tower {
            s0,
            alpha,
            t_min,
            t_max,
            q_bits,
        } => {
            let defaults = TowerParams::new(s0, alpha);
            let params = TowerParams {
                t_min,
                t_max: t_max.unwrap_or(defaults.t_max),
                q_bits: q_bits.unwrap_or(defaults.q_bits),
                ..defaults
            };
            let outcome = run_certificate(TowerCertificate::new(params)).into_diagnostic()?;
            let text = render(cli.json, &outcome, || report::render_tower(&outcome))?;
            (outcome.verdict, text)
        }
        Commands::GateCycle { m, lifts, verbose } => {
            let params = GateCycleParams { m, lifts };
            let outcome = run_certificate(GateCycleCertificate::new(params)).into_diagnostic()?;
            let text = render(cli.json, &outcome, || {
                report::render_gate_cycle(&outcome, verbose)
            })?;
            (outcome.verdict, text)
        }
    };

    print!("{text}");
    if let Some(path) = &cli.save_output {
        let digest = report::save_output(path, &text)
            .into_diagnostic()
            .wrap_err_with(|| format!("writing report to {}", path.display()))?;
        println!("Saved output to {} (SHA256 = {digest})", path.display());
    }
    Ok(verdict)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(verdict) => ExitCode::from(verdict.exit_code()),
        Err(err) => {
            eprintln!("{err:?}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
