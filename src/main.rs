/*!
 * Handler Guard - Coverage Audit
 *
 * Loads a handler manifest, resolves every declared method and prints a JSON
 * report of which handlers the fail-closed policy would deny.
 *
 * Usage: handler-guard <manifest.json> [config.json]
 */

use anyhow::Context;
use handler_guard::{init_tracing, CoverageReport, GuardConfig, Manifest, PolicyResolver};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};

fn run() -> miette::Result<ExitCode> {
    let mut args = std::env::args().skip(1);
    let Some(manifest_path) = args.next() else {
        eprintln!("usage: handler-guard <manifest.json> [config.json]");
        return Ok(ExitCode::from(2));
    };

    let config = match args.next() {
        Some(path) => GuardConfig::load(&path)?,
        None => GuardConfig::default(),
    }
    .apply_env()?;
    info!(
        markers = config.markers.len(),
        handler_tag = %config.handler_tag,
        inheritance = ?config.inheritance,
        "Configuration loaded"
    );

    let registry = Arc::new(config.registry());
    Manifest::load(&manifest_path)?.populate(&registry);
    info!(
        types = registry.types().len(),
        methods = registry.methods().len(),
        "Manifest loaded"
    );

    let resolver = PolicyResolver::from_registry(config.marker_set(), registry.clone())?;
    let report = CoverageReport::build(&registry, &resolver)?;

    for method in report.denied_methods() {
        warn!(method = %method, "handler has no access control declaration");
    }

    let json = serde_json::to_string_pretty(&report)
        .context("failed to render coverage report")
        .map_err(|e| miette::miette!("{:#}", e))?;
    println!("{}", json);

    info!(
        total = report.total,
        denied = report.denied,
        deferred = report.deferred,
        "Coverage audit complete"
    );

    Ok(if report.denied > 0 {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    })
}

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(code) => code,
        Err(report) => {
            eprintln!("{:?}", report);
            ExitCode::from(2)
        }
    }
}
