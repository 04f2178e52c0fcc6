use anyhow::{Context, Result};
use mcstat::{pipeline, SummaryConfig};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    // ─── 2) resolve dirs ─────────────────────────────────────────────
    let config = SummaryConfig::from_current_dir().context("resolving working directory")?;
    info!(dir = %config.input_dir.display(), "startup");

    // ─── 3) summarise ────────────────────────────────────────────────
    let report = match pipeline::run(&config) {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "summary failed");
            return Err(e).context(format!(
                "summarising {} in {}",
                config.pattern,
                config.input_dir.display()
            ));
        }
    };

    info!(
        files = report.files,
        rows = report.rows,
        groups = report.groups,
        missing_values = report.missing_values,
        output = %report.output.display(),
        "all done"
    );
    Ok(())
}
