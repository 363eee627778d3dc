use anyhow::{anyhow, Context, Result};
use brandcast::{config::Config, forecast, model, report::Report};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    // ─── 2) resolve config ───────────────────────────────────────────
    let cfg = Config::from_env().context("resolving configuration")?;
    info!(dataset = %cfg.dataset.display(), years = ?cfg.years, "startup");

    // ─── 3) train once ───────────────────────────────────────────────
    let (model, data) = model::train(&cfg.dataset)
        .with_context(|| format!("loading dataset {}", cfg.dataset.display()))?;
    info!(
        brands = data.brand_names().len(),
        holdout_r2 = ?model.holdout_r2,
        "model ready"
    );

    // ─── 4) pick brand ───────────────────────────────────────────────
    let brand = match &cfg.brand {
        Some(b) => b.clone(),
        None => data
            .brand_names()
            .first()
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow!("dataset has no brands"))?,
    };
    let record = data
        .find_brand(&brand)
        .ok_or_else(|| anyhow!("brand {:?} not found in {}", brand, cfg.dataset.display()))?;

    if cfg.years.is_empty() {
        warn!("no years requested");
    }

    // ─── 5) project + print ──────────────────────────────────────────
    let projection = forecast::project(&record, &cfg.years)?;
    let report = Report::new(&record, &projection);
    print!("{}", report.render(cfg.format)?);

    info!("all done");
    Ok(())
}
