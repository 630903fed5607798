use floorplan::{init_logging, plan_summary, Config, LayoutEngine, BUILD_DATE, VERSION};

fn main() -> anyhow::Result<()> {
    init_logging()?;
    tracing::info!("floorplan {} (built {})", VERSION, BUILD_DATE);

    let config = Config::load_or_default();
    let mut engine = LayoutEngine::with_config(config);

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: floorplan <plan.json>");
        std::process::exit(2);
    };
    engine.load_plan_file(&path)?;

    let summary = plan_summary(engine.store());
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
