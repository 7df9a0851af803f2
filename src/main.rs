use {
    anyhow::{Context, Result},
    clap::Parser,
    std::fs,
    tabled::{Table, Tabled},
    zone_refiner::{Cli, Evidence, FeatureCollection, ProbabilityZone, UpdateEngine, ZoneDocument},
};

fn main() -> Result<()> {
    env_logger::init();
    let args = Cli::parse();

    let prior_raw = fs::read_to_string(&args.prior)
        .with_context(|| format!("Failed to read prior zones from {}", args.prior.display()))?;
    let prior_zones = serde_json::from_str::<ZoneDocument>(&prior_raw)
        .context("Prior zones file is not a FeatureCollection or feature array")?
        .into_zones();

    let evidence_raw = fs::read_to_string(&args.evidence)
        .with_context(|| format!("Failed to read evidence from {}", args.evidence.display()))?;
    let evidence: Evidence =
        serde_json::from_str(&evidence_raw).context("Evidence file is not a valid report")?;

    let engine = UpdateEngine::new(args.resolution);
    let zones = engine.update(&prior_zones, &evidence);

    if args.summary {
        print_summary(&zones);
    }

    let collection = FeatureCollection::from_zones(zones);
    let json = serde_json::to_string_pretty(&collection)?;
    match &args.output {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("Failed to write zones to {}", path.display()))?,
        None => println!("{json}"),
    }

    Ok(())
}

#[derive(Tabled)]
struct ZoneRow {
    #[tabled(rename = "Zone")]
    rank: usize,
    #[tabled(rename = "Probability")]
    probability: String,
    #[tabled(rename = "Evidence")]
    evidence: String,
    #[tabled(rename = "Vertices")]
    vertices: usize,
    #[tabled(rename = "Method")]
    method: String,
}

fn print_summary(zones: &[ProbabilityZone]) {
    let rows: Vec<ZoneRow> = zones
        .iter()
        .enumerate()
        .map(|(i, zone)| ZoneRow {
            rank: i + 1,
            probability: format!("{:.2}", zone.properties.probability),
            evidence: zone
                .properties
                .evidence_type
                .map(|kind| kind.to_string())
                .unwrap_or_else(|| "-".to_string()),
            vertices: zone.exterior_ring().map(|ring| ring.len()).unwrap_or(0),
            method: zone
                .properties
                .method
                .clone()
                .unwrap_or_else(|| "contour".to_string()),
        })
        .collect();

    eprintln!("{}", Table::new(rows));
}
