//! Fusion report against the synthetic source
//!
//! ```text
//! cargo run -p agrifusion-connectors --example fusion_report -- 41.59 -93.62 soybean aphids
//! ```
//!
//! Prints the full `FusionResult` as JSON.

use std::env;
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use agrifusion_connectors::{FusionService, ServiceConfig, SyntheticSource};
use agrifusion_core::{DateRange, FusionRequest, GeoLocation};
use chrono::{Duration as Days, Utc};

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    let lat: f64 = args.first().map(|s| s.parse()).transpose()?.unwrap_or(40.7128);
    let lon: f64 = args.get(1).map(|s| s.parse()).transpose()?.unwrap_or(-74.0060);
    let crop = args.get(2).cloned().unwrap_or_else(|| "corn".to_string());
    let pest = args.get(3).cloned().unwrap_or_else(|| "general".to_string());

    let end = Utc::now().fixed_offset();
    let range = DateRange::new(end - Days::days(7), end)?;
    let request = FusionRequest::new(GeoLocation::new(lat, lon)?, range)
        .with_crop(crop)
        .with_pest(pest);

    let config = ServiceConfig::default().deadline(Duration::from_secs(30));
    let service = FusionService::new(config, Arc::new(SyntheticSource::new(2024)));

    let result = service.compute_fusion_blocking(request)?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    for alert in &result.alerts {
        eprintln!("{}", alert);
    }
    Ok(())
}
