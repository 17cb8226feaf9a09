//! Example: analyze the slope at a coordinate using the live GSI service.
//!
//! Usage: cargo run --example analyze_point -- <lat> <lon>

use std::env;
use terraslope_analysis::TerrainAnalyzer;
use terraslope_elevation::GsiClient;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <lat> <lon>", args[0]);
        eprintln!("Example: {} 35.3606 138.7274", args[0]);
        std::process::exit(1);
    }

    let lat: f64 = args[1].parse().expect("Invalid latitude");
    let lon: f64 = args[2].parse().expect("Invalid longitude");

    let client = GsiClient::new().expect("Failed to build elevation client");
    let analyzer = TerrainAnalyzer::new(client);

    match analyzer.analyze_point(lat, lon) {
        Ok(result) => {
            println!("Elevation: {:.1} m", result.center_elevation);
            println!(
                "Slope:     {:.2}° ({:.1} %)",
                result.slope_degrees, result.slope_percent
            );
            println!(
                "Aspect:    {:.1}° ({})",
                result.aspect_degrees, result.aspect
            );
            println!("Class:     {}", result.classification);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
