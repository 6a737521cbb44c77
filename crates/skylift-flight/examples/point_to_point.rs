//! Plan and fly a short point-to-point delivery against the simulator.
//!
//! ```sh
//! cargo run -p skylift-flight --example point_to_point
//! ```

use std::sync::Arc;

use skylift_core::models::{Coordinates, DroneProfile, Itinerary};
use skylift_flight::sim::{SimCompiler, SimDrone, SimTelemetry};
use skylift_flight::FlightSession;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let profile = DroneProfile {
        model_name: "SL-1".to_string(),
        max_weight_hg: 80,
        max_reachable_speed_cm_s: 2000,
        speed_decreasing_factor: 10.0,
        total_journey_cm: 1_000_000_000,
    };

    let drone = Arc::new(SimDrone::new());
    let mut session = FlightSession::new(
        drone.clone(),
        Arc::new(SimTelemetry::new(profile)),
        Arc::new(SimCompiler),
    );
    session.resolve_profile().await?;

    let itinerary = Itinerary {
        start: Coordinates {
            latitude: 45.0,
            longitude: 9.0,
            height_cm: 100,
        },
        end: Coordinates {
            latitude: 45.001,
            longitude: 9.001,
            height_cm: 100,
        },
        max_height_cm: 5000,
        weight_hg: 20,
    };

    let plan = session.set_itinerary(&itinerary).await?;
    println!("{}", plan.render());

    let completed = session.fly().await?;
    println!("flight complete: {completed} commands executed");
    for record in drone.actuations() {
        println!(
            "  {:?} at {} cm/sec, arg {:?}",
            record.maneuver, record.speed_cm_s, record.arg
        );
    }
    Ok(())
}
