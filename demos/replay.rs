//! Replays a recorded rotation vector trace through a simulated sensor service
//!
//! ```bash
//! RUST_LOG=compass_heading=trace cargo run --example replay -- tests/data/rotation_trace.csv
//! ```

use compass_heading::simulated::SimulatedSensors;
use compass_heading::{AccuracyLevel, Compass, CompassSettings, HeadingEvent, SensorKind};
use serde::Deserialize;
use std::error::Error;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const DEFAULT_TRACE: &str = "tests/data/rotation_trace.csv";

#[derive(Debug, Deserialize)]
struct TraceRow {
    timestamp_ns: u64,
    x: f32,
    y: f32,
    z: f32,
    w: f32,
    accuracy_status: i32,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "compass_heading=debug".into()),
        )
        .init();

    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_TRACE.to_string());
    let rows: Vec<TraceRow> = csv::Reader::from_path(&path)?
        .deserialize()
        .collect::<Result<_, _>>()?;

    let sensors = Arc::new(SimulatedSensors::new([SensorKind::RotationVector]));
    let mut compass = Compass::new(sensors.clone(), CompassSettings::default());
    let events = compass.listen();

    // Deliver from a separate thread, the way a platform sensor thread would
    let producer = {
        let sensors = sensors.clone();
        thread::spawn(move || {
            let mut last_status = None;
            for row in rows {
                if last_status != Some(row.accuracy_status) {
                    sensors.emit_accuracy(AccuracyLevel::from_status(row.accuracy_status));
                    last_status = Some(row.accuracy_status);
                }
                sensors.emit_rotation_vector(&[row.x, row.y, row.z, row.w], row.timestamp_ns);
                thread::sleep(Duration::from_millis(5));
            }
        })
    };

    let mut received = 0;
    while let Ok(event) = events.recv_timeout(Duration::from_millis(500)) {
        match event {
            HeadingEvent::Reading(reading) => {
                received += 1;
                println!(
                    "Azimuth: {:7.2}  Camera: {:7.2}  Accuracy: {:4.0}",
                    reading.azimuth, reading.camera_azimuth, reading.accuracy_degrees
                );
            }
            HeadingEvent::NoSensor => println!("No rotation sensor"),
        }
    }

    producer.join().map_err(|_| "producer thread panicked")?;
    compass.cancel();
    println!("{} readings from {}", received, path);

    Ok(())
}
