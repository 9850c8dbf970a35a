use compass_heading::{AccuracyLevel, HeadingFilter, OrientationSample};

fn main() {
    let mut filter = HeadingFilter::new();
    filter.on_accuracy_changed(Some(AccuracyLevel::Medium));

    for step in 0..10 {
        // this loop should repeat each time the rotation sensor reports a new sample
        let heading = step as f64 * 0.07; // replace this with actual rotation vector data
        let half = (-heading).to_radians() / 2.0;
        let rotation_vector = [0.0, 0.0, half.sin() as f32, half.cos() as f32];

        let sample = match OrientationSample::from_rotation_vector(&rotation_vector) {
            Ok(sample) => sample,
            Err(e) => {
                eprintln!("Skipping sample: {}", e);
                continue;
            }
        };

        match filter.on_sample(&sample) {
            Some(reading) => println!(
                "Azimuth: {:.2}, Camera: {:.2}, Accuracy: {:.0}",
                reading.azimuth, reading.camera_azimuth, reading.accuracy_degrees
            ),
            None => println!("Suppressed: {:.2}", sample.azimuth_degrees()),
        }
    }
}
