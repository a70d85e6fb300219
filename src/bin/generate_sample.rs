use chrono::{Duration, NaiveDate, Timelike};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Half-sine daylight curve: zero outside 06:00–18:00, peaking at noon.
fn diurnal_ppfd(hour_of_day: f64, peak: f64) -> f64 {
    if !(6.0..=18.0).contains(&hour_of_day) {
        return 0.0;
    }
    let phase = (hour_of_day - 6.0) / 12.0 * std::f64::consts::PI;
    peak * phase.sin()
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let start = NaiveDate::from_ymd_opt(2024, 5, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let days = 7;
    let samples_per_day = 48; // every 30 minutes

    let output_path = "forecast_result.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    // Include the legacy DLI_chunk column so the drop-on-load path is used.
    writer
        .write_record(["timestamp", "forecast_ppfd", "DLI_chunk"])
        .expect("Failed to write header");

    let mut n_rows = 0;
    for i in 0..(days * samples_per_day) {
        let ts = start + Duration::minutes(30 * i as i64);
        let hour = ts.time().hour() as f64 + ts.time().minute() as f64 / 60.0;

        // Day-to-day variation in the peak, plus sample noise.
        let day = i / samples_per_day;
        let peak = 750.0 + 120.0 * ((day as f64 * 1.3).sin());
        let ppfd = (diurnal_ppfd(hour, peak) + rng.gauss(0.0, 15.0)).max(0.0);

        let dli_chunk = ppfd * 1800.0 / 1_000_000.0;

        writer
            .write_record([
                ts.format("%Y-%m-%d %H:%M:%S").to_string(),
                format!("{ppfd:.1}"),
                format!("{dli_chunk:.4}"),
            ])
            .expect("Failed to write row");
        n_rows += 1;
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {n_rows} samples ({days} days at 30-minute intervals) to {output_path}");
}
