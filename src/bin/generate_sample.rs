use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Saturating learning curve: starts at `start`, approaches `plateau`.
fn accuracy_curve(step: usize, start: f64, plateau: f64, rate: f64) -> f64 {
    plateau - (plateau - start) * (-rate * step as f64).exp()
}

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

/// `(step, elapsed_seconds, accuracy)` records of one search run.
fn generate_run(
    steps: usize,
    (start, plateau, rate): (f64, f64, f64),
    noise: f64,
    rng: &mut SimpleRng,
) -> Vec<(i64, f64, f64)> {
    let mut elapsed = 0.0;
    (0..steps)
        .map(|step| {
            elapsed += 30.0 + rng.next_f64() * 5.0;
            let acc = accuracy_curve(step, start, plateau, rate) + rng.gauss(0.0, noise);
            (step as i64, elapsed, acc)
        })
        .collect()
}

fn write_parquet(path: &Path, records: &[(i64, f64, f64)]) {
    let schema = Arc::new(Schema::new(vec![
        Field::new("step", DataType::Int64, false),
        Field::new("elapsed", DataType::Float64, false),
        Field::new("acc", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(records.iter().map(|r| r.0))),
            Arc::new(Float64Array::from_iter_values(records.iter().map(|r| r.1))),
            Arc::new(Float64Array::from_iter_values(records.iter().map(|r| r.2))),
        ],
    )
    .expect("Failed to create RecordBatch");

    let file = File::create(path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let out_dir = Path::new("runs");
    fs::create_dir_all(out_dir).expect("Failed to create runs directory");

    // name, number of logged steps, (start, plateau, rate), noise
    let runs: [(&str, usize, (f64, f64, f64), f64); 5] = [
        ("best", 640, (88.0, 97.4, 0.012), 0.9),
        ("alr0.5", 600, (87.0, 96.1, 0.020), 1.2),
        ("alr0.05", 700, (88.5, 96.6, 0.004), 0.7),
        ("freq8", 560, (87.5, 96.9, 0.010), 1.4),
        ("freq128", 680, (88.2, 97.0, 0.011), 0.6),
    ];

    for (name, steps, curve, noise) in runs {
        let records = generate_run(steps, curve, noise, &mut rng);

        let json_path = out_dir.join(format!("{name}.json"));
        let file = File::create(&json_path).expect("Failed to create output file");
        serde_json::to_writer(BufWriter::new(file), &records).expect("Failed to write JSON");

        if name == "best" {
            write_parquet(&out_dir.join("best.parquet"), &records);
        }

        println!("Wrote {steps} records to {}", json_path.display());
    }
}
