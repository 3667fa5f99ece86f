use serde_json::{Map, Value, json};

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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// (class, engine sizes, colour)
const CLASSES: [(&str, &[f64], &str); 5] = [
    ("COMPACT", &[1.4, 1.6, 1.8, 2.0], "#1f77b4"),
    ("MID-SIZE", &[2.0, 2.4, 2.5, 3.0], "#ff7f0e"),
    ("SUV", &[2.5, 3.0, 3.5, 4.0, 5.3], "#2ca02c"),
    ("PICKUP TRUCK - STANDARD", &[3.6, 4.8, 5.3, 6.2], "#d62728"),
    ("MINIVAN", &[3.3, 3.5, 3.6], "#9467bd"),
];
const MAKES: [&str; 6] = ["FORD", "TOYOTA", "HONDA", "CHEVROLET", "KIA", "VOLVO"];
/// (code, price per litre in 2000, share weight)
const FUELS: [(&str, f64, u64); 4] = [("X", 0.70, 6), ("Z", 0.80, 3), ("D", 0.75, 1), ("E", 0.65, 1)];

fn pick_fuel(rng: &mut SimpleRng) -> (&'static str, f64) {
    let total: u64 = FUELS.iter().map(|f| f.2).sum();
    let mut roll = rng.next_u64() % total;
    for &(code, price, weight) in &FUELS {
        if roll < weight {
            return (code, price);
        }
        roll -= weight;
    }
    (FUELS[0].0, FUELS[0].1)
}

fn main() -> anyhow::Result<()> {
    let mut rng = SimpleRng::new(42);
    let mut records = Vec::new();

    for year in 2000..=2022 {
        for &(class, sizes, _) in &CLASSES {
            for &make in &MAKES {
                let engine_size: f64 = *rng.pick(sizes);
                let (fuel, base_price) = pick_fuel(&mut rng);

                // Efficiency improves ~1% per year; consumption grows with displacement.
                let trend = 1.0 - 0.01 * (year - 2000) as f64;
                let consumption = ((5.0 + 2.2 * engine_size) * trend + rng.gauss(0.0, 0.6)).max(3.5);
                let emissions = (consumption * 23.2).round();
                let price = base_price * (1.0 + 0.03 * (year - 2000) as f64);

                records.push(json!({
                    "YEAR": year,
                    "MAKE": make,
                    "MODEL": format!("{} {}{}", make, &class[..3], (engine_size * 10.0).round()),
                    "VEHICLE CLASS": class,
                    "ENGINE SIZE": engine_size,
                    "FUEL": fuel,
                    "FUEL CONSUMPTION": (consumption * 10.0).round() / 10.0,
                    "EMISSIONS": emissions,
                    "FUEL COST": (price * 100.0).round() / 100.0,
                }));
            }
        }
    }

    let palette: Map<String, Value> = CLASSES
        .iter()
        .map(|&(class, _, color)| (class.to_string(), Value::from(color)))
        .collect();

    let data_path = "data.json";
    let palette_path = "colorPalette.json";
    std::fs::write(data_path, serde_json::to_string_pretty(&records)?)?;
    std::fs::write(palette_path, serde_json::to_string_pretty(&palette)?)?;

    println!(
        "Wrote {} records to {data_path} and {} colours to {palette_path}",
        records.len(),
        palette.len()
    );
    Ok(())
}
