//! Writes `sample_prices.csv`: a synthetic `;`-delimited price table in the
//! same layout as the published dataset (comma decimal separator, a few
//! unreadable prices).

use anyhow::{Context, Result};

const DISTRICTS: [(&str, f64); 5] = [
    ("Ленинский", 1.10),
    ("Октябрьский", 1.00),
    ("Первомайский", 1.25),
    ("Свердловский", 0.95),
    ("Пригород", 0.60),
];

const PROPERTY_TYPES: [(&str, f64); 4] = [
    ("Квартира", 90_000.0),
    ("Дом", 65_000.0),
    ("Коммерческая", 120_000.0),
    ("Участок", 12_000.0),
];

const PERIODS: [&str; 6] = ["2023-10", "2023-11", "2023-12", "2024-01", "2024-02", "2024-03"];

/// Minimal deterministic PRNG (xorshift64*)
struct SampleRng(u64);

impl SampleRng {
    fn new(seed: u64) -> Self {
        SampleRng(seed.max(1))
    }

    fn next_f64(&mut self) -> f64 {
        let mut x = self.0;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.0 = x;
        (x.wrapping_mul(0x2545_f491_4f6c_dd1d) >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in `[-spread, spread)`.
    fn jitter(&mut self, spread: f64) -> f64 {
        (self.next_f64() * 2.0 - 1.0) * spread
    }
}

fn main() -> Result<()> {
    let output_path = "sample_prices.csv";
    let mut rng = SampleRng::new(42);

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record(["Дата", "Район", "Вид недвижимости", "Среднее (сом/кв,м,)"])?;

    let mut rows = 0usize;
    for (step, period) in PERIODS.iter().enumerate() {
        // ~1.5% growth per month
        let trend = 1.0 + 0.015 * step as f64;
        for (district, district_factor) in DISTRICTS {
            for (kind, base) in PROPERTY_TYPES {
                let price = if rng.next_f64() < 0.03 {
                    "н/д".to_string()
                } else {
                    let value = base * district_factor * trend * (1.0 + rng.jitter(0.08));
                    format!("{value:.2}").replace('.', ",")
                };
                writer.write_record([*period, district, kind, price.as_str()])?;
                rows += 1;
            }
        }
    }
    writer.flush()?;

    println!("Wrote {rows} price observations to {output_path}");
    Ok(())
}
