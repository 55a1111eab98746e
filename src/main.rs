use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use shallow_net::{Dataset, NetworkBuilder, TrainConfig};

const SAMPLES: usize = 1000;
const HIDDEN_SIZE: usize = 3;
const TEST_INPUT: f64 = 4096.0;

fn main() -> shallow_net::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Optional seed for reproducible runs.
    let seed = std::env::var("SHALLOW_NET_SEED")
        .ok()
        .and_then(|s| s.parse::<u64>().ok());
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    // f(x) = (x * 2 + 3.5) / 1000
    let mut train = Dataset::affine(SAMPLES, &mut rng)?;
    let standardizer = train.standardize_inputs()?;
    info!(
        "standardized {} inputs: mean={:.4} stddev={:.4}",
        train.len(),
        standardizer.mean(),
        standardizer.stddev()
    );

    let mut network = NetworkBuilder::new()
        .hidden_size(HIDDEN_SIZE)?
        .build_with_rng(&mut rng)?;

    let series = network.fit(&train, TrainConfig::default(), &mut rng)?;

    println!("train finished.\n");
    println!("{}", network.inspect());
    println!("\n{series}");

    #[cfg(feature = "serde")]
    println!("\n{}", series.to_json_string_pretty()?);

    let predicted = network.predict(&[standardizer.apply(TEST_INPUT)])?;
    println!("\nPredicted output for input {TEST_INPUT}: {predicted}");
    println!("Expected output: {}", (TEST_INPUT * 2.0 + 3.5) / 1000.0);

    Ok(())
}
