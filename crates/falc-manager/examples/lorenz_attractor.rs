//! Lorenz attractor demo.
//!
//! ```text
//! cargo run -p falc-manager --example lorenz_attractor -- 1.0
//! ```
//!
//! Seeds `x`, `y` and `z` with the given value, steps 1000 x 100 samples at
//! `dt = 0.001` and writes one `x,y,z,` line per sample to
//! `lorenz_attractor.csv`. Without an argument it only prints its name.

use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};

use falc_rules::LorenzConfig;

const OUTPUT: &str = "lorenz_attractor.csv";

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("lorenz_attractor=info,falc_manager=warn,falc_rules=warn")
        .init();

    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "lorenz_attractor".to_owned());
    let Some(seed) = args.next() else {
        println!("Running {program}");
        return Ok(());
    };
    let x0: f32 = seed.parse()?;

    let config = LorenzConfig::with_seed(f64::from(x0));
    tracing::info!(
        x0,
        blocks = config.blocks,
        block_len = config.block_len,
        dt = config.dt,
        "simulating lorenz attractor"
    );
    let mut system = config.build_system::<f32>()?;
    system.run()?;

    let mut out = BufWriter::new(File::create(OUTPUT)?);
    for index in 0..system.len() {
        for value in system.row(index)? {
            write!(out, "{value},")?;
        }
        writeln!(out)?;
    }
    out.flush()?;

    tracing::info!(path = OUTPUT, rows = system.len(), "wrote samples");
    println!("Creating file - DONE");
    Ok(())
}
