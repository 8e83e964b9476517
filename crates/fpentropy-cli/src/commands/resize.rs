use fpentropy_core::ResizeConfig;
use rand::SeedableRng;
use rand::rngs::StdRng;

pub fn run(resolution: &str, config: &ResizeConfig, seed: Option<u64>) {
    if let Err(e) = config.validate() {
        eprintln!("{e}");
        std::process::exit(1);
    }
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    match fpentropy_core::resize(resolution, config, &mut rng) {
        Some(r) => {
            println!("{resolution} → {}", r.resolution);
            println!("  Utilization: {:.2}%", r.utilization * 100.0);
            println!("  Config: {config}");
            if r.height < 0 {
                println!("  Note: screen is shorter than the toolbar; height is negative.");
            }
        }
        None => {
            eprintln!("'{resolution}' is not a resolution (expected <width>x<height>[x<depth>])");
            std::process::exit(1);
        }
    }
}
