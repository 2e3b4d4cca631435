use bandung_congestion::data_generator::{bandung_locations, generate_with_seed, summarize};
use bandung_congestion::global_variables::DEFAULT_SETTINGS_FILE;
use bandung_congestion::settings::AppSettings;
use bandung_congestion::storage::write_dataset;
use chrono::Local;
use std::env;
use std::error::Error;
use std::process;

fn run(settings_path: &str) -> Result<(), Box<dyn Error>> {
    let settings = AppSettings::load(settings_path)?;
    let today = Local::now().date_naive();
    let (start, end) = settings.generator.date_range(today)?;
    let locations = bandung_locations();

    println!("{}", "=".repeat(60));
    println!("BANDUNG TRAFFIC CONGESTION DATA GENERATOR");
    println!("{}", "=".repeat(60));
    println!("\nPeriod: {} to {}", start, end);
    println!("Locations: {}", locations.len());

    let data = generate_with_seed(start, end, &locations, settings.generator.seed);
    println!("\nGenerated {} observations", data.len());

    write_dataset(&settings.generator.output_path, &data)?;
    println!("Dataset saved to: {}", settings.generator.output_path);

    println!("\n{}", "=".repeat(60));
    println!("DATASET STATISTICS");
    println!("{}", "=".repeat(60));
    print!("{}", summarize(&data));
    Ok(())
}

fn main() {
    env_logger::init();
    let settings_path = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_SETTINGS_FILE.to_string());
    if let Err(e) = run(&settings_path) {
        eprintln!("Generator error: {}", e);
        process::exit(1);
    }
}
