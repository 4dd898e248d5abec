use std::io::{self, Write as _};

use anyhow::Result;
use image_copier::{Config, config::CONFIG_FILE, run_with};
use log::{info, warn};

fn main() -> Result<()> {
    env_logger::init();
    info!("Starting image copier");

    let config = Config::try_load(CONFIG_FILE)?;

    let mut stdout = io::stdout().lock();
    let report = run_with(&config, |outcome| {
        if let Err(e) = writeln!(stdout, "{outcome}") {
            warn!("Failed to print progress: {e}");
        }
    })?;
    report.write_summary(&mut stdout)?;

    Ok(())
}
