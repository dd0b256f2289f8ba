use std::error::Error;
use std::io::{self, BufRead};

use sarge::prelude::*;
use za_outputs::{Config, ErrorPolicy, OutputEngine, PageView, default_outputs};

const DEFAULT_BATCH: usize = 100;

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  za_outputs --config <path> [--batch <n>] [--fast-fail]");
    eprintln!("  za_outputs --sample");
    eprintln!();
    eprintln!("Page views are read from stdin, one JSON document per line,");
    eprintln!("and written to every output declared in the configuration.");
}

fn flush(engine: &mut OutputEngine, batch: &mut Vec<PageView>) {
    if batch.is_empty() {
        return;
    }
    if let Err(agg) = engine.write_all(batch) {
        for e in &agg.errors {
            log::error!("{e}");
        }
    }
    batch.clear();
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut reader = ArgumentReader::new();

    let config_ref = reader.add::<String>(tag::both('c', "config"));
    let batch_ref = reader.add::<usize>(tag::both('b', "batch"));
    let sample_ref = reader.add::<bool>(tag::long("sample"));
    let fast_fail_ref = reader.add::<bool>(tag::long("fast-fail"));

    let args = reader.parse()?;

    let registry = default_outputs();

    if let Some(Ok(true)) = sample_ref.get(&args) {
        print!("{}", registry.sample_config());
        return Ok(());
    }

    let config_path = match config_ref.get(&args) {
        Some(Ok(path)) => path,
        _ => return Err("missing --config".into()),
    };
    let batch_size = match batch_ref.get(&args) {
        Some(Ok(n)) if n > 0 => n,
        _ => DEFAULT_BATCH,
    };
    let policy = match fast_fail_ref.get(&args) {
        Some(Ok(true)) => ErrorPolicy::FastFail,
        _ => ErrorPolicy::Accumulate,
    };

    let config = Config::load_file(&config_path, &registry)?;
    log::info!(
        "loaded {} tracker(s) and {} output(s) from {config_path}",
        config.trackers.len(),
        config.outputs.len()
    );

    // Dropping the engine closes whatever is connected, including on early return.
    let mut engine = OutputEngine::from_config(config, policy);
    engine.connect_all()?;

    let mut batch = Vec::with_capacity(batch_size);
    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<PageView>(&line) {
            Ok(view) => batch.push(view),
            Err(e) => log::warn!("skipping malformed page view: {e}"),
        }
        if batch.len() >= batch_size {
            flush(&mut engine, &mut batch);
        }
    }
    flush(&mut engine, &mut batch);

    engine.close_all()?;
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("za_outputs error: {e}");
        print_usage();
        std::process::exit(1);
    }
}
