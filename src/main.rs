use anyhow::anyhow;
use clap::Parser;
use geojsonify::{Converter, Settings};
use serde_json::{Map, Value};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::{fs::read_to_string, io};

/// Convert a JSON array of records into a GeoJSON FeatureCollection.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the YAML settings file describing the field mapping.
    #[arg(short, long)]
    settings_filepath: String,

    /// Path to the input JSON records; stdin when omitted.
    #[arg(short, long)]
    input_filepath: Option<PathBuf>,

    /// Path to write the GeoJSON document to; stdout when omitted.
    #[arg(short, long)]
    output_filepath: Option<PathBuf>,
}

fn read_records(input_filepath: Option<&Path>) -> anyhow::Result<Vec<Map<String, Value>>> {
    let contents = match input_filepath {
        Some(path) => read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    let records: Value = serde_json::from_str(&contents)?;
    let Value::Array(records) = records else {
        return Err(anyhow!("Expected a JSON array of records"));
    };
    records
        .into_iter()
        .map(|record| match record {
            Value::Object(record) => Ok(record),
            other => Err(anyhow!("Expected a JSON object record, got {}", other)),
        })
        .collect()
}

fn try_main() -> anyhow::Result<()> {
    let args = Args::try_parse()?;
    if !Path::new(&args.settings_filepath).exists() {
        return Err(anyhow!(
            "Settings file {} not found",
            &args.settings_filepath
        ));
    }
    let settings_contents = read_to_string(&args.settings_filepath)?;
    let settings: Settings = serde_yaml::from_str(&settings_contents)?;

    let records = read_records(args.input_filepath.as_deref())?;
    log::info!("Read {} records", records.len());

    let collection = Converter::new().convert(&records, &settings)?;
    log::info!("Converted {} features", collection.features.len());

    let encoded = serde_json::to_string(&collection)?;
    match &args.output_filepath {
        Some(path) => {
            std::fs::write(path, encoded)?;
            log::info!("Wrote GeoJSON to {:?}", path);
        }
        None => println!("{}", encoded),
    }
    Ok(())
}

fn main() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    env_logger::init();
    if let Err(e) = try_main() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1)
    }
}
