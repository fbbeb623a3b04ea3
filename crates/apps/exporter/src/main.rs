use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use formats::features::WorldFeature;
use formats::path_data::{SubpathMode, normalize};
use formats::{Dataset, DatasetCatalog};
use runtime::{GlobeConfig, GlobeSession, Graticules, HostMessage, HostSink};
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() < 2 {
        return Err(usage());
    }

    let coarse_path = PathBuf::from(&args[0]);
    let fine_path = PathBuf::from(&args[1]);

    let mut yaw: Option<f64> = None;
    let mut pitch: Option<f64> = None;
    let mut center: Option<String> = None;
    let mut graticules = false;
    let mut subpaths = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--yaw" => yaw = Some(flag_value(&args, &mut i, "--yaw")?.parse().map_err(
                |e| format!("--yaw must be a number: {e}"),
            )?),
            "--pitch" => pitch = Some(flag_value(&args, &mut i, "--pitch")?.parse().map_err(
                |e| format!("--pitch must be a number: {e}"),
            )?),
            "--center" => center = Some(flag_value(&args, &mut i, "--center")?.to_string()),
            "--graticules" => graticules = true,
            "--subpaths" => subpaths = true,
            s => {
                return Err(format!("unknown arg: {s}\n\n{}", usage()));
            }
        }
        i += 1;
    }

    let coarse = load_features(&coarse_path)?;
    let fine = load_features(&fine_path)?;

    let mut catalog = DatasetCatalog::new();
    catalog.register(Dataset::new("default", coarse, fine));

    let config = GlobeConfig {
        graticules,
        ..GlobeConfig::default()
    };
    let mut session =
        GlobeSession::new(config, catalog, LastBatch::default()).map_err(|e| e.to_string())?;

    if let Some(name) = center {
        if !session.center_on(&name) {
            return Err(format!("unknown feature: {name}"));
        }
    } else if yaw.is_some() || pitch.is_some() {
        session.apply_rotation(yaw.unwrap_or(0.0), pitch.unwrap_or(0.0));
    }

    let batch = session
        .sink()
        .last
        .clone()
        .ok_or_else(|| "no batch produced".to_string())?;
    let value = if subpaths {
        resegmented(&batch)
    } else {
        serde_json::to_value(&batch).map_err(|e| format!("serialize batch: {e}"))?
    };
    let json = serde_json::to_string_pretty(&value).map_err(|e| format!("serialize batch: {e}"))?;
    println!("{json}");
    Ok(())
}

/// Re-segment the batch the way a drawing surface consumes it: every `d`
/// becomes its list of closed subpaths, graticule lines stay open.
fn resegmented(batch: &HostMessage) -> serde_json::Value {
    let HostMessage::Create {
        graticules,
        features,
    } = batch;

    let graticules = match graticules {
        Graticules::Off => json!(false),
        Graticules::Lines(lines) => json!(
            lines
                .iter()
                .map(|d| normalize(d, SubpathMode::Open))
                .collect::<Vec<_>>()
        ),
    };

    let features: Vec<serde_json::Value> = features
        .iter()
        .map(|f| {
            let vectors: Vec<Vec<String>> = f
                .d
                .paths()
                .iter()
                .map(|d| normalize(d, SubpathMode::Closed))
                .collect();
            json!({ "name": f.name, "vectors": vectors })
        })
        .collect();

    json!({ "type": "CREATE", "graticules": graticules, "features": features })
}

fn flag_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn load_features(path: &Path) -> Result<Vec<WorldFeature>, String> {
    let payload = fs::read_to_string(path).map_err(|e| format!("read {path:?}: {e}"))?;
    formats::features::from_geojson_str(&payload).map_err(|e| format!("parse {path:?}: {e}"))
}

/// Keeps only the most recent CREATE batch; the exporter prints the settled
/// state, not the render history.
#[derive(Default)]
struct LastBatch {
    last: Option<HostMessage>,
}

impl HostSink for LastBatch {
    fn create(&mut self, batch: HostMessage) {
        self.last = Some(batch);
    }
}

fn usage() -> String {
    "usage: exporter <coarse.geojson> <fine.geojson> \
     [--yaw DEG] [--pitch DEG] [--center NAME] [--graticules] [--subpaths]"
        .to_string()
}
