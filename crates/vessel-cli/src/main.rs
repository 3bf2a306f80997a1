use std::path::PathBuf;

use vessel_adapters::StubComputeEngine;
use vessel_core::{PipelineRunner, RunOutcome, Target};
use vessel_domain::BodySite;
use vessel_persistence::{load_from_folder, save, PersistenceConfig};

fn main() {
    // Cargar .env si existe para la configuración VESSELFLOW_*
    let _ = dotenvy::dotenv();
    // CLI mínima:
    //   vessel-cli run --folder <DIR> [--site <SITE>] [--label <TXT>]
    //   vessel-cli resume --folder <DIR>
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("usage: vessel-cli <run|resume> --folder <DIR> [--site <SITE>] [--label <TXT>]");
        std::process::exit(2);
    }

    let command = args[1].as_str();
    let mut folder: Option<PathBuf> = None;
    let mut site = BodySite::Carotid;
    let mut label = "target".to_string();
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--folder" => {
                i += 1;
                if i < args.len() { folder = Some(PathBuf::from(&args[i])); }
            }
            "--site" => {
                i += 1;
                if i < args.len() {
                    site = match BodySite::parse(&args[i]) {
                        Ok(s) => s,
                        Err(e) => { eprintln!("[vessel-cli] {e}"); std::process::exit(3); }
                    };
                }
            }
            "--label" => {
                i += 1;
                if i < args.len() { label = args[i].clone(); }
            }
            _ => {}
        }
        i += 1;
    }

    let Some(folder) = folder else {
        eprintln!("[vessel-cli] --folder is required");
        std::process::exit(2);
    };
    let config = PersistenceConfig::from_env();
    let mut engine = StubComputeEngine::new();

    match command {
        "run" => {
            // Target nuevo con un punto semilla demostrativo.
            let mut target = Target::new(&label, site, &folder, &[[0.0, 0.0, 0.0]]);
            let outcome = PipelineRunner::new(&mut engine).compute_remaining_stages(&mut target);
            println!("[vessel-cli] outcome: {outcome:?}");
            match save(&mut target, &folder, &engine, &config) {
                Ok(report) => println!("[vessel-cli] saved {} files into {}", report.files_written.len(), folder.display()),
                Err(e) => { eprintln!("[vessel-cli] save error: {e}"); std::process::exit(4); }
            }
        }
        "resume" => {
            let (mut target, report) = match load_from_folder(&folder, &engine, &config) {
                Ok(pair) => pair,
                Err(e) => { eprintln!("[vessel-cli] load error: {e}"); std::process::exit(4); }
            };
            for warning in &report.warnings {
                eprintln!("[vessel-cli] warning: {warning}");
            }
            println!("[vessel-cli] restored {} stages (frontier {})", report.loaded, target.frontier());
            let outcome = PipelineRunner::new(&mut engine).compute_remaining_stages(&mut target);
            println!("[vessel-cli] outcome: {outcome:?}");
            if let RunOutcome::Complete | RunOutcome::Suspended { .. } = outcome {
                if let Err(e) = save(&mut target, &folder, &engine, &config) {
                    eprintln!("[vessel-cli] save error: {e}");
                    std::process::exit(4);
                }
            }
        }
        other => {
            eprintln!("[vessel-cli] unknown command: {other}");
            std::process::exit(2);
        }
    }
}
