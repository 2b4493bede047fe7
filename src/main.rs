//! # Dashlay CLI
//!
//! Usage:
//!   dashlay session.json -o layout.json
//!   echo '{ ... }' | dashlay
//!   dashlay --example > session.json
//!
//! Without `-o` the final layout snapshot goes to stdout. Set `RUST_LOG`
//! (e.g. `RUST_LOG=dashlay=debug`) to watch the engine work.

use std::env;
use std::fs;
use std::io::{self, Read};

use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--example") {
        print!("{}", example_session_json());
        return;
    }

    // Read input
    let input = if args.len() > 1 && !args[1].starts_with('-') {
        match fs::read_to_string(&args[1]) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("✗ Failed to read {}: {}", args[1], e);
                std::process::exit(1);
            }
        }
    } else {
        let mut buf = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut buf) {
            eprintln!("✗ Failed to read stdin: {}", e);
            std::process::exit(1);
        }
        buf
    };

    let output_path = args.windows(2).find(|w| w[0] == "-o").map(|w| w[1].clone());

    let layout = match dashlay::render_session_json(&input) {
        Ok(layout) => layout,
        Err(e) => {
            eprintln!("✗ Failed to replay session: {}", e);
            std::process::exit(1);
        }
    };

    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &layout) {
                eprintln!("✗ Failed to write {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("✓ Written {} bytes to {}", layout.len(), path);
        }
        None => println!("{}", layout),
    }
}

fn example_session_json() -> &'static str {
    r##"{
  "config": {
    "cellSize": 150,
    "padding": 50,
    "titleAreaHeight": 80
  },
  "viewport": { "width": 1280, "height": 800 },
  "actions": [
    { "type": "create", "kind": "metric", "preset": "2x1" },
    { "type": "create", "kind": "chart" },
    { "type": "create", "kind": "basic" },
    { "type": "create", "kind": "live-metric" },
    { "type": "feed", "id": 4, "data": { "totalWaivers": 128 } },
    {
      "type": "drag",
      "id": 3,
      "grab": { "x": 860, "y": 140 },
      "path": [
        { "x": 700, "y": 300 },
        { "x": 560, "y": 420 },
        { "x": 480, "y": 480 }
      ]
    },
    {
      "type": "resize",
      "id": 1,
      "grab": { "x": 350, "y": 280 },
      "path": [{ "x": 420, "y": 300 }, { "x": 380, "y": 290 }]
    },
    { "type": "advance", "ms": 500 }
  ]
}
"##
}
