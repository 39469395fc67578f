// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;
use std::time::Instant;

use anyhow::Context;
use chromise::call::Response;
use chromise::config::{load_and_validate_config, MirrorConfig};
use chromise::host::{demo, Host, HostValue};
use chromise::mirror::Walker;
use chromise::publish::{GlobalScope, DEFAULT_GLOBAL_NAME};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() > 2 || args.get(1).map(String::as_str) == Some("--help") {
        eprintln!("Usage: {} [config.yaml|config.toml]", args[0]);
        eprintln!("Mirrors the built-in demo extension API and runs a few deferred calls.");
        std::process::exit(1);
    }

    let config = match args.get(1) {
        Some(path) => load_and_validate_config(path)
            .with_context(|| format!("failed to load config '{}'", path))?,
        None => MirrorConfig::default(),
    };

    let host = Host::from_config(demo::extension_api(), &config);
    let start_time = Instant::now();
    let mirror = Walker::from_config(&config, &host).mirror(&host)?;

    println!("Mirrored demo API in {:?}", start_time.elapsed());
    println!();
    for (path, kind) in mirror.paths() {
        println!("  {:<32} {}", path, kind);
    }
    println!();

    let mirror = GlobalScope::process().attach(DEFAULT_GLOBAL_NAME, mirror);

    let calls = [
        ("runtime.getPlatformInfo", vec![]),
        ("tabs.get", vec![HostValue::from(demo::DEMO_TAB_ID)]),
        ("tabs.get", vec![HostValue::from(404)]),
        ("storage.local.set", vec![HostValue::from("ignored")]),
    ];

    for (path, call_args) in calls {
        let outcome = mirror.call(path, &call_args)?.deferred().await;
        match outcome {
            Ok(Response::NoValue) => println!("✅ {} → (no value)", path),
            Ok(response) => println!("✅ {} → {}", path, response.into_value().to_json()),
            Err(error) => println!("❌ {} → {}", path, error),
        }
    }

    Ok(())
}
