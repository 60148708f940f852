//! Specfilter - demo entry point
//!
//! Runs the product catalogue through a few specifications and, when
//! `RULE_FILE` is set, through each enabled named rule loaded from JSON.

use std::fs::File;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use specfilter::config::{AppConfig, LogFormat};
use specfilter::prelude::*;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    // Initialize tracing
    let json = config.log_format == LogFormat::Json;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.rust_log.clone().into()),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .init();

    tracing::info!(log_format = %config.log_format, "Starting specfilter demo");

    let products = sample_catalogue();
    let filter = SpecFilter::new();

    println!("Green products:");
    for p in filter.filter(&products, Some(&ColorSpec::new(Color::Green)))? {
        println!(" - {} is green", p.name);
    }

    println!("Large blue items:");
    let large_blue = ColorSpec::new(Color::Blue).and(SizeSpec::new(Size::Large));
    for p in filter.filter(&products, Some(&large_blue))? {
        println!(" - {} is large and blue", p.name);
    }

    println!("Large green items:");
    let large_green = Spec(ColorSpec::new(Color::Green)) & Spec(SizeSpec::new(Size::Large));
    for p in filter.filter(&products, Some(&large_green))? {
        println!(" - {} is large and green", p.name);
    }

    if let Some(path) = &config.rule_file {
        tracing::info!(path = %path.display(), "Loading rule file");
        let file = File::open(path)
            .with_context(|| format!("Failed to open rule file {}", path.display()))?;
        let rules = NamedRuleConfig::load_all(file)
            .with_context(|| format!("Failed to parse rule file {}", path.display()))?;

        let registry = product_registry();
        for named in rules.iter().filter(|r| r.enabled) {
            let spec = registry
                .build(&named.rule)
                .with_context(|| format!("Failed to build rule '{}'", named.name))?;

            match &named.description {
                Some(description) => println!("Rule '{}' ({}):", named.name, description),
                None => println!("Rule '{}':", named.name),
            }
            for p in filter.filter(&products, Some(spec.as_ref()))? {
                println!(" - {}", p);
            }
        }

        let skipped = rules.iter().filter(|r| !r.enabled).count();
        if skipped > 0 {
            tracing::info!(skipped, "Skipped disabled rules");
        }
    }

    Ok(())
}
