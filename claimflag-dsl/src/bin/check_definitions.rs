/// Flag Definition Checker - validates a definitions file against a flag list
///
/// Usage: cargo run --bin check_definitions <definitions.yaml> <flag>[,<flag>...]

use claimflag_core::{DefinitionOptions, Flag, InMemoryFlagRegistry, InvalidDefinitionPolicy};
use claimflag_dsl::{definition_to_node, load_definitions};
use std::fs;
use tracing_subscriber::EnvFilter;

fn main() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: cargo run --bin check_definitions <definitions.yaml> <flag>[,<flag>...]");
        eprintln!();
        eprintln!("Example:");
        eprintln!("  cargo run --bin check_definitions flags.yaml block-break,block-place,entity-damage");
        std::process::exit(1);
    }

    let path = &args[1];
    let registry: InMemoryFlagRegistry = args[2]
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(Flag::new)
        .collect();

    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to read {}: {}", path, e);
            std::process::exit(1);
        }
    };

    let options = DefinitionOptions::default().with_policy(InvalidDefinitionPolicy::Skip);
    let set = match load_definitions(&content, &registry, &options) {
        Ok(set) => set,
        Err(e) => {
            eprintln!("Failed to load {}: {}", path, e);
            std::process::exit(1);
        }
    };

    for definition in set.iter() {
        println!("✅ {}", definition.display_name());
        match definition_to_node(definition, &options).to_yaml_string() {
            Ok(yaml) => {
                for line in yaml.lines() {
                    println!("    {}", line);
                }
            }
            Err(e) => println!("    (could not render: {})", e),
        }
    }

    for rejected in set.rejected() {
        println!("❌ {}: {}", rejected.name, rejected.error);
    }

    println!();
    println!(
        "{} valid, {} rejected ({} flags known)",
        set.len(),
        set.rejected().len(),
        registry.len()
    );

    if !set.rejected().is_empty() {
        std::process::exit(2);
    }
}
