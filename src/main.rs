use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use seira_catalog::catalog::{CollectionKind, CollectionStore, HttpTransport};
use seira_catalog::render::{Output, OutputBlock};
use seira_catalog::{CatalogConfig, CatalogSession, load_config_from_file};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "public/catalog.toml";

fn flush_output(out: Output) {
    let mut printed_anything = false;

    for block in out.blocks {
        match block {
            OutputBlock::Title(t) => {
                println!("\n{}", t);
                printed_anything = true;
            }
            OutputBlock::Section(s) => {
                if printed_anything {
                    println!(); // visual separation between sections
                }
                println!("{}", s);
                printed_anything = true;
            }
            OutputBlock::Text(line) => {
                println!("{}", line);
                printed_anything = true;
            }
            OutputBlock::Entry(line) => {
                println!("  {}", line);
                printed_anything = true;
            }
            OutputBlock::Footer(f) => {
                println!("\n{}", f);
                printed_anything = true;
            }
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("seira_catalog=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config() -> CatalogConfig {
    let explicit = env::args().nth(1).map(PathBuf::from);
    let path = explicit
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));

    match load_config_from_file(&path) {
        Ok(config) => {
            info!(path = %path.display(), "using config file");
            config
        }
        Err(e) if explicit.is_none() => {
            warn!(error = %e, "no usable default config, using built-in settings");
            CatalogConfig::default()
        }
        Err(e) => {
            eprintln!("Failed to load config file '{}': {e}", path.display());
            std::process::exit(1);
        }
    }
}

fn main() -> io::Result<()> {
    init_logging();
    let config = load_config();

    let transport = match HttpTransport::new(config.http_timeout) {
        Ok(t) => Arc::new(t),
        Err(e) => {
            eprintln!("Failed to build HTTP client: {e}");
            std::process::exit(1);
        }
    };
    let store = CollectionStore::new(transport, config.sources.clone());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let catalog = match runtime.block_on(store.load_all()) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    for (kind, reason) in store.failures() {
        println!("Aviso: {} indisponível ({})", kind, reason);
    }

    println!("Catálogo Seira");
    for kind in CollectionKind::ALL {
        println!("  {:<10} {}", kind.as_str(), catalog.len(kind));
    }
    println!();
    println!("Digite 'help' para ver os comandos, 'quit' para sair.\n");

    let mut session = CatalogSession::new(catalog, config);
    let stdin = io::stdin();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        let bytes_read = stdin.read_line(&mut input)?;
        if bytes_read == 0 {
            println!("\nAté mais.");
            break;
        }

        let (out, quit) = session.step(&input);
        flush_output(out);
        if quit {
            break;
        }
    }

    Ok(())
}
