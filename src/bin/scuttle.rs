use std::{
    io::{BufRead, Write, stdin, stdout},
    sync::Arc,
};

use miette::{IntoDiagnostic, Result, miette};
use tracing_subscriber::EnvFilter;

use scuttle_catalog::{
    CatalogManager, DEFAULT_CATALOG, EmptyCatalogManager, InMemoryCatalogManager,
    MemoryTableProvider, Session,
};

/// Set to `1` or `true` to start with the read-only catalog manager.
const READ_ONLY_ENV: &str = "SCUTTLE_READ_ONLY";

fn read_only_requested() -> bool {
    std::env::var(READ_ONLY_ENV)
        .map(|value| matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true"))
        .unwrap_or(false)
}

fn build_manager() -> Result<Arc<dyn CatalogManager>> {
    if read_only_requested() {
        return Ok(Arc::new(EmptyCatalogManager::new()));
    }

    let manager = InMemoryCatalogManager::new();
    let demo = MemoryTableProvider::new("local")
        .with_table("users")
        .with_table("customers");
    manager.register_table_provider(DEFAULT_CATALOG, Arc::new(demo))?;

    Ok(Arc::new(manager))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(false)
                .context_lines(3)
                .tab_width(4)
                .break_words(true)
                .build(),
        )
    }))
    .into_diagnostic()?;
    miette::set_panic_hook();

    let session = Session::new(build_manager()?);

    println!("Catalogs: {:?}", session.manager().catalog_names());
    println!("Current catalog: {}", session.manager().current_catalog().name());

    let mut buf = String::new();

    let mut stdin = stdin().lock();
    let mut stdout = stdout().lock();

    loop {
        stdout.write_all("DB: ".as_bytes()).into_diagnostic()?;
        stdout.flush().into_diagnostic()?;

        match stdin.read_line(&mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => return Err(miette!("Input reading failed")),
        }

        let input = buf.trim();
        if input == "exit" {
            break;
        }
        if input.is_empty() {
            buf.clear();
            continue;
        }

        let response = match session.execute(input) {
            Ok(res) => res,
            Err(err) => {
                println!("{:?}", err.with_source_code(input.to_string()));
                buf.clear();
                continue;
            }
        };

        stdout
            .write_all(format!("{: <8} | {}\n", "Results", response.column).as_bytes())
            .into_diagnostic()?;

        for (idx, row) in response.rows.iter().enumerate() {
            stdout
                .write_all(format!("{: <8} | {}\n", idx, row).as_bytes())
                .into_diagnostic()?;
        }

        stdout.flush().into_diagnostic()?;
        buf.clear();
    }

    println!("Exiting Scuttle");

    Ok(())
}
