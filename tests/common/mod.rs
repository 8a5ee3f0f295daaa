use std::io::{Error, Write};
use tempfile::NamedTempFile;
use vendsim::application::config::EngineConfig;
use vendsim::application::engine::TransactionEngine;
use vendsim::domain::catalog::Catalog;
use vendsim::infrastructure::in_memory::InMemoryStockLedger;

#[allow(dead_code)]
pub fn engine_with(config: EngineConfig) -> TransactionEngine {
    let catalog = Catalog::standard();
    let stock = Box::new(InMemoryStockLedger::from_catalog(&catalog));
    TransactionEngine::new(catalog, stock, config)
}

#[allow(dead_code)]
pub fn instant_engine() -> TransactionEngine {
    engine_with(EngineConfig::instant())
}

/// Writes a command script with the standard header.
#[allow(dead_code)]
pub fn write_script(rows: &[&str]) -> Result<NamedTempFile, Error> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "command, arg")?;
    for row in rows {
        writeln!(file, "{row}")?;
    }
    file.flush()?;
    Ok(file)
}
