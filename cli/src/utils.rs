use std::path::Path;

use env_defs::DeploymentRecord;

pub fn record_to_json(record: &DeploymentRecord) -> Result<String, anyhow::Error> {
    Ok(serde_json::to_string_pretty(record)?)
}

/// Writes the record to `output`, or to stdout when no file is given.
pub fn write_record(record: &DeploymentRecord, output: Option<&Path>) -> Result<(), anyhow::Error> {
    let json = record_to_json(record)?;
    match output {
        Some(path) => {
            std::fs::write(path, format!("{}\n", json))?;
            log::info!("Deployment record written to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
