use std::io::{BufWriter, Write};
use std::path::PathBuf;

use slash_command_core::SlashCommandData;
use tracing::debug;

use crate::error::Result;

/// Writes a command definition as pretty-printed JSON.
///
/// Every `{name}` in `path_template` is replaced with the command name.
/// Missing parent directories are created. Returns the written path.
///
/// # Examples
///
/// ```
/// use slash_command_core::SlashCommandData;
/// use slash_command_registry::log_definition;
///
/// let dir = tempfile::TempDir::new().unwrap();
/// let template = dir.path().join("commands/{name}.json");
/// let data = SlashCommandData::new("ping", "Pong.");
///
/// let path = log_definition(template.to_str().unwrap(), &data).unwrap();
/// assert!(path.ends_with("commands/ping.json"));
/// ```
pub fn log_definition(path_template: &str, data: &SlashCommandData) -> Result<PathBuf> {
    let path = PathBuf::from(path_template.replace("{name}", &data.name));

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = std::fs::File::create(&path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    debug!(command = %data.name, path = %path.display(), "Wrote command definition");
    Ok(path)
}
