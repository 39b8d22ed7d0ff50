//! Writing generated headers to disk.

use std::fs;
use std::path::Path;

use zendgen_registry::ExtensionBuilder;

use crate::config::GeneratorConfig;
use crate::error::{GenerateError, GenerateResult};
use crate::generator::{GeneratedHeader, generate};

/// Write `header` to `path`, creating parent directories as needed.
pub fn write_header(header: &GeneratedHeader, path: impl AsRef<Path>) -> GenerateResult<()> {
    let path = path.as_ref();
    let io_err = |source: std::io::Error| GenerateError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, &header.text).map_err(io_err)?;

    tracing::debug!(path = %path.display(), bytes = header.text.len(), "wrote header");
    Ok(())
}

/// Generate and write in one step. Nothing is written unless generation
/// succeeds.
pub fn generate_to_file(
    builder: ExtensionBuilder,
    config: GeneratorConfig,
    path: impl AsRef<Path>,
) -> GenerateResult<GeneratedHeader> {
    let header = generate(builder, config)?;
    write_header(&header, path)?;
    Ok(header)
}
