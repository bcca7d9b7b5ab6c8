//! Command implementations.

use anyhow::Context;
use camino::Utf8Path;

use clause_meter_core::tree::ParseNode;

pub mod clauses;
pub mod info;
pub mod score;

/// Read a file and validate its size against the configured limit.
///
/// Combines the file-read and size-validation steps that every command
/// needs.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = metadata.len() as usize;
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    let content = std::fs::read_to_string(path.as_std_path())
        .with_context(|| format!("failed to read {path}"))?;
    Ok(content)
}

/// Read and deserialize a JSON parse tree, then validate its shape.
pub fn read_parse_tree(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<ParseNode> {
    let content = read_input_file(path, max_bytes)?;
    let tree: ParseNode = serde_json::from_str(&content)
        .with_context(|| format!("{path} is not a valid parse tree"))?;
    tree.validate()
        .with_context(|| format!("{path} contains a malformed parse tree"))?;
    Ok(tree)
}
