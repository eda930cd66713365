use anyhow::{Context, Result};
use amlfig::Scene;
use std::fs;
use std::path::{Path, PathBuf};

use crate::provenance::{write_sidecar, Sidecar};

/// Create `dir` unless it is the empty (current) directory.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.as_os_str().is_empty() {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    Ok(())
}

/// Render `scene` into `out_dir/<stem>.pdf`, replacing any existing file.
/// With `provenance`, a `<stem>.provenance.json` sidecar is written next to it.
pub fn write_scene(scene: &Scene, out_dir: &Path, provenance: bool) -> Result<PathBuf> {
    ensure_dir(out_dir)?;
    let path = scene.output_path(out_dir);
    let bytes = scene
        .save_pdf(&path)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(scene = %scene.kind, path = %path.display(), bytes, "figure");
    if provenance {
        write_sidecar(&path, &Sidecar::for_scene(scene, bytes))?;
    }
    Ok(path)
}
