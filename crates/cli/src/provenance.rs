//! `<stem>.provenance.json` sidecars describing how a PDF was produced.

use anyhow::{Context, Result};
use amlfig::Scene;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming the source revision, set by the build or CI.
pub const CODE_REV_VAR: &str = "GIT_COMMIT";

/// Sidecar contents for one rendered figure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sidecar {
    pub code_rev: String,
    pub generator: String,
    pub scene: String,
    pub title: String,
    /// PDF file name, relative to the sidecar.
    pub pdf: String,
    pub pdf_bytes: usize,
    /// Point count per data series.
    pub series: BTreeMap<String, usize>,
}

impl Sidecar {
    pub fn for_scene(scene: &Scene, pdf_bytes: usize) -> Self {
        Self {
            code_rev: code_rev(),
            generator: format!("amlfig {}", amlfig::VERSION),
            scene: scene.kind.display_name().to_string(),
            title: scene.kind.title().to_string(),
            pdf: scene.file_name(),
            pdf_bytes,
            series: scene
                .series
                .iter()
                .map(|s| (s.name.to_string(), s.points.len()))
                .collect(),
        }
    }
}

/// Sidecar path for a PDF: same directory, `<stem>.provenance.json`.
pub fn sidecar_path(pdf: &Path) -> PathBuf {
    let stem = pdf.file_stem().and_then(|s| s.to_str()).unwrap_or("figure");
    pdf.with_file_name(format!("{stem}.provenance.json"))
}

/// Write `sidecar` next to `pdf`; returns the sidecar path.
pub fn write_sidecar(pdf: &Path, sidecar: &Sidecar) -> Result<PathBuf> {
    let path = sidecar_path(pdf);
    fs::write(&path, serde_json::to_vec_pretty(sidecar)?)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::debug!(path = %path.display(), "provenance");
    Ok(path)
}

/// Revision from `GIT_COMMIT`, or `unknown`.
pub fn code_rev() -> String {
    code_rev_from(std::env::var(CODE_REV_VAR).ok())
}

fn code_rev_from(value: Option<String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => "unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn sidecar_sits_next_to_the_pdf() {
        assert_eq!(
            sidecar_path(Path::new("/tmp/out/kmeans_voronoi.pdf")),
            Path::new("/tmp/out/kmeans_voronoi.provenance.json")
        );
        assert_eq!(
            sidecar_path(Path::new("knn_decision_boundary.pdf")),
            Path::new("knn_decision_boundary.provenance.json")
        );
    }

    #[test]
    fn code_rev_falls_back_to_unknown() {
        assert_eq!(code_rev_from(Some(" abc123\n".into())), "abc123");
        assert_eq!(code_rev_from(Some("  ".into())), "unknown");
        assert_eq!(code_rev_from(None), "unknown");
    }

    #[test]
    fn sidecar_records_scene_payload_and_pdf_size() {
        let dir = tempdir().unwrap();
        let scene = amlfig::knn_decision_boundary().unwrap();
        let pdf = scene.output_path(dir.path());
        let bytes = scene.save_pdf(&pdf).unwrap();

        let path = write_sidecar(&pdf, &Sidecar::for_scene(&scene, bytes)).unwrap();
        let back: Sidecar = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
        assert_eq!(back.scene, "k-NN");
        assert_eq!(back.pdf, "knn_decision_boundary.pdf");
        assert_eq!(back.pdf_bytes as u64, fs::metadata(&pdf).unwrap().len());
        assert_eq!(back.series["boundary"], 300);
        assert_eq!(back.series["class_a"], 6);
        assert!(back.generator.starts_with("amlfig "));
    }
}
