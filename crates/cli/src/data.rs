use anyhow::{Context, Result};
use amlfig::Scene;
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::output::ensure_dir;

/// Long-format table of every data series: `series, x, y`.
pub fn series_frame(scene: &Scene) -> PolarsResult<DataFrame> {
    let mut names: Vec<&str> = Vec::new();
    let mut xs: Vec<f64> = Vec::new();
    let mut ys: Vec<f64> = Vec::new();
    for s in &scene.series {
        for p in &s.points {
            names.push(s.name);
            xs.push(p.x);
            ys.push(p.y);
        }
    }
    df!("series" => names, "x" => xs, "y" => ys)
}

/// Write `out_dir/<stem>.csv`.
pub fn write_csv(scene: &Scene, out_dir: &Path) -> Result<PathBuf> {
    ensure_dir(out_dir)?;
    let path = out_dir.join(format!("{}.csv", scene.kind.stem()));
    let mut df = series_frame(scene)?;
    let mut file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(
        scene = %scene.kind,
        path = %path.display(),
        rows = df.height(),
        "data"
    );
    Ok(path)
}
