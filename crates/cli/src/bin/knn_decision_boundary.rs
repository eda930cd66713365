//! Writes `knn_decision_boundary.pdf` into the working directory.

use anyhow::{Context, Result};
use amlfig_cli::{logging, output};
use std::path::Path;

fn main() -> Result<()> {
    logging::init(0);
    let scene = amlfig::knn_decision_boundary().context("building the k-NN scene")?;
    output::write_scene(&scene, Path::new(""), false)?;
    println!("{}", scene.confirmation());
    Ok(())
}
