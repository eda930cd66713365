//! Writes `kmeans_voronoi.pdf` into the working directory.

use anyhow::Result;
use amlfig_cli::{logging, output};
use std::path::Path;

fn main() -> Result<()> {
    logging::init(0);
    let scene = amlfig::kmeans_voronoi();
    output::write_scene(&scene, Path::new(""), false)?;
    println!("{}", scene.confirmation());
    Ok(())
}
