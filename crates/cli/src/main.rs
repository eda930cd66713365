use anyhow::{Context, Result};
use amlfig::{Scene, SceneKind};
use amlfig_cli::{data, logging, output, provenance};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "amlfig")]
#[command(about = "Render the AML slide figures as vector PDFs")]
struct Cmd {
    /// Directory receiving every artifact
    #[arg(long, global = true, default_value = ".")]
    out_dir: PathBuf,

    /// Write a `<stem>.provenance.json` sidecar next to each PDF
    #[arg(long, global = true)]
    provenance: bool,

    /// Log verbosity on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    action: Option<Action>,
}

#[derive(Subcommand)]
enum Action {
    /// Render figures to PDF (the default)
    Render {
        #[arg(value_enum, default_value_t = Which::All)]
        which: Which,
    },
    /// Export the geometry behind each figure as CSV
    Data {
        #[arg(value_enum, default_value_t = Which::All)]
        which: Which,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Which {
    Kmeans,
    Knn,
    All,
}

impl Which {
    fn kinds(self) -> &'static [SceneKind] {
        match self {
            Which::Kmeans => &[SceneKind::KMeans],
            Which::Knn => &[SceneKind::Knn],
            Which::All => &SceneKind::ALL,
        }
    }
}

#[derive(Serialize)]
struct SceneReport {
    scene: &'static str,
    file: String,
    title: &'static str,
    series: usize,
    points: usize,
}

#[derive(Serialize)]
struct Report {
    code_rev: String,
    generator: String,
    scenes: Vec<SceneReport>,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    logging::init(cmd.verbose);
    match cmd.action.unwrap_or(Action::Render { which: Which::All }) {
        Action::Render { which } => render(which, &cmd.out_dir, cmd.provenance),
        Action::Data { which } => export(which, &cmd.out_dir),
        Action::Report => report(),
    }
}

fn build(kind: SceneKind) -> Result<Scene> {
    let scene = kind
        .build()
        .with_context(|| format!("building the {kind} scene"))?;
    tracing::debug!(scene = %kind, series = scene.series.len(), "built");
    Ok(scene)
}

fn render(which: Which, out_dir: &Path, with_provenance: bool) -> Result<()> {
    for &kind in which.kinds() {
        let scene = build(kind)?;
        output::write_scene(&scene, out_dir, with_provenance)?;
        println!("{}", scene.confirmation());
    }
    Ok(())
}

fn export(which: Which, out_dir: &Path) -> Result<()> {
    for &kind in which.kinds() {
        let scene = build(kind)?;
        let path = data::write_csv(&scene, out_dir)?;
        println!("✓ {kind} data saved to {}", path.display());
    }
    Ok(())
}

fn report() -> Result<()> {
    let scenes = SceneKind::ALL
        .iter()
        .map(|&kind| {
            let scene = build(kind)?;
            Ok(SceneReport {
                scene: kind.display_name(),
                file: scene.file_name(),
                title: kind.title(),
                series: scene.series.len(),
                points: scene.series.iter().map(|s| s.points.len()).sum(),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    let obj = Report {
        code_rev: provenance::code_rev(),
        generator: format!("amlfig {}", amlfig::VERSION),
        scenes,
    };
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
