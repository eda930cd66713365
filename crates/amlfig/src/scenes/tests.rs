use super::*;
use crate::pdf::Page;
use crate::render::render_page;

fn kmeans() -> Scene {
    kmeans_voronoi()
}

fn knn() -> Scene {
    knn_decision_boundary().expect("literal control points are valid")
}

fn page(scene: &Scene) -> Page {
    render_page(|root| scene.draw(root)).unwrap()
}

fn content(page: &Page) -> String {
    String::from_utf8(page.content.as_bytes().to_vec()).unwrap()
}

#[test]
fn confirmation_lines() {
    assert_eq!(
        kmeans().confirmation(),
        "✓ k-Means plot saved to kmeans_voronoi.pdf"
    );
    assert_eq!(
        knn().confirmation(),
        "✓ k-NN plot saved to knn_decision_boundary.pdf"
    );
}

#[test]
fn literal_points_lie_in_window() {
    let data = [
        "cluster1",
        "cluster2",
        "centroids",
        "class_a",
        "class_b",
        "query",
        "control_points",
    ];
    for scene in [kmeans(), knn()] {
        for s in scene.series.iter().filter(|s| data.contains(&s.name)) {
            assert!(
                s.points
                    .iter()
                    .all(|p| (0.0..=10.0).contains(&p.x) && (0.0..=10.0).contains(&p.y)),
                "{} / {}",
                scene.kind,
                s.name
            );
        }
    }
}

#[test]
fn clusters_have_six_points() {
    let k = kmeans();
    assert_eq!(k.points("cluster1").len(), 6);
    assert_eq!(k.points("cluster2").len(), 6);
    assert_eq!(k.points("centroids").len(), 2);
    let n = knn();
    assert_eq!(n.points("class_a").len(), 6);
    assert_eq!(n.points("class_b").len(), 6);
    assert_eq!(n.points("query").len(), 1);
    assert!(n.points("cluster1").is_empty());
}

#[test]
fn kmeans_boundary_endpoints() {
    let k = kmeans();
    let b = k.points("boundary");
    assert_eq!(b.len(), 2);
    assert_eq!((b[0].x, b[1].x), (0.0, 10.0));
    assert!((b[0].y - 10.6).abs() < 1e-12);
    assert!((b[1].y - 0.6).abs() < 1e-12);
    // the hand-drawn regions share the bisector's endpoints
    for name in ["region1", "region2"] {
        let r = k.points(name);
        assert!(r.iter().any(|p| (p - b[0]).norm() < 1e-12));
        assert!(r.iter().any(|p| (p - b[1]).norm() < 1e-12));
    }
}

#[test]
fn knn_boundary_interpolates_and_is_resampled() {
    let n = knn();
    let curve = n.points("boundary");
    assert_eq!(curve.len(), 300);
    assert_eq!(curve[0].x, 3.8);
    assert_eq!(curve[299].x, 5.3);
    assert!((curve[0].y - 7.2).abs() < 1e-9);
    assert!(curve[299].y.abs() < 1e-9);
    assert!(curve.windows(2).all(|w| w[1].x >= w[0].x));
}

#[test]
fn knn_regions_hug_the_curve() {
    let n = knn();
    let curve = n.points("boundary");
    let a = n.points("region_a");
    let b = n.points("region_b");
    assert_eq!(a.len(), 3 + 300 + 3);
    assert_eq!(b.len(), 4 + 300 + 3);
    assert_eq!(&a[3..303], curve);
    let reversed: Vec<_> = curve.iter().rev().copied().collect();
    assert_eq!(&b[4..304], &reversed[..]);
}

fn legend_rows(scene: &Scene, labels: &[&str]) -> Vec<usize> {
    let s = content(&page(scene));
    labels
        .iter()
        .map(|l| {
            s.find(&format!("({l}) Tj"))
                .unwrap_or_else(|| panic!("no legend row {l}"))
        })
        .collect()
}

#[test]
fn legend_rows_follow_drawing_order() {
    let at = legend_rows(
        &kmeans(),
        &["Decision Boundary", "Cluster 1", "Cluster 2", "Zentroid"],
    );
    assert!(at.windows(2).all(|w| w[0] < w[1]), "{at:?}");

    let at = legend_rows(
        &knn(),
        &[
            "Decision Boundary",
            "Unauff\\344llig",
            "Auff\\344llig",
            "Neue Tx",
            "k-Umgebung",
        ],
    );
    assert!(at.windows(2).all(|w| w[0] < w[1]), "{at:?}");
}

#[test]
fn axis_labels_and_ticks_are_drawn() {
    let s = content(&page(&knn()));
    for t in [
        "(Feature 1 \\(z.B. Transaktionsh\\366he\\)) Tj",
        "(Feature 2 \\(z.B. H\\344ufigkeit\\)) Tj",
        "(0) Tj",
        "(4) Tj",
        "(10) Tj",
    ] {
        assert!(s.contains(t), "missing {t}");
    }
    assert!(!s.contains("(1) Tj"));
}

#[test]
fn fills_are_outlined_in_their_own_color() {
    let p = page(&kmeans());
    let s = content(&p);
    let mut r = p.resources.clone();
    let face = r.alpha_state(0.12, 1.0);
    let edge = r.alpha_state(1.0, 0.12);
    // both states were registered while drawing, so no new ones appear
    assert_eq!(r.alpha_state(0.12, 1.0), face);
    assert!(s.contains(&format!("/{face} gs\n0 0.627 0.529 rg")));
    assert!(s.contains(&format!("/{edge} gs\n0 0.627 0.529 RG\n0.96 w")));
    assert!(s.contains(&format!("/{edge} gs\n0.235 0.329 0.533 RG\n0.96 w")));
}

#[test]
fn rendering_is_deterministic_and_titled() {
    for scene in all_scenes().unwrap() {
        let a = scene.render_pdf().unwrap();
        let b = scene.render_pdf().unwrap();
        assert_eq!(a, b);
        assert!(a.starts_with(b"%PDF-"));
        let title = format!("/Title ({}", &scene.kind.title()[..5]);
        assert!(a.windows(title.len()).any(|w| w == title.as_bytes()));
    }
}

#[test]
fn page_is_cropped_inside_the_figure() {
    for scene in [kmeans(), knn()] {
        let p = page(&scene);
        assert!(p.width > 600.0 && p.width <= 720.0, "{}", p.width);
        assert!(p.height > 350.0 && p.height <= 446.4, "{}", p.height);
    }
}

#[test]
fn save_writes_one_file_per_scene() {
    let dir = tempfile::tempdir().unwrap();
    for scene in all_scenes().unwrap() {
        let path = scene.output_path(dir.path());
        let n = scene.save_pdf(&path).unwrap();
        assert_eq!(n as u64, std::fs::metadata(&path).unwrap().len());
    }
    let mut names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["kmeans_voronoi.pdf", "knn_decision_boundary.pdf"]);
}

#[test]
fn save_into_missing_dir_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let scene = kmeans();
    let err = scene
        .save_pdf(dir.path().join("missing").join(scene.file_name()))
        .unwrap_err();
    assert!(matches!(err, RenderError::Io(_)));
}
