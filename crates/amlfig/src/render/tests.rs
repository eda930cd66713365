use super::*;
use crate::pdf::font::{text_width, ASCENT};
use crate::pdf::FONT_RESOURCE;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters_backend::DrawingBackend;

fn demo(root: &PdfArea<'_>) -> ChartResult {
    let mut chart = ChartBuilder::on(root)
        .margin(40)
        .x_label_area_size(120)
        .y_label_area_size(140)
        .build_cartesian_2d(0f64..10f64, 0f64..10f64)?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(6)
        .y_labels(6)
        .x_label_formatter(&|v: &f64| format!("{v:.0}"))
        .y_label_formatter(&|v: &f64| format!("{v:.0}"))
        .x_desc("x")
        .y_desc("Häufigkeit")
        .label_style(("sans-serif", 42))
        .draw()?;
    chart.draw_series(std::iter::once(Polygon::new(
        vec![(0.0, 0.0), (0.0, 10.0), (10.0, 0.0)],
        RGBColor(0, 160, 135).mix(0.12),
    )))?;
    chart
        .draw_series(LineSeries::new(
            vec![(0.0, 10.0), (10.0, 0.0)],
            RED.stroke_width(10),
        ))?
        .label("Boundary")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 60, y)], RED.stroke_width(10)));
    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.9))
        .border_style(BLACK)
        .label_font(("sans-serif", 38))
        .draw()?;
    Ok(())
}

fn content(page: &Page) -> String {
    String::from_utf8(page.content.as_bytes().to_vec()).unwrap()
}

#[test]
fn output_is_a_pdf_and_deterministic() {
    let a = render_pdf(Some("Demo"), demo).unwrap();
    let b = render_pdf(Some("Demo"), demo).unwrap();
    assert!(a.starts_with(b"%PDF-"));
    assert!(a.ends_with(b"%%EOF\n"));
    assert_eq!(a, b);
}

#[test]
fn page_is_cropped_to_the_drawing() {
    let page = render_page(demo).unwrap();
    assert!(page.width > 100.0 && page.width < 720.0);
    assert!(page.height > 100.0 && page.height < 446.4);
    // the body is shifted so the crop starts at the origin
    assert!(content(&page).starts_with("1 0 0 1 -"));
}

#[test]
fn empty_chart_keeps_the_full_canvas() {
    let page = render_page(|_root| Ok(())).unwrap();
    assert!((page.width - 720.0).abs() < 1e-9);
    assert!((page.height - 446.4).abs() < 1e-9);
}

#[test]
fn translucent_paint_uses_alpha_states() {
    let page = render_page(demo).unwrap();
    let mut r = page.resources.clone();
    // fill 0.12 and the legend background 0.9 were registered while drawing
    assert_eq!(r.alpha_state(0.12, 1.0), "GS0");
    assert_eq!(r.alpha_state(0.9, 1.0), "GS1");
    let s = content(&page);
    assert!(s.contains("/GS0 gs\n0 0.627 0.529 rg"));
    assert!(s.contains("/GS1 gs\n1 1 1 rg"));
}

#[test]
fn labels_are_text_with_a_rotated_y_description() {
    let s = content(&render_page(demo).unwrap());
    for t in ["(0) Tj", "(2) Tj", "(10) Tj", "(x) Tj", "(Boundary) Tj"] {
        assert!(s.contains(t), "missing {t}");
    }
    let at = s.find("(H\\344ufigkeit) Tj").unwrap();
    let tm = s[..at].rfind(" Tm").unwrap();
    let line_start = s[..tm].rfind('\n').unwrap() + 1;
    assert!(s[line_start..].starts_with("0 1 -1 0 "));
}

#[test]
fn zero_alpha_draws_nothing() {
    let mut canvas = Canvas::new((100, 100));
    {
        let mut b = PdfBackend::new(&mut canvas);
        b.draw_line((0, 0), (50, 50), &TRANSPARENT.stroke_width(4))
            .unwrap();
        b.fill_polygon(vec![(0, 0), (10, 0), (10, 10)], &TRANSPARENT.to_backend_color())
            .unwrap();
    }
    assert!(canvas.bounds().is_none());
}

#[test]
fn circles_are_bezier_ellipses_with_stroke_reach() {
    let mut canvas = Canvas::new((1000, 1000));
    {
        let mut b = PdfBackend::new(&mut canvas);
        b.draw_circle((500, 500), 100, &BLACK.stroke_width(10), false)
            .unwrap();
    }
    let (lo, hi) = canvas.bounds().unwrap();
    // radius 24 pt plus half of a 2.4 pt stroke
    assert!((hi.x - lo.x - 50.4).abs() < 1e-9);
    assert!((lo.x - 94.8).abs() < 1e-9);
    let page = canvas.into_page(0.0);
    let s = content(&page);
    assert_eq!(s.lines().filter(|l| l.ends_with(" c")).count(), 4);
    assert!(s.contains("2.4 w\n"));
}

#[test]
fn centered_text_is_shifted_by_half_its_width() {
    let mut canvas = Canvas::new((1000, 1000));
    {
        let root = PdfBackend::new(&mut canvas).into_drawing_area();
        let style = TextStyle::from(("sans-serif", 50.0).into_font())
            .pos(Pos::new(HPos::Center, VPos::Top));
        root.draw(&Text::new("Tx", (500, 100), style)).unwrap();
    }
    let half = text_width(50.0, "Tx") / 2.0;
    let x = (500.0 - half) * 0.24;
    let y = (1000.0 - 100.0 - ASCENT * 50.0) * 0.24;
    let s = content(&canvas.into_page(0.0));
    let expected = format!(
        "/{FONT_RESOURCE} 12 Tf\n1 0 0 1 {} {} Tm\n(Tx) Tj",
        crate::pdf::content::num(x),
        crate::pdf::content::num(y)
    );
    assert!(s.contains(&expected), "{s}");
}

#[test]
fn text_estimate_follows_helvetica_metrics() {
    let mut canvas = Canvas::new((100, 100));
    let b = PdfBackend::new(&mut canvas);
    let style = TextStyle::from(("sans-serif", 100.0).into_font());
    let (w, h) = b.estimate_text_size("10", &style).unwrap();
    assert_eq!((w, h), (112, 93));
}

#[test]
fn rectangles_use_the_re_operator() {
    let mut canvas = Canvas::new((1000, 1000));
    {
        let mut b = PdfBackend::new(&mut canvas);
        b.draw_rect((100, 200), (300, 100), &BLUE.filled(), true)
            .unwrap();
    }
    let (lo, hi) = canvas.bounds().unwrap();
    for (got, want) in [(lo.x, 24.0), (lo.y, 192.0), (hi.x, 72.0), (hi.y, 216.0)] {
        assert!((got - want).abs() < 1e-9, "{got} vs {want}");
    }
    let s = content(&canvas.into_page(0.0));
    assert!(s.contains("0 0 1 rg\n24 192 48 24 re\nf\n"), "{s}");
}
