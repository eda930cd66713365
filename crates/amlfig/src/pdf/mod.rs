//! Minimal single-page PDF 1.4 writer.
//!
//! Layout of the file
//! - Object 1: catalog, 2: page tree, 3: page, 4: content stream,
//!   5: font, 6: info dictionary.
//! - The cross-reference table records exact byte offsets; no timestamps or
//!   IDs are written, so equal pages serialize to equal bytes.

pub mod content;
pub mod font;

pub use content::{ContentStream, LineCap, LineJoin};

use content::num;
use font::{encode_win_ansi, literal_string, BASE_FONT};

/// Font resource name used by every text operator.
pub const FONT_RESOURCE: &str = "F1";

/// Page resources: the base font plus alpha graphics states.
#[derive(Clone, Debug, Default)]
pub struct Resources {
    alpha_states: Vec<(String, f64, f64)>,
}

impl Resources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of an `ExtGState` with fill alpha `fill` and stroke alpha `stroke`,
    /// registering it on first use.
    pub fn alpha_state(&mut self, fill: f64, stroke: f64) -> String {
        let (fill, stroke) = (fill.clamp(0.0, 1.0), stroke.clamp(0.0, 1.0));
        if let Some((name, _, _)) = self
            .alpha_states
            .iter()
            .find(|(_, f, s)| num(*f) == num(fill) && num(*s) == num(stroke))
        {
            return name.clone();
        }
        let name = format!("GS{}", self.alpha_states.len());
        self.alpha_states.push((name.clone(), fill, stroke));
        name
    }

    fn to_dict(&self) -> String {
        let mut ext = String::new();
        for (name, fill, stroke) in &self.alpha_states {
            ext.push_str(&format!(
                " /{name} << /Type /ExtGState /ca {} /CA {} >>",
                num(*fill),
                num(*stroke)
            ));
        }
        format!(
            "<< /ProcSet [/PDF /Text] /Font << /{FONT_RESOURCE} 5 0 R >> /ExtGState <<{ext} >> >>"
        )
    }
}

/// Document information dictionary entries.
#[derive(Clone, Debug, Default)]
pub struct DocInfo {
    pub title: Option<String>,
    pub producer: String,
}

/// One page: size in points, content, and the resources it references.
#[derive(Clone, Debug)]
pub struct Page {
    pub width: f64,
    pub height: f64,
    pub content: ContentStream,
    pub resources: Resources,
}

/// Serialize a single-page document.
pub fn write_document(page: &Page, info: &DocInfo) -> Vec<u8> {
    let mut out: Vec<u8> = Vec::with_capacity(page.content.len() + 1024);
    out.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");

    let mut info_dict = format!(
        "<< /Producer {}",
        literal_string(&encode_win_ansi(&info.producer))
    );
    if let Some(title) = &info.title {
        info_dict.push_str(&format!(" /Title {}", literal_string(&encode_win_ansi(title))));
    }
    info_dict.push_str(" >>");

    let mut stream = format!("<< /Length {} >>\nstream\n", page.content.len()).into_bytes();
    stream.extend_from_slice(page.content.as_bytes());
    stream.extend_from_slice(b"\nendstream");

    let objects: Vec<Vec<u8>> = vec![
        b"<< /Type /Catalog /Pages 2 0 R >>".to_vec(),
        b"<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_vec(),
        format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] /Resources {} /Contents 4 0 R >>",
            num(page.width),
            num(page.height),
            page.resources.to_dict()
        )
        .into_bytes(),
        stream,
        format!(
            "<< /Type /Font /Subtype /Type1 /BaseFont /{BASE_FONT} /Encoding /WinAnsiEncoding >>"
        )
        .into_bytes(),
        info_dict.into_bytes(),
    ];

    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n", i + 1).as_bytes());
        out.extend_from_slice(body);
        out.extend_from_slice(b"\nendobj\n");
    }

    let xref_at = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for off in &offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", off).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            objects.len(),
            xref_at
        )
        .as_bytes(),
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    fn sample_page() -> Page {
        let mut resources = Resources::new();
        let mut content = ContentStream::new();
        let gs = resources.alpha_state(0.12, 0.12);
        content.graphics_state(&gs);
        content.rect(10.0, 10.0, 50.0, 20.0);
        content.fill();
        content.text(FONT_RESOURCE, 10.0, vector![5.0, 5.0], 0.0, b"hi");
        Page {
            width: 200.0,
            height: 100.0,
            content,
            resources,
        }
    }

    fn find(hay: &[u8], needle: &[u8]) -> Option<usize> {
        hay.windows(needle.len()).position(|w| w == needle)
    }

    #[test]
    fn header_and_trailer() {
        let info = DocInfo {
            title: Some("Häufigkeit".into()),
            producer: "amlfig test".into(),
        };
        let bytes = write_document(&sample_page(), &info);
        assert!(bytes.starts_with(b"%PDF-1.4\n"));
        assert!(bytes.ends_with(b"%%EOF\n"));
        assert!(find(&bytes, b"/MediaBox [0 0 200 100]").is_some());
        assert!(find(&bytes, b"/GS0 << /Type /ExtGState /ca 0.12 /CA 0.12 >>").is_some());
        assert!(find(&bytes, b"/Title (H\\344ufigkeit)").is_some());
        assert!(find(&bytes, b"/BaseFont /Helvetica /Encoding /WinAnsiEncoding").is_some());
    }

    #[test]
    fn xref_offsets_point_at_objects() {
        let bytes = write_document(&sample_page(), &DocInfo::default());
        let text = String::from_utf8_lossy(&bytes);
        let startxref: usize = text
            .rsplit("startxref\n")
            .next()
            .and_then(|tail| tail.lines().next())
            .and_then(|l| l.parse().ok())
            .unwrap();
        assert!(bytes[startxref..].starts_with(b"xref\n0 7\n"));
        let table = String::from_utf8_lossy(&bytes[startxref..]);
        let entries: Vec<usize> = table
            .lines()
            .skip(3)
            .take(6)
            .map(|l| l[..10].parse().unwrap())
            .collect();
        for (i, off) in entries.iter().enumerate() {
            let head = format!("{} 0 obj\n", i + 1);
            assert!(bytes[*off..].starts_with(head.as_bytes()), "object {}", i + 1);
        }
    }

    #[test]
    fn stream_length_matches_content() {
        let page = sample_page();
        let bytes = write_document(&page, &DocInfo::default());
        let marker = format!("<< /Length {} >>\nstream\n", page.content.len());
        let start = find(&bytes, marker.as_bytes()).unwrap() + marker.len();
        assert_eq!(
            &bytes[start..start + page.content.len()],
            page.content.as_bytes()
        );
        assert!(bytes[start + page.content.len()..].starts_with(b"\nendstream"));
    }

    #[test]
    fn alpha_states_are_deduplicated() {
        let mut r = Resources::new();
        let a = r.alpha_state(0.3, 0.3);
        let b = r.alpha_state(0.9, 0.9);
        let c = r.alpha_state(0.3, 0.3);
        assert_eq!(a, "GS0");
        assert_eq!(b, "GS1");
        assert_eq!(a, c);
    }
}
