//! Contours from base64-encoded SVG.
//!
//! Only outline geometry is read: the `d` attribute of every `<path>`
//! and the `points` attribute of every `<polygon>`. Styles, transforms
//! and other shapes are ignored. Text that is not markup is parsed as
//! bare path data.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use kurbo::{BezPath, PathEl};
use prism_math::Point2;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::SourceError;

/// Maximum distance between a curve and its flattened polyline.
pub const FLATTEN_TOLERANCE: f64 = 0.25;

/// Decode a base64 SVG payload, with or without a `data:` URI prefix.
pub fn decode_svg(data: &str) -> Result<String, SourceError> {
    let data = data.trim();
    let payload = match data.strip_prefix("data:") {
        Some(_) => data.find(',').map_or(data, |comma| &data[comma + 1..]),
        None => data,
    };
    let bytes = STANDARD.decode(payload.trim())?;
    Ok(String::from_utf8(bytes)?)
}

/// Decode a base64 SVG payload and extract its closed contours.
pub fn svg_contours(data: &str) -> Result<Vec<Vec<Point2>>, SourceError> {
    let text = decode_svg(data)?;
    contours_from_text(&text)
}

/// Extract contours from SVG markup or bare path data.
///
/// Curves are flattened and every subpath becomes its own contour, in
/// document order. Subpaths with fewer than three points are dropped.
pub fn contours_from_text(text: &str) -> Result<Vec<Vec<Point2>>, SourceError> {
    let mut contours = Vec::new();

    if text.trim_start().starts_with('<') {
        markup_contours(text, &mut contours)?;
    } else {
        flatten_path_data(text, &mut contours)?;
    }

    log::debug!("SVG source yielded {} contours", contours.len());
    Ok(contours)
}

fn markup_contours(text: &str, contours: &mut Vec<Vec<Point2>>) -> Result<(), SourceError> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) | Event::Empty(ref e) => match e.local_name().as_ref() {
                b"path" => {
                    if let Some(d) = attribute(e, b"d")? {
                        flatten_path_data(&d, contours)?;
                    }
                }
                b"polygon" => {
                    if let Some(points) = attribute(e, b"points")? {
                        let contour = parse_point_list(&points)?;
                        if contour.len() >= 3 {
                            contours.push(contour);
                        }
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(())
}

/// Unescaped value of attribute `name`, matched on its local name.
fn attribute(element: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>, SourceError> {
    for attr in element.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.local_name().as_ref() == name {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

fn flatten_path_data(d: &str, contours: &mut Vec<Vec<Point2>>) -> Result<(), SourceError> {
    let path = BezPath::from_svg(d).map_err(|e| SourceError::PathSyntax(e.to_string()))?;

    let mut current: Vec<Point2> = Vec::new();
    path.flatten(FLATTEN_TOLERANCE, |el| match el {
        PathEl::MoveTo(p) => {
            finish_contour(&mut current, contours);
            current.push(Point2::new(p.x, p.y));
        }
        PathEl::LineTo(p) => current.push(Point2::new(p.x, p.y)),
        PathEl::ClosePath => finish_contour(&mut current, contours),
        // flatten only emits lines
        PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
    });
    finish_contour(&mut current, contours);
    Ok(())
}

fn finish_contour(current: &mut Vec<Point2>, contours: &mut Vec<Vec<Point2>>) {
    let contour = std::mem::take(current);
    if contour.len() >= 3 {
        contours.push(contour);
    }
}

fn parse_point_list(list: &str) -> Result<Vec<Point2>, SourceError> {
    let values = list
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .map_err(|_| SourceError::PathSyntax(format!("bad polygon coordinate '{s}'")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if values.len() % 2 != 0 {
        return Err(SourceError::PathSyntax(
            "polygon points need an even number of coordinates".into(),
        ));
    }
    Ok(values
        .chunks_exact(2)
        .map(|xy| Point2::new(xy[0], xy[1]))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(text: &str) -> String {
        STANDARD.encode(text)
    }

    const SQUARE_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
  <path id="outline" fill="black" d="M 0 0 L 100 0 L 100 100 L 0 100 Z"/>
</svg>"#;

    #[test]
    fn test_decode_plain_and_data_uri() {
        let b64 = encode("<svg></svg>");
        assert_eq!(decode_svg(&b64).unwrap(), "<svg></svg>");

        let uri = format!("data:image/svg+xml;base64,{b64}");
        assert_eq!(decode_svg(&uri).unwrap(), "<svg></svg>");
    }

    #[test]
    fn test_decode_rejects_bad_base64() {
        assert!(matches!(
            decode_svg("not base64 at all!"),
            Err(SourceError::Base64(_))
        ));
    }

    #[test]
    fn test_decode_rejects_non_utf8() {
        let b64 = STANDARD.encode([0xff, 0xfe, 0xfd]);
        assert!(matches!(decode_svg(&b64), Err(SourceError::Utf8(_))));
    }

    #[test]
    fn test_square_path() {
        let contours = svg_contours(&encode(SQUARE_SVG)).unwrap();
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].len(), 4);
        assert_eq!(contours[0][2], Point2::new(100.0, 100.0));
    }

    #[test]
    fn test_id_attribute_is_not_path_data() {
        // `id` ends in `d` but is not the `d` attribute
        let svg = r#"<svg><path id="x" d="M0 0 L10 0 L10 10 Z"/></svg>"#;
        let contours = contours_from_text(svg).unwrap();
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].len(), 3);
    }

    #[test]
    fn test_subpaths_split() {
        let d = "M0 0 L10 0 L10 10 Z M20 0 L30 0 L30 10 L20 10 Z M50 50 L60 60";
        let contours = contours_from_text(d).unwrap();
        // the trailing two-point subpath is dropped
        assert_eq!(contours.len(), 2);
        assert_eq!(contours[0].len(), 3);
        assert_eq!(contours[1].len(), 4);
    }

    #[test]
    fn test_curves_flattened() {
        let d = "M0 0 C 0 50 100 50 100 0 Z";
        let contours = contours_from_text(d).unwrap();
        assert_eq!(contours.len(), 1);
        assert!(contours[0].len() > 3);
        assert!(contours[0].iter().all(|p| p.y >= -1e-9 && p.y <= 37.5 + 1e-9));
    }

    #[test]
    fn test_polygon_element() {
        let svg = r#"<svg><polygon points="0,0 40,0 40,30"/><polyline points="0,0 1,1 2,0"/></svg>"#;
        let contours = contours_from_text(svg).unwrap();
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0][1], Point2::new(40.0, 0.0));
    }

    #[test]
    fn test_commented_out_path_ignored() {
        let svg = r#"<svg>
  <!-- <path d="M0 0 L50 0 L50 50 Z"/> -->
  <path d="M0 0 L10 0 L10 10 L0 10 Z"/>
</svg>"#;
        let contours = contours_from_text(svg).unwrap();
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0][1], Point2::new(10.0, 0.0));
    }

    #[test]
    fn test_angle_bracket_in_attribute() {
        let svg = r#"<svg><path data-note="a>b" d="M0 0 L10 0 L10 10 Z"/></svg>"#;
        let contours = contours_from_text(svg).unwrap();
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].len(), 3);
    }

    #[test]
    fn test_entities_unescaped() {
        let svg = r#"<svg><path d="M0 0&#10;L10 0 L10 10 Z"/></svg>"#;
        let contours = contours_from_text(svg).unwrap();
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0][2], Point2::new(10.0, 10.0));
    }

    #[test]
    fn test_prefixed_elements() {
        let svg = r#"<svg:svg xmlns:svg="http://www.w3.org/2000/svg"><svg:polygon points="0,0 40,0 40,30"/></svg:svg>"#;
        let contours = contours_from_text(svg).unwrap();
        assert_eq!(contours.len(), 1);
    }

    #[test]
    fn test_malformed_markup() {
        assert!(matches!(
            contours_from_text(r#"<svg><path d="M0 0 L10 0 L10 10 Z"/></g>"#),
            Err(SourceError::Xml(_))
        ));
    }

    #[test]
    fn test_markup_without_shapes() {
        assert!(contours_from_text("<svg></svg>").unwrap().is_empty());
    }

    #[test]
    fn test_bad_path_data() {
        assert!(matches!(
            contours_from_text("M 0 0 L nonsense"),
            Err(SourceError::PathSyntax(_))
        ));
        assert!(matches!(
            contours_from_text(r#"<svg><polygon points="0,0 1"/></svg>"#),
            Err(SourceError::PathSyntax(_))
        ));
    }
}
