//! SVG export of a compiled diagram: one quadratic path per curve piece,
//! optionally with direction arrows and arc numbers.

use std::fmt::Write;

use crate::algorithms::pd_code::Compilation;
use crate::config::DiagramConfig;
use crate::error::InvariantError;
use crate::geometry::math::quadratic_midpoint_tangent;
use crate::Diagram;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SvgOptions {
    /// Draw the arc numbers next to each crossing.
    pub numbers: bool,
    /// Draw a small arrowhead at the middle of every piece.
    pub arrows: bool,
}

/// Path data plus arrow line segments of every curve piece.
pub fn to_svg_paths(g: &Diagram, compilation: &Compilation, config: &DiagramConfig) -> Result<Vec<String>, InvariantError> {
    let pad = config.node_radius as f64 / 2.0;
    let mut paths = Vec::new();
    for piece in compilation.curve_pieces() {
        paths.push(path_data(&piece.points(g, pad)?));
    }
    Ok(paths)
}

fn path_data(p: &[(f64, f64); 3]) -> String {
    format!(
        "M {:.6} {:.6} Q {:.6} {:.6}, {:.6} {:.6}",
        p[0].0, p[0].1, p[1].0, p[1].1, p[2].0, p[2].1
    )
}

fn arrow_lines(out: &mut String, p: [(f64, f64); 3], size: f64) {
    let ((xm, ym), (xt, yt)) = quadratic_midpoint_tangent(p[0], p[1], p[2]);
    let (xn, yn) = (-yt, xt);
    for (sx, sy) in [(xn - xt, yn - yt), (-xn - xt, -yn - yt)] {
        let _ = write!(
            out,
            "\n    <line x1=\"{:.6}\" y1=\"{:.6}\" x2=\"{:.6}\" y2=\"{:.6}\" stroke=\"black\" stroke-width=\"1\" />",
            xm, ym, xm + sx * size, ym + sy * size
        );
    }
}

/// Full SVG document of a compiled diagram.
pub fn render(g: &Diagram, compilation: &Compilation, options: &SvgOptions, config: &DiagramConfig) -> Result<String, InvariantError> {
    let style = &config.svg;
    let r = config.node_radius;
    let (x0, y0, x1, y1) = g.view_box().unwrap_or((0.0, 0.0, 0.0, 0.0));
    let (x0, y0, x1, y1) = (x0 - r, y0 - r, x1 + r, y1 + r);
    let (w, h) = (x1 - x0, y1 - y0);

    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n");
    let _ = write!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{} {} {} {}\" width=\"{}\" height=\"{}\">",
        x0, y0, w, h,
        (w * style.expand_ratio).round() as i64,
        (h * style.expand_ratio).round() as i64
    );

    let pad = r as f64 / 2.0;
    for piece in compilation.curve_pieces() {
        let p = piece.points(g, pad)?;
        let _ = write!(
            out,
            "\n    <path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" />",
            path_data(&p),
            style.stroke_color, style.stroke_width
        );
        if options.arrows {
            arrow_lines(&mut out, p, style.arrow_size as f64);
        }
    }

    if options.numbers {
        for (label, pos) in compilation.label_positions(config, true)? {
            let _ = write!(
                out,
                "\n    <text x=\"{}\" y=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
                pos.x,
                pos.y + style.text_dy,
                style.font_size,
                style.number_color,
                label
            );
        }
    }
    out.push_str("\n</svg>");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Diagram {
        let mut g = Diagram::new();
        let ids: Vec<_> = [(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)]
            .iter()
            .map(|&(x, y)| g.add_node(x, y).unwrap())
            .collect();
        for i in 0..4 {
            g.add_edge(ids[i], ids[(i + 1) % 4]).unwrap();
        }
        g.set_base(ids[0]).unwrap();
        g.set_direction(ids[1]).unwrap();
        g
    }

    #[test]
    fn header_uses_padded_box() {
        let g = square();
        let c = g.compile().unwrap();
        let cfg = DiagramConfig::default();
        let svg = render(&g, &c, &SvgOptions::default(), &cfg).unwrap();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("viewBox=\"-12 -12 124 124\" width=\"124\" height=\"124\""));
        assert_eq!(svg.matches("<path").count(), 4);
        assert!(!svg.contains("<line"));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn corner_piece_path() {
        let g = square();
        let c = g.compile().unwrap();
        let paths = to_svg_paths(&g, &c, &DiagramConfig::default()).unwrap();
        assert_eq!(paths[0], "M 0.000000 50.000000 Q 0.000000 0.000000, 50.000000 0.000000");
    }

    #[test]
    fn arrows_add_two_lines_per_piece() {
        let g = square();
        let c = g.compile().unwrap();
        let opts = SvgOptions { numbers: false, arrows: true };
        let svg = render(&g, &c, &opts, &DiagramConfig::default()).unwrap();
        assert_eq!(svg.matches("<line").count(), 8);
    }

    #[test]
    fn document_paths_match_path_list() {
        let g = square();
        let c = g.compile().unwrap();
        let cfg = DiagramConfig::default();
        let svg = render(&g, &c, &SvgOptions::default(), &cfg).unwrap();
        for d in to_svg_paths(&g, &c, &cfg).unwrap() {
            assert!(svg.contains(&format!("<path d=\"{d}\" fill=\"none\"")), "missing {d}");
        }
    }
}
