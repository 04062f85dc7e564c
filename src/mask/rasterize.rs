//! Polygon-set rasterization with occlusion compositing.
//!
//! Each label's polygons are painted, in submission order, onto a shared
//! index canvas: later labels overwrite earlier ones, so the last label
//! painted wins overlapping pixels. One binary mask per label is then
//! extracted from the canvas and run-length encoded.

use kurbo::{BezPath, PathEl, Point};

use crate::foundation::error::{ConvertError, ConvertResult};
use crate::label::model::{ImageSize, Poly2D, Rle};
use crate::mask::rle::RleRuns;

/// Curve flattening tolerance in pixels.
const FLATTEN_TOLERANCE: f64 = 0.25;

/// Rasterize one frame's ordered per-label polygon sets into one RLE per set.
///
/// Returns exactly one mask per entry of `poly2ds`, in submission order.
/// Overlaps are resolved by paint order: the mask of `poly2ds[i]` excludes
/// any pixel also covered by `poly2ds[j]` with `j > i`.
pub fn frame_to_rles(size: ImageSize, poly2ds: &[&[Poly2D]]) -> ConvertResult<Vec<Rle>> {
    let (w, h) = (size.width, size.height);
    if w == 0 || h == 0 {
        return Err(ConvertError::rasterize(format!(
            "canvas size {w}x{h} must be nonzero"
        )));
    }

    let mut canvas = vec![0u32; (w as usize) * (h as usize)];
    for (i, polys) in poly2ds.iter().enumerate() {
        let value = (i + 1) as u32;
        for poly in *polys {
            let path = poly_to_path(poly)?;
            fill_path(&mut canvas, w, h, &path, value);
        }
    }

    let mut rles = Vec::with_capacity(poly2ds.len());
    for i in 0..poly2ds.len() {
        let value = (i + 1) as u32;
        let mask: Vec<u8> = canvas.iter().map(|&v| u8::from(v == value)).collect();
        rles.push(RleRuns::encode_mask(&mask, h, w)?.to_compressed());
    }
    Ok(rles)
}

/// Build a bezier path from a polygon boundary.
///
/// The returned path is always closed: filling treats every boundary as a
/// ring, whether or not the source marks it `closed`.
fn poly_to_path(poly: &Poly2D) -> ConvertResult<BezPath> {
    let types: Vec<char> = poly.types.chars().collect();
    if poly.vertices.is_empty() {
        return Err(ConvertError::rasterize("polygon has no vertices"));
    }
    if types.len() != poly.vertices.len() {
        return Err(ConvertError::rasterize(format!(
            "polygon has {} vertices but {} type markers",
            poly.vertices.len(),
            types.len()
        )));
    }
    if types[0] != 'L' {
        return Err(ConvertError::rasterize(
            "polygon must start with an on-curve 'L' vertex",
        ));
    }

    let point = |i: usize| Point::new(poly.vertices[i][0], poly.vertices[i][1]);
    let mut path = BezPath::new();
    path.move_to(point(0));

    let mut i = 1;
    while i < types.len() {
        match types[i] {
            'L' => {
                path.line_to(point(i));
                i += 1;
            }
            'C' => {
                if i + 2 >= types.len() || types[i + 1] != 'C' || types[i + 2] != 'C' {
                    return Err(ConvertError::rasterize(
                        "bezier control vertices must come in groups of three",
                    ));
                }
                path.curve_to(point(i), point(i + 1), point(i + 2));
                i += 3;
            }
            other => {
                return Err(ConvertError::rasterize(format!(
                    "unknown polygon vertex type '{other}'"
                )));
            }
        }
    }

    path.close_path();
    Ok(path)
}

/// Paint `value` over every canvas pixel whose center lies inside `path`,
/// using the even-odd fill rule.
fn fill_path(canvas: &mut [u32], width: u32, height: u32, path: &BezPath, value: u32) {
    let mut rings: Vec<Vec<Point>> = Vec::new();
    let mut current: Vec<Point> = Vec::new();
    kurbo::flatten(
        path.elements().iter().copied(),
        FLATTEN_TOLERANCE,
        |el| match el {
            PathEl::MoveTo(p) => {
                if current.len() >= 3 {
                    rings.push(std::mem::take(&mut current));
                } else {
                    current.clear();
                }
                current.push(p);
            }
            PathEl::LineTo(p) => current.push(p),
            PathEl::ClosePath => {
                if current.len() >= 3 {
                    rings.push(std::mem::take(&mut current));
                } else {
                    current.clear();
                }
            }
            // flatten emits only the three element kinds above
            _ => {}
        },
    );
    if current.len() >= 3 {
        rings.push(current);
    }

    let mut xs: Vec<f64> = Vec::new();
    for y in 0..height {
        let sy = f64::from(y) + 0.5;
        xs.clear();
        for ring in &rings {
            for i in 0..ring.len() {
                let a = ring[i];
                let b = ring[(i + 1) % ring.len()];
                // Half-open span check keeps shared vertices from double-counting.
                if (a.y <= sy && sy < b.y) || (b.y <= sy && sy < a.y) {
                    xs.push(a.x + (sy - a.y) * (b.x - a.x) / (b.y - a.y));
                }
            }
        }
        xs.sort_by(f64::total_cmp);

        let row = (y as usize) * (width as usize);
        for pair in xs.chunks_exact(2) {
            // Pixels whose center x lies in [pair[0], pair[1]).
            let start = (pair[0] - 0.5).ceil().clamp(0.0, f64::from(width)) as usize;
            let end = (pair[1] - 0.5).ceil().clamp(0.0, f64::from(width)) as usize;
            if start < end {
                for px in &mut canvas[row + start..row + end] {
                    *px = value;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mask/rasterize.rs"]
mod tests;
