/// Planar (degree-space) distance between two lon/lat points.
/// The engine works in degree space throughout, matching the grid axes.
#[inline]
pub(crate) fn planar_distance(a: [f64; 2], b: [f64; 2]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    (dx * dx + dy * dy).sqrt()
}

/// Area-weighted centroid of a polygon ring (shoelace formula).
/// Falls back to the vertex mean when the ring encloses ~zero area
/// (collinear or duplicated vertices), so a degenerate ring still yields
/// a usable sample point instead of NaN.
pub(crate) fn ring_centroid(ring: &[[f64; 2]]) -> Option<[f64; 2]> {
    if ring.is_empty() {
        return None;
    }

    // Ignore an explicit closing vertex so it isn't double counted.
    let closed = ring.len() > 1 && ring[0] == ring[ring.len() - 1];
    let verts = if closed { &ring[..ring.len() - 1] } else { ring };

    if verts.len() < 3 {
        return Some(vertex_mean(verts));
    }

    let mut area2 = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..verts.len() {
        let [x0, y0] = verts[i];
        let [x1, y1] = verts[(i + 1) % verts.len()];
        let cross = x0 * y1 - x1 * y0;
        area2 += cross;
        cx += (x0 + x1) * cross;
        cy += (y0 + y1) * cross;
    }

    if area2.abs() < 1e-12 {
        return Some(vertex_mean(verts));
    }

    let factor = 1.0 / (3.0 * area2);
    Some([cx * factor, cy * factor])
}

fn vertex_mean(verts: &[[f64; 2]]) -> [f64; 2] {
    let n = verts.len() as f64;
    let (sx, sy) = verts
        .iter()
        .fold((0.0, 0.0), |(sx, sy), v| (sx + v[0], sy + v[1]));
    [sx / n, sy / n]
}
