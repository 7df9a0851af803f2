use {
    crate::config::constants::extraction::{
        CONTOUR_LEVELS, FALLBACK_HALF_WIDTHS, SIMPLIFIED_METHOD,
    },
    crate::domain::{Evidence, ProbabilityZone, ZoneProperties},
    crate::models::ProbabilityGrid,
    std::collections::HashMap,
};

/// Seam between the engine and whatever produces contour rings.
/// `level_rank` is the index of the level within the fixed level set,
/// highest confidence first.
pub trait ContourExtractor: Send + Sync {
    /// Paths (closed or boundary-clipped open) tracing the level crossing,
    /// as [lon, lat] vertex lists.
    fn extract(&self, grid: &ProbabilityGrid, level: f64, level_rank: usize) -> Vec<Vec<[f64; 2]>>;

    /// Tag recorded on emitted zones, when the extraction is degraded.
    fn method(&self) -> Option<&'static str> {
        None
    }
}

/// Convert a posterior grid into confidence-band zones. Levels are scaled
/// by the grid's own maximum so they stay meaningful whatever the absolute
/// magnitude. A level that produces nothing is skipped; an entirely empty
/// result is the caller's cue to retry with the fallback extractor.
pub(crate) fn extract_zones(
    grid: &ProbabilityGrid,
    evidence: &Evidence,
    extractor: &dyn ContourExtractor,
) -> Vec<ProbabilityZone> {
    let max_value = grid.max_value();
    if max_value <= 0.0 {
        return Vec::new();
    }

    let mut zones = Vec::new();
    for (rank, &fraction) in CONTOUR_LEVELS.iter().enumerate() {
        let level = max_value * fraction;
        let paths = extractor.extract(grid, level, rank);
        if paths.is_empty() {
            log::debug!("No contour at level {fraction}");
            continue;
        }

        for mut ring in paths {
            if ring.len() < 3 {
                continue;
            }
            if ring.first() != ring.last() {
                ring.push(ring[0]);
            }
            zones.push(ProbabilityZone::polygon(
                ring,
                ZoneProperties {
                    probability: fraction,
                    updated_with_evidence: true,
                    evidence_type: Some(evidence.kind),
                    confidence: Some(evidence.confidence),
                    method: extractor.method().map(str::to_string),
                },
            ));
        }
    }
    zones
}

/// Real geometric contourer: classic marching squares with linear edge
/// interpolation, then endpoint stitching of the cell segments into paths.
pub struct MarchingSquares;

impl ContourExtractor for MarchingSquares {
    fn extract(&self, grid: &ProbabilityGrid, level: f64, _level_rank: usize) -> Vec<Vec<[f64; 2]>> {
        let segments = collect_segments(grid, level);
        stitch_segments(segments)
    }
}

/// Degraded extractor: one axis-aligned rectangle per level, centered on
/// the grid's peak cell, half-width growing with the level rank.
pub struct RectangularFallback;

impl ContourExtractor for RectangularFallback {
    fn extract(&self, grid: &ProbabilityGrid, _level: f64, level_rank: usize) -> Vec<Vec<[f64; 2]>> {
        let Some([lon, lat]) = grid.peak() else {
            return Vec::new();
        };
        let half = FALLBACK_HALF_WIDTHS[level_rank.min(FALLBACK_HALF_WIDTHS.len() - 1)];
        vec![vec![
            [lon - half, lat - half],
            [lon + half, lat - half],
            [lon + half, lat + half],
            [lon - half, lat + half],
            [lon - half, lat - half],
        ]]
    }

    fn method(&self) -> Option<&'static str> {
        Some(SIMPLIFIED_METHOD)
    }
}

type Segment = ([f64; 2], [f64; 2]);

/// Walk every 2x2 cell and emit the level-crossing segments.
/// Corner bits: 1 = bottom-left, 2 = bottom-right, 4 = top-right,
/// 8 = top-left (rows index latitude, ascending).
fn collect_segments(grid: &ProbabilityGrid, level: f64) -> Vec<Segment> {
    let lons = grid.lons();
    let lats = grid.lats();
    if lons.len() < 2 || lats.len() < 2 {
        return Vec::new();
    }

    let mut segments = Vec::new();
    for row in 0..lats.len() - 1 {
        for col in 0..lons.len() - 1 {
            let bl = grid.value(row, col);
            let br = grid.value(row, col + 1);
            let tr = grid.value(row + 1, col + 1);
            let tl = grid.value(row + 1, col);
            if !(bl.is_finite() && br.is_finite() && tr.is_finite() && tl.is_finite()) {
                continue;
            }

            let mut case = 0u8;
            if bl >= level {
                case |= 1;
            }
            if br >= level {
                case |= 2;
            }
            if tr >= level {
                case |= 4;
            }
            if tl >= level {
                case |= 8;
            }
            if case == 0 || case == 15 {
                continue;
            }

            let (x0, x1) = (lons[col], lons[col + 1]);
            let (y0, y1) = (lats[row], lats[row + 1]);
            // Crossing points on the four cell edges.
            let south = [lerp(x0, x1, bl, br, level), y0];
            let east = [x1, lerp(y0, y1, br, tr, level)];
            let north = [lerp(x0, x1, tl, tr, level), y1];
            let west = [x0, lerp(y0, y1, bl, tl, level)];

            match case {
                1 | 14 => segments.push((west, south)),
                2 | 13 => segments.push((south, east)),
                3 | 12 => segments.push((west, east)),
                4 | 11 => segments.push((east, north)),
                6 | 9 => segments.push((south, north)),
                7 | 8 => segments.push((west, north)),
                5 => {
                    // Saddle: disambiguate with the cell center.
                    if (bl + br + tr + tl) / 4.0 >= level {
                        segments.push((south, east));
                        segments.push((west, north));
                    } else {
                        segments.push((west, south));
                        segments.push((east, north));
                    }
                }
                10 => {
                    if (bl + br + tr + tl) / 4.0 >= level {
                        segments.push((west, south));
                        segments.push((east, north));
                    } else {
                        segments.push((south, east));
                        segments.push((west, north));
                    }
                }
                _ => unreachable!("cases 0 and 15 handled above"),
            }
        }
    }
    segments
}

/// Position of `level` between two corner samples.
#[inline]
fn lerp(c0: f64, c1: f64, v0: f64, v1: f64, level: f64) -> f64 {
    if (v1 - v0).abs() < 1e-15 {
        return (c0 + c1) / 2.0;
    }
    let t = ((level - v0) / (v1 - v0)).clamp(0.0, 1.0);
    c0 + t * (c1 - c0)
}

/// Chain segments end-to-end into paths. Endpoints are matched by a
/// quantized key; adjacent cells compute crossing points from the same
/// corner pair, so matches are exact up to round-off.
fn stitch_segments(segments: Vec<Segment>) -> Vec<Vec<[f64; 2]>> {
    const QUANTUM: f64 = 1e8;
    let key = |p: [f64; 2]| -> (i64, i64) {
        ((p[0] * QUANTUM).round() as i64, (p[1] * QUANTUM).round() as i64)
    };

    // Endpoint -> segments touching it.
    let mut by_endpoint: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
    for (idx, (a, b)) in segments.iter().enumerate() {
        by_endpoint.entry(key(*a)).or_default().push(idx);
        by_endpoint.entry(key(*b)).or_default().push(idx);
    }

    let mut used = vec![false; segments.len()];
    let mut paths = Vec::new();

    for start in 0..segments.len() {
        if used[start] {
            continue;
        }
        used[start] = true;
        let (a, b) = segments[start];
        let mut path = vec![a, b];

        // Extend forward from the tail, then backward from the head.
        for forward in [true, false] {
            loop {
                let tip = if forward { *path.last().unwrap() } else { path[0] };
                let Some(candidates) = by_endpoint.get(&key(tip)) else {
                    break;
                };
                let Some(&next) = candidates.iter().find(|&&idx| !used[idx]) else {
                    break;
                };
                used[next] = true;
                let (na, nb) = segments[next];
                let other = if key(na) == key(tip) { nb } else { na };
                if forward {
                    path.push(other);
                } else {
                    path.insert(0, other);
                }
                // Closed the loop.
                if key(path[0]) == key(*path.last().unwrap()) {
                    break;
                }
            }
            if key(path[0]) == key(*path.last().unwrap()) {
                break;
            }
        }
        paths.push(path);
    }
    paths
}
