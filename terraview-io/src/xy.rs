//! XY polygon format support
//!
//! Polygons are stored as one `x y` vertex per line, with the first
//! vertex repeated at the end to close the ring. On load each vertex is
//! snapped to the nearest point of the active cloud, so a saved polygon
//! re-attaches to the data it was drawn over.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use terraview_algorithms::find_nearest_xy;
use terraview_core::{same_planar_point, Error, Point3f, Result};
use tracing::debug;

/// Parse XY polygon text and snap each vertex onto `cloud_points`.
///
/// Each line needs at least two numeric tokens; malformed lines are
/// skipped. A trailing vertex equal to the first is dropped (saved
/// polygons repeat the first vertex to close the ring). Fewer than three
/// distinct vertices is an error.
pub fn parse_polygon_xy(text: &str, cloud_points: &[Point3f]) -> Result<Vec<Point3f>> {
    let mut vertices = Vec::new();
    let mut skipped = 0usize;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_xy_line(line) {
            Some((x, y)) => {
                if let Some((index, _)) = find_nearest_xy(cloud_points, x, y) {
                    vertices.push(cloud_points[index]);
                }
            }
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!(skipped, "skipped malformed xy lines");
    }

    // Drop the closing repeat of the first vertex, if present.
    if vertices.len() > 1 && same_planar_point(&vertices[0], &vertices[vertices.len() - 1]) {
        vertices.pop();
    }

    if vertices.len() < 3 {
        return Err(Error::InsufficientPolygonVertices {
            got: vertices.len(),
        });
    }
    debug!(count = vertices.len(), "loaded polygon vertices");
    Ok(vertices)
}

fn parse_xy_line(line: &str) -> Option<(f32, f32)> {
    let mut tokens = line.split_whitespace();
    let x = tokens.next()?.parse::<f32>().ok()?;
    let y = tokens.next()?.parse::<f32>().ok()?;
    Some((x, y))
}

/// Read and snap a polygon file from disk.
pub fn read_polygon_xy<P: AsRef<Path>>(path: P, cloud_points: &[Point3f]) -> Result<Vec<Point3f>> {
    let text = std::fs::read_to_string(path)?;
    parse_polygon_xy(&text, cloud_points)
}

/// Write polygon vertices as `x y` lines, repeating the first vertex to
/// close the ring.
pub fn write_polygon_xy<W: Write>(vertices: &[Point3f], writer: &mut W) -> Result<()> {
    if vertices.len() < 3 {
        return Err(Error::InsufficientPolygonVertices {
            got: vertices.len(),
        });
    }
    for v in vertices {
        writeln!(writer, "{} {}", v.x, v.y)?;
    }
    writeln!(writer, "{} {}", vertices[0].x, vertices[0].y)?;
    Ok(())
}

/// Write a polygon to an XY file on disk.
pub fn write_polygon_xy_file<P: AsRef<Path>>(vertices: &[Point3f], path: P) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_polygon_xy(vertices, &mut writer)?;
    writer.flush()?;
    Ok(())
}
