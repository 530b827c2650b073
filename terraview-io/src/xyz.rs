//! XYZ point cloud format support

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use terraview_core::{Error, Point3f, Result};
use tracing::debug;

/// Parse XYZ text into a point list.
///
/// Each line needs at least three whitespace-separated numeric tokens
/// (`x y z`); extra tokens are ignored. Blank lines and lines with fewer
/// than three parseable tokens are skipped without aborting the load. The
/// parse fails only when zero valid points result.
pub fn parse_xyz(text: &str) -> Result<Vec<Point3f>> {
    let mut points = Vec::new();
    let mut skipped = 0usize;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_xyz_line(line) {
            Some(point) => points.push(point),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!(skipped, "skipped malformed xyz lines");
    }
    if points.is_empty() {
        return Err(Error::EmptyPointCloud);
    }
    debug!(count = points.len(), "parsed xyz points");
    Ok(points)
}

fn parse_xyz_line(line: &str) -> Option<Point3f> {
    let mut tokens = line.split_whitespace();
    let x = tokens.next()?.parse::<f32>().ok()?;
    let y = tokens.next()?.parse::<f32>().ok()?;
    let z = tokens.next()?.parse::<f32>().ok()?;
    Some(Point3f::new(x, y, z))
}

/// Read an XYZ file from disk.
pub fn read_xyz<P: AsRef<Path>>(path: P) -> Result<Vec<Point3f>> {
    let text = std::fs::read_to_string(path)?;
    parse_xyz(&text)
}

/// Write points as one `x y z` line each.
pub fn write_xyz<W: Write>(points: &[Point3f], writer: &mut W) -> Result<()> {
    for p in points {
        writeln!(writer, "{} {} {}", p.x, p.y, p.z)?;
    }
    Ok(())
}

/// Write points to an XYZ file on disk.
pub fn write_xyz_file<P: AsRef<Path>>(points: &[Point3f], path: P) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_xyz(points, &mut writer)?;
    writer.flush()?;
    Ok(())
}
