//! XYZ / XYZRGB point cloud reader

use crate::{is_skippable, open_reader, split_fields};
use cloudview_core::{Error, Point3f, Result};
use std::io::BufRead;
use std::path::Path;

/// Read a point cloud from a text file with one point per line.
///
/// Each data line is either `x y z` or `x y z r g b` (colors as 0-255
/// integers). The first data line fixes the layout; every following line
/// must match it. Returns the positions and, when present, the parallel
/// color array.
pub fn read_point_cloud<P: AsRef<Path>>(
    path: P,
) -> Result<(Vec<Point3f>, Option<Vec<[u8; 3]>>)> {
    let path = path.as_ref();
    let reader = open_reader(path)?;

    let mut points = Vec::new();
    let mut colors: Option<Vec<[u8; 3]>> = None;
    let mut expected_fields: Option<usize> = None;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if is_skippable(&line) {
            continue;
        }

        let fields: Vec<&str> = split_fields(&line).collect();
        let expected = *expected_fields.get_or_insert(fields.len());
        if fields.len() != expected || !matches!(expected, 3 | 6) {
            return Err(Error::Parse(format!(
                "{}:{}: expected {} fields (x y z{}), got {}",
                path.display(),
                line_no + 1,
                if expected == 6 { 6 } else { 3 },
                if expected == 6 { " r g b" } else { "" },
                fields.len()
            )));
        }

        let coord = |i: usize| -> Result<f32> {
            fields[i].parse().map_err(|_| {
                Error::Parse(format!(
                    "{}:{}: invalid coordinate '{}'",
                    path.display(),
                    line_no + 1,
                    fields[i]
                ))
            })
        };
        points.push(Point3f::new(coord(0)?, coord(1)?, coord(2)?));

        if expected == 6 {
            let channel = |i: usize| -> Result<u8> {
                fields[i].parse().map_err(|_| {
                    Error::Parse(format!(
                        "{}:{}: invalid color channel '{}'",
                        path.display(),
                        line_no + 1,
                        fields[i]
                    ))
                })
            };
            colors
                .get_or_insert_with(Vec::new)
                .push([channel(3)?, channel(4)?, channel(5)?]);
        }
    }

    Ok((points, colors))
}
