//! Camera pose list reader

use crate::{is_skippable, open_reader, split_fields};
use cloudview_core::{Error, Matrix4, Pose, Result};
use std::io::BufRead;
use std::path::Path;

/// Read camera poses from a text file with one row-major 4x4 matrix
/// (16 floats) per line.
pub fn read_poses<P: AsRef<Path>>(path: P) -> Result<Vec<Pose>> {
    let path = path.as_ref();
    let reader = open_reader(path)?;

    let mut poses = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if is_skippable(&line) {
            continue;
        }

        let mut values = [0.0f32; 16];
        let mut count = 0;
        for field in split_fields(&line) {
            if count < 16 {
                values[count] = field.parse().map_err(|_| {
                    Error::Parse(format!(
                        "{}:{}: invalid matrix entry '{}'",
                        path.display(),
                        line_no + 1,
                        field
                    ))
                })?;
            }
            count += 1;
        }
        if count != 16 {
            return Err(Error::Parse(format!(
                "{}:{}: expected 16 entries for a 4x4 pose, got {}",
                path.display(),
                line_no + 1,
                count
            )));
        }

        // from_row_slice because the file is row-major
        poses.push(Pose::from_matrix(&Matrix4::from_row_slice(&values)));
    }

    Ok(poses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudview_core::Vector3;
    use std::fs;

    #[test]
    fn test_read_identity_pose() {
        let temp_file = "test_read_identity_pose.txt";
        fs::write(
            temp_file,
            "1 0 0 0  0 1 0 0  0 0 1 0  0 0 0 1\n",
        )
        .unwrap();

        let poses = read_poses(temp_file).unwrap();
        assert_eq!(poses.len(), 1);
        assert_eq!(poses[0], Pose::identity());

        fs::remove_file(temp_file).unwrap();
    }

    #[test]
    fn test_read_translation_is_last_column() {
        let temp_file = "test_read_translation_pose.txt";
        fs::write(
            temp_file,
            "1 0 0 0.5  0 1 0 -1.5  0 0 1 2.0  0 0 0 1\n",
        )
        .unwrap();

        let poses = read_poses(temp_file).unwrap();
        assert_eq!(poses[0].translation, Vector3::new(0.5, -1.5, 2.0));

        fs::remove_file(temp_file).unwrap();
    }

    #[test]
    fn test_short_row_is_rejected() {
        let temp_file = "test_read_short_pose.txt";
        fs::write(temp_file, "1 0 0 0 1 0 0 0 1\n").unwrap();

        let result = read_poses(temp_file);
        assert!(matches!(result, Err(Error::Parse(_))));

        fs::remove_file(temp_file).unwrap();
    }

    #[test]
    fn test_empty_file_yields_no_poses() {
        let temp_file = "test_read_empty_poses.txt";
        fs::write(temp_file, "# no poses recorded\n").unwrap();

        let poses = read_poses(temp_file).unwrap();
        assert!(poses.is_empty());

        fs::remove_file(temp_file).unwrap();
    }
}
