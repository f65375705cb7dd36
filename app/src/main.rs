use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;

use cloudview_core::build_camera_glyph_mesh;
use cloudview_core::build_pointcloud_mesh;
use cloudview_io::{read_point_cloud, read_poses};
use cloudview_viewer::{assemble_scene, configure_viewpoint, run_interactive_session};

#[derive(Parser, Debug)]
#[command(
    name = "cloudview",
    about = "Interactive viewer for a point cloud and its camera trajectory",
    version
)]
struct Cli {
    /// Directory containing point_cloud.xyz and poses.txt
    #[arg(value_name = "DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Draw solid frustum faces instead of wireframe glyphs
    #[arg(long)]
    filled: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let cloud_path = cli.data_dir.join("point_cloud.xyz");
    let poses_path = cli.data_dir.join("poses.txt");

    let (points, colors) = read_point_cloud(&cloud_path)
        .with_context(|| format!("failed to load point cloud from {}", cloud_path.display()))?;
    let poses = read_poses(&poses_path)
        .with_context(|| format!("failed to load poses from {}", poses_path.display()))?;
    info!("loaded {} points, {} poses", points.len(), poses.len());

    let cloud_mesh = build_pointcloud_mesh(&points, colors.as_deref())?;
    let glyph_meshes = poses
        .iter()
        .map(|pose| build_camera_glyph_mesh(pose, cli.filled))
        .collect();

    let mut scene = assemble_scene(cloud_mesh, glyph_meshes);
    configure_viewpoint(&mut scene);

    run_interactive_session(scene, "Point Cloud Viewer", 800, 600)?;
    Ok(())
}
