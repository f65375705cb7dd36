//! Blocking interactive render session

use std::sync::Arc;

use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, Event, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

use cloudview_core::{Error, Result};
use cloudview_render::{RenderConfig, SceneRenderer};
use log::{debug, info};

use crate::camera::Camera;
use crate::scene::Scene;

const ORBIT_SPEED: f32 = 0.01;
const PAN_SPEED: f32 = 0.002;
const DRAG_ZOOM_SPEED: f32 = 0.01;

struct InputState {
    camera: Camera,
    last_mouse_pos: Option<PhysicalPosition<f64>>,
    left_pressed: bool,
    middle_pressed: bool,
    right_pressed: bool,
}

/// Open a window of the given size and title, show the scene, and block
/// until the user closes the window.
///
/// Trackball interaction: left-drag orbits, middle-drag pans, right-drag
/// or scroll zooms. `R` resets the camera, `Q` or `Escape` closes the
/// window. The scene is uploaded to the GPU once before the loop starts
/// and never mutated afterwards.
pub fn run_interactive_session(
    scene: Scene,
    window_title: &str,
    width: u32,
    height: u32,
) -> Result<()> {
    let event_loop = EventLoop::new()
        .map_err(|e| Error::Visualization(format!("Failed to create event loop: {}", e)))?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(window_title)
            .with_inner_size(winit::dpi::LogicalSize::new(width as f64, height as f64))
            .build(&event_loop)
            .map_err(|e| Error::Visualization(format!("Failed to create window: {}", e)))?,
    );

    let config = RenderConfig {
        background_color: scene.background,
        ..RenderConfig::default()
    };
    let mut renderer = pollster::block_on(SceneRenderer::new(window.clone(), config))?;

    let batches: Vec<_> = scene
        .drawables
        .iter()
        .flat_map(|drawable| renderer.upload(drawable))
        .collect();
    info!(
        "scene uploaded: {} drawables, {} batches",
        scene.drawables.len(),
        batches.len()
    );

    let mut state = InputState {
        camera: scene.camera,
        last_mouse_pos: None,
        left_pressed: false,
        middle_pressed: false,
        right_pressed: false,
    };
    let size = window.inner_size();
    state.camera.aspect_ratio = size.width as f32 / size.height.max(1) as f32;

    event_loop
        .run(move |event, target| {
            target.set_control_flow(ControlFlow::Poll);

            if let Event::WindowEvent { event, .. } = event {
                match event {
                    WindowEvent::CloseRequested => {
                        target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        renderer.resize(new_size);
                        state.camera.aspect_ratio =
                            new_size.width as f32 / new_size.height.max(1) as f32;
                    }
                    WindowEvent::MouseInput { state: pressed, button, .. } => {
                        let pressed = pressed == ElementState::Pressed;
                        match button {
                            MouseButton::Left => state.left_pressed = pressed,
                            MouseButton::Middle => state.middle_pressed = pressed,
                            MouseButton::Right => state.right_pressed = pressed,
                            _ => {}
                        }
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        if let Some(last_pos) = state.last_mouse_pos {
                            let dx = (position.x - last_pos.x) as f32;
                            let dy = (position.y - last_pos.y) as f32;

                            if state.left_pressed {
                                state.camera.orbit(dx * ORBIT_SPEED, dy * ORBIT_SPEED);
                            } else if state.middle_pressed {
                                state.camera.pan(dx * PAN_SPEED, dy * PAN_SPEED);
                            } else if state.right_pressed {
                                state.camera.zoom(-dy * DRAG_ZOOM_SPEED);
                            }
                        }
                        state.last_mouse_pos = Some(position);
                    }
                    WindowEvent::MouseWheel { delta, .. } => {
                        let scroll = match delta {
                            MouseScrollDelta::LineDelta(_, y) => y,
                            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                        };
                        state.camera.zoom(scroll);
                    }
                    WindowEvent::KeyboardInput { event, .. } => {
                        if event.state == ElementState::Pressed {
                            match &event.logical_key {
                                Key::Named(NamedKey::Escape) => target.exit(),
                                Key::Character(c) => match c.as_str() {
                                    "q" | "Q" => target.exit(),
                                    "r" | "R" => {
                                        state.camera.reset();
                                        debug!("camera reset");
                                    }
                                    _ => {}
                                },
                                _ => {}
                            }
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        renderer.update_camera(
                            state.camera.view_matrix(),
                            state.camera.projection_matrix(),
                            state.camera.position.coords,
                        );
                        if let Err(e) = renderer.render(&batches) {
                            log::error!("render error: {}", e);
                        }
                        window.request_redraw();
                    }
                    _ => {}
                }
            }
        })
        .map_err(|e| Error::Visualization(format!("Event loop error: {}", e)))?;

    Ok(())
}
