use bevy::prelude::*;

mod camera;
mod config;
mod field;
mod visual;

use bevy::window::WindowResolution;
use camera::CameraPlugin;

use crate::visual::plugin::PixelFieldPlugin;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Pixel Field".into(),
            resolution: WindowResolution::new(1280, 720),
            resizable: true,
            fit_canvas_to_parent: true,
            ..default()
        }),
        ..default()
    }))
    .add_plugins(CameraPlugin)
    .add_plugins(PixelFieldPlugin);

    app.run();
}
