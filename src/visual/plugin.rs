use crate::config::PixelFieldConfig;
use crate::visual::host::{
    animate_pixel_fields, observe_container_resize, spawn_pixel_field, stop_on_exit,
};
use bevy::prelude::*;

pub struct PixelFieldPlugin;

impl Plugin for PixelFieldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (setup_config, spawn_pixel_field).chain())
            .add_systems(
                Update,
                (
                    // Resize first so a rebuilt field draws on the same update
                    observe_container_resize,
                    animate_pixel_fields,
                    stop_on_exit,
                )
                    .chain(),
            );
    }
}

/// Load the bundled config, falling back to defaults on a bad file
fn setup_config(mut commands: Commands) {
    let config = match PixelFieldConfig::load() {
        Ok(config) => {
            info!("✓ Pixel field config loaded: {:?}", config);
            config
        }
        Err(e) => {
            error!("{}", e);
            warn!("Using default pixel field config");
            PixelFieldConfig::default()
        }
    };

    commands.insert_resource(config);
}
