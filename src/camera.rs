use bevy::prelude::*;

/// Page background the field is drawn over
const BACKGROUND: Color = Color::srgb(0.04, 0.04, 0.05);

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(BACKGROUND))
            .add_systems(Startup, setup_camera);
    }
}

#[derive(Component)]
pub struct MainCamera;

/// The UI tree (and the field node in it) renders through this camera
fn setup_camera(mut commands: Commands) {
    commands.spawn((Camera2d, MainCamera));
}
