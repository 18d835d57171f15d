//! The UI node that hosts a pixel field and the systems that drive it.

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use bevy::ui::ComputedNode;

use crate::{
    config::PixelFieldConfig,
    field::{FrameOutcome, PixelBuffer, PixelField},
};

/// A field together with the software canvas it draws into
#[derive(Component)]
pub struct PixelFieldHost {
    pub field: PixelField,
    pub buffer: PixelBuffer,
}

impl PixelFieldHost {
    pub fn new(config: &PixelFieldConfig) -> Self {
        Self {
            field: PixelField::new(config),
            buffer: PixelBuffer::new(0, 0),
        }
    }
}

/// Transparent texture the buffer is uploaded into (at least 1x1)
pub fn canvas_image(width: u32, height: u32) -> Image {
    Image::new_fill(
        Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        &[0, 0, 0, 0],
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    )
}

/// Copy the buffer into the image, reusing its allocation when sizes match
fn upload(buffer: &PixelBuffer, image: &mut Image) {
    let bytes = buffer.as_bytes();
    match image.data.as_mut() {
        Some(data) if data.len() == bytes.len() => data.copy_from_slice(bytes),
        _ => image.data = Some(bytes.to_vec()),
    }
}

/// Container size in logical pixels, floored
fn logical_size(computed: &ComputedNode) -> (u32, u32) {
    let size = computed.size() * computed.inverse_scale_factor();
    (size.x.max(0.0).floor() as u32, size.y.max(0.0).floor() as u32)
}

/// Spawn the full-bleed field node behind the rest of the UI
pub fn spawn_pixel_field(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    config: Res<PixelFieldConfig>,
) {
    let image = images.add(canvas_image(1, 1));

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(0.0),
            top: Val::Px(0.0),
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        },
        ImageNode {
            color: Color::srgba(1.0, 1.0, 1.0, config.opacity),
            ..ImageNode::new(image)
        },
        ZIndex(config.z_index),
        PixelFieldHost::new(&config),
        Name::new("Pixel Field"),
    ));

    info!(
        "Pixel field spawned (opacity {}, speed {})",
        config.opacity, config.speed
    );
}

/// System: rebuild a field whenever its container's laid-out size changes
pub fn observe_container_resize(
    mut hosts: Query<(&ComputedNode, &mut PixelFieldHost, &mut ImageNode), Changed<ComputedNode>>,
    mut images: ResMut<Assets<Image>>,
) {
    for (computed, mut host, mut image_node) in &mut hosts {
        let (width, height) = logical_size(computed);

        if host.field.dimensions() == (width, height) {
            continue;
        }

        host.field.resize(width, height);
        host.buffer = PixelBuffer::new(width, height);

        if width == 0 || height == 0 {
            debug!("Pixel field container collapsed to {}x{}", width, height);
            continue;
        }

        image_node.image = images.add(canvas_image(width, height));

        info!(
            "Pixel field resized to {}x{} ({} cells)",
            width,
            height,
            host.field.cells().len()
        );
    }
}

/// System: the per-repaint callback for every field
pub fn animate_pixel_fields(
    time: Res<Time<Real>>,
    mut hosts: Query<(&mut PixelFieldHost, &ImageNode)>,
    mut images: ResMut<Assets<Image>>,
) {
    let now_ms = time.elapsed_secs_f64() * 1000.0;

    for (mut host, image_node) in &mut hosts {
        if !host.field.is_scheduled() {
            continue;
        }

        if !images.contains(&image_node.image) {
            debug!("Pixel field lost its drawing surface, stopping");
            host.field.cancel();
            continue;
        }

        let PixelFieldHost { field, buffer } = &mut *host;
        if field.on_frame(now_ms, buffer) != FrameOutcome::Drawn {
            continue;
        }

        if let Some(image) = images.get_mut(&image_node.image) {
            upload(buffer, image);
        }
    }
}

/// System: cancel every loop and release cells when the app shuts down
pub fn stop_on_exit(mut exits: MessageReader<AppExit>, mut hosts: Query<&mut PixelFieldHost>) {
    if exits.read().next().is_none() {
        return;
    }

    for mut host in &mut hosts {
        host.field.teardown();
    }
    info!("Pixel field stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::canvas::Canvas;

    #[test]
    fn test_canvas_image_never_empty() {
        let image = canvas_image(0, 0);
        assert_eq!(image.width(), 1);
        assert_eq!(image.height(), 1);
    }

    #[test]
    fn test_upload_copies_buffer() {
        let mut buffer = PixelBuffer::new(4, 2);
        buffer.fill_rect(1.0, 0.0, 1.0, 1.0, [10, 20, 30, 255]);

        let mut image = canvas_image(4, 2);
        upload(&buffer, &mut image);
        assert_eq!(image.data.as_deref(), Some(buffer.as_bytes()));
    }

    /// App with just the two frame systems and one host sized by hand
    fn host_app(width: f32, height: f32) -> (App, Entity) {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(Assets::<Image>::default())
            .add_systems(
                Update,
                (observe_container_resize, animate_pixel_fields).chain(),
            );

        let image = app
            .world_mut()
            .resource_mut::<Assets<Image>>()
            .add(canvas_image(1, 1));
        let config = PixelFieldConfig {
            seed: Some(42),
            ..PixelFieldConfig::default()
        };

        let entity = app
            .world_mut()
            .spawn((
                ComputedNode {
                    size: Vec2::new(width, height),
                    inverse_scale_factor: 1.0,
                    ..default()
                },
                ImageNode::new(image),
                PixelFieldHost::new(&config),
            ))
            .id();

        (app, entity)
    }

    fn set_size(app: &mut App, entity: Entity, width: f32, height: f32) {
        let mut computed = app.world_mut().get_mut::<ComputedNode>(entity).unwrap();
        computed.size = Vec2::new(width, height);
    }

    fn image_handle(app: &App, entity: Entity) -> Handle<Image> {
        app.world().get::<ImageNode>(entity).unwrap().image.clone()
    }

    fn host_of(app: &App, entity: Entity) -> &PixelFieldHost {
        app.world().get::<PixelFieldHost>(entity).unwrap()
    }

    #[test]
    fn test_container_size_builds_field_and_image() {
        let (mut app, entity) = host_app(120.0, 120.0);
        app.update();

        let host = host_of(&app, entity);
        assert_eq!(host.field.dimensions(), (120, 120));
        assert_eq!(host.field.cells().len(), 400);
        assert!(host.field.is_scheduled());

        let handle = image_handle(&app, entity);
        let images = app.world().resource::<Assets<Image>>();
        let image = images.get(&handle).unwrap();
        assert_eq!((image.width(), image.height()), (120, 120));
    }

    #[test]
    fn test_same_floored_size_keeps_grid() {
        let (mut app, entity) = host_app(120.0, 120.0);
        app.update();

        let handle = image_handle(&app, entity);
        let first_cell = host_of(&app, entity).field.cells()[0].clone();

        set_size(&mut app, entity, 120.7, 120.3);
        app.update();

        let host = host_of(&app, entity);
        assert_eq!(host.field.dimensions(), (120, 120));
        assert_eq!(host.field.cells()[0].max_size, first_cell.max_size);
        assert_eq!(host.field.cells()[0].color, first_cell.color);
        assert_eq!(image_handle(&app, entity), handle);
    }

    #[test]
    fn test_collapsed_container_cancels_and_keeps_image() {
        let (mut app, entity) = host_app(120.0, 120.0);
        app.update();
        let handle = image_handle(&app, entity);

        set_size(&mut app, entity, 0.0, 120.0);
        app.update();

        let host = host_of(&app, entity);
        assert_eq!(host.field.dimensions(), (0, 120));
        assert!(host.field.cells().is_empty());
        assert!(!host.field.is_scheduled());
        assert_eq!(image_handle(&app, entity), handle);
        assert!(app.world().resource::<Assets<Image>>().contains(&handle));
    }

    #[test]
    fn test_missing_image_stops_loop() {
        let (mut app, entity) = host_app(60.0, 60.0);
        app.update();
        assert!(host_of(&app, entity).field.is_scheduled());

        let handle = image_handle(&app, entity);
        app.world_mut()
            .resource_mut::<Assets<Image>>()
            .remove(&handle);
        app.update();

        assert!(!host_of(&app, entity).field.is_scheduled());
    }

    #[test]
    fn test_upload_replaces_mismatched_data() {
        let buffer = PixelBuffer::new(3, 3);
        let mut image = canvas_image(1, 1);
        upload(&buffer, &mut image);
        assert_eq!(image.data.as_ref().map(Vec::len), Some(3 * 3 * 4));
    }
}
