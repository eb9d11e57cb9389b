//! Render surface sizing
//!
//! The surface is an offscreen image the camera renders into. Its backing
//! buffer follows the canvas size the page reports, so frames are never
//! stretched when the window is resized.

use bevy::{
    prelude::*,
    render::{
        render_resource::{Extent3d, TextureFormat, TextureUsages},
        renderer::RenderDevice,
    },
};

use crate::bevy::components::OffscreenCamera;
use crate::bevy::plugins::image_copy::ImageCopier;
use crate::bevy::resources::{DisplaySizeRes, RenderSurface};
use crate::bevy::systems::camera::fit_projection;
use crate::tauri_bridge::DisplaySize;

fn extent(width: u32, height: u32) -> Extent3d {
    Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    }
}

/// Create the render target image and its copier, and register the surface
pub fn create_render_surface(
    commands: &mut Commands,
    images: &mut Assets<Image>,
    render_device: &RenderDevice,
    id: &'static str,
    width: u32,
    height: u32,
) -> RenderSurface {
    let size = extent(width, height);

    let mut render_target_image =
        Image::new_target_texture(size.width, size.height, TextureFormat::bevy_default());
    render_target_image.texture_descriptor.usage |= TextureUsages::COPY_SRC;
    let target = images.add(render_target_image);

    // Spawn image copier for GPU-to-CPU transfer
    commands.spawn(ImageCopier::new(target.clone(), size, render_device));

    let surface = RenderSurface {
        id,
        width,
        height,
        target,
    };
    commands.insert_resource(surface.clone());
    surface
}

/// New size for the backing buffer, if the display size differs from it
pub fn pending_resize(surface: &RenderSurface, display: Option<DisplaySize>) -> Option<DisplaySize> {
    let display = display?;
    if display.width == 0 || display.height == 0 {
        return None;
    }
    let changed = display.width != surface.width || display.height != surface.height;
    changed.then_some(display)
}

/// Match the backing buffer to the page's canvas size
pub fn resize_surface_to_display(
    mut commands: Commands,
    display: Option<Res<DisplaySizeRes>>,
    mut surface: ResMut<RenderSurface>,
    mut images: ResMut<Assets<Image>>,
    render_device: Res<RenderDevice>,
    copiers: Query<Entity, With<ImageCopier>>,
    mut cameras: Query<&mut Projection, With<OffscreenCamera>>,
) {
    let Some(display) = display else { return };
    let reported = match display.0.current() {
        Ok(reported) => reported,
        Err(err) => {
            warn!("Display size unavailable: {err}");
            return;
        }
    };
    let Some(DisplaySize { width, height }) = pending_resize(&surface, reported) else {
        return;
    };

    info!(
        "Resizing surface '{}' {}x{} -> {}x{}",
        surface.id, surface.width, surface.height, width, height
    );

    let size = extent(width, height);
    if let Some(image) = images.get_mut(&surface.target) {
        image.resize(size);
    }
    for entity in &copiers {
        commands
            .entity(entity)
            .insert(ImageCopier::new(surface.target.clone(), size, &render_device));
    }

    surface.width = width;
    surface.height = height;
    debug!("Surface aspect ratio now {:.3}", surface.aspect_ratio());

    for mut projection in &mut cameras {
        fit_projection(&mut projection, width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface(width: u32, height: u32) -> RenderSurface {
        RenderSurface {
            id: "household",
            width,
            height,
            target: Handle::default(),
        }
    }

    #[test]
    fn unknown_display_size_keeps_surface() {
        assert_eq!(pending_resize(&surface(800, 600), None), None);
    }

    #[test]
    fn same_size_needs_no_resize() {
        let display = DisplaySize { width: 800, height: 600 };
        assert_eq!(pending_resize(&surface(800, 600), Some(display)), None);
    }

    #[test]
    fn different_size_is_resized() {
        let display = DisplaySize { width: 390, height: 844 };
        assert_eq!(pending_resize(&surface(800, 600), Some(display)), Some(display));
    }

    #[test]
    fn collapsed_canvas_is_ignored() {
        let display = DisplaySize { width: 0, height: 844 };
        assert_eq!(pending_resize(&surface(800, 600), Some(display)), None);
    }

    #[test]
    fn surface_aspect_ratio() {
        assert!((surface(1920, 1080).aspect_ratio() - 16.0 / 9.0).abs() < 1e-6);
    }
}
