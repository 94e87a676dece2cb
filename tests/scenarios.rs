use std::f32::consts::{FRAC_PI_2, PI};

use grid_raycaster::config::Config;
use grid_raycaster::raycast::{self, DEFAULT_MAX_RANGE, DEFAULT_STEP};
use grid_raycaster::renderer::{self, column_height};
use grid_raycaster::{
    Cell, FrameBuffer, GridMap, MarchSettings, RenderSettings, Viewer, Viewport, render,
    render_frame,
};

const IMAGE: Viewport = Viewport {
    width: 1024,
    height: 1024,
};

fn walled(width: usize, height: usize, extra: &[(usize, usize)]) -> GridMap {
    let mut cells = vec![Cell::Open; width * height];
    for y in 0..height {
        for x in 0..width {
            if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                cells[x + y * width] = Cell::Wall;
            }
        }
    }
    for &(x, y) in extra {
        cells[x + y * width] = Cell::Wall;
    }
    GridMap::new(width, height, cells).unwrap()
}

#[test]
fn reference_view_hits_surrounding_wall() {
    let map = walled(16, 16, &[]);
    let viewer = Viewer::new(2.0, 2.0, 1.57, PI / 2.0, &map).unwrap();
    let settings = MarchSettings::default();

    let hit = raycast::cast(&viewer, &map, IMAGE.width / 2, IMAGE, &settings).unwrap();
    assert!(hit.distance < DEFAULT_MAX_RANGE);
    // straight down the y axis into the bottom wall at y = 15
    assert!((hit.distance - 13.0).abs() <= DEFAULT_STEP + 1e-3);
    let h = column_height(hit.perpendicular_distance, IMAGE.height).unwrap();
    assert!(h > 0.0);
}

#[test]
fn straight_ahead_in_closed_room() {
    let map = walled(11, 11, &[]);
    let viewer = Viewer::new(5.5, 5.5, 0.0, FRAC_PI_2, &map).unwrap();
    let hit = raycast::cast_ray(
        &viewer,
        &map,
        viewer.heading(),
        0,
        IMAGE,
        &MarchSettings::default(),
    )
    .unwrap();

    assert_eq!(hit.perpendicular_distance, hit.distance);
    assert_eq!(
        column_height(hit.perpendicular_distance, IMAGE.height),
        Some(IMAGE.height as f32 / hit.distance)
    );
}

#[test]
fn interior_wall_at_analytic_distance() {
    let map = walled(16, 16, &[(8, 2)]);
    let viewer = Viewer::new(2.5, 2.5, 0.0, FRAC_PI_2, &map).unwrap();
    let settings = MarchSettings::default();

    // face of cell (8, 2) is the plane x = 8
    for angle in [0.0f32, 0.05, -0.08] {
        let expected = (8.0 - viewer.x()) / angle.cos();
        let hit = raycast::cast_ray(&viewer, &map, angle, 0, IMAGE, &settings).unwrap();
        assert!(
            hit.distance >= expected - 1e-3 && hit.distance <= expected + DEFAULT_STEP + 1e-3,
            "angle {angle}: got {}, expected {expected}",
            hit.distance
        );
    }

    let centre = raycast::cast(&viewer, &map, IMAGE.width / 2, IMAGE, &settings).unwrap();
    assert!((centre.distance - 5.5).abs() <= DEFAULT_STEP + 1e-3);
}

#[test]
fn rendering_is_deterministic() {
    let config = Config::default();
    let map = config.build_map().unwrap();
    let viewer = config.build_viewer(&map).unwrap();
    let settings = config.render_settings();

    let mut a = FrameBuffer::new(256, 256);
    let mut b = FrameBuffer::new(256, 256);
    render_frame(&mut a, &viewer, &map, &settings);
    render_frame(&mut b, &viewer, &map, &settings);
    assert_eq!(a, b);
}

#[test]
fn unhit_columns_keep_background() {
    let map = GridMap::new(64, 64, vec![Cell::Open; 64 * 64]).unwrap();
    let viewer = Viewer::new(32.0, 32.0, 0.0, FRAC_PI_2, &map).unwrap();
    let settings = RenderSettings::default();
    let mut frame = FrameBuffer::new(32, 32);
    render_frame(&mut frame, &viewer, &map, &settings);
    assert!(
        frame
            .pixels()
            .iter()
            .all(|&p| p == settings.palette.background)
    );
}

#[test]
fn slices_match_frame_contents() {
    let map = walled(8, 8, &[(4, 2)]);
    let viewer = Viewer::new(2.5, 2.5, 0.2, FRAC_PI_2, &map).unwrap();
    let settings = RenderSettings {
        palette: renderer::Palette {
            background: renderer::pack_rgb(0, 0, 255),
            boundary: renderer::pack_rgb(255, 255, 255),
            interior: renderer::pack_rgb(0, 0, 0),
        },
        ..RenderSettings::default()
    };
    let viewport = Viewport {
        width: 64,
        height: 64,
    };

    let slices = render(&viewer, &map, viewport, &settings);
    let mut frame = FrameBuffer::new(viewport.width, viewport.height);
    render_frame(&mut frame, &viewer, &map, &settings);

    for slice in slices {
        let y = (slice.top + slice.height / 2).clamp(0, viewport.height as i64 - 1) as usize;
        assert_eq!(frame.get(slice.column, y), Some(slice.color));
    }
}

#[test]
fn sample_config_file_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/raycaster.toml");
    let config = Config::from_file(path).unwrap();
    let map = config.build_map().unwrap();
    assert!(!map.is_open(6, 5));
    let viewer = config.build_viewer(&map).unwrap();
    assert_eq!((viewer.x(), viewer.y()), (2.0, 2.0));
}
