use std::f32::consts::{FRAC_PI_2, TAU};

use proptest::prelude::*;

use grid_raycaster::raycast::{self, MarchSettings};
use grid_raycaster::viewer::TURN_WRAP;
use grid_raycaster::{Cell, Command, GridMap, Viewer, Viewport};

const LAYOUT: &str = "\
XXXXXXXXXX
X    X   X
X XX X X X
X  X   X X
XX XXX X X
X        X
X XXXX XXX
X    X   X
X  X   X X
XXXXXXXXXX";

fn maze() -> GridMap {
    GridMap::parse(LAYOUT, 10, 10, 'X').unwrap()
}

fn command_strategy() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::Forward),
        Just(Command::Backward),
        Just(Command::TurnLeft),
        Just(Command::TurnRight),
    ]
}

proptest! {
    #[test]
    fn outside_the_grid_is_never_open(
        x in -1000i32..1000,
        y in -1000i32..1000,
        width in 1usize..20,
        height in 1usize..20,
    ) {
        let map = GridMap::new(width, height, vec![Cell::Open; width * height]).unwrap();
        let inside = x >= 0 && y >= 0 && (x as usize) < width && (y as usize) < height;
        prop_assert_eq!(map.is_open(x, y), inside);
    }

    #[test]
    fn viewer_never_enters_a_wall(
        heading in 0.0f32..TAU,
        commands in prop::collection::vec(command_strategy(), 1..200),
    ) {
        let map = maze();
        let mut viewer = Viewer::new(1.5, 1.5, heading, FRAC_PI_2, &map)
            .unwrap()
            .with_turn_step(0.07);
        for command in commands {
            viewer.handle_command(command, &map);
            prop_assert!(map.is_open(viewer.x().floor() as i32, viewer.y().floor() as i32));
            prop_assert!(viewer.heading().is_finite());
        }
    }

    #[test]
    fn left_then_right_restores_heading(turns in 0.0f32..TURN_WRAP) {
        let map = maze();
        let heading = turns * TAU;
        let mut viewer = Viewer::new(1.5, 1.5, heading, FRAC_PI_2, &map).unwrap();
        viewer.turn_left();
        viewer.turn_right();

        let diff = (viewer.heading() - heading) / TAU;
        let wrapped = diff - (diff / TURN_WRAP).round() * TURN_WRAP;
        prop_assert!(wrapped.abs() < 1e-3, "{} -> {}", heading, viewer.heading());
    }

    #[test]
    fn open_surroundings_give_no_hit(
        x in 20.0f32..30.0,
        y in 20.0f32..30.0,
        heading in -10.0f32..10.0,
        column in 0usize..64,
        max_range in 0.5f32..19.0,
    ) {
        let map = GridMap::new(50, 50, vec![Cell::Open; 2500]).unwrap();
        let viewer = Viewer::new(x, y, heading, FRAC_PI_2, &map).unwrap();
        let settings = MarchSettings { max_range, ..MarchSettings::default() };
        let viewport = Viewport { width: 64, height: 64 };
        prop_assert!(raycast::cast(&viewer, &map, column, viewport, &settings).is_none());
    }

    #[test]
    fn hits_are_inside_a_wall_and_in_range(
        heading in 0.0f32..TAU,
        column in 0usize..128,
    ) {
        let map = maze();
        let viewer = Viewer::new(5.5, 5.5, heading, FRAC_PI_2, &map).unwrap();
        let settings = MarchSettings::default();
        let viewport = Viewport { width: 128, height: 128 };
        if let Some(hit) = raycast::cast(&viewer, &map, column, viewport, &settings) {
            prop_assert!(hit.distance < settings.max_range);
            prop_assert!(hit.perpendicular_distance <= hit.distance + 1e-5);
            let px = viewer.x() + hit.distance * hit.angle.cos();
            let py = viewer.y() + hit.distance * hit.angle.sin();
            prop_assert!(!map.is_open(px.floor() as i32, py.floor() as i32));
        }
    }
}
