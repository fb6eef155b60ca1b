use sightline_core::{CellCoord, CellState, GridError, Quadrant, VisionConfig};
use sightline_grid::{query, Grid};
use sightline_system_shadowcast::{compute_field_of_view, scan, ShadowCaster, ViewArc};

fn demo_obstacles() -> Vec<CellCoord> {
    [
        (3, 3),
        (4, 3),
        (5, 3),
        (8, 7),
        (8, 5),
        (6, 9),
        (6, 10),
        (6, 11),
        (7, 11),
        (7, 10),
        (7, 9),
    ]
    .into_iter()
    .map(CellCoord::from)
    .collect()
}

#[test]
fn open_field_reveals_every_cell_inside_the_radius() {
    let observer = CellCoord::new(10, 10);
    let grid = compute_field_of_view(21, [], observer, VisionConfig::default())
        .expect("valid query");

    for (coord, state) in query::cells(&grid) {
        let distance = observer.chebyshev_distance(coord);
        let expected = if coord == observer {
            CellState::Observer
        } else if distance < 10 {
            CellState::Visible
        } else {
            CellState::Empty
        };
        assert_eq!(state, expected, "unexpected state at {coord:?}");
    }

    let counts = query::state_counts(&grid);
    assert_eq!(counts.visible, 19 * 19 - 1);
    assert_eq!(counts.observer, 1);
}

#[test]
fn sight_radius_comes_from_configuration() {
    let observer = CellCoord::new(10, 10);
    let grid = compute_field_of_view(21, [], observer, VisionConfig::new(3))
        .expect("valid query");

    let visible = query::visible_cells(&grid);
    assert_eq!(visible.len(), 5 * 5 - 1);
    assert!(visible
        .iter()
        .all(|coord| observer.chebyshev_distance(*coord) < 3));
}

#[test]
fn zero_radius_marks_only_the_observer() {
    let observer = CellCoord::new(1, 1);
    let grid =
        compute_field_of_view(3, [], observer, VisionConfig::new(0)).expect("valid query");

    assert!(query::visible_cells(&grid).is_empty());
    assert_eq!(query::observer(&grid), Some(observer));
}

#[test]
fn wall_hides_cells_directly_behind_it_along_the_forward_axis() {
    let observer = CellCoord::new(0, 0);
    let wall = CellCoord::new(0, 3);
    let mut grid = Grid::new(10, [wall]).expect("valid grid");

    scan(
        &mut grid,
        observer,
        0,
        ViewArc::FULL,
        Quadrant::South,
        10,
    );

    assert_eq!(grid.get(CellCoord::new(0, 1)), CellState::Visible);
    assert_eq!(grid.get(CellCoord::new(0, 2)), CellState::Visible);
    assert_eq!(grid.get(wall), CellState::Blocked);
    for y in 4..10 {
        assert_ne!(
            grid.get(CellCoord::new(0, y)),
            CellState::Visible,
            "cell (0, {y}) lies behind the wall",
        );
    }
}

#[test]
fn wall_hides_cells_directly_behind_it_across_all_quadrants() {
    let observer = CellCoord::new(0, 0);
    let grid = compute_field_of_view(
        10,
        [CellCoord::new(0, 3)],
        observer,
        VisionConfig::default(),
    )
    .expect("valid query");

    for y in 4..10 {
        assert_eq!(grid.get(CellCoord::new(0, y)), CellState::Empty);
    }
}

#[test]
fn single_obstacle_casts_a_shadow_but_not_to_the_side() {
    let obstacle = CellCoord::new(5, 5);
    let grid = compute_field_of_view(
        10,
        [obstacle],
        CellCoord::new(5, 3),
        VisionConfig::default(),
    )
    .expect("valid query");

    assert_eq!(grid.get(obstacle), CellState::Blocked);
    assert_ne!(grid.get(CellCoord::new(5, 6)), CellState::Visible);
    assert_ne!(grid.get(CellCoord::new(5, 7)), CellState::Visible);
    assert_eq!(grid.get(CellCoord::new(6, 6)), CellState::Visible);
    assert_eq!(grid.get(CellCoord::new(4, 6)), CellState::Visible);
}

#[test]
fn demo_scenario_hides_the_cells_behind_the_northern_wall() {
    let observer = CellCoord::new(4, 5);
    let grid = compute_field_of_view(50, demo_obstacles(), observer, VisionConfig::default())
        .expect("valid query");

    for hidden in [(3, 2), (4, 2), (5, 2), (4, 1)] {
        assert_eq!(
            grid.get(CellCoord::from(hidden)),
            CellState::Empty,
            "{hidden:?} lies in the wall's shadow",
        );
    }
    for seen in [(2, 3), (6, 3), (4, 4), (1, 2), (7, 2)] {
        assert_eq!(
            grid.get(CellCoord::from(seen)),
            CellState::Visible,
            "{seen:?} has a clear line of sight",
        );
    }
    assert_eq!(grid.get(observer), CellState::Observer);
}

#[test]
fn obstacles_are_never_revealed() {
    let obstacles = demo_obstacles();
    let grid = compute_field_of_view(
        50,
        obstacles.clone(),
        CellCoord::new(4, 5),
        VisionConfig::default(),
    )
    .expect("valid query");

    for obstacle in obstacles {
        assert_eq!(grid.get(obstacle), CellState::Blocked, "{obstacle:?}");
    }
}

#[test]
fn repeated_illumination_changes_nothing() {
    let observer = CellCoord::new(4, 5);
    let caster = ShadowCaster::default();
    let mut grid = Grid::new(50, demo_obstacles()).expect("valid grid");

    caster.illuminate(&mut grid, observer).expect("observer inside grid");
    let first_pass = grid.clone();
    caster.illuminate(&mut grid, observer).expect("observer inside grid");

    assert_eq!(grid, first_pass, "second sweep must not alter any cell");
}

#[test]
fn observer_outside_grid_is_rejected_before_scanning() {
    let mut grid = Grid::new(4, []).expect("valid grid");
    let before = grid.clone();

    let error = ShadowCaster::default()
        .illuminate(&mut grid, CellCoord::new(4, 1))
        .expect_err("observer outside grid");

    assert_eq!(
        error,
        GridError::ObserverOutOfBounds {
            coord: CellCoord::new(4, 1),
            size: 4,
        },
    );
    assert_eq!(grid, before, "a rejected query must leave the grid untouched");
}

#[test]
fn observer_standing_in_a_wall_still_sees_around_it() {
    let observer = CellCoord::new(2, 2);
    let grid = compute_field_of_view(5, [observer], observer, VisionConfig::default())
        .expect("valid query");

    assert_eq!(grid.get(observer), CellState::Observer);
    assert_eq!(query::state_counts(&grid).visible, 24);
}
