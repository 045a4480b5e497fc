// End-to-end fill runs over a 1000 x 1000 square area
use via_stitching::board::{BoardItem, BoardVia, Coord, OutlineEdge, Point, Track};
use via_stitching::stitch::{
    fill_area, FillInput, FillParams, NoJitter, ObstacleSet, PlacementResult, SeededJitter,
    ZoneNetPolicy,
};
use via_stitching::FillRegion;

#[cfg(test)]
mod tests {
    use super::*;

    fn square_region() -> FillRegion {
        FillRegion::from_outline(
            "GND_FILL",
            "F.Cu",
            "GND",
            vec![
                Point::new(0, 0),
                Point::new(1000, 0),
                Point::new(1000, 1000),
                Point::new(0, 1000),
            ],
        )
        .unwrap()
    }

    fn params(clearance: Coord) -> FillParams {
        FillParams {
            step_x: 100,
            step_y: 100,
            via_size: 40,
            drill_size: 20,
            clearance,
            randomize: false,
            net_code: 1,
            net: "GND".to_string(),
            zone_policy: ZoneNetPolicy::IgnoreSameNet,
        }
    }

    fn run(obstacles: Vec<BoardItem>, edges: &[OutlineEdge], params: &FillParams) -> PlacementResult {
        let region = square_region();
        let obstacles = ObstacleSet::new(obstacles);
        let input = FillInput {
            region: &region,
            obstacles: &obstacles,
            board_edges: edges,
        };
        fill_area(&input, params, &mut NoJitter).unwrap()
    }

    fn existing_via(x: Coord, y: Coord) -> BoardItem {
        BoardItem::Via(BoardVia {
            id: 7,
            position: Point::new(x, y),
            width: 60,
            drill: 30,
            net: "VCC".to_string(),
            layer: "F.Cu".to_string(),
        })
    }

    #[test]
    fn test_empty_square_fills_every_grid_point() {
        let result = run(vec![], &[], &params(0));
        assert_eq!(result.count(), 121);
        assert_eq!(result.stats.evaluated, 121);
        assert_eq!(result.stats.outside, 0);

        // Column-major, bottom edge first
        let positions = result.positions();
        assert_eq!(positions[0], Point::new(0, 0));
        assert_eq!(positions[1], Point::new(0, 100));
        assert_eq!(positions[11], Point::new(100, 0));
        assert_eq!(positions[120], Point::new(1000, 1000));
    }

    #[test]
    fn test_existing_via_blocks_only_its_grid_point() {
        let result = run(vec![existing_via(500, 500)], &[], &params(0));
        assert_eq!(result.count(), 120);
        assert_eq!(result.stats.overlapping, 1);

        let positions = result.positions();
        assert!(!positions.contains(&Point::new(500, 500)));
        assert!(positions.contains(&Point::new(500, 400)));
        assert!(positions.contains(&Point::new(400, 500)));
    }

    #[test]
    fn test_clearance_wider_than_pitch_drops_outer_rings() {
        let baseline = run(vec![], &[], &params(0)).count();
        let result = run(vec![], &[], &params(150));
        assert!(result.count() < baseline);
        // x and y both limited to 200..=800
        assert_eq!(result.count(), 49);
        assert_eq!(result.stats.too_close, 72);
    }

    #[test]
    fn test_fixed_grid_is_deterministic() {
        let obstacles = || vec![existing_via(300, 700)];
        let first = run(obstacles(), &[], &params(20));
        let second = run(obstacles(), &[], &params(20));
        assert_eq!(first.positions(), second.positions());
        assert_eq!(first.stats, second.stats);
    }

    #[test]
    fn test_clearance_never_increases_count() {
        let obstacles = || {
            vec![
                existing_via(500, 500),
                BoardItem::Track(Track {
                    id: 8,
                    start: Point::new(0, 250),
                    end: Point::new(1000, 250),
                    width: 20,
                    layer: "F.Cu".to_string(),
                    net: "SIG".to_string(),
                }),
            ]
        };
        let edges = [OutlineEdge::Line {
            start: Point::new(-50, -50),
            end: Point::new(1050, -50),
        }];

        let counts: Vec<usize> = [0, 5, 10, 40, 60, 100, 150, 250]
            .iter()
            .map(|&c| run(obstacles(), &edges, &params(c)).count())
            .collect();

        for pair in counts.windows(2) {
            assert!(pair[1] <= pair[0], "counts not monotonic: {:?}", counts);
        }
    }

    #[test]
    fn test_board_arc_blocks_only_its_sweep() {
        // Quarter arc of radius 500 through the first quadrant
        let inside = [OutlineEdge::Arc {
            center: Point::new(0, 0),
            start: Point::new(500, 0),
            end: Point::new(0, 500),
        }];
        // Same radius, sweeping the third quadrant
        let outside = [OutlineEdge::Arc {
            center: Point::new(0, 0),
            start: Point::new(-500, 0),
            end: Point::new(0, -500),
        }];

        let baseline = run(vec![], &[], &params(10));
        assert_eq!(baseline.count(), 81);

        let blocked = run(vec![], &inside, &params(10));
        assert_eq!(blocked.count(), 75);
        let positions = blocked.positions();
        assert!(!positions.contains(&Point::new(300, 400)));
        assert!(!positions.contains(&Point::new(400, 300)));
        assert!(positions.contains(&Point::new(300, 300)));

        assert_eq!(run(vec![], &outside, &params(10)).count(), 81);
    }

    #[test]
    fn test_seeded_jitter_is_reproducible() {
        let region = square_region();
        let obstacles = ObstacleSet::empty();
        let input = FillInput {
            region: &region,
            obstacles: &obstacles,
            board_edges: &[],
        };
        let jittered = FillParams { randomize: true, ..params(0) };

        let a = fill_area(&input, &jittered, &mut SeededJitter::new(42)).unwrap();
        let b = fill_area(&input, &jittered, &mut SeededJitter::new(42)).unwrap();
        let c = fill_area(&input, &jittered, &mut SeededJitter::new(43)).unwrap();

        assert_eq!(a.positions(), b.positions());
        assert_ne!(a.positions(), c.positions());
        assert_eq!(a.stats.evaluated, 121);
    }
}
