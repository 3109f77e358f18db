mod common;

use common::{map_from, moves, run_until_settled};
use coverage_core::{
    Administrator, Agent, Direction, Map, MapLayout, Pos, StepOutcome, StrategyKind,
};

#[test]
fn dfs_covers_one_by_three_corridor_in_two_steps() {
    let mut map = map_from(&["S.."]);
    let mut agent = Agent::new(&map, StrategyKind::Dfs, 0);
    let mut admin = Administrator::new(&mut map, &mut agent).unwrap();

    let outcomes = run_until_settled(&mut admin, 100).unwrap();
    assert_eq!(
        moves(&outcomes),
        vec![(Pos::new(0, 0), Pos::new(0, 1)), (Pos::new(0, 1), Pos::new(0, 2))]
    );
    assert_eq!(admin.map().not_covered_count(), 0);
}

#[test]
fn wavefront_walks_around_blocked_center() {
    let mut map = map_from(&["S..", ".#.", "..."]);
    let center = Pos::new(1, 1);
    let mut agent = Agent::new(&map, StrategyKind::Wavefront, 0);
    let mut admin = Administrator::new(&mut map, &mut agent).unwrap();

    let outcomes = run_until_settled(&mut admin, 100).unwrap();
    assert_eq!(admin.map().not_covered_count(), 0);
    assert!(moves(&outcomes).iter().all(|(_, to)| *to != center), "never enters the center");

    let path: Vec<Pos> = moves(&outcomes).into_iter().map(|(_, to)| to).collect();
    assert_eq!(
        path,
        vec![
            Pos::new(0, 1),
            Pos::new(0, 2),
            Pos::new(1, 2),
            Pos::new(2, 2),
            Pos::new(2, 1),
            Pos::new(2, 0),
            Pos::new(1, 0),
        ]
    );
}

#[test]
fn disconnected_region_stays_uncovered_for_every_strategy() {
    let rows = ["S.#..", "..#.."];
    for kind in StrategyKind::ALL {
        let mut map = map_from(&rows);
        assert_eq!(map.reachable_count(), 4);
        assert_eq!(map.unreachable_count(), 4);

        let mut agent = Agent::new(&map, kind, 17);
        let mut admin = Administrator::new(&mut map, &mut agent).unwrap();
        run_until_settled(&mut admin, 500).unwrap();
        assert!(admin.is_covered(), "{kind} should cover its own region");

        // Keep stepping past coverage: the far region never gets touched.
        for _ in 0..50 {
            admin.step().unwrap();
        }
        let map = admin.map();
        assert_eq!(map.not_covered_count(), 0);
        assert_eq!(map.uncovered_traversable_count(), 4, "{kind} left the far region alone");
        assert!((0..2).all(|y| (3..5).all(|x| !map.is_visited(Pos::new(y, x)))));
    }
}

#[test]
fn seeded_random_walk_matches_recorded_sequence() {
    let layout = MapLayout::open(3, 2, Pos::new(0, 0)).unwrap();
    let mut map = Map::new(layout);
    let mut agent = Agent::new(&map, StrategyKind::Random, 42);
    let mut admin = Administrator::new(&mut map, &mut agent).unwrap();

    let outcomes = run_until_settled(&mut admin, 100).unwrap();
    let directions: Vec<Direction> = outcomes
        .iter()
        .filter_map(|outcome| match *outcome {
            StepOutcome::Moved { direction, .. } => Some(direction),
            StepOutcome::Idle => None,
        })
        .collect();

    use Direction::{East, North, South, West};
    assert_eq!(directions, vec![South, North, East, South, West, North, East, East, South]);
    assert!(admin.is_covered());
    assert_eq!(admin.agent().position(), Pos::new(1, 2));
}
