#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use strum::VariantArray;

    use crate::builder::{BuilderInvalidReason, GridBuilder};
    use crate::catalog::{compatible, legal_orientations};
    use crate::direction::{Axis, Direction};
    use crate::location::{Location, PositionClass};
    use crate::piece::{Orientation, Piece, PieceCodeError, Shape};
    use crate::propagation::{candidates, deduce, force_borders, propagate, Deduction, Fixpoint};
    use crate::validator::{is_goal, validate, Violation};
    use crate::{Grid, ParseError, SearchState, Solver, SolverConfig, SolverFailure, Status};

    // solved by propagation alone once the shapes are known
    const SOLVED_3X3: &str = "FB\tVB\tFE
VD\tBC\tVE
FD\tLH\tVC";

    const SOLVED_4X4: &str = "VB\tBB\tLH\tVE
LV\tVD\tVE\tLV
LV\tFD\tVC\tLV
VD\tLH\tLH\tVC";

    fn grid(text: &str) -> Grid {
        text.parse().unwrap()
    }

    fn rebuilt_with(grid: &Grid, at: Location, piece: Piece) -> Grid {
        let mut builder = GridBuilder::with_dims(grid.dims());
        for location in grid.locations() {
            builder.place(location, if location == at { piece } else { grid.get(location).unwrap() });
        }

        builder.build().unwrap()
    }

    #[test]
    fn parse_and_print() {
        let board = grid("FB VC VD\nBC  BB LV\n\nFB FB FE\n");
        assert_eq!(board.dims(), (NonZero::new(3).unwrap(), NonZero::new(3).unwrap()));
        assert_eq!(format!("{}", board), "FB\tVC\tVD
BC\tBB\tLV
FB\tFB\tFE");
        assert_eq!(board.locked_count(), 0);
    }

    #[test]
    fn parse_rejects_malformed_text() {
        assert_eq!("FB VC\nBC".parse::<Grid>(), Err(ParseError::Ragged { row: 1, expected: 2, found: 1 }));
        assert_eq!("FB XX".parse::<Grid>(), Err(ParseError::UnknownCode {
            row: 0,
            col: 1,
            source: PieceCodeError::UnknownShape('X'),
        }));
        assert_eq!("LC".parse::<Grid>(), Err(ParseError::UnknownCode {
            row: 0,
            col: 0,
            source: PieceCodeError::UnknownOrientation { shape: Shape::Straight, code: 'C' },
        }));
        assert_eq!("FBB".parse::<Piece>(), Err(PieceCodeError::Length("FBB".to_owned())));
        assert_eq!("\n  \n".parse::<Grid>(), Err(ParseError::Empty));
    }

    #[test]
    fn piece_codes() {
        assert_eq!("LV".parse::<Piece>(), Ok(Piece::straight(Axis::Vertical)));
        assert_eq!("VD".parse::<Piece>(), Ok(Piece::corner(Direction::Right)));
        assert_eq!(Piece::junction(Direction::Left).to_string(), "BE");
        assert_eq!(Piece::new(Shape::Straight, Orientation::Facing(Direction::Up)), None);
        assert_eq!(Piece::terminal(Direction::Up).rotate(Orientation::Along(Axis::Horizontal)), None);
        assert_eq!(
            Piece::terminal(Direction::Up).rotate(Orientation::Facing(Direction::Left)),
            Some(Piece::terminal(Direction::Left))
        );
    }

    #[test]
    fn builder_reports_problems() {
        let dims = (NonZero::new(2).unwrap(), NonZero::new(1).unwrap());

        let mut builder = GridBuilder::with_dims(dims);
        builder.place(Location(0, 0), Piece::terminal(Direction::Down));
        assert_eq!(builder.is_valid(), None);
        assert_eq!(builder.build(), Err(vec![BuilderInvalidReason::MissingPiece(Location(1, 0))]));

        builder.place(Location(5, 0), Piece::terminal(Direction::Up));
        assert_eq!(builder.is_valid(), Some(&vec![BuilderInvalidReason::PieceOutOfBounds(Location(5, 0))]));

        let built = GridBuilder::with_dims(dims)
            .place_row(0, &[Piece::terminal(Direction::Down)])
            .place_row(1, &[Piece::terminal(Direction::Up)])
            .build()
            .unwrap();
        assert_eq!(format!("{}", built), "FB\nFC");
    }

    #[test]
    fn openings() {
        let set = |piece: Piece| {
            let mut dirs = piece.openings().into_iter().collect::<Vec<_>>();
            dirs.sort();
            dirs
        };

        assert_eq!(set(Piece::terminal(Direction::Left)), vec![Direction::Left]);
        assert_eq!(set(Piece::corner(Direction::Up)), vec![Direction::Up, Direction::Left]);
        assert_eq!(set(Piece::corner(Direction::Down)), vec![Direction::Down, Direction::Right]);
        assert_eq!(set(Piece::corner(Direction::Left)), vec![Direction::Down, Direction::Left]);
        assert_eq!(set(Piece::corner(Direction::Right)), vec![Direction::Up, Direction::Right]);
        assert_eq!(set(Piece::junction(Direction::Up)), vec![Direction::Up, Direction::Left, Direction::Right]);
        assert_eq!(set(Piece::junction(Direction::Right)), vec![Direction::Up, Direction::Down, Direction::Right]);
        assert_eq!(set(Piece::straight(Axis::Horizontal)), vec![Direction::Left, Direction::Right]);
    }

    #[test]
    fn geometry() {
        let board = grid("FB FB FB FB\nFB FB FB FB\nFB FB FB FB");

        assert_eq!(board.classify(Location(0, 0)), PositionClass::CornerTopLeft);
        assert_eq!(board.classify(Location(0, 3)), PositionClass::CornerTopRight);
        assert_eq!(board.classify(Location(2, 0)), PositionClass::CornerBottomLeft);
        assert_eq!(board.classify(Location(2, 3)), PositionClass::CornerBottomRight);
        assert_eq!(board.classify(Location(0, 1)), PositionClass::EdgeTop);
        assert_eq!(board.classify(Location(2, 2)), PositionClass::EdgeBottom);
        assert_eq!(board.classify(Location(1, 0)), PositionClass::EdgeLeft);
        assert_eq!(board.classify(Location(1, 3)), PositionClass::EdgeRight);
        assert_eq!(board.classify(Location(1, 1)), PositionClass::Interior);

        assert_eq!(board.neighbor_positions(Location(1, 1)), [
            (Location(0, 1), Direction::Up),
            (Location(1, 2), Direction::Right),
            (Location(2, 1), Direction::Down),
            (Location(1, 0), Direction::Left),
        ]);

        let above_origin = Direction::Up.attempt_from(Location(0, 0));
        assert!(!board.is_on_board(above_origin));
        assert_eq!(board.get(above_origin), None);
        assert_eq!(board.get(Location(3, 0)), None);
        assert_eq!(board.get(Location(2, 3)), Some(Piece::terminal(Direction::Down)));
    }

    #[test]
    fn one_row_classifies_by_precedence() {
        let board = grid("FD LH FE");
        assert_eq!(board.classify(Location(0, 0)), PositionClass::CornerTopLeft);
        assert_eq!(board.classify(Location(0, 1)), PositionClass::EdgeTop);
        assert_eq!(board.classify(Location(0, 2)), PositionClass::CornerTopRight);
    }

    #[test]
    fn legal_orientation_table() {
        let facing = |dirs: &[Direction]| dirs.iter().copied().map(Orientation::Facing).collect::<Vec<_>>();

        assert_eq!(legal_orientations(Shape::Terminal, PositionClass::CornerTopLeft), facing(&[Direction::Down, Direction::Right]));
        assert_eq!(legal_orientations(Shape::Terminal, PositionClass::CornerTopRight), facing(&[Direction::Down, Direction::Left]));
        assert_eq!(legal_orientations(Shape::Terminal, PositionClass::EdgeTop), facing(&[Direction::Down, Direction::Left, Direction::Right]));
        assert_eq!(legal_orientations(Shape::Terminal, PositionClass::Interior), facing(Direction::VARIANTS));

        assert_eq!(legal_orientations(Shape::Corner, PositionClass::CornerTopLeft), facing(&[Direction::Down]));
        assert_eq!(legal_orientations(Shape::Corner, PositionClass::CornerBottomRight), facing(&[Direction::Up]));
        assert_eq!(legal_orientations(Shape::Corner, PositionClass::EdgeTop), facing(&[Direction::Down, Direction::Left]));
        assert_eq!(legal_orientations(Shape::Corner, PositionClass::EdgeRight), facing(&[Direction::Up, Direction::Left]));

        assert_eq!(legal_orientations(Shape::Junction, PositionClass::EdgeTop), facing(&[Direction::Down]));
        assert_eq!(legal_orientations(Shape::Junction, PositionClass::EdgeLeft), facing(&[Direction::Right]));
        assert_eq!(legal_orientations(Shape::Junction, PositionClass::CornerBottomLeft), vec![]);

        assert_eq!(legal_orientations(Shape::Straight, PositionClass::EdgeBottom), vec![Orientation::Along(Axis::Horizontal)]);
        assert_eq!(legal_orientations(Shape::Straight, PositionClass::EdgeLeft), vec![Orientation::Along(Axis::Vertical)]);
        assert_eq!(legal_orientations(Shape::Straight, PositionClass::CornerTopRight), vec![]);
        assert_eq!(legal_orientations(Shape::Straight, PositionClass::Interior).len(), 2);
    }

    #[test]
    fn compatibility() {
        let right = Piece::terminal(Direction::Right);
        let across = Piece::straight(Axis::Horizontal);
        let upright = Piece::straight(Axis::Vertical);

        assert!(compatible(&right, Some(&across), Direction::Right));
        assert!(compatible(&across, Some(&right), Direction::Left));
        assert!(!compatible(&right, Some(&upright), Direction::Right));
        assert!(!compatible(&right, None, Direction::Right));
        // does not open that way at all
        assert!(!compatible(&right, Some(&across), Direction::Left));
    }

    #[test]
    fn border_forcing_is_idempotent() {
        let mut board = grid("FC VC FC\nVC BB VC\nFC LV VB");

        assert_eq!(force_borders(&mut board), 2);
        assert_eq!(format!("{}", board), "FC\tVC\tFC
VC\tBB\tVC
FC\tLH\tVC");
        assert!(board.is_locked(Location(2, 1)));
        assert!(board.is_locked(Location(2, 2)));
        // interior cells are never touched
        assert!(!board.is_locked(Location(1, 1)));

        let once = board.clone();
        assert_eq!(force_borders(&mut board), 0);
        assert_eq!(board, once);
    }

    #[test]
    fn deductions() {
        let mut board = grid("FC VC FC\nVC BB VC\nFC LV VB");
        force_borders(&mut board);

        // the bottom straight shuts the junction's downward opening
        assert_eq!(deduce(&board, Location(1, 1)), Deduction::Locked(Orientation::Facing(Direction::Up)));
        assert_eq!(deduce(&board, Location(0, 0)), Deduction::Undetermined);
        assert_eq!(candidates(&board, Location(0, 1)), vec![
            Orientation::Facing(Direction::Down),
            Orientation::Facing(Direction::Left),
        ]);
        assert_eq!(candidates(&board, Location(7, 7)), vec![]);

        let mut cornered = grid("BC");
        assert_eq!(force_borders(&mut cornered), 0);
        assert_eq!(deduce(&cornered, Location(0, 0)), Deduction::Contradiction);
    }

    #[test]
    fn propagation_is_sound() {
        for solved in [SOLVED_3X3, SOLVED_4X4] {
            let mut board = grid(solved);
            force_borders(&mut board);
            let Fixpoint::Settled { locked } = propagate(&mut board) else {
                panic!("solvable grid propagated to a contradiction");
            };
            assert!(!locked.is_empty());

            for location in board.locations().filter(|l| board.is_locked(*l)) {
                let piece = board.get(location).unwrap();
                assert!(legal_orientations(piece.shape(), board.classify(location)).contains(&piece.orientation()));

                for (neighbor, direction) in board.neighbor_positions(location) {
                    match board.cell(neighbor) {
                        None => assert!(!piece.opens_toward(direction)),
                        Some(cell) if cell.is_locked() => assert_eq!(
                            piece.opens_toward(direction),
                            cell.piece().opens_toward(direction.invert()),
                        ),
                        Some(_) => {}
                    }
                }
            }
        }
    }

    #[test]
    fn propagation_stops_at_contradiction() {
        let mut board = grid("BC");
        let fixpoint = propagate(&mut board);
        assert!(fixpoint.is_contradiction());
        assert_eq!(fixpoint, Fixpoint::Contradiction { at: Location(0, 0) });
    }

    #[test]
    fn validator_accepts_solved_grids() {
        assert_eq!(validate(&grid(SOLVED_3X3)), Ok(()));
        assert!(is_goal(&grid(SOLVED_4X4)));
        assert!(is_goal(&grid("FD LH FE")));
    }

    #[test]
    fn validator_rejects_one_turned_piece() {
        let solved = grid(SOLVED_3X3);
        let turned = rebuilt_with(&solved, Location(0, 0), Piece::terminal(Direction::Right));

        assert_eq!(validate(&turned), Err(Violation::Incompatible { at: Location(0, 0), direction: Direction::Right }));
        assert!(!is_goal(&turned));
    }

    #[test]
    fn validator_rejects_two_networks() {
        assert_eq!(validate(&grid("FD FE\nFD FE")), Err(Violation::Disconnected { reached: 2, total: 4 }));
        assert_eq!(validate(&grid("FC")), Err(Violation::Incompatible { at: Location(0, 0), direction: Direction::Up }));
    }

    #[test]
    fn closed_loop_needs_no_search() {
        let mut board = grid("VC VC\nVC VC");
        assert_eq!(force_borders(&mut board.clone()), 4);

        let mut solver = Solver::new(board.clone());
        let solution = solver.solve().unwrap();
        assert_eq!(format!("{}", solution.grid), "VB\tVE\nVD\tVC");
        assert_eq!(solution.stats.expansions, 0);
        assert_eq!(solution.stats.dequeues, 1);

        board = board.solve().unwrap();
        assert!(board.is_complete());
    }

    #[test]
    fn already_solved_row() {
        let mut solver = Solver::new(grid("FD LH FE"));
        let solution = solver.solve().unwrap();

        assert_eq!(format!("{}", solution.grid), "FD\tLH\tFE");
        assert_eq!(solution.stats.dequeues, 1);
        assert_eq!(solution.stats.expansions, 0);
    }

    #[test]
    fn two_terminals_face_each_other() {
        let mut board = grid("FC FC");
        assert_eq!(force_borders(&mut board), 0);

        let mut solver = Solver::new(grid("FC FC"));
        let solution = solver.solve().unwrap();
        assert_eq!(format!("{}", solution.grid), "FD\tFE");
        assert_eq!(solution.stats.expansions, 0);
        assert_eq!(solution.stats.generated, 0);
    }

    #[test]
    fn solve_sample_puzzle() {
        let solved = grid("FB VC VD\nBC BB LV\nFB FB FE").solve().unwrap();
        assert_eq!(format!("{}", solved), "FB\tVB\tVE
BD\tBE\tLV
FC\tFC\tFC");
    }

    #[test]
    fn solve_scrambled_4x4() {
        let scrambled = grid("VC BC LV VB\nLH VC VB LH\nLH FC VD LH\nVB LV LV VE");
        assert!(!is_goal(&scrambled));

        let solved = scrambled.clone().solve().unwrap();
        assert_eq!(format!("{}", solved), SOLVED_4X4);
        for location in scrambled.locations() {
            assert_eq!(solved.get(location).unwrap().shape(), scrambled.get(location).unwrap().shape());
        }
    }

    #[test]
    fn every_single_turn_of_a_solved_grid_solves() {
        let solved = grid(SOLVED_3X3);

        for location in solved.locations() {
            let piece = solved.get(location).unwrap();
            for orientation in piece.shape().orientations() {
                let turned = rebuilt_with(&solved, location, piece.rotate(orientation).unwrap());
                let result = turned.solve().unwrap();
                assert!(is_goal(&result));
                assert_eq!(format!("{}", result), SOLVED_3X3);
            }
        }
    }

    #[test]
    fn dead_branch_has_no_children() {
        let root = SearchState::root(grid("BC"));
        assert_eq!(root.status(), Status::DeadBranch { at: Location(0, 0) });

        let mut solver = Solver::new(grid("BC"));
        assert!(solver.expand(&root).is_empty());
        assert_eq!(solver.solve().unwrap_err(), SolverFailure::Exhausted);
        assert_eq!(solver.stats().dequeues, 1);
    }

    #[test]
    fn branching_on_four_terminals() {
        // four dead ends can only ever pair off
        let root = SearchState::root(grid("FC FC\nFC FC"));
        assert_eq!(root.id(), 0);
        assert_eq!(root.status(), Status::Open);
        assert_eq!(root.grid().locked_count(), 0);

        let mut solver = Solver::new(grid("FC FC\nFC FC"));
        let children = solver.expand(&root);
        assert_eq!(children.iter().map(|child| child.id()).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(format!("{}", children[0].grid()), "FB\tFB\nFC\tFC");
        assert_eq!(format!("{}", children[1].grid()), "FD\tFE\nFD\tFE");
        assert!(children.iter().all(|child| child.grid().is_complete() && !child.is_dead_branch()));
        assert!(children[0] < children[1]);

        // a finished grid hands back only itself
        let leaf = solver.expand(&children[0]);
        assert_eq!(leaf.len(), 1);
        assert_eq!(leaf[0].grid(), children[0].grid());

        let mut solver = Solver::new(grid("FC FC\nFC FC"));
        assert_eq!(solver.solve().unwrap_err(), SolverFailure::Exhausted);
        let stats = solver.stats();
        assert_eq!(stats.dequeues, 3);
        assert_eq!(stats.expansions, 1);
        assert_eq!(stats.generated, 2);
        assert_eq!(stats.dead_branches, 0);
        assert_eq!(stats.peak_frontier, 2);
    }

    #[test]
    fn dequeue_limit() {
        let config = SolverConfig::new().with_dequeue_limit(1);
        let mut solver = Solver::with_config(grid("FC FC\nFC FC"), config);
        assert_eq!(solver.solve().unwrap_err(), SolverFailure::DequeueLimit(1));

        assert_eq!(SolverConfig::new().with_dequeue_limit(0).dequeue_limit(), None);
    }
}
