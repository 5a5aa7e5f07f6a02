//! End-to-end play through the board: picks, drags, drops and repaints.

use std::cell::RefCell;
use std::rc::Rc;
use strictly_hanoi::invariants::{InvariantSet, PuzzleInvariants};
use strictly_hanoi::{
    Annotation, Board, DropOutcome, Fill, InteractionPhase, Level, LevelConfig, LevelHooks, PegId,
    Piece, PieceId, Point, Rectangle, RejectReason, Resolution, Statistics, Surface,
};

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Select(PieceId),
    Deselect,
    Drag(PieceId),
    Drop(PieceId, Resolution),
    Win(u32),
}

#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Vec<Event>>>);

impl Recorder {
    fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    fn wins(&self) -> usize {
        self.events().iter().filter(|e| matches!(e, Event::Win(_))).count()
    }
}

impl LevelHooks for Recorder {
    fn on_select(&mut self, piece: &Piece) {
        self.0.borrow_mut().push(Event::Select(piece.id()));
    }

    fn on_deselect(&mut self) {
        self.0.borrow_mut().push(Event::Deselect);
    }

    fn on_drag(&mut self, piece: &Piece) {
        self.0.borrow_mut().push(Event::Drag(piece.id()));
    }

    fn on_drop(&mut self, piece: &Piece, outcome: &DropOutcome) {
        self.0.borrow_mut().push(Event::Drop(piece.id(), *outcome.resolution()));
    }

    fn on_win(&mut self, stats: &Statistics) {
        self.0.borrow_mut().push(Event::Win(*stats.moves()));
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Clear,
    Fill(Rectangle),
    Stroke(Rectangle),
    Text(String),
}

#[derive(Default)]
struct RecordingSurface {
    calls: Vec<Call>,
}

impl RecordingSurface {
    fn fills(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, Call::Fill(_))).count()
    }

    fn strokes(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, Call::Stroke(_))).count()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, _width: f64, _height: f64) {
        self.calls.push(Call::Clear);
    }

    fn fill_rect(&mut self, rect: &Rectangle, _fill: &Fill) {
        self.calls.push(Call::Fill(*rect));
    }

    fn stroke_rect(&mut self, rect: &Rectangle, _stroke: &Fill, _width: f64) {
        self.calls.push(Call::Stroke(*rect));
    }

    fn fill_text(&mut self, _rect: &Rectangle, text: &str, _fill: &Fill) {
        self.calls.push(Call::Text(text.to_string()));
    }
}

fn classic() -> (Board, Recorder) {
    let recorder = Recorder::default();
    let level = Level::new(&LevelConfig::classic())
        .expect("classic level is valid")
        .with_hooks(recorder.clone());
    (Board::new(level), recorder)
}

fn origin(board: &Board, piece: usize) -> Point {
    board.level().piece(PieceId(piece)).unwrap().rect().origin()
}

/// Picks a piece just inside its top-left corner and drops it so it hangs
/// across the upper part of `peg`, centred on it.
fn carry(board: &mut Board, piece: usize, peg: usize) -> Option<DropOutcome> {
    let start = origin(board, piece);
    let width = board.level().piece(PieceId(piece)).unwrap().rect().width();
    let center = board.level().peg(PegId(peg)).unwrap().rect().center_x();
    board.pick(start.x + 1.0, start.y + 1.0);
    board.drag_to(center - width / 2.0 + 1.0, 201.0);
    board.release()
}

#[test]
fn test_wider_piece_on_narrower_rolls_back() {
    let (mut board, _) = classic();
    let first = carry(&mut board, 2, 1).unwrap();
    assert!(first.resolution().is_committed());

    let before = origin(&board, 1);
    let outcome = carry(&mut board, 1, 1).unwrap();
    assert!(matches!(
        outcome.resolution(),
        Resolution::RolledBack(RejectReason::Narrower { peg: PegId(1), .. })
    ));
    assert_eq!(origin(&board, 1), before);
    assert_eq!(board.level().pegs()[0].stack(), &[PieceId(0), PieceId(1)]);
    assert_eq!(board.level().pegs()[1].stack(), &[PieceId(2)]);
}

#[test]
fn test_drop_on_empty_peg_rests_on_base() {
    let (mut board, _) = classic();
    let outcome = carry(&mut board, 2, 2).unwrap();
    assert_eq!(
        *outcome.resolution(),
        Resolution::Committed {
            from: PegId(0),
            to: PegId(2)
        }
    );
    assert_eq!(*outcome.position(), Point::new(204.5, 250.0));
    assert_eq!(origin(&board, 2), Point::new(204.5, 250.0));
    assert_eq!(board.level().pegs()[0].len(), 2);
}

#[test]
fn test_buried_piece_does_not_move() {
    let (mut board, recorder) = classic();
    // Only the bottom piece covers this point.
    assert_eq!(board.pick(23.0, 251.0), Some(PieceId(0)));
    assert_eq!(board.phase(), InteractionPhase::Selected);

    assert!(!board.drag_to(200.0, 100.0));
    assert_eq!(origin(&board, 0), Point::new(22.0, 250.0));
    assert!(board.release().is_none());
    assert!(
        !recorder
            .events()
            .iter()
            .any(|e| matches!(e, Event::Drag(_) | Event::Drop(..)))
    );
}

#[test]
fn test_zero_displacement_drag_still_resolves() {
    let (mut board, recorder) = classic();
    board.pick(45.5, 211.0);
    assert!(board.drag_to(45.5, 211.0));
    let outcome = board.release().unwrap();

    assert_eq!(
        *outcome.resolution(),
        Resolution::RolledBack(RejectReason::SamePeg(PegId(0)))
    );
    assert!(!outcome.won());
    assert_eq!(origin(&board, 2), Point::new(44.5, 210.0));
    assert_eq!(
        recorder.events(),
        vec![
            Event::Select(PieceId(2)),
            Event::Drag(PieceId(2)),
            Event::Drop(PieceId(2), Resolution::RolledBack(RejectReason::SamePeg(PegId(0)))),
        ]
    );
}

#[test]
fn test_drop_in_empty_space_restores_exact_position() {
    let (mut board, _) = classic();
    board.pick(60.0, 220.0);
    board.drag_to(150.0, 30.0);
    board.drag_to(280.0, 20.0);
    let outcome = board.release().unwrap();

    assert_eq!(*outcome.resolution(), Resolution::RolledBack(RejectReason::NoTarget));
    assert_eq!(origin(&board, 2), Point::new(44.5, 210.0));
    assert_eq!(*board.level().stats().rejected(), 1);
    assert_eq!(*board.level().stats().moves(), 0);
}

#[test]
fn test_pick_during_drag_resolves_pending_drop() {
    let (mut board, recorder) = classic();
    board.pick(60.0, 220.0);
    board.drag_to(150.0, 30.0);

    // Pointer-up was lost; the next pointer-down lands where the piece hangs.
    assert_eq!(board.pick(150.0, 30.0), None);
    assert_eq!(board.release(), None);
    assert_eq!(origin(&board, 2), Point::new(44.5, 210.0));
    assert_eq!(board.level().pegs()[0].stack(), &[PieceId(0), PieceId(1), PieceId(2)]);
    assert_eq!(*board.level().stats().rejected(), 1);
    assert_eq!(
        recorder.events(),
        vec![
            Event::Select(PieceId(2)),
            Event::Drag(PieceId(2)),
            Event::Drop(PieceId(2), Resolution::RolledBack(RejectReason::NoTarget)),
            Event::Deselect,
        ]
    );

    // The rollback point is still the peg, not mid-air.
    board.pick(60.0, 220.0);
    board.drag_to(150.0, 30.0);
    board.release();
    assert_eq!(origin(&board, 2), Point::new(44.5, 210.0));
}

#[test]
fn test_pick_miss_fires_deselect() {
    let (mut board, recorder) = classic();
    board.pick(60.0, 220.0);
    board.pick(290.0, 5.0);
    assert_eq!(
        recorder.events(),
        vec![Event::Select(PieceId(2)), Event::Deselect]
    );
}

const SOLUTION: [(usize, usize); 7] = [(2, 2), (1, 1), (2, 1), (0, 2), (2, 0), (1, 2), (2, 2)];

#[test]
fn test_solution_wins_once() {
    let (mut board, recorder) = classic();
    for (i, &(piece, peg)) in SOLUTION.iter().enumerate() {
        let outcome = carry(&mut board, piece, peg).unwrap();
        assert!(outcome.resolution().is_committed(), "move {} was rejected", i + 1);
        assert_eq!(*outcome.won(), i == SOLUTION.len() - 1);
    }
    assert!(board.level().has_won());
    assert_eq!(recorder.wins(), 1);
    assert!(recorder.events().contains(&Event::Win(7)));

    // Leaving and re-entering the winning state does not fire again.
    assert!(!carry(&mut board, 2, 1).unwrap().won());
    assert!(*carry(&mut board, 2, 2).unwrap().won());
    assert_eq!(recorder.wins(), 1);
}

#[test]
fn test_stacks_stay_ordered_through_play() {
    let (mut board, _) = classic();
    for &(piece, peg) in &SOLUTION {
        carry(&mut board, piece, peg);
        // Also try an illegal move after every legal one.
        carry(&mut board, 0, 1);
        assert!(PuzzleInvariants::check_all(board.level()).is_ok());
        let placed: usize = board.level().pegs().iter().map(|p| p.len()).sum();
        assert_eq!(placed, 3);
    }
}

#[test]
fn test_repaint_only_when_dirty() {
    let (mut board, _) = classic();
    let mut surface = RecordingSurface::default();

    assert!(board.tick(&mut surface));
    assert_eq!(surface.calls.first(), Some(&Call::Clear));
    assert_eq!(surface.fills(), 6);
    assert_eq!(surface.strokes(), 0);

    surface.calls.clear();
    assert!(!board.tick(&mut surface));
    assert!(surface.calls.is_empty());

    board.pick(60.0, 220.0);
    assert!(board.tick(&mut surface));
    assert_eq!(surface.strokes(), 1);
    assert_eq!(
        surface.calls.last(),
        Some(&Call::Stroke(*board.level().piece(PieceId(2)).unwrap().rect()))
    );
}

#[test]
fn test_off_surface_shapes_are_not_drawn() {
    let (mut board, _) = classic();
    let mut surface = RecordingSurface::default();
    board.pick(45.5, 211.0);
    board.drag_to(-99.0, -99.0);

    board.tick(&mut surface);
    assert_eq!(surface.fills(), 5);
    // The highlight follows the selection even off-surface.
    assert_eq!(surface.strokes(), 1);
}

#[test]
fn test_annotations_drawn_last() {
    let (mut board, _) = classic();
    let label = Annotation::new(
        Rectangle::new(200.0, 275.0, 50.0, 15.0).unwrap(),
        Fill::from("#222222"),
        "goal",
    );
    let index = board.add_annotation(label);
    let mut surface = RecordingSurface::default();
    board.tick(&mut surface);
    assert_eq!(surface.calls.last(), Some(&Call::Text("goal".to_string())));

    assert!(board.set_annotation_text(index, "done"));
    assert!(!board.set_annotation_text(index + 1, "nope"));
    assert!(board.is_dirty());
    surface.calls.clear();
    board.tick(&mut surface);
    assert_eq!(surface.calls.last(), Some(&Call::Text("done".to_string())));
}

#[test]
fn test_reset_after_win() {
    let (mut board, recorder) = classic();
    for &(piece, peg) in &SOLUTION {
        carry(&mut board, piece, peg);
    }
    board.reset();
    assert!(!board.level().has_won());
    assert_eq!(board.level().pegs()[0].len(), 3);

    for &(piece, peg) in &SOLUTION {
        carry(&mut board, piece, peg);
    }
    assert_eq!(recorder.wins(), 2);
}
