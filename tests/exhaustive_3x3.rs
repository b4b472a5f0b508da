use std::collections::{HashMap, HashSet};

use tictactoe::search::{evaluate, Searcher, WIN_SCORE};
use tictactoe::{AIEngine, Board, BoardSize, GameState, GameStatus, Player, Pos};

const UNBOUNDED: i32 = 100;

/// Every position reachable from the empty board with O to move and no
/// line on the board.
fn o_to_move_positions() -> Vec<Board> {
    fn walk(board: &mut Board, to_move: Player, seen: &mut HashSet<Board>, out: &mut Vec<Board>) {
        if evaluate(board) != 0 || board.is_full() {
            return;
        }
        if to_move == Player::O && seen.insert(*board) {
            out.push(*board);
        }
        let empties: Vec<Pos> = board.empty_cells().collect();
        for pos in empties {
            board.place(pos, to_move);
            walk(board, to_move.opponent(), seen, out);
            board.remove(pos);
        }
    }

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    walk(&mut Board::new(BoardSize::Three), Player::X, &mut seen, &mut out);
    out
}

/// Plain minimax without pruning, memoized on the exact node.
fn reference(
    board: &mut Board,
    depth: i32,
    maximizing: bool,
    max_depth: i32,
    memo: &mut HashMap<(Board, i32, bool), i32>,
) -> i32 {
    match evaluate(board) {
        WIN_SCORE => return WIN_SCORE - depth,
        score if score == -WIN_SCORE => return score + depth,
        _ => {}
    }
    if board.is_full() || depth >= max_depth {
        return 0;
    }
    if let Some(&score) = memo.get(&(*board, depth, maximizing)) {
        return score;
    }

    let player = if maximizing { Player::O } else { Player::X };
    let empties: Vec<Pos> = board.empty_cells().collect();
    let scores = empties.into_iter().map(|pos| {
        board.place(pos, player);
        let score = reference(board, depth + 1, !maximizing, max_depth, memo);
        board.remove(pos);
        score
    });
    let scores: Vec<i32> = scores.collect();
    let best = if maximizing {
        scores.into_iter().max()
    } else {
        scores.into_iter().min()
    }
    .unwrap_or(0);

    memo.insert((*board, depth, maximizing), best);
    best
}

/// Root score of each O candidate, the way the engine scores them
fn reference_root(board: &Board, max_depth: i32, memo: &mut HashMap<(Board, i32, bool), i32>) -> Vec<(Pos, i32)> {
    let mut board = *board;
    let empties: Vec<Pos> = board.empty_cells().collect();
    empties
        .into_iter()
        .map(|pos| {
            board.place(pos, Player::O);
            let score = reference(&mut board, 0, false, max_depth, memo);
            board.remove(pos);
            (pos, score)
        })
        .collect()
}

#[test]
fn reachable_position_count() {
    // No line, not full, X has one more mark than O
    let positions = o_to_move_positions();
    assert!(!positions.is_empty());
    for board in &positions {
        assert_eq!(board.marks(Player::X).count(), board.marks(Player::O).count() + 1);
    }
}

#[test]
fn alpha_beta_matches_unpruned_minimax_unbounded() {
    let mut memo = HashMap::new();
    let mut searcher = Searcher::new();

    for board in o_to_move_positions() {
        let expected = reference_root(&board, UNBOUNDED, &mut memo);
        let mut probe = board;
        for (pos, want) in expected {
            probe.place(pos, Player::O);
            let got = searcher.minimax(&mut probe, 0, false, -1000, 1000, UNBOUNDED);
            probe.remove(pos);
            assert_eq!(got, want, "score mismatch at {pos} on\n{board}");
        }
        assert_eq!(probe, board);
    }
}

#[test]
fn search_matches_unpruned_minimax_at_engine_depth() {
    let mut memo = HashMap::new();
    let mut searcher = Searcher::new();

    for board in o_to_move_positions() {
        let expected = reference_root(&board, 6, &mut memo);
        let best_score = expected.iter().map(|&(_, s)| s).max().unwrap();
        let first_best = expected.iter().find(|&&(_, s)| s == best_score).unwrap().0;

        let mut probe = board;
        assert_eq!(searcher.score_moves(&mut probe), expected, "on\n{board}");

        let result = searcher.search(&mut probe);
        assert_eq!(result.score, best_score, "on\n{board}");
        assert_eq!(result.best_move, Some(first_best), "on\n{board}");
        assert_eq!(probe, board, "search leaked a mark");
    }
}

#[test]
fn engine_restores_every_board() {
    let mut engine = AIEngine::new();
    for board in o_to_move_positions() {
        let mut probe = board;
        let result = engine.best_move_on(&mut probe);
        assert_eq!(probe, board);
        let pos = result.best_move.expect("non-full board has a move");
        assert!(board.is_empty(pos));
    }
}

#[test]
fn o_never_loses_against_any_x_strategy() {
    fn explore(state: &GameState, engine: &mut AIEngine, outcomes: &mut [usize; 3]) {
        match state.status() {
            GameStatus::Won(Player::X) => panic!("O lost:\n{}\nmoves {:?}", state.board(), state.history()),
            GameStatus::Won(Player::O) => outcomes[1] += 1,
            GameStatus::Draw => outcomes[2] += 1,
            GameStatus::InProgress => match state.current_player() {
                Player::X => {
                    for pos in state.empty_cells() {
                        let mut next = state.clone();
                        next.play(pos).unwrap();
                        explore(&next, engine, outcomes);
                    }
                }
                Player::O => {
                    let pos = engine.get_move(state).expect("O always has a move");
                    let mut next = state.clone();
                    next.play(pos).unwrap();
                    explore(&next, engine, outcomes);
                }
            },
        }
    }

    let mut engine = AIEngine::new();
    let mut outcomes = [0usize; 3];
    explore(&GameState::with_size(BoardSize::Three), &mut engine, &mut outcomes);

    assert_eq!(outcomes[0], 0);
    assert!(outcomes[1] > 0, "O never punished a mistake");
    assert!(outcomes[2] > 0, "perfect X play should draw");
}

#[test]
fn concrete_scenarios() {
    let mut engine = AIEngine::new();
    let cases = [
        ("XX. .O. ...", Pos::new(0, 2)),
        ("OO. ... ...", Pos::new(0, 2)),
        ("... ... ...", Pos::new(1, 1)),
    ];
    for (rows, expected) in cases {
        let state = GameState::from_board(Board::from_rows(rows).unwrap(), Player::O);
        assert_eq!(engine.get_move(&state), Some(expected), "on {rows}");
    }
}
