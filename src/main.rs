use std::io::{self, BufRead, Write};

use slide_chess::game_state::chess_types::{PieceKind, SectionCoord};
use slide_chess::turn::game_events::GapHand;
use slide_chess::turn::turn_controller::{SlideChessGame, TurnProgress};
use slide_chess::utils::algebraic::{algebraic_to_square, square_name};
use slide_chess::utils::render_game_state::render_game_state;

const HELP: &str = "commands: gap left|right, select <sq>, move <from> <to>, toggle, \
slide <row> <col>, promote q|r|b|n, undo, reset, board, log, events, help, quit";

fn main() {
    let mut game = SlideChessGame::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("{HELP}");
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.first() == Some(&"quit") {
            break;
        }

        let reply = handle_command(&mut game, &words);
        if !reply.is_empty() {
            println!("{reply}");
        }
        stdout.flush().ok();
    }
}

fn handle_command(game: &mut SlideChessGame, words: &[&str]) -> String {
    match words {
        [] => String::new(),
        ["help"] => HELP.to_owned(),
        ["board"] => render_game_state(game.game_state()),
        ["log"] => {
            let mut out = game.log().to_plain_text();
            if let Some(explanation) = game.log().draw_explanation() {
                out.push('\n');
                out.push_str(explanation);
            }
            out
        }
        ["events"] => game.events().lines().join("\n"),
        ["gap", hand] => {
            let hand = match *hand {
                "left" => GapHand::Left,
                "right" => GapHand::Right,
                other => return format!("unknown hand '{other}'"),
            };
            match game.choose_gap(hand) {
                Ok(draw) => format!("{draw:?}; gap at {}", game.gap()),
                Err(err) => err.to_string(),
            }
        }
        ["select", square] => match algebraic_to_square(square) {
            Ok(square) => match game.select(square) {
                Ok(moves) => moves
                    .iter()
                    .map(|sq| square_name(*sq))
                    .collect::<Vec<_>>()
                    .join(" "),
                Err(err) => err.to_string(),
            },
            Err(err) => err,
        },
        ["move", from, to] => {
            let (from, to) = match (algebraic_to_square(from), algebraic_to_square(to)) {
                (Ok(from), Ok(to)) => (from, to),
                (Err(err), _) | (_, Err(err)) => return err,
            };
            let progress = game_try(game.try_move(from, to));
            progress_reply(game, progress)
        }
        ["toggle"] => match game.toggle_phase() {
            Ok(phase) => format!("{phase} phase"),
            Err(err) => err.to_string(),
        },
        ["slide", row, col] => {
            let coord = row
                .parse::<u8>()
                .ok()
                .zip(col.parse::<u8>().ok())
                .and_then(|(row, col)| SectionCoord::new(row, col));
            let Some(coord) = coord else {
                return "slide expects a section row and column in 0..4".to_owned();
            };
            let attempt = game.attempt_slide_to(coord);
            match (attempt.ok, attempt.reason) {
                (true, _) => status(game),
                (false, Some(reason)) => reason,
                (false, None) => format!("section {coord} cannot slide"),
            }
        }
        ["promote", letter] => {
            let Some(kind) = letter.chars().next().and_then(PieceKind::from_letter) else {
                return format!("unknown piece '{letter}'");
            };
            let progress = game_try(game.try_resolve_promotion(kind));
            progress_reply(game, progress)
        }
        ["undo"] => match game.undo() {
            Ok(()) => status(game),
            Err(err) => err.to_string(),
        },
        ["reset"] => {
            game.reset();
            "game reset; draw for the gap".to_owned()
        }
        _ => format!("unknown command; {HELP}"),
    }
}

fn game_try<E: ToString>(result: Result<TurnProgress, E>) -> Result<TurnProgress, String> {
    result.map_err(|err| err.to_string())
}

fn progress_reply(game: &SlideChessGame, progress: Result<TurnProgress, String>) -> String {
    match progress {
        Ok(TurnProgress::Completed) => status(game),
        Ok(TurnProgress::PromotionPending) => match game.pending_promotion() {
            Some(candidate) => format!("promote the pawn on {}", square_name(candidate.square)),
            None => status(game),
        },
        Err(err) => err,
    }
}

fn status(game: &SlideChessGame) -> String {
    let last = game.log().last().unwrap_or("");
    match game.outcome() {
        Some(outcome) => format!("{last}  {outcome}  {}", game.log().to_plain_text()),
        None => format!("{last}  {} to move", game.to_move()),
    }
}
