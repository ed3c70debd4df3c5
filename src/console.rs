use std::{
    fmt::Arguments,
    io::{self, BufRead, Write},
};

use log::{error, info, warn};

use crate::{
    board::{BOARD_SIZE, Cell},
    controller::Controller,
    game_state::{GameState, MAX_LEVEL},
    position::Position,
    presenter::{Cue, Presenter},
    scores::{ScoreEntry, read_scores},
};

const HELP: &str = "commands: <x> <y> | undo | save puzzle | new game | create puzzle | scores | help | quit";

/// Text rendition of the board for a terminal.
pub struct ConsolePresenter<W: Write> {
    out: W,
    accepting_tiles: bool,
}

impl<W: Write> ConsolePresenter<W> {
    pub fn new(out: W) -> Self {
        ConsolePresenter {
            out,
            accepting_tiles: false,
        }
    }

    pub fn is_accepting_tiles(&self) -> bool {
        self.accepting_tiles
    }

    fn emit(&mut self, args: Arguments) {
        if let Err(e) = self.out.write_fmt(args).and_then(|_| self.out.write_all(b"\n")) {
            error!("Failed to write to the console: {e}");
        }
    }

    fn draw_board(&mut self, state: &GameState) {
        let header: String = (0..BOARD_SIZE).map(|x| format!(" {x}")).collect();
        self.emit(format_args!("  {header}"));
        for y in 0..BOARD_SIZE {
            let row: String = (0..BOARD_SIZE)
                .map(|x| format!(" {}", state.board().get(Position::new(x as u8, y as u8)).to_char()))
                .collect();
            self.emit(format_args!("{y} {row}"));
        }
    }
}

impl<W: Write> Presenter for ConsolePresenter<W> {
    fn clear(&mut self) {
        self.accepting_tiles = false;
        self.emit(format_args!(""));
    }

    fn render_state(&mut self, state: &GameState) {
        self.draw_board(state);
    }

    fn install_handler(&mut self) {
        self.accepting_tiles = true;
    }

    fn advance_level(&mut self, level: u8) {
        self.emit(format_args!("Level {} of {}", level + 1, MAX_LEVEL + 1));
    }

    fn initialize_level(&mut self) {
        self.emit(format_args!("Building a new puzzle: click any square to place the bishop"));
    }

    fn update_status(&mut self, text: &str) {
        self.emit(format_args!("{text}"));
    }

    fn undo(&mut self, state: &GameState) {
        self.draw_board(state);
    }

    fn draw_move(&mut self, from: Option<Position>, to: Position, vacated: Cell) {
        match from {
            Some(from) => self.emit(format_args!(
                "({from}) -> ({to}), leaving {}",
                vacated.to_char()
            )),
            None => self.emit(format_args!("bishop placed at ({to})")),
        }
    }

    fn play_cue(&mut self, cue: Cue) {
        let tag = match cue {
            Cue::Capture => "[capture]",
            Cue::InvalidMove => "[invalid]",
            Cue::Undo => "[undo]",
            Cue::NextLevel => "[next level]",
            Cue::GameOver => "[game over]",
        };
        self.emit(format_args!("{tag}"));
    }

    fn show_scores(&mut self, scores: &[ScoreEntry], final_status: &str) {
        if !final_status.is_empty() {
            self.emit(format_args!("{final_status}"));
        }
        self.emit(format_args!("{:<16}{:>8}{:>8}{:>8}{:>8}", "Name", "Score", "Clicks", "Moves", "Undos"));
        for entry in scores {
            self.emit(format_args!(
                "{:<16}{:>8}{:>8}{:>8}{:>8}",
                entry.name, entry.score, entry.clicks, entry.moves, entry.undos
            ));
        }
    }

    fn close(&mut self) {
        self.accepting_tiles = false;
        self.emit(format_args!("Board closed. Type 'new game' or 'create puzzle' to go again."));
    }
}

/// Reads commands line by line until `quit` or end of input.
pub fn run_shell<R: BufRead, W: Write>(controller: &mut Controller<ConsolePresenter<W>>, input: R) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        let command = line.trim();

        match command {
            "" => continue,
            "quit" | "exit" => break,
            "help" => controller.presenter_mut().emit(format_args!("{HELP}")),
            "new game" => controller.start_new_game(),
            "create puzzle" => controller.create_puzzle(),
            "scores" => show_leaderboard(controller),
            _ => match command.parse::<Position>() {
                Ok(pos) => {
                    if controller.presenter().is_accepting_tiles() {
                        let outcome = controller.activate_tile(pos);
                        info!("Tile ({pos}) gave {outcome:?}");
                    } else {
                        warn!("Board is closed, ignoring tile ({pos})");
                    }
                }
                Err(_) => controller.dispatch(command),
            },
        }
    }

    Ok(())
}

fn show_leaderboard<W: Write>(controller: &mut Controller<ConsolePresenter<W>>) {
    let scores = match read_scores(&controller.catalog().dataset().score_path()) {
        Ok(scores) => scores,
        Err(e) => {
            warn!("{e}");
            Vec::new()
        }
    };
    let status = controller.state().map(GameState::status_line).unwrap_or_default();
    controller.presenter_mut().show_scores(&scores, &status);
}
