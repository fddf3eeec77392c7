//! Gomocup brain protocol adapter.
//!
//! The Gomocup (piskvork) protocol is the line-based text protocol gomoku
//! managers use to drive engines. This adapter keeps a board, translates
//! protocol commands into `apply_move` / `compute_move` calls, and holds no
//! engine logic of its own.
//!
//! ## Supported Commands
//!
//! - `START <size>` - New game on a `size`x`size` board
//! - `RESTART` - New game on the current board size
//! - `BEGIN` - The engine plays the first move
//! - `TURN <x>,<y>` - Opponent played at column `x`, row `y`; engine replies
//! - `BOARD` - Load a position: lines of `x,y,field` (1 = own, 2 = opponent)
//!   terminated by `DONE`; engine replies
//! - `TAKEBACK <x>,<y>` - Remove a stone
//! - `INFO <key> <value>` - `iterations` and `seed` tune the search, other
//!   keys are accepted and ignored
//! - `ABOUT` - Engine description
//! - `END` - Exit
//!
//! Own stones are kept as Black and the opponent's as White; the engine has
//! no rule that depends on who moved first.
//!
//! ## Example
//!
//! ```ignore
//! use gomoku_mcts::protocol::ProtocolEngine;
//! let mut engine = ProtocolEngine::new();
//! engine.run(std::io::stdin().lock(), std::io::stdout())?;
//! ```

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use fastrand::Rng;
use tracing::{debug, info, warn};

use crate::board::{Board, Color, Move, has_five};
use crate::config::EngineConfig;
use crate::engine::{apply_move, compute_move_with_rng};
use crate::error::EngineError;

/// Color the engine plays.
const OWN: Color = Color::Black;

/// Color of the opponent.
const OPPONENT: Color = Color::White;

/// Parse a wire coordinate `x,y` (column first).
pub fn parse_coord(s: &str) -> Option<Move> {
    let mut parts = s.trim().split(',');
    let x = parts.next()?.trim().parse::<usize>().ok()?;
    let y = parts.next()?.trim().parse::<usize>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Move::new(y, x))
}

/// Format a move as a wire coordinate `x,y`.
pub fn str_coord(mv: Move) -> String {
    format!("{},{}", mv.col, mv.row)
}

/// Protocol session state.
pub struct ProtocolEngine {
    /// Search settings (board size follows `START`)
    config: EngineConfig,
    /// Current position, once a game has started
    board: Option<Board>,
    /// Stones collected between `BOARD` and `DONE`
    loading: Option<Vec<(Move, Color)>>,
    /// Random source shared by the searches of one game
    rng: Rng,
    /// Set once `END` has been received
    done: bool,
}

impl Default for ProtocolEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolEngine {
    /// Create an engine with default settings.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine with the given search settings.
    pub fn with_config(config: EngineConfig) -> Self {
        let rng = Rng::with_seed(config.seed);
        Self {
            config,
            board: None,
            loading: None,
            rng,
            done: false,
        }
    }

    /// Current board, if a game is in progress.
    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    /// Run the command loop until `END` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        for line in input.lines() {
            let line = line.context("failed to read protocol input")?;
            if let Some(reply) = self.execute(&line) {
                writeln!(output, "{reply}").context("failed to write protocol reply")?;
                output.flush().context("failed to flush protocol output")?;
            }
            if self.done {
                break;
            }
        }
        Ok(())
    }

    /// Execute one input line and return the reply, if the command has one.
    pub fn execute(&mut self, line: &str) -> Option<String> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        if self.loading.is_some() {
            return self.board_line(line);
        }

        let (command, args) = match line.split_once(char::is_whitespace) {
            Some((c, a)) => (c.to_ascii_uppercase(), a.trim()),
            None => (line.to_ascii_uppercase(), ""),
        };

        match command.as_str() {
            "START" => Some(self.start(args)),
            "RESTART" => Some(self.restart()),
            "BEGIN" => Some(self.begin()),
            "TURN" => Some(self.turn(args)),
            "BOARD" => self.begin_board(),
            "TAKEBACK" => Some(self.takeback(args)),
            "INFO" => {
                self.info(args);
                None
            }
            "ABOUT" => Some(format!(
                "name=\"gomoku-mcts\", version=\"{}\", author=\"gomoku-mcts contributors\"",
                env!("CARGO_PKG_VERSION")
            )),
            "END" => {
                self.done = true;
                None
            }
            _ => {
                warn!(command = %command, "unknown command");
                Some(format!("UNKNOWN command {command}"))
            }
        }
    }

    fn start(&mut self, args: &str) -> String {
        let size = match args.parse::<usize>() {
            Ok(size) => size,
            Err(_) => return format!("ERROR invalid board size '{args}'"),
        };
        let config = self.config.clone().with_board_size(size);
        if let Err(e) = config.validate() {
            warn!(size, error = %e, "rejected START");
            return format!("ERROR unsupported size {size}");
        }
        self.config = config;
        self.new_game();
        info!(size, iterations = self.config.iterations, "new game");
        "OK".to_string()
    }

    fn restart(&mut self) -> String {
        if self.board.is_none() {
            return "ERROR no game started".to_string();
        }
        self.new_game();
        "OK".to_string()
    }

    fn new_game(&mut self) {
        self.board = Some(Board::with_win_length(
            self.config.board_size,
            self.config.win_length,
        ));
        self.loading = None;
        self.rng = Rng::with_seed(self.config.seed);
    }

    fn begin(&mut self) -> String {
        match self.board.as_ref().map(Board::is_empty) {
            Some(true) => self.think(),
            Some(false) => "ERROR BEGIN on a non-empty board".to_string(),
            None => "ERROR no game started".to_string(),
        }
    }

    fn turn(&mut self, args: &str) -> String {
        let Some(mv) = parse_coord(args) else {
            return format!("ERROR invalid coordinate '{args}'");
        };
        let Some(board) = &self.board else {
            return "ERROR no game started".to_string();
        };
        match apply_move(board, mv.row, mv.col, OPPONENT) {
            Ok(next) => {
                debug!(mv = %mv, "opponent move");
                self.board = Some(next);
                self.think()
            }
            Err(e) => {
                warn!(mv = %mv, error = %e, "rejected TURN");
                format!("ERROR {e}")
            }
        }
    }

    fn begin_board(&mut self) -> Option<String> {
        if self.board.is_none() {
            return Some("ERROR no game started".to_string());
        }
        self.loading = Some(Vec::new());
        None
    }

    /// Handle one line inside a `BOARD` block.
    fn board_line(&mut self, line: &str) -> Option<String> {
        if line.eq_ignore_ascii_case("DONE") {
            let stones = self.loading.take().unwrap_or_default();
            return Some(self.load_board(&stones));
        }

        let parsed = line.rsplit_once(',').and_then(|(coord, field)| {
            let mv = parse_coord(coord)?;
            let color = match field.trim() {
                "1" => OWN,
                "2" | "3" => OPPONENT,
                _ => return None,
            };
            Some((mv, color))
        });
        match parsed {
            Some(stone) => {
                if let Some(stones) = self.loading.as_mut() {
                    stones.push(stone);
                }
                None
            }
            None => {
                warn!(line, "bad BOARD line");
                Some(format!("ERROR invalid board line '{line}'"))
            }
        }
    }

    fn load_board(&mut self, stones: &[(Move, Color)]) -> String {
        let mut board = Board::with_win_length(self.config.board_size, self.config.win_length);
        for &(mv, color) in stones {
            if let Err(e) = board.place(mv, color) {
                return format!("ERROR {e}");
            }
        }
        self.board = Some(board);
        self.think()
    }

    fn takeback(&mut self, args: &str) -> String {
        let Some(mv) = parse_coord(args) else {
            return format!("ERROR invalid coordinate '{args}'");
        };
        match self.board.as_mut().map(|board| board.remove(mv)) {
            Some(Some(_)) => "OK".to_string(),
            Some(None) => format!("ERROR no stone at {}", str_coord(mv)),
            None => "ERROR no game started".to_string(),
        }
    }

    fn info(&mut self, args: &str) {
        let (key, value) = args.split_once(char::is_whitespace).unwrap_or((args, ""));
        let value = value.trim();
        match key.to_ascii_lowercase().as_str() {
            "iterations" => match value.parse::<usize>() {
                Ok(n) if n > 0 => self.config.iterations = n,
                _ => warn!(value, "ignoring bad iterations"),
            },
            "seed" => match value.parse::<u64>() {
                Ok(seed) => {
                    self.config.seed = seed;
                    self.rng = Rng::with_seed(seed);
                }
                Err(_) => warn!(value, "ignoring bad seed"),
            },
            _ => debug!(key, value, "ignoring INFO"),
        }
    }

    /// Pick and play the engine's move.
    fn think(&mut self) -> String {
        let Some(board) = self.board.as_mut() else {
            return "ERROR no game started".to_string();
        };
        match compute_move_with_rng(board, OWN, &self.config, &mut self.rng) {
            Ok(Some(choice)) => {
                if let Err(e) = board.place(choice.mv, OWN) {
                    return format!("ERROR {e}");
                }
                info!(mv = %choice.mv, reason = %choice.reason, "engine move");
                if has_five(board, choice.mv.row, choice.mv.col, OWN) {
                    info!("engine completed a line");
                }
                str_coord(choice.mv)
            }
            Ok(None) => format!("ERROR {}", EngineError::NoCandidateMoves),
            Err(e) => format!("ERROR {e}"),
        }
    }
}
