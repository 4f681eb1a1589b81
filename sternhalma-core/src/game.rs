//! Game state: board, seated players, turn sequencing

use serde::{Deserialize, Serialize};

use crate::board::{Board, Piece};
use crate::error::GameError;
use crate::events::{EventBus, EventKind, GameEvent, PieceMoved, SubscriptionId};
use crate::hex::Hex;
use crate::layout::{active_triangles, effective_player_count, turn_order};
use crate::movegen::{find_valid_moves, Move, MoveKind};
use crate::player::Player;
use crate::rules::{find_winner, next_turn};
use crate::topology::{home_triangle, TriangleIndex};

// ============================================================================
// CORE TYPES
// ============================================================================

/// Match phase
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "camelCase")]
pub enum MatchPhase {
    NotStarted,
    InProgress,
    Over { winner: TriangleIndex },
}

/// What a completed turn did
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOutcome {
    pub moved: PieceMoved,
    /// Set when this move ended the game
    pub winner: Option<TriangleIndex>,
    /// Player to move next, unless the game is over
    pub next_player: Option<TriangleIndex>,
}

/// Waypoints for playing back a move before it is committed
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotionPlan {
    pub from: Hex,
    pub to: Hex,
    pub kind: MoveKind,
    /// `from` followed by every landing cell
    pub waypoints: Vec<Hex>,
}

/// Piece lifted off the board while its move is played back
#[derive(Clone, Debug)]
struct InFlight {
    piece: Piece,
    plan: MotionPlan,
}

// ============================================================================
// GAME STATE
// ============================================================================

/// Game state (mutated in place)
#[derive(Debug)]
pub struct GameState {
    board: Board,

    /// Players in ascending home-triangle order
    players: Vec<Player>,

    /// Home triangles in seating order
    turn_order: Vec<TriangleIndex>,
    turn_index: usize,

    phase: MatchPhase,

    /// Committed moves since the last reset
    history: Vec<PieceMoved>,

    /// At most one piece in motion at a time
    in_flight: Option<InFlight>,

    events: EventBus,
}

impl GameState {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Empty board, no players, not started
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            players: Vec::new(),
            turn_order: Vec::new(),
            turn_index: 0,
            phase: MatchPhase::NotStarted,
            history: Vec::new(),
            in_flight: None,
            events: EventBus::new(),
        }
    }

    /// Standard opening for `player_count` players
    pub fn with_players(player_count: usize) -> Self {
        let mut state = Self::new();
        state.reset(player_count);
        state
    }

    /// Arbitrary position: seats `player_count` players and places exactly
    /// the given `(cell, owner)` pieces.
    pub fn from_position(
        player_count: usize,
        placements: &[(Hex, TriangleIndex)],
    ) -> Result<Self, GameError> {
        let mut state = Self::new();
        state.seat_players(player_count);

        for &(pos, owner) in placements {
            state.place(pos, owner)?;
        }

        state.phase = MatchPhase::InProgress;
        Ok(state)
    }

    /// Rebuild the board and players from scratch and start a new match
    pub fn reset(&mut self, player_count: usize) {
        let player_count = self.seat_players(player_count);

        for home in self.turn_order.clone() {
            for pos in home_triangle(home) {
                if let Err(err) = self.place(pos, home) {
                    tracing::error!(%pos, home, %err, "failed to seed home triangle");
                }
            }
        }

        self.phase = MatchPhase::InProgress;
        tracing::info!(player_count, turn_order = ?self.turn_order, "game reset");

        self.events.emit(&GameEvent::StateReset {
            player_count,
            turn_order: self.turn_order.clone(),
        });
    }

    /// Clear the board and seat players; returns the effective player count
    fn seat_players(&mut self, player_count: usize) -> usize {
        let effective = effective_player_count(player_count);
        if effective != player_count {
            tracing::warn!(requested = player_count, effective, "unsupported player count");
        }

        let active = active_triangles(effective);
        self.turn_order = turn_order(active);
        self.players = active
            .iter()
            .map(|&home| {
                let order = self
                    .turn_order
                    .iter()
                    .position(|&seat| seat == home)
                    .unwrap_or_default();
                Player::new(order, home)
            })
            .collect();

        self.board.clear();
        self.turn_index = 0;
        self.history.clear();
        self.in_flight = None;
        effective
    }

    /// Setup placement that keeps the player index in step with the board
    fn place(&mut self, pos: Hex, owner: TriangleIndex) -> Result<(), GameError> {
        if self.player(owner).is_none() {
            return Err(GameError::InactiveTriangle(owner));
        }

        if let Some(replaced) = self.board.place(pos, owner)? {
            if let Some(player) = self.player_mut(replaced.owner) {
                player.remove_piece(pos);
            }
        }
        if let Some(player) = self.player_mut(owner) {
            player.add_piece(pos);
        }
        Ok(())
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Player seated at a home triangle
    pub fn player(&self, home: TriangleIndex) -> Option<&Player> {
        self.players.iter().find(|player| player.home == home)
    }

    fn player_mut(&mut self, home: TriangleIndex) -> Option<&mut Player> {
        self.players.iter_mut().find(|player| player.home == home)
    }

    pub fn turn_order(&self) -> &[TriangleIndex] {
        &self.turn_order
    }

    pub fn turn_index(&self) -> usize {
        self.turn_index
    }

    /// Home triangle whose turn it is
    pub fn current_home(&self) -> Option<TriangleIndex> {
        self.turn_order.get(self.turn_index).copied()
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.current_home().and_then(|home| self.player(home))
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn winner(&self) -> Option<TriangleIndex> {
        match self.phase {
            MatchPhase::Over { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn history(&self) -> &[PieceMoved] {
        &self.history
    }

    /// True while a piece is lifted for playback
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_on_board(&self, pos: Hex) -> bool {
        self.board.is_on_board(pos)
    }

    pub fn is_occupied(&self, pos: Hex) -> bool {
        self.board.is_occupied(pos)
    }

    // ========================================================================
    // OBSERVERS
    // ========================================================================

    pub fn subscribe<F>(&mut self, kind: EventKind, callback: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.events.subscribe(kind, callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// Legal moves for the piece at `from`, whoever owns it
    pub fn valid_moves(&self, from: Hex) -> Result<Vec<Move>, GameError> {
        self.ensure_idle()?;
        Ok(find_valid_moves(&self.board, from))
    }

    /// First player, in seat-list order, with a filled goal triangle
    pub fn check_winner(&self) -> Option<TriangleIndex> {
        find_winner(&self.board, &self.players)
    }

    // ========================================================================
    // MUTATION
    // ========================================================================

    /// Relocate a piece without any rules check beyond occupancy.
    ///
    /// Keeps the owner's piece index in step and notifies subscribers.
    pub fn move_piece(&mut self, from: Hex, to: Hex) -> Result<PieceMoved, GameError> {
        self.ensure_idle()?;
        self.relocate(from, to)
    }

    fn relocate(&mut self, from: Hex, to: Hex) -> Result<PieceMoved, GameError> {
        let mut piece = self.board.relocate(from, to)?;
        if piece.selected {
            if let Some(moved) = self.board.piece_at_mut(to) {
                moved.selected = false;
            }
            piece.selected = false;
        }

        if let Some(player) = self.player_mut(piece.owner) {
            player.relocate(from, to);
        }

        let moved = PieceMoved {
            from,
            to,
            owner: piece.owner,
        };
        self.history.push(moved);
        self.events.emit(&GameEvent::PieceMoved(moved));
        Ok(moved)
    }

    /// Pass the turn to the next seat and return its home triangle
    pub fn advance_turn(&mut self) -> Result<TriangleIndex, GameError> {
        self.ensure_idle()?;
        self.pass_turn().ok_or(GameError::GameNotInProgress)
    }

    fn pass_turn(&mut self) -> Option<TriangleIndex> {
        let previous = self.current_home()?;
        self.turn_index = next_turn(self.turn_index, self.turn_order.len());
        let current = self.current_home()?;

        tracing::info!(previous, current, turn_index = self.turn_index, "turn changed");
        self.events.emit(&GameEvent::TurnChanged {
            previous,
            current,
            turn_index: self.turn_index,
        });
        Some(current)
    }

    /// Play one full turn: validate, move, check for a win, pass the turn
    pub fn play(&mut self, from: Hex, to: Hex) -> Result<TurnOutcome, GameError> {
        self.ensure_idle()?;
        self.validate_turn_move(from, to)?;
        self.commit(from, to)
    }

    /// Mark the current player's piece at `pos` as selected and return its moves
    pub fn select(&mut self, pos: Hex) -> Result<Vec<Move>, GameError> {
        self.ensure_idle()?;
        self.ensure_in_progress()?;
        self.ensure_current_owner(pos)?;

        self.clear_selection();
        if let Some(piece) = self.board.piece_at_mut(pos) {
            piece.selected = true;
        }
        Ok(find_valid_moves(&self.board, pos))
    }

    pub fn clear_selection(&mut self) {
        let selected: Vec<Hex> = self
            .board
            .pieces()
            .filter(|piece| piece.selected)
            .map(|piece| piece.pos)
            .collect();
        for pos in selected {
            if let Some(piece) = self.board.piece_at_mut(pos) {
                piece.selected = false;
            }
        }
    }

    /// Lift a piece for animated playback of a legal move.
    ///
    /// Until [`GameState::finish_motion`] is called every query and mutation
    /// fails with [`GameError::PieceInMotion`].
    pub fn begin_motion(&mut self, from: Hex, to: Hex) -> Result<MotionPlan, GameError> {
        self.ensure_idle()?;
        let mv = self.validate_turn_move(from, to)?;

        let piece = self
            .board
            .remove_at(from)
            .ok_or(GameError::EmptyOrigin(from))?;
        let plan = MotionPlan {
            from,
            to,
            kind: mv.kind,
            waypoints: mv.waypoints(),
        };

        tracing::debug!(%from, %to, hops = mv.hops(), "motion started");
        self.in_flight = Some(InFlight {
            piece,
            plan: plan.clone(),
        });
        Ok(plan)
    }

    /// Commit the move whose playback has completed
    pub fn finish_motion(&mut self) -> Result<TurnOutcome, GameError> {
        let InFlight { piece, plan } = self.in_flight.take().ok_or(GameError::NoMotion)?;
        self.board.put(piece)?;
        self.commit(plan.from, plan.to)
    }

    // ========================================================================
    // TURN HELPERS
    // ========================================================================

    fn commit(&mut self, from: Hex, to: Hex) -> Result<TurnOutcome, GameError> {
        let moved = self.relocate(from, to)?;

        if let Some(winner) = self.check_winner() {
            self.phase = MatchPhase::Over { winner };
            tracing::info!(winner, moves = self.history.len(), "game over");
            return Ok(TurnOutcome {
                moved,
                winner: Some(winner),
                next_player: None,
            });
        }

        let next_player = self.pass_turn();
        Ok(TurnOutcome {
            moved,
            winner: None,
            next_player,
        })
    }

    fn validate_turn_move(&self, from: Hex, to: Hex) -> Result<Move, GameError> {
        self.ensure_in_progress()?;
        self.ensure_current_owner(from)?;
        if !self.board.is_on_board(to) {
            return Err(GameError::OffBoard(to));
        }
        if self.board.is_occupied(to) {
            return Err(GameError::OccupiedTarget(to));
        }

        find_valid_moves(&self.board, from)
            .into_iter()
            .find(|mv| mv.to == to)
            .ok_or(GameError::IllegalDestination { from, to })
    }

    fn ensure_idle(&self) -> Result<(), GameError> {
        if self.is_busy() {
            Err(GameError::PieceInMotion)
        } else {
            Ok(())
        }
    }

    fn ensure_in_progress(&self) -> Result<(), GameError> {
        if self.phase == MatchPhase::InProgress {
            Ok(())
        } else {
            Err(GameError::GameNotInProgress)
        }
    }

    fn ensure_current_owner(&self, pos: Hex) -> Result<(), GameError> {
        if !self.board.is_on_board(pos) {
            return Err(GameError::OffBoard(pos));
        }
        let piece = self.board.piece_at(pos).ok_or(GameError::EmptyOrigin(pos))?;
        let current = self.current_home().ok_or(GameError::GameNotInProgress)?;
        if piece.owner != current {
            return Err(GameError::NotYourPiece {
                pos,
                owner: piece.owner,
                current,
            });
        }
        Ok(())
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
