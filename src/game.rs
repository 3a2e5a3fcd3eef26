//! # Game — O Laço da Partida
//!
//! O [`Game`] conduz uma partida completa, ligando o [`Board`] (a verdade)
//! ao agente ([`KnowledgeBase`] + [`MoveSelector`]).
//!
//! ## O Ciclo de uma Jogada
//!
//! ```text
//! play_turn()
//!   │
//!   ├── 1. Todas as casas seguras reveladas? → Won
//!   │
//!   ├── 2. MoveSelector::next_move()
//!   │   ├── Safe(cell)    casa provadamente segura
//!   │   ├── Random(cell)  sorteio entre casas não descartadas
//!   │   └── None          nada a jogar → Stuck
//!   │
//!   ├── 3. A casa é mina? → Lost (só acontece em jogada aleatória)
//!   │
//!   └── 4. kb.add_knowledge(cell, board.adjacent_mine_count(cell))
//! ```
//!
//! ## Bateria de Partidas
//!
//! [`play_batch()`] joga `config.games` partidas independentes — em paralelo
//! com rayon quando `config.parallel` — e agrega tudo num [`BatchReport`].
//! A partida `i` usa a seed `config.seed + i`, então o relatório é o mesmo
//! com ou sem paralelismo.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::board::Board;
use crate::config::GameConfig;
use crate::core::{Cell, InferenceSummary, KnowledgeBase};
use crate::error::BoardError;
use crate::selector::{Move, MoveSelector};

/// Como a partida terminou.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Todas as casas seguras foram reveladas.
    Won,
    /// Uma jogada aleatória caiu numa mina.
    Lost { cell: Cell },
    /// Nenhuma jogada possível, mas ainda há casas seguras escondidas.
    /// Só acontece se o conhecimento ficou inconsistente com o tabuleiro.
    Stuck,
}

/// Resultado de uma chamada a [`Game::play_turn()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// A casa foi revelada e a KB foi atualizada.
    Probed {
        mv: Move,
        count: usize,
        summary: InferenceSummary,
    },
    /// A jogada caiu numa mina.
    Exploded { mv: Move },
    /// A partida já acabou.
    Finished(GameResult),
}

/// Sumário de uma partida, serializado no relatório.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameReport {
    pub seed: u64,
    pub result: GameResult,
    pub turns: usize,
    pub safe_moves: usize,
    pub random_moves: usize,
    /// Minas que o agente provou sem revelar.
    pub mines_identified: usize,
    /// As minas provadas são exatamente as do tabuleiro?
    pub all_mines_identified: bool,
}

/// Uma partida: tabuleiro, conhecimento do agente e gerador aleatório.
pub struct Game {
    board: Board,
    kb: KnowledgeBase,
    rng: StdRng,
    seed: u64,
    safe_moves: usize,
    random_moves: usize,
    result: Option<GameResult>,
}

impl Game {
    /// Gera o tabuleiro a partir de `seed` e prepara uma KB vazia.
    ///
    /// O mesmo gerador sorteia as minas e, depois, as jogadas aleatórias.
    pub fn new(config: &GameConfig, seed: u64) -> Result<Self, BoardError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let board = Board::generate(config.dimensions(), config.mines, &mut rng)?;
        Ok(Self::from_parts(board, rng, seed))
    }

    /// Partida sobre um tabuleiro já montado.
    pub fn with_board(board: Board, seed: u64) -> Self {
        Self::from_parts(board, StdRng::seed_from_u64(seed), seed)
    }

    fn from_parts(board: Board, rng: StdRng, seed: u64) -> Self {
        let kb = KnowledgeBase::new(board.dimensions());
        Self {
            board,
            kb,
            rng,
            seed,
            safe_moves: 0,
            random_moves: 0,
            result: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.kb
    }

    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    /// Joga uma rodada. Depois do fim, só devolve [`TurnOutcome::Finished`].
    pub fn play_turn(&mut self) -> TurnOutcome {
        if let Some(result) = self.result {
            return TurnOutcome::Finished(result);
        }

        let safe_cells = self.board.dimensions().cell_count() - self.board.mine_count();
        if self.kb.moves_made().len() >= safe_cells {
            return self.finish(GameResult::Won);
        }

        let Some(mv) = MoveSelector::next_move(&self.kb, &mut self.rng) else {
            return self.finish(GameResult::Stuck);
        };
        match mv {
            Move::Safe(_) => self.safe_moves += 1,
            Move::Random(_) => self.random_moves += 1,
        }

        let cell = mv.cell();
        if self.board.is_mine(cell) {
            tracing::debug!(seed = self.seed, cell = %cell, "Game: mina atingida");
            self.result = Some(GameResult::Lost { cell });
            return TurnOutcome::Exploded { mv };
        }

        let count = self.board.adjacent_mine_count(cell);
        let summary = self.kb.add_knowledge(cell, count);
        tracing::trace!(seed = self.seed, ?mv, count, "Game: casa revelada");
        TurnOutcome::Probed { mv, count, summary }
    }

    fn finish(&mut self, result: GameResult) -> TurnOutcome {
        self.result = Some(result);
        TurnOutcome::Finished(result)
    }

    /// Joga até o fim e devolve o sumário.
    ///
    /// Cada rodada revela uma casa nova ou encerra a partida, então o laço
    /// roda no máximo `height × width + 1` vezes.
    pub fn play(&mut self) -> GameReport {
        loop {
            if let Some(report) = self.report() {
                return report;
            }
            self.play_turn();
        }
    }

    /// Sumário da partida, ou `None` enquanto ela não terminou.
    pub fn report(&self) -> Option<GameReport> {
        let result = self.result?;
        Some(GameReport {
            seed: self.seed,
            result,
            turns: self.safe_moves + self.random_moves,
            safe_moves: self.safe_moves,
            random_moves: self.random_moves,
            mines_identified: self.kb.mines().len(),
            all_mines_identified: self.board.won(self.kb.mines()),
        })
    }
}

/// Relatório de uma bateria de partidas.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchReport {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub config: GameConfig,
    pub wins: usize,
    pub losses: usize,
    pub stuck: usize,
    pub games: Vec<GameReport>,
}

impl BatchReport {
    /// Fração de vitórias (0.0 a 1.0). Bateria vazia devolve 0.0.
    pub fn win_rate(&self) -> f64 {
        if self.games.is_empty() {
            0.0
        } else {
            self.wins as f64 / self.games.len() as f64
        }
    }
}

/// Joga `config.games` partidas e agrega os resultados.
///
/// # Erros
///
/// Propaga [`BoardError`] se a configuração descreve um tabuleiro impossível.
pub fn play_batch(config: &GameConfig) -> Result<BatchReport, BoardError> {
    let started_at = Utc::now();
    let play_one = |i: usize| -> Result<GameReport, BoardError> {
        let seed = config.seed.wrapping_add(i as u64);
        let mut game = Game::new(config, seed)?;
        let report = game.play();
        tracing::debug!(seed, result = ?report.result, turns = report.turns, "Game: partida encerrada");
        Ok(report)
    };

    let games: Vec<GameReport> = if config.parallel {
        (0..config.games)
            .into_par_iter()
            .map(play_one)
            .collect::<Result<_, _>>()?
    } else {
        (0..config.games).map(play_one).collect::<Result<_, _>>()?
    };

    let count = |pred: fn(&GameResult) -> bool| games.iter().filter(|g| pred(&g.result)).count();
    let wins = count(|r| matches!(r, GameResult::Won));
    let losses = count(|r| matches!(r, GameResult::Lost { .. }));
    let stuck = count(|r| matches!(r, GameResult::Stuck));

    Ok(BatchReport {
        id: Uuid::new_v4(),
        started_at,
        config: config.clone(),
        wins,
        losses,
        stuck,
        games,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Dimensions;

    #[test]
    fn test_zero_mine_board_is_swept_with_safe_moves() {
        let board = Board::from_mines(Dimensions::new(8, 8), Vec::new());
        let mut game = Game::with_board(board, 1);
        let report = game.play();

        assert_eq!(report.result, GameResult::Won);
        // Só a primeira jogada é sorteada; o resto vem de deduções
        assert_eq!(report.random_moves, 1);
        assert_eq!(report.safe_moves, 63);
        assert_eq!(game.knowledge().safes().len(), 64);
        assert!(game.knowledge().mines().is_empty());
    }

    #[test]
    fn test_single_mine_3x3_identified_without_probing() {
        let mine = Cell::new(0, 0);
        let board = Board::from_mines(Dimensions::new(3, 3), [mine]);
        let mut game = Game::with_board(board, 0);

        // Abre em (2, 2) à mão, como o primeiro clique do jogador
        game.kb.add_knowledge(Cell::new(2, 2), 0);
        let report = game.play();

        assert_eq!(report.result, GameResult::Won);
        assert_eq!(report.random_moves, 0);
        assert!(report.all_mines_identified);
        assert!(!game.knowledge().moves_made().contains(&mine));
    }

    #[test]
    fn test_full_mine_board_is_won_immediately() {
        let dims = Dimensions::new(2, 2);
        let board = Board::from_mines(dims, dims.cells());
        let mut game = Game::with_board(board, 3);
        assert_eq!(game.play_turn(), TurnOutcome::Finished(GameResult::Won));
        assert_eq!(game.report().map(|r| r.turns), Some(0));
    }

    #[test]
    fn test_finished_game_stays_finished() {
        let board = Board::from_mines(Dimensions::new(1, 1), Vec::new());
        let mut game = Game::with_board(board, 3);
        // Partida em andamento não tem sumário
        assert!(game.report().is_none());
        assert!(matches!(game.play_turn(), TurnOutcome::Probed { .. }));
        assert!(game.report().is_none());
        assert_eq!(game.play_turn(), TurnOutcome::Finished(GameResult::Won));
        assert_eq!(game.play_turn(), TurnOutcome::Finished(GameResult::Won));
        assert_eq!(game.report().map(|r| r.result), Some(GameResult::Won));
    }

    /// Deduções nunca levam a uma mina; só sorteios podem perder
    #[test]
    fn test_only_random_moves_explode() {
        let config = GameConfig {
            height: 6,
            width: 6,
            mines: 8,
            ..GameConfig::default()
        };
        for seed in 0..50 {
            let mut game = Game::new(&config, seed).unwrap();
            loop {
                match game.play_turn() {
                    TurnOutcome::Probed { .. } => {}
                    TurnOutcome::Exploded { mv } => {
                        assert!(matches!(mv, Move::Random(_)));
                        assert!(game.board().is_mine(mv.cell()));
                        break;
                    }
                    TurnOutcome::Finished(result) => {
                        assert_ne!(result, GameResult::Stuck);
                        break;
                    }
                }
            }
            assert!(game.knowledge().safes().is_disjoint(game.knowledge().mines()));
        }
    }

    #[test]
    fn test_batch_is_reproducible_with_and_without_rayon() {
        let config = GameConfig {
            games: 20,
            seed: 1234,
            report_path: None,
            ..GameConfig::default()
        };
        let parallel = play_batch(&GameConfig {
            parallel: true,
            ..config.clone()
        })
        .unwrap();
        let sequential = play_batch(&GameConfig {
            parallel: false,
            ..config
        })
        .unwrap();

        assert_eq!(parallel.games, sequential.games);
        assert_eq!(parallel.wins + parallel.losses + parallel.stuck, 20);
        assert_eq!(parallel.stuck, 0);
        assert!((0.0..=1.0).contains(&parallel.win_rate()));
    }

    #[test]
    fn test_batch_rejects_impossible_board() {
        let config = GameConfig {
            height: 2,
            width: 2,
            mines: 9,
            ..GameConfig::default()
        };
        assert!(play_batch(&config).is_err());
    }
}
