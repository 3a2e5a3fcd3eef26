//! # Board — O Tabuleiro Verdadeiro
//!
//! O [`Board`] é o colaborador externo do agente: sabe onde estão as minas e
//! responde às duas perguntas que o jogo faz a cada jogada.
//!
//! | Pergunta | Método |
//! |----------|--------|
//! | "esta casa é mina?" | [`is_mine()`](Board::is_mine) |
//! | "quantas minas em volta?" | [`adjacent_mine_count()`](Board::adjacent_mine_count) |
//!
//! O agente nunca lê o tabuleiro diretamente — só recebe as contagens pelo
//! [`Game`](crate::game::Game).
//!
//! ## Geração
//!
//! [`Board::generate`] escolhe exatamente `mine_count` casas de forma
//! uniforme com **amostragem sequencial**: percorrendo as casas em ordem, a
//! casa `i` vira mina com probabilidade
//!
//! ```text
//! minas que faltam escolher / casas que faltam percorrer
//! ```
//!
//! Uma passada só, sem sorteios repetidos, e reprodutível para a mesma seed.

use std::collections::BTreeSet;
use std::fmt;

use rand::Rng;

use crate::core::{Cell, Dimensions};
use crate::error::BoardError;

/// Disposição das minas de uma partida. Imutável depois de criada.
#[derive(Clone, Debug)]
pub struct Board {
    dimensions: Dimensions,
    /// `true` = mina, em ordem linha-a-linha.
    grid: Vec<bool>,
    mines: BTreeSet<Cell>,
}

impl Board {
    /// Gera um tabuleiro `dimensions` com `mine_count` minas espalhadas
    /// uniformemente.
    ///
    /// # Erros
    ///
    /// - [`BoardError::Empty`] se o tabuleiro não tem casas
    /// - [`BoardError::TooManyMines`] se `mine_count` passa do número de casas
    pub fn generate<R: Rng + ?Sized>(
        dimensions: Dimensions,
        mine_count: usize,
        rng: &mut R,
    ) -> Result<Self, BoardError> {
        let ncells = dimensions.cell_count();
        if ncells == 0 {
            return Err(BoardError::Empty { dimensions });
        }
        if mine_count > ncells {
            return Err(BoardError::TooManyMines {
                dimensions,
                max: ncells,
                requested: mine_count,
            });
        }

        let mut mines = BTreeSet::new();
        for (idx, cell) in dimensions.cells().enumerate() {
            let left_to_pick = (mine_count - mines.len()) as f64;
            let left_to_pick_from = (ncells - idx) as f64;
            if rng.gen_bool(left_to_pick / left_to_pick_from) {
                mines.insert(cell);
            }
        }

        tracing::debug!(dimensions = %dimensions, mines = mines.len(), "Board: tabuleiro gerado");
        Ok(Self::from_mines(dimensions, mines))
    }

    /// Monta um tabuleiro com minas em posições fixas.
    ///
    /// Casas fora de `dimensions` são ignoradas.
    pub fn from_mines(dimensions: Dimensions, mines: impl IntoIterator<Item = Cell>) -> Self {
        let mines: BTreeSet<Cell> = mines
            .into_iter()
            .filter(|c| dimensions.contains(*c))
            .collect();
        let grid = dimensions.cells().map(|c| mines.contains(&c)).collect();
        Self {
            dimensions,
            grid,
            mines,
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn mine_count(&self) -> usize {
        self.mines.len()
    }

    pub fn mines(&self) -> &BTreeSet<Cell> {
        &self.mines
    }

    /// Casas fora do tabuleiro não são minas.
    pub fn is_mine(&self, cell: Cell) -> bool {
        self.dimensions.contains(cell) && self.grid[cell.row * self.dimensions.width + cell.col]
    }

    /// Número de minas na vizinhança-8 de `cell`, recortada nas bordas.
    pub fn adjacent_mine_count(&self, cell: Cell) -> usize {
        self.dimensions
            .neighbors(cell)
            .filter(|n| self.is_mine(*n))
            .count()
    }

    /// Vitória: as minas identificadas são exatamente as minas do tabuleiro.
    pub fn won(&self, mines_found: &BTreeSet<Cell>) -> bool {
        *mines_found == self.mines
    }
}

/// Grade com bordas, `X` para minas:
///
/// ```text
/// -------
/// |X| | |
/// -------
/// ```
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = format!("{}-", "--".repeat(self.dimensions.width));
        for row in 0..self.dimensions.height {
            writeln!(f, "{}", rule)?;
            for col in 0..self.dimensions.width {
                let mark = if self.is_mine(Cell::new(row, col)) { "|X" } else { "| " };
                f.write_str(mark)?;
            }
            writeln!(f, "|")?;
        }
        write!(f, "{}", rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn validate_board(board: &Board, nrows: usize, ncols: usize, nmines: usize) {
        assert_eq!(board.dimensions(), Dimensions::new(nrows, ncols));
        let seen = board.dimensions().cells().filter(|c| board.is_mine(*c)).count();
        assert_eq!(nmines, seen);
        assert_eq!(nmines, board.mine_count());
    }

    #[test]
    fn test_generate_small_board() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10 {
            let board = Board::generate(Dimensions::new(3, 3), 3, &mut rng).unwrap();
            validate_board(&board, 3, 3, 3);
        }
    }

    #[test]
    fn test_generate_large_board() {
        let mut rng = StdRng::seed_from_u64(40);
        let board = Board::generate(Dimensions::new(40, 40), 40, &mut rng).unwrap();
        validate_board(&board, 40, 40, 40);
    }

    #[test]
    fn test_generate_empty_and_full() {
        let mut rng = StdRng::seed_from_u64(1);
        let board = Board::generate(Dimensions::new(3, 3), 0, &mut rng).unwrap();
        validate_board(&board, 3, 3, 0);
        let board = Board::generate(Dimensions::new(4, 3), 12, &mut rng).unwrap();
        validate_board(&board, 4, 3, 12);
    }

    #[test]
    fn test_generate_rejects_overfull_and_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = Board::generate(Dimensions::new(4, 3), 13, &mut rng).unwrap_err();
        assert_eq!(
            err,
            BoardError::TooManyMines {
                dimensions: Dimensions::new(4, 3),
                max: 12,
                requested: 13
            }
        );
        assert!(matches!(
            Board::generate(Dimensions::new(0, 5), 0, &mut rng),
            Err(BoardError::Empty { .. })
        ));
    }

    #[test]
    fn test_same_seed_same_board() {
        let a = Board::generate(Dimensions::new(8, 8), 10, &mut StdRng::seed_from_u64(99)).unwrap();
        let b = Board::generate(Dimensions::new(8, 8), 10, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a.mines(), b.mines());
    }

    #[test]
    fn test_adjacent_mine_count() {
        // x - -
        // x x -
        // - - -
        let board = Board::from_mines(
            Dimensions::new(3, 3),
            [Cell::new(0, 0), Cell::new(1, 0), Cell::new(1, 1)],
        );
        assert_eq!(board.adjacent_mine_count(Cell::new(0, 1)), 3);
        assert_eq!(board.adjacent_mine_count(Cell::new(1, 1)), 2);
        assert_eq!(board.adjacent_mine_count(Cell::new(2, 2)), 1);
        assert_eq!(board.adjacent_mine_count(Cell::new(0, 2)), 1);
    }

    #[test]
    fn test_won_and_display() {
        let board = Board::from_mines(Dimensions::new(1, 2), [Cell::new(0, 0)]);
        assert!(board.won(&[Cell::new(0, 0)].into_iter().collect()));
        assert!(!board.won(&BTreeSet::new()));
        assert_eq!(board.to_string(), "-----\n|X| |\n-----");
    }
}
