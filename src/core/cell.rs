//! # Cell e Dimensions — Coordenadas do Tabuleiro
//!
//! Uma [`Cell`] é a coordenada `(linha, coluna)` de uma casa do tabuleiro,
//! indexada a partir de zero. É um valor imutável, barato de copiar, usado
//! como chave em todos os conjuntos da [`KnowledgeBase`](super::KnowledgeBase).
//!
//! [`Dimensions`] guarda o tamanho do tabuleiro (`height × width`), fixo
//! durante toda a partida, e responde às perguntas geométricas:
//!
//! | Método | Resultado |
//! |--------|-----------|
//! | [`contains()`](Dimensions::contains) | a casa está dentro do tabuleiro? |
//! | [`cells()`](Dimensions::cells) | todas as casas, em ordem linha-a-linha |
//! | [`neighbors()`](Dimensions::neighbors) | vizinhança-8 recortada nas bordas |
//! | [`cell_count()`](Dimensions::cell_count) | `height × width` |
//!
//! ## Ordem
//!
//! `Cell` deriva `Ord` com a ordem dos campos (linha, depois coluna). Isso dá
//! iteração determinística nos `BTreeSet`s da KB — com a mesma seed, a mesma
//! partida é jogada.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coordenada `(row, col)` de uma casa do tabuleiro.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    /// Linha, de `0` a `height - 1`.
    pub row: usize,
    /// Coluna, de `0` a `width - 1`.
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// Formato `(linha, coluna)`, ex: `(2, 3)`.
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Tamanho do tabuleiro, fornecido uma única vez na construção do agente.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    pub height: usize,
    pub width: usize,
}

impl Dimensions {
    pub const fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }

    /// Número total de casas.
    pub fn cell_count(&self) -> usize {
        self.height * self.width
    }

    /// Verifica se a casa está dentro de `[0, height) × [0, width)`.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.height && cell.col < self.width
    }

    /// Todas as casas do tabuleiro em ordem linha-a-linha.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let width = self.width;
        (0..self.height).flat_map(move |row| (0..width).map(move |col| Cell::new(row, col)))
    }

    /// Vizinhança-8 de `cell`: casas a distância de Chebyshev 1, recortadas
    /// nas bordas, sem a própria casa.
    ///
    /// ```text
    /// - - - - -
    /// - n n n -
    /// - n c n -      c = cell, n = vizinhos
    /// - n n n -
    /// ```
    ///
    /// Uma casa de canto tem 3 vizinhos, uma de borda 5, uma interna 8.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> {
        let dims = *self;
        let rows = cell.row.saturating_sub(1)..=(cell.row + 1);
        rows.flat_map(move |row| {
            let cols = cell.col.saturating_sub(1)..=(cell.col + 1);
            cols.map(move |col| Cell::new(row, col))
        })
        .filter(move |n| *n != cell && dims.contains(*n))
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.height, self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors_interior_corner_edge() {
        let dims = Dimensions::new(3, 4);
        assert_eq!(dims.neighbors(Cell::new(1, 1)).count(), 8);
        assert_eq!(dims.neighbors(Cell::new(0, 0)).count(), 3);
        assert_eq!(dims.neighbors(Cell::new(2, 3)).count(), 3);
        assert_eq!(dims.neighbors(Cell::new(0, 2)).count(), 5);
    }

    #[test]
    fn test_neighbors_exclude_self_and_stay_in_bounds() {
        let dims = Dimensions::new(2, 2);
        let n: Vec<Cell> = dims.neighbors(Cell::new(1, 1)).collect();
        assert_eq!(n, vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(1, 0)]);
    }

    #[test]
    fn test_single_cell_board_has_no_neighbors() {
        let dims = Dimensions::new(1, 1);
        assert_eq!(dims.neighbors(Cell::new(0, 0)).count(), 0);
    }

    #[test]
    fn test_cells_row_major() {
        let dims = Dimensions::new(2, 3);
        let cells: Vec<Cell> = dims.cells().collect();
        assert_eq!(cells.len(), dims.cell_count());
        assert_eq!(cells[0], Cell::new(0, 0));
        assert_eq!(cells[3], Cell::new(1, 0));
        let mut sorted = cells.clone();
        sorted.sort();
        assert_eq!(cells, sorted);
    }
}
