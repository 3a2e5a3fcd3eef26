//! # MoveSelector — Escolha da Próxima Jogada
//!
//! Dado o estado da [`KnowledgeBase`], escolhe qual casa revelar:
//!
//! 1. **Jogada segura** — uma casa provadamente segura ainda não revelada
//! 2. **Jogada aleatória** — se não há nenhuma, sorteio uniforme entre as
//!    casas não reveladas que não são minas conhecidas
//!
//! O seletor só lê a KB; quem registra a jogada é o
//! [`Game`](crate::game::Game), via `add_knowledge`.
//!
//! ## Sorteio Limitado
//!
//! O sorteio faz no máximo `height × width` tentativas. Se todas caírem em
//! casas proibidas (tabuleiro quase cheio), cai para uma escolha uniforme
//! entre os candidatos restantes, ou `None` se não sobrou nenhum. Nunca
//! entra em laço infinito.

use rand::seq::IteratorRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::{Cell, KnowledgeBase};

/// Jogada escolhida pelo seletor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    /// Casa provadamente segura.
    Safe(Cell),
    /// Casa sorteada — pode ser mina.
    Random(Cell),
}

impl Move {
    pub fn cell(&self) -> Cell {
        match *self {
            Move::Safe(cell) | Move::Random(cell) => cell,
        }
    }
}

/// Seletor de jogadas — struct sem estado.
pub struct MoveSelector;

impl MoveSelector {
    /// Uma casa de `safes − moves_made`, a menor em ordem linha-a-linha.
    ///
    /// `None` quando nenhuma jogada segura é conhecida.
    pub fn safe_move(kb: &KnowledgeBase) -> Option<Cell> {
        kb.safes().difference(kb.moves_made()).next().copied()
    }

    /// Casa uniformemente sorteada fora de `moves_made ∪ mines`.
    ///
    /// `None` quando todas as casas já foram reveladas ou são minas
    /// conhecidas.
    pub fn random_move<R: Rng + ?Sized>(kb: &KnowledgeBase, rng: &mut R) -> Option<Cell> {
        let dims = kb.dimensions();
        let is_candidate =
            |cell: &Cell| !kb.moves_made().contains(cell) && !kb.mines().contains(cell);

        for _ in 0..dims.cell_count() {
            let cell = Cell::new(rng.gen_range(0..dims.height), rng.gen_range(0..dims.width));
            if is_candidate(&cell) {
                return Some(cell);
            }
        }

        dims.cells().filter(is_candidate).choose(rng)
    }

    /// Segura primeiro, aleatória depois. `None` = nenhuma jogada possível.
    pub fn next_move<R: Rng + ?Sized>(kb: &KnowledgeBase, rng: &mut R) -> Option<Move> {
        if let Some(cell) = Self::safe_move(kb) {
            return Some(Move::Safe(cell));
        }
        Self::random_move(kb, rng).map(Move::Random)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Dimensions;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_safe_move_skips_played_cells() {
        let mut kb = KnowledgeBase::new(Dimensions::new(3, 3));
        assert_eq!(MoveSelector::safe_move(&kb), None);

        kb.add_knowledge(Cell::new(0, 0), 0);
        let first = MoveSelector::safe_move(&kb).unwrap();
        assert!(!kb.moves_made().contains(&first));
        assert_eq!(first, Cell::new(0, 1));
    }

    #[test]
    fn test_safe_move_never_returns_played_cell_during_sweep() {
        let mut kb = KnowledgeBase::new(Dimensions::new(4, 4));
        kb.add_knowledge(Cell::new(0, 0), 0);
        while let Some(cell) = MoveSelector::safe_move(&kb) {
            assert!(!kb.moves_made().contains(&cell));
            kb.add_knowledge(cell, 0);
        }
        assert_eq!(kb.moves_made().len(), 16);
    }

    #[test]
    fn test_random_move_avoids_played_and_mines() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut kb = KnowledgeBase::new(Dimensions::new(2, 2));
        kb.mark_mine(Cell::new(0, 0));
        kb.add_knowledge(Cell::new(1, 1), 1);
        for _ in 0..50 {
            let cell = MoveSelector::random_move(&kb, &mut rng).unwrap();
            assert!(cell == Cell::new(0, 1) || cell == Cell::new(1, 0));
        }
    }

    /// Um único candidato num tabuleiro grande: cai no fallback exaustivo
    #[test]
    fn test_random_move_finds_last_candidate() {
        let mut rng = StdRng::seed_from_u64(11);
        let dims = Dimensions::new(10, 10);
        let mut kb = KnowledgeBase::new(dims);
        for cell in dims.cells().filter(|c| *c != Cell::new(7, 3)) {
            kb.mark_mine(cell);
        }
        for _ in 0..10 {
            assert_eq!(MoveSelector::random_move(&kb, &mut rng), Some(Cell::new(7, 3)));
        }
    }

    #[test]
    fn test_random_move_exhausted_board() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut kb = KnowledgeBase::new(Dimensions::new(2, 2));
        kb.mark_mine(Cell::new(0, 0));
        kb.mark_mine(Cell::new(0, 1));
        kb.add_knowledge(Cell::new(1, 0), 2);
        kb.add_knowledge(Cell::new(1, 1), 2);
        assert_eq!(MoveSelector::random_move(&kb, &mut rng), None);
        assert_eq!(MoveSelector::next_move(&kb, &mut rng), None);
    }

    #[test]
    fn test_next_move_prefers_safe() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut kb = KnowledgeBase::new(Dimensions::new(3, 3));
        assert!(matches!(
            MoveSelector::next_move(&kb, &mut rng),
            Some(Move::Random(_))
        ));
        kb.add_knowledge(Cell::new(1, 1), 0);
        assert_eq!(
            MoveSelector::next_move(&kb, &mut rng),
            Some(Move::Safe(Cell::new(0, 0)))
        );
    }

    /// O seletor só lê a KB
    #[test]
    fn test_random_move_does_not_mutate() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut kb = KnowledgeBase::new(Dimensions::new(3, 3));
        kb.add_knowledge(Cell::new(0, 0), 1);
        let before = (kb.moves_made().clone(), kb.safes().clone(), kb.mines().clone());
        MoveSelector::random_move(&kb, &mut rng);
        assert_eq!(before, (kb.moves_made().clone(), kb.safes().clone(), kb.mines().clone()));
    }
}
