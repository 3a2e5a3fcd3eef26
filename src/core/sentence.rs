//! # Sentence — Afirmação Lógica sobre o Tabuleiro
//!
//! Uma [`Sentence`] afirma: **"exatamente `count` destas casas são minas"**.
//!
//! Cada casa revelada pelo tabuleiro gera uma sentença sobre seus vizinhos
//! ainda desconhecidos. Conforme o agente descobre fatos, as sentenças
//! **encolhem** — casas conhecidas saem do conjunto, e minas conhecidas
//! descontam do `count`.
//!
//! ## Casos Certos
//!
//! | Situação | Conclusão |
//! |----------|-----------|
//! | `count == 0` | todas as casas são seguras |
//! | `count == cells.len()` | todas as casas são minas |
//! | `cells` vazio | sentença sem informação, pode ser removida |
//!
//! ## Exemplo
//!
//! ```text
//! {(0, 0), (0, 1), (1, 0)} = 1
//!   mark_safe((0, 1))  →  {(0, 0), (1, 0)} = 1
//!   mark_mine((0, 0))  →  {(1, 0)} = 0        → (1, 0) é segura
//! ```
//!
//! `mark_mine`/`mark_safe` recusam marcações que violariam
//! `count <= cells.len()` (mina numa sentença com `count == 0`, segura numa
//! sentença só de minas) e devolvem [`SentenceError`] sem alterar nada.

use std::collections::BTreeSet;
use std::fmt;

use super::cell::Cell;
use crate::error::SentenceError;

/// "Exatamente `count` das `cells` são minas."
///
/// Invariante: `count <= cells.len()`. Duas sentenças são iguais quando têm
/// o mesmo conjunto de casas e o mesmo `count`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sentence {
    cells: BTreeSet<Cell>,
    count: usize,
}

impl Sentence {
    pub fn new(cells: impl IntoIterator<Item = Cell>, count: usize) -> Self {
        let cells: BTreeSet<Cell> = cells.into_iter().collect();
        debug_assert!(
            count <= cells.len(),
            "sentence claims {} mines among {} cells",
            count,
            cells.len()
        );
        Self { cells, count }
    }

    pub fn cells(&self) -> &BTreeSet<Cell> {
        &self.cells
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Sentença sem casas — não carrega informação.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Retorna as casas se **todas** forem minas (`count == len`).
    ///
    /// Sentenças vazias retornam `None`: "zero de zero" não ensina nada.
    pub fn known_mines(&self) -> Option<&BTreeSet<Cell>> {
        if !self.cells.is_empty() && self.count == self.cells.len() {
            Some(&self.cells)
        } else {
            None
        }
    }

    /// Retorna as casas se **todas** forem seguras (`count == 0`).
    pub fn known_safes(&self) -> Option<&BTreeSet<Cell>> {
        if !self.cells.is_empty() && self.count == 0 {
            Some(&self.cells)
        } else {
            None
        }
    }

    /// Remove uma mina conhecida e desconta do `count`.
    ///
    /// Retorna `Ok(true)` se a casa fazia parte da sentença. Se o `count` já
    /// é zero a marcação contradiz a sentença, que fica intacta.
    pub fn mark_mine(&mut self, cell: Cell) -> Result<bool, SentenceError> {
        if !self.cells.contains(&cell) {
            return Ok(false);
        }
        let count = self
            .count
            .checked_sub(1)
            .ok_or(SentenceError::NoMinesLeft { cell })?;
        self.cells.remove(&cell);
        self.count = count;
        Ok(true)
    }

    /// Remove uma casa segura. O `count` não muda.
    ///
    /// Se todas as casas são minas, a casa não pode ser segura.
    pub fn mark_safe(&mut self, cell: Cell) -> Result<bool, SentenceError> {
        if !self.cells.contains(&cell) {
            return Ok(false);
        }
        if self.count >= self.cells.len() {
            return Err(SentenceError::OnlyMinesLeft { cell });
        }
        Ok(self.cells.remove(&cell))
    }

    /// `self.cells ⊆ other.cells`?
    pub fn is_subset(&self, other: &Sentence) -> bool {
        self.cells.is_subset(&other.cells)
    }

    /// Regra do subconjunto: se `self ⊆ superset`, as casas que sobram em
    /// `superset` têm `superset.count - self.count` minas.
    ///
    /// ```text
    /// A = {a, b} = 1
    /// B = {a, b, c} = 1
    /// B − A = {c} = 0   → c é segura
    /// ```
    ///
    /// Retorna `None` quando `self` não é subconjunto, quando os conjuntos
    /// são iguais (diferença vazia), ou quando os counts são inconsistentes.
    pub fn difference_from(&self, superset: &Sentence) -> Option<Sentence> {
        if self.cells.len() >= superset.cells.len() || !self.is_subset(superset) {
            return None;
        }
        let count = superset.count.checked_sub(self.count)?;
        let cells: BTreeSet<Cell> = superset.cells.difference(&self.cells).copied().collect();
        if count > cells.len() {
            return None;
        }
        Some(Sentence { cells, count })
    }
}

/// Formato `{(0, 1), (1, 0)} = 1`.
impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.cells.iter().map(|c| c.to_string()).collect();
        write!(f, "{{{}}} = {}", parts.join(", "), self.count)
    }
}
