//! Tipos de erro do tabuleiro, das sentenças e da configuração.
//!
//! No núcleo de inferência, ausência de resposta é `Option`. O único erro é
//! [`SentenceError`]: uma marcação que contradiz a sentença, sinal de que o
//! tabuleiro mandou contagens inconsistentes. A KB registra e descarta.
//! Os demais erros ficam nas bordas: montar um tabuleiro impossível ou ler
//! uma variável de ambiente mal formada.

use thiserror::Error;

use crate::core::{Cell, Dimensions};

/// Marcação que levaria `count` para fora de `0..=cells.len()`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SentenceError {
    #[error("{cell} marked as mine but the sentence has no mines left")]
    NoMinesLeft { cell: Cell },

    #[error("{cell} marked as safe but every cell of the sentence is a mine")]
    OnlyMinesLeft { cell: Cell },
}

/// Erros ao construir um [`Board`](crate::board::Board).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("board {dimensions} has no cells")]
    Empty { dimensions: Dimensions },

    #[error("too many mines - board {dimensions} can hold at most {max} mines, requested {requested}")]
    TooManyMines {
        dimensions: Dimensions,
        max: usize,
        requested: usize,
    },
}

/// Erros ao carregar a [`GameConfig`](crate::config::GameConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error(transparent)]
    Board(#[from] BoardError),
}
