//! # Módulo Core — Tipos Fundamentais do Agente
//!
//! Este módulo agrupa os **tipos fundamentais** do raciocínio do agente.
//! Tudo gira em torno deles:
//!
//! - [`Cell`] — coordenada `(linha, coluna)` de uma casa
//! - [`Dimensions`] — tamanho do tabuleiro e vizinhança-8
//! - [`Sentence`] — "exatamente N destas casas são minas"
//! - [`KnowledgeBase`] — sentenças + casas seguras, minas e jogadas feitas
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use crate::core::{Cell, Dimensions, KnowledgeBase};
//!
//! let mut kb = KnowledgeBase::new(Dimensions::new(8, 8));
//!
//! // O tabuleiro revelou (0, 0) com 0 minas vizinhas
//! kb.add_knowledge(Cell::new(0, 0), 0);
//!
//! // Os três vizinhos agora são seguros
//! assert_eq!(kb.safes().len(), 4);
//! ```

/// Sub-módulo com [`Cell`] e [`Dimensions`].
pub mod cell;

/// Sub-módulo com a implementação de [`Sentence`].
pub mod sentence;

/// Sub-módulo com a implementação de [`KnowledgeBase`] — conhecimento da partida.
pub mod knowledge_base;

// Re-exports para conveniência — permite usar `crate::core::Cell` diretamente.
pub use cell::{Cell, Dimensions};
pub use knowledge_base::{InferenceSummary, KnowledgeBase};
pub use sentence::Sentence;
