//! # Módulo Inference — Dedução Lógica sobre Sentenças
//!
//! Este módulo contém o **motor de inferência** do agente, responsável por
//! tirar conclusões **certas** a partir das sentenças da KB.
//!
//! ## Regras Implementadas
//!
//! | Regra | Padrão | Resultado |
//! |-------|--------|-----------|
//! | **Direta** | `{a, b} = 0` / `{a, b} = 2` | todas seguras / todas minas |
//! | **Subconjunto** | `A ⊂ B` | `(B − A, B.count − A.count)` |
//!
//! ## Exemplo
//!
//! ```text
//! KB contém: {a, b} = 1, {a, b, c} = 1
//! Inferência deduz: c é segura
//! ```
//!
//! Veja [`InferenceEngine`] para detalhes.

/// Sub-módulo com as regras de inferência.
pub mod rules;

/// Re-export do motor de inferência para acesso via `crate::inference::InferenceEngine`.
pub use rules::{Conclusion, InferenceEngine, InferenceResult};
