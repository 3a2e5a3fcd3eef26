//! # Regras de Inferência sobre Sentenças
//!
//! O [`InferenceEngine`] examina as sentenças da [KnowledgeBase] e devolve
//! conclusões **certas** — nunca probabilidades. Quem aplica as conclusões
//! é a própria KB (ver [`KnowledgeBase::resolve_fixed_point`]), que repete
//! o ciclo até não haver nada novo.
//!
//! ## Regra Direta
//!
//! Uma sentença sozinha já pode resolver suas casas:
//!
//! ```text
//! {a, b} = 2   ⊢  a, b são minas
//! {a, b} = 0   ⊢  a, b são seguras
//! ```
//!
//! ## Regra do Subconjunto
//!
//! Se as casas de A estão todas em B, a diferença carrega o resto das minas
//! de B:
//!
//! ```text
//! A: {a, b} = 1
//! B: {a, b, c} = 1
//! ─────────────────
//! B − A: {c} = 0   ⊢  c é segura
//! ```
//!
//! Quando a diferença não resolve nenhuma casa, ela ainda é uma sentença
//! nova e menor, que pode ser combinada nas próximas passadas.
//!
//! [KnowledgeBase]: crate::core::KnowledgeBase
//! [`KnowledgeBase::resolve_fixed_point`]: crate::core::KnowledgeBase::resolve_fixed_point

use std::collections::BTreeSet;

use crate::core::{Cell, KnowledgeBase, Sentence};

/// O que uma inferência concluiu.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Conclusion {
    /// Todas estas casas são minas.
    Mines(BTreeSet<Cell>),
    /// Todas estas casas são seguras.
    Safes(BTreeSet<Cell>),
    /// Uma sentença nova derivada por subconjunto.
    Sentence(Sentence),
}

/// Resultado de uma inferência — a conclusão e uma explicação legível.
///
/// A explicação vai para o log (`trace`) quando a KB aplica o resultado.
///
/// ```text
/// Subconjunto: {(0, 0), (1, 0)} = 1 ⊆ {(0, 0), (1, 0), (2, 0)} = 1 ⊢ {(2, 0)} = 0
/// ```
#[derive(Clone, Debug)]
pub struct InferenceResult {
    pub conclusion: Conclusion,
    pub explanation: String,
}

/// Motor de inferência — struct sem estado.
///
/// Recebe a KB por referência e devolve resultados; não muta nada. Isso
/// permite coletar todas as conclusões de uma varredura antes de aplicá-las
/// (worklist), sem clonar a lista de sentenças.
pub struct InferenceEngine;

impl InferenceEngine {
    /// Regra direta: uma conclusão por sentença toda-mina ou toda-segura.
    pub fn direct(kb: &KnowledgeBase) -> Vec<InferenceResult> {
        let mut results = Vec::new();
        for sentence in kb.sentences() {
            if let Some(mines) = sentence.known_mines() {
                results.push(InferenceResult {
                    conclusion: Conclusion::Mines(mines.clone()),
                    explanation: format!("Direta: {} ⊢ todas minas", sentence),
                });
            } else if let Some(safes) = sentence.known_safes() {
                results.push(InferenceResult {
                    conclusion: Conclusion::Safes(safes.clone()),
                    explanation: format!("Direta: {} ⊢ todas seguras", sentence),
                });
            }
        }
        results
    }

    /// Regra do subconjunto sobre todos os pares ordenados `(A, B)` com
    /// `A ⊂ B`.
    ///
    /// ## Algoritmo (O(n²) sobre as sentenças)
    ///
    /// ```text
    /// para cada par (A, B) com i ≠ j:
    ///   se A.cells ⊂ B.cells:
    ///     D = (B.cells − A.cells, B.count − A.count)
    ///     D toda-mina    → Mines
    ///     D toda-segura  → Safes
    ///     senão, se D ainda não está na KB → Sentence(D)
    /// ```
    pub fn subset(kb: &KnowledgeBase) -> Vec<InferenceResult> {
        let mut results = Vec::new();
        let sentences = kb.sentences();

        for i in 0..sentences.len() {
            for j in 0..sentences.len() {
                if i == j {
                    continue;
                }
                let subset = &sentences[i];
                let superset = &sentences[j];
                let Some(derived) = subset.difference_from(superset) else {
                    continue;
                };

                let explanation =
                    format!("Subconjunto: {} ⊆ {} ⊢ {}", subset, superset, derived);
                let conclusion = if let Some(mines) = derived.known_mines() {
                    Conclusion::Mines(mines.clone())
                } else if let Some(safes) = derived.known_safes() {
                    Conclusion::Safes(safes.clone())
                } else if !derived.is_empty() && !kb.contains_sentence(&derived) {
                    Conclusion::Sentence(derived)
                } else {
                    continue;
                };
                results.push(InferenceResult {
                    conclusion,
                    explanation,
                });
            }
        }

        results
    }
}
