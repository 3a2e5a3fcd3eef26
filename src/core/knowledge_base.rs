//! # KnowledgeBase — O Conhecimento do Agente
//!
//! A [`KnowledgeBase`] é o **coração** do agente — guarda tudo o que se sabe
//! sobre a partida e roda o laço de inferência até o ponto fixo.
//!
//! ## Armazenamento
//!
//! | Campo | Conteúdo |
//! |-------|----------|
//! | `moves_made` | casas já reveladas |
//! | `safes` | casas provadamente seguras |
//! | `mines` | casas provadamente minas |
//! | `sentences` | sentenças ainda não resolvidas, em ordem de inserção |
//!
//! Invariantes:
//! - `safes ∩ mines = ∅`
//! - nenhuma casa de uma sentença é conhecida no momento da inserção — assim
//!   que uma casa vira fato, ela sai de todas as sentenças.
//!
//! ## Ciclo de uma Jogada
//!
//! ```text
//! add_knowledge(cell, count)
//!   ├── moves_made += cell; mark_safe(cell)
//!   ├── nova sentença com os vizinhos desconhecidos
//!   ├── resolve_fixed_point()   regra direta até o ponto fixo
//!   └── subset_inference()      regra do subconjunto + ponto fixo, até estabilizar
//! ```
//!
//! Todos os conjuntos são `BTreeSet`, então a mesma sequência de jogadas
//! produz sempre o mesmo estado e os mesmos logs.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use crate::core::{Cell, Dimensions, KnowledgeBase};
//!
//! let mut kb = KnowledgeBase::new(Dimensions::new(3, 3));
//! kb.add_knowledge(Cell::new(2, 2), 0);
//! assert!(kb.safes().contains(&Cell::new(1, 1)));
//! ```

use std::collections::BTreeSet;

use super::cell::{Cell, Dimensions};
use super::sentence::Sentence;
use crate::error::SentenceError;
use crate::inference::{Conclusion, InferenceEngine, InferenceResult};

/// Base de conhecimento de uma partida.
///
/// Uma instância por partida, possuída pelo [`Game`](crate::game::Game) e
/// passada por referência ao [`MoveSelector`](crate::selector::MoveSelector).
#[derive(Clone, Debug)]
pub struct KnowledgeBase {
    dimensions: Dimensions,
    moves_made: BTreeSet<Cell>,
    safes: BTreeSet<Cell>,
    mines: BTreeSet<Cell>,
    sentences: Vec<Sentence>,
}

/// Fatos novos descobertos por uma chamada de inferência.
///
/// A casa revelada em [`add_knowledge()`](KnowledgeBase::add_knowledge) não
/// entra aqui — só o que foi **deduzido**.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InferenceSummary {
    pub safes: BTreeSet<Cell>,
    pub mines: BTreeSet<Cell>,
    pub sentences_added: usize,
}

impl InferenceSummary {
    /// Nenhuma dedução nova.
    pub fn is_empty(&self) -> bool {
        self.safes.is_empty() && self.mines.is_empty() && self.sentences_added == 0
    }

    pub fn merge(&mut self, other: InferenceSummary) {
        self.safes.extend(other.safes);
        self.mines.extend(other.mines);
        self.sentences_added += other.sentences_added;
    }
}

impl KnowledgeBase {
    /// Cria uma KB vazia para um tabuleiro `dimensions`.
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            moves_made: BTreeSet::new(),
            safes: BTreeSet::new(),
            mines: BTreeSet::new(),
            sentences: Vec::new(),
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn moves_made(&self) -> &BTreeSet<Cell> {
        &self.moves_made
    }

    pub fn safes(&self) -> &BTreeSet<Cell> {
        &self.safes
    }

    pub fn mines(&self) -> &BTreeSet<Cell> {
        &self.mines
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    /// A casa já é fato (segura ou mina)?
    pub fn is_known(&self, cell: Cell) -> bool {
        self.safes.contains(&cell) || self.mines.contains(&cell)
    }

    pub fn contains_sentence(&self, sentence: &Sentence) -> bool {
        self.sentences.contains(sentence)
    }

    /// Registra `cell` como mina e a remove de todas as sentenças.
    ///
    /// Primitiva: não dispara inferência. Retorna `true` se a mina é nova.
    /// Uma casa já segura não vira mina; sentenças que a marcação contradiz
    /// são descartadas com `warn!`.
    pub fn mark_mine(&mut self, cell: Cell) -> bool {
        if self.safes.contains(&cell) {
            tracing::warn!(cell = %cell, "KB: mina em casa já marcada como segura, ignorada");
            return false;
        }
        let is_new = self.mines.insert(cell);
        self.sentences
            .retain_mut(|sentence| Self::keep_consistent(sentence.mark_mine(cell)));
        if is_new {
            tracing::debug!(cell = %cell, "KB: mina marcada");
        }
        is_new
    }

    /// Registra `cell` como segura e a remove de todas as sentenças.
    ///
    /// Primitiva: não dispara inferência. Retorna `true` se a casa é nova.
    /// Mesmas regras de contradição de [`mark_mine()`](Self::mark_mine).
    pub fn mark_safe(&mut self, cell: Cell) -> bool {
        if self.mines.contains(&cell) {
            tracing::warn!(cell = %cell, "KB: segura em casa já marcada como mina, ignorada");
            return false;
        }
        let is_new = self.safes.insert(cell);
        self.sentences
            .retain_mut(|sentence| Self::keep_consistent(sentence.mark_safe(cell)));
        is_new
    }

    fn keep_consistent(marked: Result<bool, SentenceError>) -> bool {
        match marked {
            Ok(_) => true,
            Err(err) => {
                tracing::warn!(error = %err, "KB: sentença contraditória descartada");
                false
            }
        }
    }

    /// Adiciona uma sentença, descontando antes o que já se sabe.
    ///
    /// Casas seguras saem; minas conhecidas saem e descontam do `count`.
    /// Sentenças vazias ou já presentes são descartadas. Retorna `true` se a
    /// sentença entrou na KB.
    pub fn insert_sentence(&mut self, mut sentence: Sentence) -> bool {
        let known: Vec<Cell> = sentence
            .cells()
            .iter()
            .copied()
            .filter(|c| self.is_known(*c))
            .collect();
        for cell in known {
            let marked = if self.mines.contains(&cell) {
                sentence.mark_mine(cell)
            } else {
                sentence.mark_safe(cell)
            };
            if !Self::keep_consistent(marked) {
                return false;
            }
        }
        if sentence.is_empty() || self.contains_sentence(&sentence) {
            return false;
        }
        tracing::debug!(sentence = %sentence, "KB: sentença armazenada");
        self.sentences.push(sentence);
        true
    }

    /// Ponto de entrada de cada jogada: `cell` foi revelada e o tabuleiro
    /// informou `count` minas na vizinhança.
    ///
    /// ## Etapas
    ///
    /// 1. Registra a jogada e marca a casa como segura
    /// 2. Monta a sentença dos vizinhos: minas conhecidas descontam do
    ///    `count`, seguras conhecidas saem
    /// 3. Adiciona a sentença se sobrar alguma casa
    /// 4. Roda [`resolve_fixed_point()`](Self::resolve_fixed_point) e
    ///    [`subset_inference()`](Self::subset_inference)
    ///
    /// Se não sobrar nenhuma casa, o `count` ajustado tem que ser zero; caso
    /// contrário o tabuleiro mandou uma contagem inconsistente, o que é
    /// registrado com `warn!` e a sentença é descartada.
    pub fn add_knowledge(&mut self, cell: Cell, count: usize) -> InferenceSummary {
        self.moves_made.insert(cell);
        self.mark_safe(cell);

        let mut unknown = BTreeSet::new();
        let mut known_mine_neighbors = 0;
        for neighbor in self.dimensions.neighbors(cell) {
            if self.mines.contains(&neighbor) {
                known_mine_neighbors += 1;
            } else if !self.safes.contains(&neighbor) {
                unknown.insert(neighbor);
            }
        }

        match count.checked_sub(known_mine_neighbors) {
            Some(0) if unknown.is_empty() => {}
            Some(adjusted) if adjusted <= unknown.len() => {
                self.insert_sentence(Sentence::new(unknown, adjusted));
            }
            _ => {
                tracing::warn!(
                    cell = %cell,
                    count,
                    known_mine_neighbors,
                    unknown = unknown.len(),
                    "KB: contagem inconsistente com o conhecimento atual"
                );
            }
        }

        let mut summary = self.resolve_fixed_point();
        summary.merge(self.subset_inference());
        tracing::debug!(
            cell = %cell,
            count,
            new_safes = summary.safes.len(),
            new_mines = summary.mines.len(),
            sentences = self.sentences.len(),
            "KB: conhecimento adicionado"
        );
        summary
    }

    /// Aplica a regra direta até o ponto fixo.
    ///
    /// ```text
    /// loop:
    ///   remove sentenças vazias
    ///   worklist = conclusões diretas de todas as sentenças
    ///   worklist vazia → fim
    ///   aplica a worklist
    /// ```
    ///
    /// Termina porque cada conclusão esvazia a sentença que a gerou, então a
    /// soma das casas de todas as sentenças cai a cada volta. Chamar de novo
    /// sem fatos novos devolve um resumo vazio.
    pub fn resolve_fixed_point(&mut self) -> InferenceSummary {
        let mut summary = InferenceSummary::default();
        loop {
            self.sentences.retain(|s| !s.is_empty());
            let worklist = InferenceEngine::direct(self);
            if worklist.is_empty() {
                break;
            }
            for result in &worklist {
                self.apply(result, &mut summary);
            }
        }
        summary
    }

    /// Aplica a regra do subconjunto, intercalada com
    /// [`resolve_fixed_point()`](Self::resolve_fixed_point), até que uma
    /// passada não traga nada novo.
    ///
    /// Cada volta com mudança acrescenta um fato ou uma sentença inédita, e
    /// ambos são finitos, então o laço termina.
    pub fn subset_inference(&mut self) -> InferenceSummary {
        let mut summary = InferenceSummary::default();
        loop {
            let worklist = InferenceEngine::subset(self);
            let mut changed = false;
            for result in &worklist {
                changed |= self.apply(result, &mut summary);
            }
            if !changed {
                break;
            }
            summary.merge(self.resolve_fixed_point());
        }
        summary
    }

    /// Aplica um resultado de inferência. Retorna `true` se algo mudou.
    fn apply(&mut self, result: &InferenceResult, summary: &mut InferenceSummary) -> bool {
        tracing::trace!(explanation = %result.explanation, "KB: inferência");
        let mut changed = false;
        match &result.conclusion {
            Conclusion::Mines(cells) => {
                for &cell in cells {
                    if self.mark_mine(cell) {
                        summary.mines.insert(cell);
                        changed = true;
                    }
                }
            }
            Conclusion::Safes(cells) => {
                for &cell in cells {
                    if self.mark_safe(cell) {
                        summary.safes.insert(cell);
                        changed = true;
                    }
                }
            }
            Conclusion::Sentence(sentence) => {
                if self.insert_sentence(sentence.clone()) {
                    summary.sentences_added += 1;
                    changed = true;
                }
            }
        }
        changed
    }
}
