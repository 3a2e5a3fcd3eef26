#![allow(dead_code)]
#![allow(rustdoc::broken_intra_doc_links)]
//! # Minesweeper AI — Agente Lógico de Campo Minado
//!
//! **Ponto de entrada principal** do agente.
//!
//! O agente joga Campo Minado por **dedução lógica**: cada casa revelada
//! vira uma sentença ("exatamente N destes vizinhos são minas"), e a base de
//! conhecimento combina as sentenças até descobrir casas seguras e minas com
//! certeza. Só quando nenhuma jogada é certa o agente sorteia.
//!
//! ## Fluxo de Execução
//!
//! ```text
//! main()
//!   ├── Configura tracing/logging
//!   ├── Carrega GameConfig das variáveis de ambiente
//!   ├── play_batch() — N partidas, cada uma com sua KB
//!   │   └── Game::play()
//!   │       ├── MoveSelector::next_move()
//!   │       └── KnowledgeBase::add_knowledge()
//!   ├── Loga o sumário (vitórias, derrotas)
//!   └── Salva o relatório JSON (opcional)
//! ```
//!
//! ## Exemplo de Uso
//!
//! ```bash
//! # 100 partidas 8x8 com 8 minas
//! cargo run
//!
//! # Tabuleiro expert, logs detalhados
//! RUST_LOG=debug MINESWEEPER_HEIGHT=16 MINESWEEPER_WIDTH=30 MINESWEEPER_MINES=99 cargo run
//! ```

/// Módulo `core` — tipos fundamentais: Cell, Sentence, KnowledgeBase.
mod core;

/// Módulo `inference` — regras de dedução (direta e subconjunto).
mod inference;

/// Módulo `selector` — escolha da próxima jogada.
mod selector;

/// Módulo `board` — tabuleiro com as minas verdadeiras.
mod board;

/// Módulo `game` — laço da partida e bateria de partidas.
mod game;

/// Módulo `config` — configuração via variáveis de ambiente.
mod config;

/// Módulo `error` — erros de tabuleiro e configuração.
mod error;

/// Módulo `persistence` — relatório JSON em disco.
mod persistence;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::GameConfig;

fn main() -> Result<()> {
    // Configura o sistema de logging/tracing.
    // Aceita a variável de ambiente RUST_LOG para configurar o nível.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = GameConfig::from_env().context("Configuração inválida")?;
    tracing::info!(
        board = %config.dimensions(),
        mines = config.mines,
        games = config.games,
        seed = config.seed,
        parallel = config.parallel,
        "💣 Minesweeper AI — Starting..."
    );

    let report = game::play_batch(&config).context("Falha ao jogar as partidas")?;

    let safe_moves: usize = report.games.iter().map(|g| g.safe_moves).sum();
    let random_moves: usize = report.games.iter().map(|g| g.random_moves).sum();
    tracing::info!(
        wins = report.wins,
        losses = report.losses,
        stuck = report.stuck,
        win_rate = %format!("{:.1}%", report.win_rate() * 100.0),
        safe_moves,
        random_moves,
        "✅ Bateria concluída"
    );
    if report.stuck > 0 {
        tracing::warn!(stuck = report.stuck, "Partidas sem jogada possível — conhecimento inconsistente");
    }

    if let Some(path) = &config.report_path {
        persistence::save_report(&report, path)?;
    }

    Ok(())
}
