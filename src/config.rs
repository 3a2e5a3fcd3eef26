//! # Configuração — Tamanho do Tabuleiro, Partidas e Relatório
//!
//! A [`GameConfig`] começa com os valores clássicos (8 × 8, 8 minas) e pode
//! ser ajustada por variáveis de ambiente, no mesmo espírito do `RUST_LOG`:
//!
//! | Variável | Campo | Padrão |
//! |----------|-------|--------|
//! | `MINESWEEPER_HEIGHT` | `height` | 8 |
//! | `MINESWEEPER_WIDTH` | `width` | 8 |
//! | `MINESWEEPER_MINES` | `mines` | 8 |
//! | `MINESWEEPER_GAMES` | `games` | 100 |
//! | `MINESWEEPER_SEED` | `seed` | 0 |
//! | `MINESWEEPER_PARALLEL` | `parallel` | `true` |
//! | `MINESWEEPER_REPORT` | `report_path` | `data/report.json` |
//!
//! ```bash
//! MINESWEEPER_HEIGHT=16 MINESWEEPER_WIDTH=30 MINESWEEPER_MINES=99 cargo run
//! ```

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::Dimensions;
use crate::error::{BoardError, ConfigError};

const DEFAULT_HEIGHT: usize = 8;
const DEFAULT_WIDTH: usize = 8;
const DEFAULT_MINES: usize = 8;
const DEFAULT_GAMES: usize = 100;
const DEFAULT_REPORT_PATH: &str = "data/report.json";

/// Parâmetros de uma bateria de partidas.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub height: usize,
    pub width: usize,
    pub mines: usize,
    /// Quantas partidas jogar.
    pub games: usize,
    /// Seed base; a partida `i` usa `seed + i`.
    pub seed: u64,
    /// Joga as partidas em paralelo (rayon). Cada partida continua
    /// sequencial e com sua própria KB.
    pub parallel: bool,
    /// Onde salvar o relatório JSON. `None` desliga a persistência.
    pub report_path: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            height: DEFAULT_HEIGHT,
            width: DEFAULT_WIDTH,
            mines: DEFAULT_MINES,
            games: DEFAULT_GAMES,
            seed: 0,
            parallel: true,
            report_path: Some(PathBuf::from(DEFAULT_REPORT_PATH)),
        }
    }
}

impl GameConfig {
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.height, self.width)
    }

    /// Carrega a configuração das variáveis de ambiente do processo.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Aplica `lookup` sobre os padrões. Separado de [`from_env()`](Self::from_env)
    /// para os testes não dependerem do ambiente do processo.
    ///
    /// `MINESWEEPER_REPORT` vazio desliga o relatório.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(v) = parse_var(&lookup, "MINESWEEPER_HEIGHT")? {
            config.height = v;
        }
        if let Some(v) = parse_var(&lookup, "MINESWEEPER_WIDTH")? {
            config.width = v;
        }
        if let Some(v) = parse_var(&lookup, "MINESWEEPER_MINES")? {
            config.mines = v;
        }
        if let Some(v) = parse_var(&lookup, "MINESWEEPER_GAMES")? {
            config.games = v;
        }
        if let Some(v) = parse_var(&lookup, "MINESWEEPER_SEED")? {
            config.seed = v;
        }
        if let Some(v) = parse_var(&lookup, "MINESWEEPER_PARALLEL")? {
            config.parallel = v;
        }
        if let Some(path) = lookup("MINESWEEPER_REPORT") {
            let path = path.trim();
            config.report_path = if path.is_empty() {
                None
            } else {
                Some(PathBuf::from(path))
            };
        }
        config.validate()?;
        Ok(config)
    }

    /// Rejeita tabuleiros sem casas ou com minas demais.
    pub fn validate(&self) -> Result<(), BoardError> {
        let dimensions = self.dimensions();
        let max = dimensions.cell_count();
        if max == 0 {
            return Err(BoardError::Empty { dimensions });
        }
        if self.mines > max {
            return Err(BoardError::TooManyMines {
                dimensions,
                max,
                requested: self.mines,
            });
        }
        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                key,
                value: raw.clone(),
                reason: e.to_string(),
            }),
    }
}
