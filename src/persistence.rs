//! # Persistência — Relatório da Bateria em Disco
//!
//! Serializa o [`BatchReport`] como JSON "pretty-printed" para facilitar
//! inspeção manual e comparação entre execuções.
//!
//! ## ⚠️ Atomicidade
//!
//! A escrita **não é atômica** — crash durante a escrita pode deixar o
//! arquivo truncado. O relatório é regenerável rodando a bateria de novo.

use std::path::Path;

use anyhow::{Context, Result};

use crate::game::BatchReport;

/// Salva o relatório em `path`, criando os diretórios que faltarem.
///
/// # Erros
///
/// Retorna erro se não conseguir criar o diretório, serializar,
/// ou escrever no arquivo.
pub fn save_report(report: &BatchReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Falha ao criar diretório {}", parent.display()))?;
        }
    }
    let json = serde_json::to_string_pretty(report).context("Falha ao serializar BatchReport")?;
    std::fs::write(path, json)
        .with_context(|| format!("Falha ao escrever {}", path.display()))?;
    tracing::info!(path = %path.display(), games = report.games.len(), "Relatório salvo");
    Ok(())
}

/// Carrega um relatório salvo por [`save_report()`].
///
/// # Erros
///
/// Retorna erro se o arquivo não existir, estiver corrompido, ou for
/// incompatível com a struct atual.
pub fn load_report(path: &Path) -> Result<BatchReport> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Falha ao ler {}", path.display()))?;
    let report: BatchReport = serde_json::from_str(&json)
        .with_context(|| format!("Falha ao desserializar {}", path.display()))?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::play_batch;

    #[test]
    fn test_save_and_load_report() {
        let config = GameConfig {
            games: 3,
            parallel: false,
            report_path: None,
            ..GameConfig::default()
        };
        let report = play_batch(&config).unwrap();

        let dir = std::env::temp_dir().join(format!("minesweeper-ai-{}", report.id));
        let path = dir.join("nested").join("report.json");
        save_report(&report, &path).unwrap();

        let loaded = load_report(&path).unwrap();
        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.games, report.games);
        assert_eq!(loaded.config, config);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_missing_report_fails() {
        let path = std::env::temp_dir().join("minesweeper-ai-does-not-exist.json");
        assert!(load_report(&path).is_err());
    }
}
