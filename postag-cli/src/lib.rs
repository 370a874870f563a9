//! Utilitários compartilhados pelos binários `build-tagger`, `run-tagger` e `eval-tagger`.

use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use postag_core::TaggerConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Inicializa o logging em stderr. O nível padrão é `info`; use `RUST_LOG` para mudar.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Monta a configuração do etiquetador: arquivo JSON opcional, depois
/// `closed_tags` (se houver) substitui o conjunto de tags fechadas.
pub fn resolve_config(
    path: Option<&Path>,
    closed_tags: Option<Vec<String>>,
) -> anyhow::Result<TaggerConfig> {
    let mut config = match path {
        Some(path) => TaggerConfig::from_path(path)
            .with_context(|| format!("falha ao carregar a configuração {path:?}"))?,
        None => TaggerConfig::default(),
    };
    if let Some(tags) = closed_tags {
        config = config.with_closed_class_tags(tags);
    }
    Ok(config)
}

/// Registra o tempo total de uma etapa quando sai de escopo.
pub struct Stopwatch {
    label: &'static str,
    start: Instant,
}

impl Stopwatch {
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }
}

impl Drop for Stopwatch {
    fn drop(&mut self) {
        info!(stage = self.label, elapsed = ?self.start.elapsed(), "Etapa concluída");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = resolve_config(None, None).unwrap();
        assert_eq!(config, TaggerConfig::default());
    }

    #[test]
    fn test_closed_tags_override_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"closed_class_tags": ["DT"]}"#).unwrap();

        let config = resolve_config(Some(&path), None).unwrap();
        assert!(config.is_closed_class("DT"));

        let config = resolve_config(Some(&path), Some(vec!["PUNCT".to_string()])).unwrap();
        assert!(config.is_closed_class("PUNCT"));
        assert!(!config.is_closed_class("DT"));
    }

    #[test]
    fn test_missing_config_names_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing.json");

        let err = resolve_config(Some(&path), None).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("falha ao carregar a configuração"));
        assert!(msg.contains("missing.json"));
    }
}
