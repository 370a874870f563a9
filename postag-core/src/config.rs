//! # Configuração do Etiquetador
//!
//! A única escolha configurável do estimador é o conjunto de **tags de classe
//! fechada**: tags cujo vocabulário é considerado completo no corpus de treino.
//! Uma palavra desconhecida nunca recebe uma dessas tags (probabilidade de
//! emissão zero). O padrão são as tags de pontuação do Penn Treebank.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{TaggerError, TaggerResult};

/// Tags de pontuação com vocabulário fechado.
pub const PUNCTUATION_TAGS: &[&str] = &[".", ",", ":", "$", "#", "``", "''"];

/// Configuração do estimador de probabilidades.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaggerConfig {
    /// Tags que nunca emitem palavras desconhecidas.
    pub closed_class_tags: BTreeSet<String>,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            closed_class_tags: PUNCTUATION_TAGS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl TaggerConfig {
    /// Substitui o conjunto de tags fechadas.
    pub fn with_closed_class_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.closed_class_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_closed_class(&self, tag: &str) -> bool {
        self.closed_class_tags.contains(tag)
    }

    /// Carrega a configuração de um arquivo JSON. Campos ausentes usam o padrão.
    pub fn from_path(path: impl AsRef<Path>) -> TaggerResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| TaggerError::io(path, e))?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| TaggerError::serialization(path, e))
    }
}
