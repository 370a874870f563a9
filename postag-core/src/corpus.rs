//! # Leitura de Corpus Anotado
//!
//! Formato de entrada do treino: uma sentença por linha, tokens separados por
//! espaço em branco, cada token no formato `palavra/tag`.
//!
//! A palavra pode conter `/` (ex: `1/2/CD`), então a divisão acontece no
//! **último** `/` do token.
//!
//! ## Exemplo
//!
//! ```rust
//! use postag_core::corpus::parse_tagged_line;
//!
//! let sentence = parse_tagged_line("The/DT cat/NN sat/VBD ./.", 1).unwrap();
//! assert_eq!(sentence.len(), 4);
//! assert_eq!(sentence.annotations[3], (".".to_string(), ".".to_string()));
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::CorpusError;
use crate::model::{END_OF_SENTENCE, START_OF_SENTENCE};

/// Uma sentença anotada: pares (palavra, tag) na ordem original.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedSentence {
    /// Exemplo: `[("Dog", "NN"), ("runs", "VB")]`
    pub annotations: Vec<(String, String)>,
}

impl TaggedSentence {
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Palavras da sentença, sem as tags.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.annotations.iter().map(|(word, _)| word.as_str())
    }

    /// Tags da sentença, sem as palavras.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.annotations.iter().map(|(_, tag)| tag.as_str())
    }
}

impl<W: Into<String>, T: Into<String>> FromIterator<(W, T)> for TaggedSentence {
    fn from_iter<I: IntoIterator<Item = (W, T)>>(iter: I) -> Self {
        Self {
            annotations: iter
                .into_iter()
                .map(|(word, tag)| (word.into(), tag.into()))
                .collect(),
        }
    }
}

/// Divide um token `palavra/tag` no último `/`.
///
/// `line` é usado apenas na mensagem de erro.
pub fn split_token(token: &str, line: usize) -> Result<(&str, &str), CorpusError> {
    let (word, tag) = token
        .rsplit_once('/')
        .ok_or_else(|| CorpusError::MissingSeparator {
            line,
            token: token.to_string(),
        })?;

    if word.is_empty() {
        return Err(CorpusError::EmptyWord {
            line,
            token: token.to_string(),
        });
    }
    if tag.is_empty() {
        return Err(CorpusError::EmptyTag {
            line,
            token: token.to_string(),
        });
    }
    if tag == START_OF_SENTENCE || tag == END_OF_SENTENCE {
        return Err(CorpusError::ReservedTag {
            line,
            tag: tag.to_string(),
        });
    }

    Ok((word, tag))
}

/// Converte uma linha do corpus em uma [`TaggedSentence`].
///
/// Uma linha em branco gera uma sentença vazia (que ainda conta como sentença no treino).
pub fn parse_tagged_line(line: &str, line_no: usize) -> Result<TaggedSentence, CorpusError> {
    line.split_whitespace()
        .map(|token| split_token(token, line_no))
        .collect::<Result<TaggedSentence, _>>()
}

/// Converte o texto inteiro de um corpus em sentenças (uma por linha).
///
/// O primeiro token mal formatado aborta a leitura.
pub fn parse_tagged_text(text: &str) -> Result<Vec<TaggedSentence>, CorpusError> {
    text.lines()
        .enumerate()
        .map(|(i, line)| parse_tagged_line(line, i + 1))
        .collect()
}

/// Tokens de uma linha de entrada para decodificação (sem tags).
pub fn parse_raw_line(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// Formata a saída do etiquetador: `palavra/tag` separados por um espaço.
pub fn format_tagged<W, T>(words: &[W], tags: &[T]) -> String
where
    W: AsRef<str>,
    T: AsRef<str>,
{
    words
        .iter()
        .zip(tags)
        .map(|(word, tag)| format!("{}/{}", word.as_ref(), tag.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}
