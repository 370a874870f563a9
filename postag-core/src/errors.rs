//! # Erros do Etiquetador
//!
//! Cada camada tem seu próprio enum de erro:
//!
//! - [`CorpusError`]: linhas mal formatadas no corpus ou no arquivo de avaliação.
//! - [`ModelError`]: tags ausentes nas tabelas ou modelo carregado inconsistente.
//! - [`DecodeError`]: falha do Viterbi em uma sentença.
//! - [`TaggerError`]: erro unificado retornado pelas operações de arquivo do [`crate::pipeline`].
//!
//! Nenhum desses erros é recuperável: treino e decodificação são determinísticos,
//! então repetir a operação com a mesma entrada produziria o mesmo erro.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Erros de formato em arquivos de texto anotados (`palavra/tag`).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CorpusError {
    /// Token sem o separador `/` entre palavra e tag.
    #[error("linha {line}: token sem separador '/': {token:?}")]
    MissingSeparator {
        /// Linha (base 1) onde o token aparece.
        line: usize,
        /// Token problemático.
        token: String,
    },

    /// A parte da palavra (antes do último `/`) está vazia.
    #[error("linha {line}: palavra vazia no token {token:?}")]
    EmptyWord { line: usize, token: String },

    /// A parte da tag (depois do último `/`) está vazia.
    #[error("linha {line}: tag vazia no token {token:?}")]
    EmptyTag { line: usize, token: String },

    /// A tag coincide com uma das sentinelas de início/fim de sentença.
    #[error("linha {line}: a tag {tag:?} é reservada para as fronteiras de sentença")]
    ReservedTag { line: usize, tag: String },

    /// Arquivos de referência e predição não estão alinhados.
    #[error("linha {line}: {reason}")]
    Misaligned { line: usize, reason: String },
}

/// Erros de consulta ou consistência do modelo de frequências.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModelError {
    /// A tag não existe na tabela consultada. Indica divergência entre o
    /// vocabulário de treino e o de decodificação.
    #[error("tag {tag:?} não encontrada na tabela de {table}")]
    UnknownTag {
        /// Nome da tabela (`transição` ou `emissão`).
        table: &'static str,
        /// Tag procurada.
        tag: String,
    },

    /// Um invariante do modelo foi violado (ex: total diferente da soma das contagens).
    #[error("modelo inválido: {0}")]
    Invalid(String),
}

/// Falhas do decodificador Viterbi em uma sentença.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum DecodeError {
    /// Erro de consulta ao modelo.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Todos os caminhos ficaram com log-probabilidade -inf.
    #[error("nenhum caminho possível na posição {position} (palavra {word:?})")]
    NoPath {
        /// Índice (base 0) do token na sentença.
        position: usize,
        /// Palavra nessa posição.
        word: String,
    },
}

/// Erro unificado das operações de arquivo.
///
/// `TaggerResult<T>` = `Result<T, TaggerError>` é o tipo retornado pela API pública.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TaggerError {
    /// Erro de formato no corpus.
    #[error(transparent)]
    Corpus(#[from] CorpusError),

    /// Erro de consulta ou validação do modelo.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Falha ao decodificar uma sentença do arquivo de entrada.
    #[error("falha ao decodificar a linha {line}: {source}")]
    Decode {
        /// Linha (base 1) da sentença no arquivo de entrada.
        line: usize,
        #[source]
        source: DecodeError,
    },

    /// Arquivo ausente, ilegível ou não gravável.
    #[error("erro de E/S em {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// JSON do modelo ou da configuração inválido.
    #[error("erro de serialização em {path:?}: {source}")]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl TaggerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn serialization(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Serialization {
            path: path.into(),
            source,
        }
    }
}

/// Tipo `Result` padrão da crate.
pub type TaggerResult<T> = Result<T, TaggerError>;
