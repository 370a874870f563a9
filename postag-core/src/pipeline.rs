//! # Pipeline — Operações sobre Arquivos
//!
//! Conecta leitura de arquivos, treino, persistência do modelo e decodificação:
//!
//! 1. [`train_file`]: corpus anotado → modelo JSON.
//! 2. [`tag_file`]: texto cru + modelo → texto anotado (uma linha por sentença).
//! 3. [`evaluate_files`]: referência + predição → [`Evaluation`].
//!
//! Cada operação lê a entrada inteira antes de processar e aborta no primeiro erro.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::TaggerConfig;
use crate::corpus::{format_tagged, parse_raw_line, parse_tagged_text};
use crate::errors::{TaggerError, TaggerResult};
use crate::estimator::ProbabilityEstimator;
use crate::evaluation::{evaluate, Evaluation};
use crate::model::FrequencyModel;
use crate::trainer::{train, train_parallel};
use crate::viterbi::ViterbiDecoder;

/// Resumo de uma execução de [`tag_file`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggingReport {
    /// Linhas processadas (incluindo linhas vazias).
    pub sentences: usize,
    /// Tokens etiquetados.
    pub tokens: usize,
}

fn read_to_string(path: &Path) -> TaggerResult<String> {
    fs::read_to_string(path).map_err(|e| TaggerError::io(path, e))
}

/// Grava o modelo em JSON.
pub fn save_model(model: &FrequencyModel, path: impl AsRef<Path>) -> TaggerResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| TaggerError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    model
        .write(&mut writer)
        .map_err(|e| TaggerError::serialization(path, e))?;
    writer.flush().map_err(|e| TaggerError::io(path, e))?;
    Ok(())
}

/// Carrega e valida um modelo JSON.
pub fn load_model(path: impl AsRef<Path>) -> TaggerResult<FrequencyModel> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| TaggerError::io(path, e))?;
    let model =
        FrequencyModel::read(BufReader::new(file)).map_err(|e| TaggerError::serialization(path, e))?;
    model.validate()?;
    info!(
        path = %path.display(),
        tags = model.tags().len(),
        tokens = model.total_token_count(),
        "Modelo carregado"
    );
    Ok(model)
}

/// Treina um modelo a partir de um corpus `palavra/tag` e grava em `model_path`.
///
/// Com `parallel`, o corpus é contado em fragmentos (Rayon); o modelo é o mesmo.
pub fn train_file(
    corpus_path: impl AsRef<Path>,
    model_path: impl AsRef<Path>,
    parallel: bool,
) -> TaggerResult<FrequencyModel> {
    let corpus_path = corpus_path.as_ref();
    let text = read_to_string(corpus_path)?;
    let corpus = parse_tagged_text(&text)?;
    info!(path = %corpus_path.display(), sentences = corpus.len(), parallel, "Corpus carregado");

    let model = if parallel {
        train_parallel(&corpus)
    } else {
        train(&corpus)
    };
    save_model(&model, model_path.as_ref())?;
    info!(path = %model_path.as_ref().display(), "Modelo gravado");
    Ok(model)
}

/// Etiqueta cada linha de `text`, devolvendo uma linha de saída por linha de entrada.
pub fn tag_text(decoder: &ViterbiDecoder<'_>, text: &str) -> TaggerResult<Vec<String>> {
    text.lines()
        .enumerate()
        .map(|(i, line)| -> TaggerResult<String> {
            let words = parse_raw_line(line);
            if words.is_empty() {
                debug!(line = i + 1, "Linha vazia");
            }
            let result = decoder.decode(&words).map_err(|source| TaggerError::Decode {
                line: i + 1,
                source,
            })?;
            debug!(line = i + 1, score = result.best_score, "Sentença decodificada");
            Ok(format_tagged(&words, &result.best_sequence))
        })
        .collect()
}

/// Etiqueta o arquivo `input_path` com o modelo em `model_path` e grava em `output_path`.
pub fn tag_file(
    input_path: impl AsRef<Path>,
    model_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &TaggerConfig,
) -> TaggerResult<TaggingReport> {
    let input_path = input_path.as_ref();
    let output_path = output_path.as_ref();

    let text = read_to_string(input_path)?;
    let model = load_model(model_path)?;
    let decoder = ViterbiDecoder::new(ProbabilityEstimator::new(&model, config))?;

    let lines = tag_text(&decoder, &text)?;

    let file = File::create(output_path).map_err(|e| TaggerError::io(output_path, e))?;
    let mut out = BufWriter::new(file);
    for line in &lines {
        writeln!(out, "{line}").map_err(|e| TaggerError::io(output_path, e))?;
    }
    out.flush().map_err(|e| TaggerError::io(output_path, e))?;

    let report = TaggingReport {
        sentences: lines.len(),
        tokens: text.lines().map(|l| parse_raw_line(l).len()).sum(),
    };
    info!(
        path = %output_path.display(),
        sentences = report.sentences,
        tokens = report.tokens,
        "Etiquetagem concluída"
    );
    Ok(report)
}

/// Avalia um arquivo predito contra a referência.
pub fn evaluate_files(
    gold_path: impl AsRef<Path>,
    predicted_path: impl AsRef<Path>,
) -> TaggerResult<Evaluation> {
    let gold = parse_tagged_text(&read_to_string(gold_path.as_ref())?)?;
    let predicted = parse_tagged_text(&read_to_string(predicted_path.as_ref())?)?;
    Ok(evaluate(&gold, &predicted)?)
}
