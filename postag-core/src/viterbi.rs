//! # Algoritmo de Viterbi — Decodificação do HMM
//!
//! Encontra a sequência de tags mais provável para uma sentença por
//! **programação dinâmica**, em `O(N × T²)` para N tokens e T tags.
//!
//! ## Algoritmo
//!
//! ```text
//! Inicialização: score[0][t] = log(P(t | <SOS>) · P(w_0 | t))
//!
//! Recursão:      score[i][t] = max_{p} score[i-1][p] + log(P(w_i | t) · P(t | p))
//!
//! Terminação:    score[t]   += log(P(<EOS> | t))
//!
//! Backtracking:  reconstrói o caminho ótimo de trás pra frente
//! ```
//!
//! Probabilidades zero viram `-inf` **sem** chamar `ln(0)`: o caminho é
//! descartado antes. Em caso de empate vence a primeira tag na ordem do vocabulário,
//! que é a ordem em que as tags apareceram no corpus de treino.

use tracing::trace;

use crate::errors::{DecodeError, ModelError};
use crate::estimator::ProbabilityEstimator;
use crate::model::START_OF_SENTENCE;

/// Resultado do Viterbi para uma sentença.
#[derive(Debug, Clone, PartialEq)]
pub struct ViterbiResult {
    /// Sequência de tags mais provável (uma por token).
    pub best_sequence: Vec<String>,
    /// Log-probabilidade (não normalizada) da melhor sequência, incluindo `<EOS>`.
    pub best_score: f64,
}

/// Decodificador com as probabilidades de transição pré-calculadas.
///
/// As transições dependem só do modelo, então são calculadas uma vez na
/// construção; erros de consulta aparecem aqui. As emissões são calculadas
/// por sentença.
#[derive(Debug, Clone)]
pub struct ViterbiDecoder<'a> {
    estimator: ProbabilityEstimator<'a>,
    tags: Vec<&'a str>,
    /// P(t | `<SOS>`)
    initial: Vec<f64>,
    /// `transitions[p][c]` = P(c | p)
    transitions: Vec<Vec<f64>>,
    /// P(`<EOS>` | t) com piso
    finals: Vec<f64>,
}

impl<'a> ViterbiDecoder<'a> {
    pub fn new(estimator: ProbabilityEstimator<'a>) -> Result<Self, ModelError> {
        let tags = estimator.model().tags();

        let initial = tags
            .iter()
            .map(|tag| estimator.transition(START_OF_SENTENCE, tag))
            .collect::<Result<Vec<_>, _>>()?;
        let transitions = tags
            .iter()
            .map(|prev| {
                tags.iter()
                    .map(|curr| estimator.transition(prev, curr))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        let finals = tags
            .iter()
            .map(|tag| estimator.final_transition(tag))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            estimator,
            tags,
            initial,
            transitions,
            finals,
        })
    }

    /// Tags candidatas, na ordem usada para desempate.
    pub fn tags(&self) -> &[&'a str] {
        &self.tags
    }

    /// Decodifica uma sentença já tokenizada.
    ///
    /// Uma sentença vazia gera um resultado vazio. Se em alguma posição todas
    /// as tags ficarem com score `-inf`, retorna [`DecodeError::NoPath`].
    pub fn decode<S: AsRef<str>>(&self, words: &[S]) -> Result<ViterbiResult, DecodeError> {
        let Some(first) = words.first() else {
            return Ok(ViterbiResult {
                best_sequence: vec![],
                best_score: 0.0,
            });
        };

        let n_tokens = words.len();
        let n_tags = self.tags.len();

        // backptr[i][t] = tag anterior que maximiza o score de t na posição i
        let mut backptr: Vec<Vec<usize>> = vec![vec![0usize; n_tags]; n_tokens];

        // === Inicialização (token 0) ===
        let mut viterbi = vec![f64::NEG_INFINITY; n_tags];
        for (t, tag) in self.tags.iter().enumerate() {
            let emission = self.estimator.emission(tag, first.as_ref())?;
            let transition = self.initial[t];
            if emission > 0.0 && transition > 0.0 {
                viterbi[t] = (transition * emission).ln();
            }
        }
        ensure_path(&viterbi, 0, first.as_ref())?;

        // === Recursão (tokens 1..N-1) ===
        for (i, word) in words.iter().enumerate().skip(1) {
            let word = word.as_ref();
            let mut next = vec![f64::NEG_INFINITY; n_tags];

            for (c, tag) in self.tags.iter().enumerate() {
                let emission = self.estimator.emission(tag, word)?;
                if emission == 0.0 {
                    continue;
                }
                for (p, &prev_score) in viterbi.iter().enumerate() {
                    if prev_score == f64::NEG_INFINITY {
                        continue;
                    }
                    let transition = self.transitions[p][c];
                    if transition == 0.0 {
                        continue;
                    }
                    let score = prev_score + (emission * transition).ln();
                    if score > next[c] {
                        next[c] = score;
                        backptr[i][c] = p;
                    }
                }
            }

            ensure_path(&next, i, word)?;
            trace!(position = i, word, scores = ?next, "Passo do Viterbi");
            viterbi = next;
        }

        // === Terminação ===
        for (score, final_p) in viterbi.iter_mut().zip(&self.finals) {
            if *score > f64::NEG_INFINITY {
                *score += final_p.ln();
            }
        }

        // === Backtracking ===
        let (mut best, best_score) = best_in_slice(&viterbi);
        let mut best_sequence = vec![String::new(); n_tokens];
        best_sequence[n_tokens - 1] = self.tags[best].to_string();
        for i in (1..n_tokens).rev() {
            best = backptr[i][best];
            best_sequence[i - 1] = self.tags[best].to_string();
        }

        Ok(ViterbiResult {
            best_sequence,
            best_score,
        })
    }
}

fn ensure_path(scores: &[f64], position: usize, word: &str) -> Result<(), DecodeError> {
    if scores.iter().all(|&s| s == f64::NEG_INFINITY) {
        return Err(DecodeError::NoPath {
            position,
            word: word.to_string(),
        });
    }
    Ok(())
}

/// Retorna (índice, valor) do primeiro máximo em um slice
fn best_in_slice(scores: &[f64]) -> (usize, f64) {
    let mut best = (0, f64::NEG_INFINITY);
    for (i, &score) in scores.iter().enumerate() {
        if score > best.1 {
            best = (i, score);
        }
    }
    best
}
