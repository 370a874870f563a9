//! # Avaliação do Etiquetador
//!
//! Compara um arquivo de referência (gold) com a saída do etiquetador, ambos
//! no formato `palavra/tag`, e mede:
//!
//! - **Acurácia por token**: tags corretas / total de tokens.
//! - **Acurácia por sentença**: sentenças sem nenhum erro / total de sentenças.
//! - **Desempenho por tag**: precisão, cobertura (recall) e F1 por tag de referência.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::corpus::TaggedSentence;
use crate::errors::CorpusError;

/// Contagens de uma tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagMeasure {
    /// Predições corretas desta tag.
    pub correct: usize,
    /// Ocorrências da tag na referência.
    pub observed: usize,
    /// Vezes que a tag foi predita.
    pub predicted: usize,
}

impl TagMeasure {
    pub fn precision(&self) -> f64 {
        ratio(self.correct, self.predicted)
    }

    pub fn recall(&self) -> f64 {
        ratio(self.correct, self.observed)
    }

    pub fn f1(&self) -> f64 {
        let (p, r) = (self.precision(), self.recall());
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * p * r / (p + r)
        }
    }
}

/// Resultado agregado da avaliação.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub tokens: usize,
    pub correct_tokens: usize,
    pub sentences: usize,
    pub correct_sentences: usize,
    pub per_tag: BTreeMap<String, TagMeasure>,
}

impl Evaluation {
    pub fn token_accuracy(&self) -> f64 {
        ratio(self.correct_tokens, self.tokens)
    }

    pub fn sentence_accuracy(&self) -> f64 {
        ratio(self.correct_sentences, self.sentences)
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<8} {:>9} {:>9} {:>9} {:>7}", "tag", "precisão", "recall", "f1", "n")?;
        for (tag, m) in &self.per_tag {
            writeln!(
                f,
                "{:<8} {:>9.4} {:>9.4} {:>9.4} {:>7}",
                tag,
                m.precision(),
                m.recall(),
                m.f1(),
                m.observed
            )?;
        }
        writeln!(
            f,
            "tokens:    {}/{} ({:.4})",
            self.correct_tokens,
            self.tokens,
            self.token_accuracy()
        )?;
        write!(
            f,
            "sentenças: {}/{} ({:.4})",
            self.correct_sentences,
            self.sentences,
            self.sentence_accuracy()
        )
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// Compara sentença a sentença. As palavras precisam ser idênticas nas duas entradas.
pub fn evaluate(
    gold: &[TaggedSentence],
    predicted: &[TaggedSentence],
) -> Result<Evaluation, CorpusError> {
    if gold.len() != predicted.len() {
        return Err(CorpusError::Misaligned {
            line: gold.len().min(predicted.len()) + 1,
            reason: format!(
                "{} sentenças na referência, {} na predição",
                gold.len(),
                predicted.len()
            ),
        });
    }

    let mut eval = Evaluation::default();
    for (i, (g, p)) in gold.iter().zip(predicted).enumerate() {
        let line = i + 1;
        if g.len() != p.len() {
            return Err(CorpusError::Misaligned {
                line,
                reason: format!("{} tokens na referência, {} na predição", g.len(), p.len()),
            });
        }

        if let Some((gold_word, pred_word)) = g.words().zip(p.words()).find(|(a, b)| a != b) {
            return Err(CorpusError::Misaligned {
                line,
                reason: format!("palavra {gold_word:?} na referência, {pred_word:?} na predição"),
            });
        }

        let mut all_correct = true;
        for (gold_tag, pred_tag) in g.tags().zip(p.tags()) {
            eval.tokens += 1;
            eval.per_tag.entry(gold_tag.to_string()).or_default().observed += 1;
            eval.per_tag.entry(pred_tag.to_string()).or_default().predicted += 1;
            if gold_tag == pred_tag {
                eval.correct_tokens += 1;
                eval.per_tag.entry(gold_tag.to_string()).or_default().correct += 1;
            } else {
                all_correct = false;
            }
        }

        eval.sentences += 1;
        if all_correct {
            eval.correct_sentences += 1;
        }
    }
    Ok(eval)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::parse_tagged_text;

    #[test]
    fn test_accuracy() {
        let gold = parse_tagged_text("Dog/NN runs/VB ./.\nCats/NNS sleep/VBP ./.").unwrap();
        let pred = parse_tagged_text("Dog/NN runs/NN ./.\nCats/NNS sleep/VBP ./.").unwrap();
        let eval = evaluate(&gold, &pred).unwrap();

        assert_eq!(eval.tokens, 6);
        assert_eq!(eval.correct_tokens, 5);
        assert_eq!(eval.correct_sentences, 1);
        assert!((eval.token_accuracy() - 5.0 / 6.0).abs() < 1e-12);
        assert_eq!(eval.sentence_accuracy(), 0.5);

        let nn = eval.per_tag["NN"];
        assert_eq!(nn, TagMeasure { correct: 1, observed: 1, predicted: 2 });
        assert_eq!(nn.precision(), 0.5);
        assert_eq!(nn.recall(), 1.0);
        assert_eq!(eval.per_tag["VB"].f1(), 0.0);
    }

    #[test]
    fn test_misaligned_words() {
        let gold = parse_tagged_text("Dog/NN").unwrap();
        let pred = parse_tagged_text("Cat/NN").unwrap();
        assert!(matches!(
            evaluate(&gold, &pred),
            Err(CorpusError::Misaligned { line: 1, .. })
        ));
    }

    #[test]
    fn test_misaligned_word_inside_sentence() {
        let gold = parse_tagged_text("Dog/NN\nThe/DT cat/NN").unwrap();
        let pred = parse_tagged_text("Dog/NN\nThe/DT rat/NN").unwrap();
        let err = evaluate(&gold, &pred).unwrap_err();
        assert_eq!(
            err,
            CorpusError::Misaligned {
                line: 2,
                reason: "palavra \"cat\" na referência, \"rat\" na predição".to_string()
            }
        );
    }

    #[test]
    fn test_misaligned_sentence_count() {
        let gold = parse_tagged_text("Dog/NN\nCat/NN").unwrap();
        let pred = parse_tagged_text("Dog/NN").unwrap();
        assert!(matches!(
            evaluate(&gold, &pred),
            Err(CorpusError::Misaligned { line: 2, .. })
        ));
    }

    #[test]
    fn test_empty_sentences_count_as_correct() {
        let gold = parse_tagged_text("\nDog/NN").unwrap();
        let pred = parse_tagged_text("\nDog/NN").unwrap();
        let eval = evaluate(&gold, &pred).unwrap();
        assert_eq!(eval.sentences, 2);
        assert_eq!(eval.correct_sentences, 2);
    }
}
