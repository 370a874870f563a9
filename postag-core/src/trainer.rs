//! # Construção do Modelo de Frequências
//!
//! O treino é uma única passada sobre o corpus, contando:
//!
//! 1. **Emissões**: quantas vezes a tag T gerou a palavra W (e as features de W).
//! 2. **Transições**: quantas vezes a tag T seguiu a tag anterior, com `<SOS>`
//!    antes do primeiro token e `<EOS>` depois do último.
//! 3. **Tokens**: o total de tokens do corpus (sem contar `<EOS>`).
//!
//! ## Treino em fragmentos
//!
//! Como contagens são somáveis, o corpus pode ser dividido por sentença,
//! contado em paralelo (Rayon) e os fragmentos combinados com [`Trainer::merge`].
//! O resultado é idêntico ao treino sequencial, inclusive na ordem das tags:
//! o `reduce` do Rayon sobre um `par_iter` indexado sempre combina um fragmento
//! com o fragmento seguinte, e o merge acrescenta ao fim apenas as tags novas.

use rayon::prelude::*;
use tracing::{debug, info};

use crate::corpus::TaggedSentence;
use crate::model::{FrequencyModel, END_OF_SENTENCE, START_OF_SENTENCE};

/// Acumulador de contagens. Cada sentença é adicionada com [`Trainer::add_sentence`]
/// e o modelo final é obtido com [`Trainer::finish`].
#[derive(Debug, Clone, Default)]
pub struct Trainer {
    model: FrequencyModel,
}

impl Trainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adiciona uma sentença anotada às contagens.
    ///
    /// Uma sentença vazia registra apenas a transição `<SOS>` → `<EOS>`.
    pub fn add_sentence(&mut self, sentence: &TaggedSentence) {
        let mut previous_tag = START_OF_SENTENCE;

        for (word, tag) in &sentence.annotations {
            self.model
                .emission_frequency
                .entry(tag.clone())
                .or_default()
                .observe(word);
            self.model
                .transition_frequency
                .entry(previous_tag.to_string())
                .or_default()
                .observe(tag);
            previous_tag = tag.as_str();
        }

        self.model
            .transition_frequency
            .entry(previous_tag.to_string())
            .or_default()
            .observe(END_OF_SENTENCE);

        self.model.total_token_count += sentence.len() as u64;
    }

    /// Combina as contagens de outro acumulador (fragmento do corpus).
    ///
    /// `other` precisa vir depois de `self` no corpus: tags que só aparecem em
    /// `other` entram no fim das tabelas.
    pub fn merge(mut self, other: Trainer) -> Self {
        for (prev, record) in other.model.transition_frequency {
            self.model
                .transition_frequency
                .entry(prev)
                .or_default()
                .merge(record);
        }
        for (tag, record) in other.model.emission_frequency {
            self.model
                .emission_frequency
                .entry(tag)
                .or_default()
                .merge(record);
        }
        self.model.total_token_count += other.model.total_token_count;
        self
    }

    /// Finaliza o treino e devolve o modelo imutável.
    pub fn finish(self) -> FrequencyModel {
        let model = self.model;
        info!(
            tags = model.tags().len(),
            vocabulary = model.vocabulary_size(),
            sentences = model.sentence_count(),
            tokens = model.total_token_count(),
            "Modelo treinado"
        );
        debug!(tags = ?model.tags(), "Vocabulário de tags");
        model
    }
}

/// Treina sequencialmente, na ordem das sentenças.
pub fn train(corpus: &[TaggedSentence]) -> FrequencyModel {
    let mut trainer = Trainer::new();
    for sentence in corpus {
        trainer.add_sentence(sentence);
    }
    trainer.finish()
}

/// Treina em paralelo, fragmentando o corpus por sentença.
pub fn train_parallel(corpus: &[TaggedSentence]) -> FrequencyModel {
    corpus
        .par_iter()
        .fold(Trainer::new, |mut trainer, sentence| {
            trainer.add_sentence(sentence);
            trainer
        })
        .reduce(Trainer::new, Trainer::merge)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::parse_tagged_text;
    use crate::model::CountTable;

    const CORPUS: &str = "\
The/DT dog/NN runs/VBZ ./.
A/DT dog/NN barked/VBD loudly/RB ./.
Dogs/NNS bark/VBP ./.

1,000/CD dogs/NNS ran/VBD ./.";

    fn corpus() -> Vec<TaggedSentence> {
        parse_tagged_text(CORPUS).unwrap()
    }

    fn assert_table_invariants(table: &CountTable) {
        let sum: u64 = table.iter().map(|(_, c)| c).sum();
        assert_eq!(table.total(), sum);
        let ones = table.iter().filter(|(_, c)| *c == 1).count() as u64;
        assert_eq!(table.singletons(), ones);
    }

    #[test]
    fn test_count_and_singleton_invariants() {
        let model = train(&corpus());
        for (_, record) in model.transitions() {
            assert_table_invariants(record);
        }
        for (_, record) in model.emissions() {
            assert_table_invariants(record.words());
            assert!(record.capitalised() <= record.total());
        }
        assert!(model.validate().is_ok());
    }

    #[test]
    fn test_sentence_boundaries() {
        let model = train(&corpus());
        // 5 linhas, incluindo a linha vazia
        assert_eq!(model.sentence_count(), 5);
        assert_eq!(
            model.transition(START_OF_SENTENCE).unwrap().count(END_OF_SENTENCE),
            Some(1)
        );
        assert_eq!(model.total_token_count(), 16);
    }

    #[test]
    fn test_transition_counts() {
        let model = train(&corpus());
        let sos = model.transition(START_OF_SENTENCE).unwrap();
        assert_eq!(sos.count("DT"), Some(2));
        assert_eq!(sos.count("NNS"), Some(1));
        assert_eq!(sos.total(), 5);

        let dot = model.transition(".").unwrap();
        assert_eq!(dot.count(END_OF_SENTENCE), Some(4));
    }

    #[test]
    fn test_emission_features() {
        let model = train(&corpus());
        let nns = model.emission("NNS").unwrap();
        assert_eq!(nns.total(), 2);
        assert_eq!(nns.capitalised(), 1);
        assert_eq!(nns.suffix_count("s"), 2);

        let cd = model.emission("CD").unwrap();
        assert_eq!(cd.cardinal(), 1);
    }

    #[test]
    fn test_training_is_deterministic() {
        let a = serde_json::to_string(&train(&corpus())).unwrap();
        let b = serde_json::to_string(&train(&corpus())).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let corpus: Vec<TaggedSentence> = corpus().into_iter().cycle().take(200).collect();
        let parallel = train_parallel(&corpus);
        let sequential = train(&corpus);
        assert_eq!(parallel, sequential);
        assert_eq!(parallel.tags(), sequential.tags());
    }

    #[test]
    fn test_tags_in_first_observation_order() {
        let model = train(&corpus());
        assert_eq!(
            model.tags(),
            vec!["DT", "NN", "VBZ", ".", "VBD", "RB", "NNS", "VBP", "CD"]
        );
    }

    #[test]
    fn test_merge_appends_new_tags() {
        let corpus = parse_tagged_text("a/X\nb/Y\nc/Z a/X").unwrap();
        let mut left = Trainer::new();
        left.add_sentence(&corpus[0]);
        let mut right = Trainer::new();
        right.add_sentence(&corpus[1]);
        right.add_sentence(&corpus[2]);

        let merged = left.merge(right).finish();
        assert_eq!(merged.tags(), vec!["X", "Y", "Z"]);
        assert_eq!(merged.tags(), train(&corpus).tags());
    }

    #[test]
    fn test_empty_corpus() {
        let model = train(&[]);
        assert!(model.tags().is_empty());
        assert_eq!(model.total_token_count(), 0);
        assert!(model.validate().is_ok());
    }
}
