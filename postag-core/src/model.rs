//! # Modelo de Frequências do HMM
//!
//! O modelo treinado é composto apenas por **contagens**. As probabilidades são
//! calculadas sob demanda pelo [`crate::estimator::ProbabilityEstimator`].
//!
//! - **Tabela de transição**: tag anterior → contagens da próxima tag.
//! - **Tabela de emissão**: tag → contagens de palavras + contagens de features
//!   (capitalização, sufixos, cardinais) usadas para palavras desconhecidas.
//! - **Total de tokens** do corpus (prior de cada tag).
//!
//! ## Formato persistido
//!
//! JSON com três campos: `transition_frequency`, `emission_frequency` e
//! `total_token_count`. Os campos de cada registro usam chaves entre colchetes
//! (`[total]`, `[singletons]`, ...) e as palavras ficam dentro de `[counts]`,
//! então uma palavra nunca colide com um campo do registro.
//!
//! ```text
//! "NN": {
//!   "[counts]": { "Dog": 1 },
//!   "[total]": 1,
//!   "[singletons]": 1,
//!   "[capitalised]": 1,
//!   "[suffixes]": {},
//!   "[cardinal]": 0
//! }
//! ```
//!
//! As tabelas de transição e emissão são `IndexMap` na ordem em que cada tag
//! foi observada pela primeira vez no corpus. Essa é a ordem de enumeração das
//! tags no Viterbi (e portanto a de desempate), e ela sobrevive ao JSON. Os
//! mapas internos são `BTreeMap`. Em ambos os casos a serialização é determinística.

use std::collections::BTreeMap;
use std::io::{Read, Write};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::features::{is_capitalised, is_cardinal, suffix_buckets};

/// Tag sentinela de início de sentença. Só aparece como chave da tabela de transição.
pub const START_OF_SENTENCE: &str = "<SOS>";
/// Tag sentinela de fim de sentença. Só aparece como próxima tag na tabela de transição.
pub const END_OF_SENTENCE: &str = "<EOS>";

/// Contagens de chaves sob uma mesma tag, com agregados mantidos incrementalmente.
///
/// Invariantes:
/// - `total == soma(counts)`
/// - `singletons == número de chaves com contagem exatamente 1`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountTable {
    #[serde(rename = "[counts]")]
    pub(crate) counts: BTreeMap<String, u64>,
    #[serde(rename = "[total]")]
    pub(crate) total: u64,
    #[serde(rename = "[singletons]")]
    pub(crate) singletons: u64,
}

impl CountTable {
    /// Registra mais uma ocorrência de `key`.
    pub(crate) fn observe(&mut self, key: &str) {
        match self.counts.get_mut(key) {
            Some(count) => {
                if *count == 1 {
                    self.singletons -= 1;
                }
                *count += 1;
            }
            None => {
                self.counts.insert(key.to_string(), 1);
                self.singletons += 1;
            }
        }
        self.total += 1;
    }

    /// Soma as contagens de `other`. Singletons não são aditivos, então são recontados.
    pub(crate) fn merge(&mut self, other: CountTable) {
        for (key, count) in other.counts {
            *self.counts.entry(key).or_insert(0) += count;
        }
        self.total += other.total;
        self.singletons = self.counts.values().filter(|&&c| c == 1).count() as u64;
    }

    pub fn count(&self, key: &str) -> Option<u64> {
        self.counts.get(key).copied()
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn singletons(&self) -> u64 {
        self.singletons
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, &c)| (k.as_str(), c))
    }

    fn check(&self, owner: &str) -> Result<(), ModelError> {
        let sum: u64 = self.counts.values().sum();
        if sum != self.total {
            return Err(ModelError::Invalid(format!(
                "{owner}: total {} difere da soma das contagens {sum}",
                self.total
            )));
        }
        if let Some((key, _)) = self.counts.iter().find(|(_, &c)| c == 0) {
            return Err(ModelError::Invalid(format!("{owner}: contagem zero para {key:?}")));
        }
        let singletons = self.counts.values().filter(|&&c| c == 1).count() as u64;
        if singletons != self.singletons {
            return Err(ModelError::Invalid(format!(
                "{owner}: {} singletons registrados, {singletons} encontrados",
                self.singletons
            )));
        }
        Ok(())
    }
}

/// Registro de transição: contagens da próxima tag após uma tag anterior.
pub type TransitionRecord = CountTable;

/// Registro de emissão de uma tag: palavras e features de forma.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmissionRecord {
    #[serde(flatten)]
    pub(crate) words: CountTable,
    /// Tokens com a primeira letra maiúscula.
    #[serde(rename = "[capitalised]")]
    pub(crate) capitalised: u64,
    /// Tokens por sufixo (um token conta para todos os sufixos que casam).
    #[serde(rename = "[suffixes]")]
    pub(crate) suffixes: BTreeMap<String, u64>,
    /// Tokens que casam com o padrão cardinal.
    #[serde(rename = "[cardinal]")]
    pub(crate) cardinal: u64,
}

impl EmissionRecord {
    /// Registra uma ocorrência de `word`, atualizando todas as features a cada ocorrência.
    pub(crate) fn observe(&mut self, word: &str) {
        self.words.observe(word);
        if is_capitalised(word) {
            self.capitalised += 1;
        }
        for suffix in suffix_buckets(word) {
            *self.suffixes.entry(suffix.to_string()).or_insert(0) += 1;
        }
        if is_cardinal(word) {
            self.cardinal += 1;
        }
    }

    pub(crate) fn merge(&mut self, other: EmissionRecord) {
        self.words.merge(other.words);
        self.capitalised += other.capitalised;
        for (suffix, count) in other.suffixes {
            *self.suffixes.entry(suffix).or_insert(0) += count;
        }
        self.cardinal += other.cardinal;
    }

    pub fn words(&self) -> &CountTable {
        &self.words
    }

    pub fn total(&self) -> u64 {
        self.words.total
    }

    pub fn capitalised(&self) -> u64 {
        self.capitalised
    }

    pub fn suffix_count(&self, suffix: &str) -> u64 {
        self.suffixes.get(suffix).copied().unwrap_or(0)
    }

    pub fn cardinal(&self) -> u64 {
        self.cardinal
    }

    fn check(&self, tag: &str) -> Result<(), ModelError> {
        let owner = format!("emissão[{tag}]");
        self.words.check(&owner)?;
        let total = self.total();
        if self.capitalised > total {
            return Err(ModelError::Invalid(format!(
                "{owner}: {} capitalizadas excede o total {total}",
                self.capitalised
            )));
        }
        if let Some((suffix, count)) = self.suffixes.iter().find(|(_, &c)| c > total) {
            return Err(ModelError::Invalid(format!(
                "{owner}: sufixo {suffix:?} com {count} excede o total {total}"
            )));
        }
        if self.cardinal > total {
            return Err(ModelError::Invalid(format!(
                "{owner}: {} cardinais excede o total {total}",
                self.cardinal
            )));
        }
        Ok(())
    }
}

/// Modelo HMM treinado (somente contagens). Imutável depois de construído pelo
/// [`crate::trainer::Trainer`] ou carregado com [`FrequencyModel::read`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyModel {
    pub(crate) transition_frequency: IndexMap<String, TransitionRecord>,
    pub(crate) emission_frequency: IndexMap<String, EmissionRecord>,
    pub(crate) total_token_count: u64,
}

impl FrequencyModel {
    /// Registro de transição de `prev`. Erro de consulta se `prev` nunca foi observada.
    pub fn transition(&self, prev: &str) -> Result<&TransitionRecord, ModelError> {
        self.transition_frequency
            .get(prev)
            .ok_or_else(|| ModelError::UnknownTag {
                table: "transição",
                tag: prev.to_string(),
            })
    }

    /// Registro de emissão de `tag`. Erro de consulta se `tag` nunca foi observada.
    pub fn emission(&self, tag: &str) -> Result<&EmissionRecord, ModelError> {
        self.emission_frequency
            .get(tag)
            .ok_or_else(|| ModelError::UnknownTag {
                table: "emissão",
                tag: tag.to_string(),
            })
    }

    /// Vocabulário de tags (sem a sentinela de início), na ordem em que cada tag
    /// apareceu pela primeira vez no corpus de treino.
    pub fn tags(&self) -> Vec<&str> {
        self.transition_frequency
            .keys()
            .map(String::as_str)
            .filter(|&tag| tag != START_OF_SENTENCE)
            .collect()
    }

    pub fn transitions(&self) -> impl Iterator<Item = (&str, &TransitionRecord)> {
        self.transition_frequency.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn emissions(&self) -> impl Iterator<Item = (&str, &EmissionRecord)> {
        self.emission_frequency.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn total_token_count(&self) -> u64 {
        self.total_token_count
    }

    /// Número de sentenças do corpus de treino (soma das transições para `<EOS>`).
    pub fn sentence_count(&self) -> u64 {
        self.transition_frequency
            .values()
            .filter_map(|record| record.count(END_OF_SENTENCE))
            .sum()
    }

    /// Número de palavras distintas (sensível a maiúsculas) em todas as tags.
    pub fn vocabulary_size(&self) -> usize {
        let mut words: Vec<&str> = self
            .emission_frequency
            .values()
            .flat_map(|record| record.words.counts.keys().map(String::as_str))
            .collect();
        words.sort_unstable();
        words.dedup();
        words.len()
    }

    /// Verifica os invariantes do modelo. Usado depois de carregar um arquivo.
    pub fn validate(&self) -> Result<(), ModelError> {
        for (prev, record) in &self.transition_frequency {
            record.check(&format!("transição[{prev}]"))?;
        }
        for (tag, record) in &self.emission_frequency {
            record.check(tag)?;
        }

        let emitted: u64 = self.emission_frequency.values().map(EmissionRecord::total).sum();
        if emitted != self.total_token_count {
            return Err(ModelError::Invalid(format!(
                "total_token_count {} difere da soma das emissões {emitted}",
                self.total_token_count
            )));
        }

        if !self.transition_frequency.is_empty()
            && !self.transition_frequency.contains_key(START_OF_SENTENCE)
        {
            return Err(ModelError::Invalid(format!(
                "tabela de transição sem a sentinela {START_OF_SENTENCE}"
            )));
        }

        let tags = self.tags();
        if tags.len() != self.emission_frequency.len()
            || tags.iter().any(|tag| !self.emission_frequency.contains_key(*tag))
        {
            return Err(ModelError::Invalid(
                "as tags da tabela de transição e da tabela de emissão não coincidem".to_string(),
            ));
        }
        Ok(())
    }

    /// Exporta o modelo em JSON.
    ///
    /// # Errors
    ///
    /// Quando `wtr` gera um erro, ele é retornado como está.
    pub fn write<W>(&self, wtr: W) -> Result<(), serde_json::Error>
    where
        W: Write,
    {
        serde_json::to_writer_pretty(wtr, self)
    }

    /// Lê um modelo em JSON. Não valida; veja [`FrequencyModel::validate`].
    pub fn read<R>(rdr: R) -> Result<Self, serde_json::Error>
    where
        R: Read,
    {
        serde_json::from_reader(rdr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singleton_bookkeeping() {
        let mut table = CountTable::default();
        table.observe("a");
        table.observe("b");
        assert_eq!(table.singletons(), 2);
        table.observe("a");
        assert_eq!(table.singletons(), 1);
        table.observe("a");
        assert_eq!(table.singletons(), 1);
        assert_eq!(table.total(), 4);
        assert_eq!(table.count("a"), Some(3));
        assert!(table.check("t").is_ok());
    }

    #[test]
    fn test_merge_recounts_singletons() {
        let mut left = CountTable::default();
        left.observe("a");
        left.observe("b");
        let mut right = CountTable::default();
        right.observe("a");
        right.observe("c");

        left.merge(right);
        assert_eq!(left.count("a"), Some(2));
        assert_eq!(left.total(), 4);
        // "b" e "c" continuam únicos; "a" deixou de ser
        assert_eq!(left.singletons(), 2);
        assert!(left.check("t").is_ok());
    }

    #[test]
    fn test_emission_features_counted_every_time() {
        let mut record = EmissionRecord::default();
        record.observe("Running");
        record.observe("Running");
        record.observe("1,000");
        assert_eq!(record.total(), 3);
        assert_eq!(record.capitalised(), 2);
        assert_eq!(record.suffix_count("ing"), 2);
        assert_eq!(record.cardinal(), 1);
        assert_eq!(record.words().singletons(), 1);
    }

    #[test]
    fn test_record_keys_are_reserved() {
        let mut record = EmissionRecord::default();
        record.observe("[total]");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["[total]"], 1);
        assert_eq!(json["[counts]"]["[total]"], 1);

        let back: EmissionRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_validate_detects_bad_total() {
        let mut model = FrequencyModel::default();
        let mut record = EmissionRecord::default();
        record.observe("dog");
        model.emission_frequency.insert("NN".to_string(), record);
        model.total_token_count = 2;
        assert!(matches!(model.validate(), Err(ModelError::Invalid(_))));
    }

    #[test]
    fn test_unknown_tag_lookup() {
        let model = FrequencyModel::default();
        assert_eq!(
            model.transition("NN").unwrap_err(),
            ModelError::UnknownTag {
                table: "transição",
                tag: "NN".to_string()
            }
        );
        assert!(model.emission("NN").is_err());
    }

    #[test]
    fn test_tag_order_survives_json() {
        let corpus = crate::corpus::parse_tagged_text("z/VB a/NN\nb/DT").unwrap();
        let model = crate::trainer::train(&corpus);
        assert_eq!(model.tags(), vec!["VB", "NN", "DT"]);

        let mut buf = Vec::new();
        model.write(&mut buf).unwrap();
        let back = FrequencyModel::read(buf.as_slice()).unwrap();
        assert_eq!(back.tags(), vec!["VB", "NN", "DT"]);
        let emitted: Vec<&str> = back.emissions().map(|(tag, _)| tag).collect();
        assert_eq!(emitted, vec!["VB", "NN", "DT"]);
    }
}
