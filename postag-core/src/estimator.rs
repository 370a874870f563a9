//! # Estimador de Probabilidades
//!
//! Converte as contagens do [`FrequencyModel`] em probabilidades de transição
//! e emissão, incluindo estimativas para eventos nunca vistos.
//!
//! ## Transição P(atual | anterior)
//!
//! - Par visto: `count / total(anterior)`
//! - Par não visto: `singletons(anterior) / total(anterior)`. Quanto mais
//!   transições raras a tag anterior tem, mais massa sobra para continuações novas.
//!
//! ## Emissão P(palavra | tag)
//!
//! - Palavra vista com a tag: `count / total(tag)`
//! - Palavra desconhecida e tag de classe fechada: `0`
//! - Palavra desconhecida e tag aberta: produto de razões de features, cada
//!   numerador com piso 1:
//!
//! ```text
//! singletons/total × capitalização/total × sufixo/total × [cardinal/total] × total/tokens
//! ```
//!
//! ## Atenção
//!
//! Os valores para eventos não vistos **não** formam uma distribuição normalizada
//! (a soma sobre o vocabulário pode passar de 1). Servem apenas para comparar
//! tags na mesma posição do Viterbi; não use para perplexidade.

use crate::config::TaggerConfig;
use crate::errors::ModelError;
use crate::features::{first_suffix_bucket, is_capitalised, is_cardinal};
use crate::model::{FrequencyModel, END_OF_SENTENCE};

/// Estimador sobre um modelo somente-leitura.
#[derive(Debug, Clone, Copy)]
pub struct ProbabilityEstimator<'a> {
    model: &'a FrequencyModel,
    config: &'a TaggerConfig,
}

impl<'a> ProbabilityEstimator<'a> {
    pub fn new(model: &'a FrequencyModel, config: &'a TaggerConfig) -> Self {
        Self { model, config }
    }

    pub fn model(&self) -> &'a FrequencyModel {
        self.model
    }

    /// P(`curr` | `prev`). Erro de consulta se `prev` não existe na tabela de transição.
    pub fn transition(&self, prev: &str, curr: &str) -> Result<f64, ModelError> {
        let record = self.model.transition(prev)?;
        let total = record.total() as f64;
        Ok(match record.count(curr) {
            Some(count) => count as f64 / total,
            None => record.singletons() as f64 / total,
        })
    }

    /// P(`<EOS>` | `tag`) usada na terminação do Viterbi, com piso 1 no numerador.
    pub fn final_transition(&self, tag: &str) -> Result<f64, ModelError> {
        let record = self.model.transition(tag)?;
        let count = record.count(END_OF_SENTENCE).unwrap_or(0).max(1);
        Ok(count as f64 / record.total() as f64)
    }

    /// P(`word` | `tag`). Erro de consulta se `tag` não existe na tabela de emissão.
    pub fn emission(&self, tag: &str, word: &str) -> Result<f64, ModelError> {
        let record = self.model.emission(tag)?;
        let total = record.total() as f64;

        if let Some(count) = record.words().count(word) {
            return Ok(count as f64 / total);
        }
        if self.config.is_closed_class(tag) {
            return Ok(0.0);
        }

        let ratio = |count: u64| count.max(1) as f64 / total;

        let singleton = ratio(record.words().singletons());
        let capitalisation = ratio(if is_capitalised(word) {
            record.capitalised()
        } else {
            record.total() - record.capitalised()
        });
        // Só o primeiro sufixo da lista é consultado, mesmo que o treino conte todos.
        let suffix = ratio(first_suffix_bucket(word).map_or(0, |s| record.suffix_count(s)));
        let cardinal = if is_cardinal(word) {
            ratio(record.cardinal())
        } else {
            1.0
        };
        let prior = total / self.model.total_token_count() as f64;

        Ok(singleton * capitalisation * suffix * cardinal * prior)
    }
}
