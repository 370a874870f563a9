//! # postag-core — Etiquetador Morfossintático com HMM
//!
//! Este crate implementa um etiquetador de classes gramaticais (part-of-speech)
//! baseado em um **Modelo Oculto de Markov** (HMM) de primeira ordem, treinado
//! por contagem sobre um corpus anotado e decodificado com o algoritmo de Viterbi.
//!
//! ## Arquitetura do Sistema
//!
//! O dado flui em duas fases independentes, ligadas pelo modelo persistido em JSON:
//!
//! 1.  **Corpus** ([`corpus`]): linhas `palavra/tag` viram sentenças anotadas.
//! 2.  **Features** ([`features`]): capitalização, sufixos e números de cada palavra.
//! 3.  **Treino** ([`trainer`]): contagens de transição e emissão → [`FrequencyModel`].
//! 4.  **Estimativa** ([`estimator`]): contagens → probabilidades, inclusive para
//!     palavras e transições nunca vistas.
//! 5.  **Decodificação** ([`viterbi`]): sequência de tags mais provável por sentença.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use postag_core::{corpus, train, ProbabilityEstimator, TaggerConfig, ViterbiDecoder};
//!
//! // 1. Treina com uma única sentença anotada
//! let sentences = corpus::parse_tagged_text("Dog/NN runs/VB ./.").unwrap();
//! let model = train(&sentences);
//!
//! // 2. Monta o decodificador
//! let config = TaggerConfig::default();
//! let decoder = ViterbiDecoder::new(ProbabilityEstimator::new(&model, &config)).unwrap();
//!
//! // 3. Etiqueta uma sentença nova
//! let words = ["Dog", "runs", "."];
//! let result = decoder.decode(&words).unwrap();
//! assert_eq!(corpus::format_tagged(&words, &result.best_sequence), "Dog/NN runs/VB ./.");
//! ```
//!
//! ## Módulos Principais
//!
//! - [`pipeline`]: operações de arquivo (treinar, etiquetar, avaliar).
//! - [`model`]: tabelas de frequência e formato persistido.
//! - [`errors`]: taxonomia de erros (formato, consulta, caminho impossível, E/S).

pub mod config;
pub mod corpus;
pub mod errors;
pub mod estimator;
pub mod evaluation;
pub mod features;
pub mod model;
pub mod pipeline;
pub mod trainer;
pub mod viterbi;

pub use config::TaggerConfig;
pub use corpus::TaggedSentence;
pub use errors::{CorpusError, DecodeError, ModelError, TaggerError, TaggerResult};
pub use estimator::ProbabilityEstimator;
pub use evaluation::Evaluation;
pub use model::FrequencyModel;
pub use trainer::{train, train_parallel, Trainer};
pub use viterbi::{ViterbiDecoder, ViterbiResult};
