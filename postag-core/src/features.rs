//! # Features Ortográficas para Palavras Desconhecidas
//!
//! Quando o decodificador encontra uma palavra que nunca foi vista com uma tag,
//! a probabilidade de emissão é estimada a partir de características da forma
//! da palavra. Este módulo calcula essas características, sem estado:
//!
//! - **Capitalização**: a primeira letra é maiúscula? ("Paris", "IBM")
//! - **Sufixos**: a palavra termina em algum sufixo de uma lista fixa? ("running" → `ing`)
//! - **Cardinal**: a palavra é composta só de dígitos, pontos, hífens e vírgulas? ("1,000.5")
//!
//! ## Assimetria dos sufixos
//!
//! No treino **todos** os sufixos que casam são contados ([`suffix_buckets`]).
//! Na decodificação só o **primeiro** na ordem de [`SUFFIXES`] é consultado
//! ([`first_suffix_bucket`]). Ex: "sings" conta para `s` e, se existisse, para
//! outros sufixos; "singing" conta para `ing`.

use std::sync::LazyLock;

use regex::Regex;

/// Lista ordenada de sufixos. A ordem define qual sufixo representa a palavra
/// na decodificação.
pub const SUFFIXES: &[&str] = &[
    "ing", "ed", "tion", "sion", "ment", "ness", "ity", "able", "ible", "ful", "less", "ous",
    "ive", "ical", "al", "ize", "ise", "ist", "est", "er", "ly", "s",
];

/// Apenas dígitos, pontos, hífens e vírgulas. A string vazia também casa.
static CARDINAL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\d.,\-]*$").expect("padrão cardinal válido")
});

/// `true` se o primeiro caractere for maiúsculo.
pub fn is_capitalised(word: &str) -> bool {
    word.chars().next().map(char::is_uppercase).unwrap_or(false)
}

/// Todos os sufixos de [`SUFFIXES`] com que a palavra termina, na ordem da lista.
///
/// # Exemplo
/// ```rust
/// use postag_core::features::suffix_buckets;
///
/// assert_eq!(suffix_buckets("carelessness"), vec!["ness", "s"]);
/// assert!(suffix_buckets("dog").is_empty());
/// ```
pub fn suffix_buckets(word: &str) -> Vec<&'static str> {
    SUFFIXES
        .iter()
        .copied()
        .filter(|suffix| word.ends_with(suffix))
        .collect()
}

/// Primeiro sufixo de [`SUFFIXES`] com que a palavra termina.
pub fn first_suffix_bucket(word: &str) -> Option<&'static str> {
    SUFFIXES.iter().copied().find(|suffix| word.ends_with(suffix))
}

/// `true` se a palavra tiver apenas dígitos, `.`, `-` e `,`.
pub fn is_cardinal(word: &str) -> bool {
    CARDINAL_PATTERN.is_match(word)
}
