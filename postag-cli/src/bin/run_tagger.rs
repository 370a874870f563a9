//! Etiqueta um arquivo de sentenças com um modelo treinado.
//!
//! ```text
//! run-tagger <entrada> <modelo> <saída>
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use postag_cli::{init_tracing, resolve_config, Stopwatch};
use postag_core::pipeline::tag_file;

#[derive(Parser, Debug)]
#[command(about = "Etiqueta sentenças (uma por linha) com o algoritmo de Viterbi.")]
struct Args {
    /// Texto de entrada: uma sentença por linha, palavras separadas por espaço
    input: PathBuf,

    /// Modelo JSON gerado pelo build-tagger
    model: PathBuf,

    /// Arquivo de saída com tokens `palavra/tag`
    output: PathBuf,

    /// Configuração JSON do etiquetador
    #[arg(long)]
    config: Option<PathBuf>,

    /// Tags de classe fechada, separadas por vírgula (substitui a configuração)
    #[arg(long, value_delimiter = ',')]
    closed_tags: Option<Vec<String>>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = resolve_config(args.config.as_deref(), args.closed_tags)?;
    tracing::debug!(closed = ?config.closed_class_tags, "Configuração");

    let _timer = Stopwatch::start("Etiquetagem");
    tag_file(&args.input, &args.model, &args.output, &config)
        .with_context(|| format!("falha ao etiquetar {:?}", args.input))?;

    Ok(())
}
