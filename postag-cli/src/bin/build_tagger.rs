//! Treina o modelo HMM a partir de um corpus anotado.
//!
//! ```text
//! build-tagger <corpus> <modelo>
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use postag_cli::{init_tracing, Stopwatch};
use postag_core::pipeline::train_file;

#[derive(Parser, Debug)]
#[command(about = "Treina um etiquetador HMM a partir de um corpus palavra/tag.")]
struct Args {
    /// Corpus de treino: uma sentença por linha, tokens `palavra/tag`
    corpus: PathBuf,

    /// Arquivo onde o modelo JSON será gravado
    model: PathBuf,

    /// Conta o corpus em fragmentos paralelos (o modelo resultante é o mesmo)
    #[arg(long)]
    parallel: bool,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let _timer = Stopwatch::start("Treino");
    train_file(&args.corpus, &args.model, args.parallel)
        .with_context(|| format!("falha ao treinar com {:?}", args.corpus))?;

    Ok(())
}
