//! Compara a saída do etiquetador com um arquivo de referência.
//!
//! ```text
//! eval-tagger <referência> <predição>
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use postag_cli::{init_tracing, Stopwatch};
use postag_core::pipeline::evaluate_files;

#[derive(Parser, Debug)]
#[command(about = "Mede a acurácia do etiquetador contra uma referência palavra/tag.")]
struct Args {
    /// Referência anotada (gold)
    gold: PathBuf,

    /// Saída do run-tagger
    predicted: PathBuf,

    /// Imprime o resultado em JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let _timer = Stopwatch::start("Avaliação");
    let eval = evaluate_files(&args.gold, &args.predicted)
        .with_context(|| format!("falha ao avaliar {:?}", args.predicted))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&eval)?);
    } else {
        println!("{eval}");
    }
    Ok(())
}
