use anyhow::{Context, Result};
use clap::Parser;
use patent_core::corpus::Corpus;
use patent_core::lda::{LdaModel, LdaParams};
use patent_core::parser::ingest_directory;
use patent_core::persist::{
    save_corpus, save_doc_map, save_meta, save_model, save_similarity, save_stopwords,
    save_vocabulary, IndexPaths, MetaFile,
};
use patent_core::similarity::SimilarityIndex;
use patent_core::stopwords::StopwordSet;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Index patent XML documents into a topic-model similarity index", long_about = None)]
struct Cli {
    /// Directory of patent XML documents, one <document-id>.<ext> per file
    #[arg(short = 'i', long)]
    input: PathBuf,
    /// Output path for the serialized vocabulary
    #[arg(short = 'd', long)]
    dictionary: PathBuf,
    /// Output path for the fitted topic model
    #[arg(short = 'p', long)]
    posterior: PathBuf,
    /// Index at most this many documents (defaults to every file in the input directory)
    #[arg(short = 'k', long)]
    limit: Option<usize>,
    /// Domain stopword list (whitespace-delimited tokens)
    #[arg(long, default_value = "lib/uspto_stopwords")]
    stopwords: PathBuf,
    /// Additional stopword list
    #[arg(long, default_value = "lib/custom_stopwords")]
    custom_stopwords: PathBuf,
    /// Number of latent topics
    #[arg(long, default_value_t = 500)]
    topics: usize,
    /// Gibbs sampling passes over the corpus
    #[arg(long, default_value_t = 50)]
    iterations: usize,
    /// Sampler seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Directory for auxiliary artifacts (document map, stopwords, corpus, similarity index)
    #[arg(long, default_value = "index-artifacts")]
    artifacts: PathBuf,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let stopwords = StopwordSet::load(&cli.stopwords, &cli.custom_stopwords)
        .context("loading stopword lists")?;
    tracing::info!(stopwords = stopwords.len(), "loaded stopword set");

    let limit = cli.limit.unwrap_or(usize::MAX);
    let docs = ingest_directory(&cli.input, limit, &stopwords)?;
    let corpus = Corpus::assemble(docs)?;
    tracing::info!(
        num_docs = corpus.num_docs(),
        num_terms = corpus.vocabulary.len(),
        "assembled corpus"
    );

    let params = LdaParams {
        num_topics: cli.topics,
        iterations: cli.iterations,
        seed: cli.seed,
        ..LdaParams::default()
    };
    let model = LdaModel::fit(&corpus.vectors, corpus.vocabulary.len(), &params);
    let index = SimilarityIndex::build(&model, &corpus.vectors);
    tracing::info!(topics = params.num_topics, "fitted topic model and similarity index");

    save_vocabulary(&cli.dictionary, &corpus.vocabulary)
        .context("saving vocabulary")?;
    save_model(&cli.posterior, &model).context("saving topic model")?;

    let paths = IndexPaths::new(&cli.artifacts);
    save_doc_map(&paths, &corpus.doc_map).context("saving document map")?;
    save_stopwords(&paths, &stopwords).context("saving stopword set")?;
    save_corpus(&paths, &corpus.vectors).context("saving sparse corpus")?;
    save_similarity(&paths, &index).context("saving similarity index")?;
    let meta = MetaFile {
        num_docs: corpus.num_docs() as u32,
        num_terms: corpus.vocabulary.len() as u32,
        num_topics: params.num_topics as u32,
        created_at: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_else(|_| "".into()),
        version: 1,
    };
    save_meta(&paths, &meta).context("saving run metadata")?;

    tracing::info!(artifacts = %cli.artifacts.display(), "index build complete");
    Ok(())
}
