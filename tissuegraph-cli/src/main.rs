use anyhow::Context;
use clap::{App, Arg, ArgMatches};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tissuegraph::{Delimiter, PipelineConfig, PipelineOptions, QualityMode};

fn app<'a, 'b>() -> clap::App<'a, 'b> {
    App::new("tissuegraph")
        .about("Builds anatomy node and gene-expressedIn-anatomy edge tables")
        .arg(Arg::with_name("genes")
            .long("genes")
            .takes_value(true)
            .default_value(tissuegraph::GENE_INFO_PATH)
            .help("Gene reference (NCBI gene_info or GeneID/Symbol/Ensembl CSV), optionally gzipped"))
        .arg(Arg::with_name("expression")
            .long("expression")
            .takes_value(true)
            .default_value(tissuegraph::EXPRESSION_INFO_PATH)
            .help("Tab-separated expression calls, optionally gzipped"))
        .arg(Arg::with_name("nodes")
            .long("nodes")
            .takes_value(true)
            .default_value(tissuegraph::NODE_OUTPUT_PATH))
        .arg(Arg::with_name("edges")
            .long("edges")
            .takes_value(true)
            .default_value(tissuegraph::EDGE_OUTPUT_PATH))
        .arg(Arg::with_name("gene_delimiter")
            .long("gene-delimiter")
            .possible_values(&["tab", "comma"])
            .takes_value(true)
            .help("Overrides the delimiter inferred from the gene file name"))
        .arg(Arg::with_name("all_gene_types")
            .long("all-gene-types")
            .help("Keep genes of every type_of_gene instead of only protein-coding ones"))
        .arg(Arg::with_name("gold_only")
            .long("gold-only")
            .help("Drop non-gold calls and leave is_gold_quality out of the edge table"))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let matches = app().get_matches();

    if let Err(e) = run(&matches) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn config_from(args: &ArgMatches) -> PipelineConfig {
    let path = |name: &str| PathBuf::from(args.value_of(name).expect("argument has a default"));

    let gene_delimiter = args.value_of("gene_delimiter").map(|delimiter| match delimiter {
        "tab" => Delimiter::Tab,
        "comma" => Delimiter::Comma,
        _ => unreachable!(),
    });

    let quality_mode = if args.is_present("gold_only") {
        QualityMode::GoldOnly
    } else {
        QualityMode::Flag
    };

    PipelineConfig {
        gene_info_path: path("genes"),
        expression_path: path("expression"),
        node_output_path: path("nodes"),
        edge_output_path: path("edges"),
        gene_delimiter,
        options: PipelineOptions {
            protein_coding_only: !args.is_present("all_gene_types"),
            quality_mode,
        },
    }
}

fn run(args: &ArgMatches) -> anyhow::Result<()> {
    let config = config_from(args);
    let summary = tissuegraph::run(&config)
        .context("failed to write anatomy tables")?;

    info!(
        genes = summary.gene_records,
        expression_rows = summary.expression_rows,
        resolved = summary.resolution.resolved(),
        dropped = summary.resolution.dropped,
        nodes = summary.nodes_written,
        edges = summary.edges_written,
        "done"
    );
    Ok(())
}
