use criterion::{Criterion, criterion_group, criterion_main};
use tissuegraph::{ExpressionRow, GeneIndex, GeneRecord, QualityMode, Resolver};
use std::io::Cursor;

const GENES: u64 = 20_000;
const CALLS: u64 = 100_000;

fn gene_records() -> Vec<GeneRecord> {
    (0..GENES).map(|i| GeneRecord {
        gene_id: i,
        // Every other gene has no accession and can only be found by symbol
        ensembl: if i % 2 == 0 { Some(format!("ENSG{:011}", i)) } else { None },
        symbol: format!("GENE{}", i),
        type_of_gene: Some("protein-coding".to_string()),
    }).collect()
}

fn expression_tsv() -> String {
    let mut data = String::from("Gene ID\tGene name\tAnatomical entity ID\tAnatomical entity name\tExpression\tCall quality\n");
    for i in 0..CALLS {
        let gene = i % (GENES + 1_000);
        let quality = if i % 3 == 0 { "gold quality" } else { "silver quality" };
        data.push_str(&format!(
            "ENSG{:011}\tGENE{}\tUBERON:{:07}\tentity {}\tpresent\t{}\n",
            gene, gene, i % 500, i % 500, quality,
        ));
    }
    data
}

fn parse_expression_benchmark(c: &mut Criterion) {
    let data = expression_tsv();
    c.bench_function("parse 100000 expression calls", |b| b.iter(|| {
        ExpressionRow::parse_from(Cursor::new(data.as_bytes()), QualityMode::Flag).unwrap()
    }));
}

fn resolve_benchmark(c: &mut Criterion) {
    let genes = gene_records();
    let index = GeneIndex::new(&genes);
    let rows = ExpressionRow::parse_from(Cursor::new(expression_tsv()), QualityMode::Flag).unwrap();

    c.bench_function("resolve 100000 expression calls", |b| b.iter(|| {
        Resolver::new(&index).resolve_all(rows.clone())
    }));
}

criterion_group!(benches,
    parse_expression_benchmark,
    resolve_benchmark);
criterion_main!(benches);
