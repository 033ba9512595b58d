use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use tariffwatch_catalog::{Catalog, FixtureProvider, Sku, SourcingAction};
use tariffwatch_insights::query::{ActionFilter, QueryParams, SortDirection, SortField, query};
use tariffwatch_insights::ranking::rank_suppliers;

/// Embedded fixtures repeated `factor` times with unique ids.
fn scaled_skus(catalog: &Catalog, factor: usize) -> Vec<Sku> {
    (0..factor)
        .flat_map(|round| {
            catalog.skus().iter().map(move |sku| {
                let mut sku = sku.clone();
                sku.id = tariffwatch_core::SkuId::new(format!("{}-{round}", sku.id));
                sku
            })
        })
        .collect()
}

fn bench_query(c: &mut Criterion) {
    let catalog = Catalog::embedded().expect("embedded fixtures");
    let mut group = c.benchmark_group("query_pipeline");

    for factor in [1usize, 10, 100] {
        let skus = scaled_skus(&catalog, factor);

        group.bench_with_input(BenchmarkId::new("default", skus.len()), &skus, |b, skus| {
            let params = QueryParams::default();
            b.iter(|| black_box(query(black_box(skus), &params)));
        });

        group.bench_with_input(
            BenchmarkId::new("search_filter_sort_by_name", skus.len()),
            &skus,
            |b, skus| {
                let params = QueryParams::default()
                    .with_search("e")
                    .with_action(ActionFilter::Only(SourcingAction::Monitor))
                    .with_sort(SortField::Name, SortDirection::Ascending)
                    .with_page(2);
                b.iter(|| black_box(query(black_box(skus), &params)));
            },
        );
    }

    group.finish();
}

fn bench_ranking(c: &mut Criterion) {
    let catalog = Catalog::embedded().expect("embedded fixtures");

    c.bench_function("rank_suppliers_all_skus", |b| {
        b.iter(|| {
            for sku in catalog.skus() {
                black_box(rank_suppliers(sku, catalog.suppliers(), catalog.mapping()));
            }
        })
    });
}

criterion_group!(benches, bench_query, bench_ranking);
criterion_main!(benches);
