//! Pipeline throughput: full render pass (filter, KPIs, encoding, scene) and SVG output.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use popdash::chart::{render_svg, ContainerSize};
use popdash::data::{Dataset, Record};
use popdash::pipeline::Selection;
use popdash::session::render_view;

const REGIONS: [&str; 6] = ["Africa", "Asia", "Europe", "Oceania", "Caribbean", "South America"];

fn synthetic_dataset(countries: usize, years: &[i32]) -> Dataset {
    let mut records = Vec::with_capacity(countries * years.len());
    for &year in years {
        for i in 0..countries {
            records.push(Record {
                country: format!("Country {i}"),
                year,
                population_thousands: 500 + (i as i64 * 37) % 20_000,
                population_density: 1 + (i as i64 * 13) % 900,
                population_growth_rate: if i % 17 == 0 {
                    None
                } else {
                    Some(((i % 50) as f64 - 10.0) / 10.0)
                },
                region: REGIONS[i % REGIONS.len()].to_string(),
            });
        }
    }
    Dataset::new(records)
}

fn bench_pipeline(c: &mut Criterion) {
    let years = [1990, 2000, 2010, 2020];
    let container = ContainerSize::default();

    let mut group = c.benchmark_group("pipeline");
    for countries in [200usize, 2_000] {
        let dataset = synthetic_dataset(countries, &years);
        group.throughput(Throughput::Elements(dataset.len() as u64));

        group.bench_with_input(BenchmarkId::new("render_all", countries), &dataset, |b, dataset| {
            b.iter(|| black_box(render_view(dataset, Selection::All, container)));
        });
        group.bench_with_input(BenchmarkId::new("render_year", countries), &dataset, |b, dataset| {
            b.iter(|| black_box(render_view(dataset, Selection::Year(2010), container)));
        });

        let view = render_view(&dataset, Selection::All, container);
        group.bench_with_input(BenchmarkId::new("svg", countries), &view, |b, view| {
            b.iter(|| black_box(render_svg(&view.scene)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
