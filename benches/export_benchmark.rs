//! Benchmarks for the export pipeline.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic editor HTML of increasing size.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Creates editor HTML with the given number of sections, each with a
/// heading, two paragraphs and a small table.
fn create_test_html(sections: usize) -> String {
    let mut html = String::new();

    for i in 0..sections {
        html.push_str(&format!("<h{}>Section {}</h{}>", i % 3 + 1, i, i % 3 + 1));
        html.push_str("<p>Lorem ipsum dolor sit amet, <strong>consectetur</strong> adipiscing elit, ");
        html.push_str("sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.</p>");
        html.push_str("<p>Ut enim ad minim veniam, quis nostrud exercitation ullamco.</p>");
        html.push_str("<figure class=\"table\"><table><tbody>");
        for row in 0..3 {
            html.push_str(&format!(
                "<tr><td>{}</td><td>value</td><td>note</td></tr>",
                row
            ));
        }
        html.push_str("</tbody></table></figure>");
    }

    html
}

/// Benchmark outline extraction.
fn bench_extract_titles(c: &mut Criterion) {
    let html = create_test_html(50);

    c.bench_function("extract_titles_50_sections", |b| {
        b.iter(|| tocpdf::extract_titles(black_box(&html)));
    });
}

/// Benchmark composition without rendering.
fn bench_compose(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose");

    for sections in [1, 10, 50].iter() {
        let html = create_test_html(*sections);

        group.bench_function(format!("{}_sections", sections), |b| {
            b.iter(|| tocpdf::compose(black_box(&html)));
        });
    }

    group.finish();
}

/// Benchmark the full pipeline to PDF bytes.
fn bench_export_pdf(c: &mut Criterion) {
    let mut group = c.benchmark_group("export_pdf");

    for sections in [1, 10, 50].iter() {
        let html = create_test_html(*sections);

        group.bench_function(format!("{}_sections", sections), |b| {
            b.iter(|| tocpdf::export_pdf(black_box(&html)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_extract_titles, bench_compose, bench_export_pdf);
criterion_main!(benches);
