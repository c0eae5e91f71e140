//! Benchmarks for outline reconstruction and section ranking.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pdf_sections::model::{Character, FontSize, Line, Section};
use pdf_sections::parser::group_chars_into_lines;
use pdf_sections::rank::{EmbeddingRanker, HashingEmbedder, DEFAULT_TOP_K};
use pdf_sections::{build_outline, outline_bytes};

/// Creates a minimal PDF with one heading and one body line per page.
fn create_test_pdf(page_count: usize) -> Vec<u8> {
    let mut content = String::new();
    content.push_str("%PDF-1.4\n");
    content.push_str("1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n");

    let kids: Vec<String> = (0..page_count).map(|i| format!("{} 0 R", i * 2 + 4)).collect();
    content.push_str(&format!(
        "2 0 obj\n<< /Type /Pages /Kids [{}] /Count {} /Resources << /Font << /F1 3 0 R >> >> >>\nendobj\n",
        kids.join(" "),
        page_count
    ));
    content.push_str(
        "3 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>\nendobj\n",
    );

    let mut next_obj = 4;
    for i in 0..page_count {
        let page_obj = next_obj;
        let content_obj = next_obj + 1;
        next_obj += 2;

        content.push_str(&format!(
            "{} 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents {} 0 R >>\nendobj\n",
            page_obj, content_obj
        ));

        let text = format!(
            "BT /F1 18 Tf 72 700 Td ({}. Chapter {}) Tj ET BT /F1 11 Tf 72 660 Td (Body text for page {}.) Tj ET",
            i + 1,
            i + 1,
            i + 1
        );
        content.push_str(&format!(
            "{} 0 obj\n<< /Length {} >>\nstream\n{}\nendstream\nendobj\n",
            content_obj,
            text.len(),
            text
        ));
    }

    // Placeholder offsets; the reader rebuilds the table
    let xref_offset = content.len();
    content.push_str(&format!("xref\n0 {}\n", next_obj));
    content.push_str("0000000000 65535 f \n");
    for _ in 1..next_obj {
        content.push_str("0000000000 00000 n \n");
    }
    content.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        next_obj, xref_offset
    ));

    content.into_bytes()
}

/// Synthetic page: `rows` lines of 60 glyphs with baseline jitter.
fn synthetic_chars(rows: usize) -> Vec<Character> {
    let mut chars = Vec::with_capacity(rows * 60);
    for row in 0..rows {
        let top = 40.0 + row as f32 * 14.0;
        for col in 0..60 {
            let jitter = (col % 3) as f32 * 0.3;
            chars.push(Character::new("x", col as f32 * 6.0, top + jitter, 11.0, 1));
        }
    }
    chars
}

fn synthetic_sections(count: usize) -> Vec<Section> {
    (0..count)
        .map(|i| Section {
            document: format!("doc_{}.pdf", i % 7),
            page: (i % 30) as u32 + 1,
            text: format!("Section {} on budget planning and itinerary {}", i, i % 11),
        })
        .collect()
}

/// Benchmark grouping glyphs into lines.
fn bench_line_grouping(c: &mut Criterion) {
    let chars = synthetic_chars(50);
    c.bench_function("group_chars_50_lines", |b| {
        b.iter(|| group_chars_into_lines(black_box(&chars), 1));
    });
}

/// Benchmark outline assembly from lines.
fn bench_outline(c: &mut Criterion) {
    let sizes = [24.0, 18.0, 14.0, 12.0, 11.0];
    let lines: Vec<Line> = (0..500)
        .map(|i| {
            Line::new(
                format!("{} Heading {}", i % 9, i),
                i as f32 * 14.0,
                FontSize::from_points(sizes[i % sizes.len()]),
                (i / 40) as u32 + 1,
            )
        })
        .collect();

    c.bench_function("build_outline_500_lines", |b| {
        b.iter(|| build_outline(black_box(&lines)));
    });

    let mut group = c.benchmark_group("outline_bytes");
    for page_count in [1, 5, 10].iter() {
        let data = create_test_pdf(*page_count);
        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| {
                let _ = outline_bytes(black_box(&data), "bench.pdf");
            });
        });
    }
    group.finish();
}

/// Benchmark hashing-embedder ranking at various batch sizes.
fn bench_ranking(c: &mut Criterion) {
    let ranker = EmbeddingRanker::new(HashingEmbedder::new(), DEFAULT_TOP_K);
    let query = "Persona: Travel Planner. Task: Create a travel itinerary.";

    let mut group = c.benchmark_group("hashing_rank");
    for count in [10, 100, 1000].iter() {
        let sections = synthetic_sections(*count);
        group.bench_function(format!("{}_sections", count), |b| {
            b.iter(|| ranker.rank(black_box(query), black_box(&sections)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_line_grouping, bench_outline, bench_ranking);
criterion_main!(benches);
