use criterion::Criterion;
use criterion::black_box;
use criterion::criterion_group;
use criterion::criterion_main;
use ratatui::style::Style;
use richtext_core::theme::Theme;
use richtext_markup::document::FormatRenderOptions;
use richtext_markup::document::FormattedDocument;
use richtext_markup::parse_inline;
use richtext_markup::view::FormattedTextView;

fn sample_text(items: usize) -> String {
    let mut s = String::new();
    s.push_str("A long paragraph to stress wrapping. ");
    for _ in 0..12 {
        s.push_str("The **quick** brown *fox* jumps over the __lazy__ dog. ");
    }
    s.push_str("\n\n> A quoted line with **bold *literal* text** inside.\n");
    for i in 0..items {
        s.push_str(&format!("{}. ordered item with *emphasis* number {i}\n", i + 1));
        s.push_str("- bullet with __underline__ and **bold**\n");
    }
    s
}

fn bench_parse_inline(c: &mut Criterion) {
    let line = "The **quick** brown *fox* jumps over the __lazy__ dog. *a**b*c** ".repeat(20);
    c.bench_function("parse_inline/long_line", |b| {
        b.iter(|| black_box(parse_inline(black_box(&line))))
    });
}

fn bench_render_document(c: &mut Criterion) {
    let theme = Theme::default();
    let options = FormatRenderOptions::default();
    let doc = FormattedDocument::parse(sample_text(200));
    c.bench_function("document/render_w80", |b| {
        b.iter(|| black_box(doc.render(80, &theme, &options, Style::default())))
    });
}

fn bench_view_resize(c: &mut Criterion) {
    let theme = Theme::default();
    let mut view = FormattedTextView::new();
    view.set_text(&sample_text(200));
    let mut width = 60u16;
    c.bench_function("view/relayout_on_resize", |b| {
        b.iter(|| {
            width = if width == 60 { 61 } else { 60 };
            black_box(view.lines_for_width(width, &theme))
        })
    });
}

criterion_group!(
    benches,
    bench_parse_inline,
    bench_render_document,
    bench_view_resize
);
criterion_main!(benches);
