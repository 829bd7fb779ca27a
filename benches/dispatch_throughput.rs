//! Stage dispatch and end-to-end PDF rendering benchmarks

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use folio::document::{default_registry, DOCUMENT, PDF};
use folio::{
    render, FormatterError, FormatterRegistry, HandlerFormatter, OptionsContext, RenderOutput,
    RendererSpec, StageHandlers,
};
use once_cell::sync::Lazy;
use serde_json::json;
use std::hint::black_box;

#[derive(Default)]
struct Counter {
    calls: usize,
}

impl Counter {
    fn step(&mut self, _: &OptionsContext) -> Result<(), FormatterError> {
        self.calls += 1;
        Ok(())
    }

    fn output(&mut self) -> Result<RenderOutput, FormatterError> {
        Ok(RenderOutput::Text(self.calls.to_string()))
    }
}

fn stage_names(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("stage_{}", i)).collect()
}

static COUNTER: Lazy<StageHandlers<Counter>> = Lazy::new(|| {
    stage_names(64)
        .into_iter()
        .fold(StageHandlers::new(), |handlers, name| handlers.on_build(name, Counter::step))
        .with_output(Counter::output)
});

fn benchmark_stage_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("stage_dispatch");
    let mut registry = FormatterRegistry::new();
    registry.register("counter", "text", || {
        Box::new(HandlerFormatter::new(Counter::default(), &COUNTER))
    });

    for stage_count in [1, 8, 64] {
        let spec = stage_names(stage_count)
            .into_iter()
            .fold(RendererSpec::builder("counter").declare_required_option("title"), |b, name| {
                b.declare_stage(name)
            })
            .build();

        group.bench_with_input(BenchmarkId::new("stages", stage_count), &spec, |b, spec| {
            b.iter(|| {
                render(black_box(spec), &registry, "text", [("title", "bench")], None)
                    .expect("Failed to render")
            });
        });
    }

    group.finish();
}

fn benchmark_quote_pdf(c: &mut Criterion) {
    let registry = default_registry();
    let text = "A foolish consistency is the hobgoblin of little minds. ".repeat(4);

    c.bench_function("quote_pdf", |b| {
        b.iter(|| {
            render(
                &DOCUMENT,
                &registry,
                PDF,
                [
                    ("author", json!("Ralph Waldo Emerson")),
                    ("heading", json!("a good quote")),
                    ("text", json!(text)),
                ],
                None,
            )
            .expect("Failed to render PDF")
        });
    });
}

criterion_group!(benches, benchmark_stage_dispatch, benchmark_quote_pdf);
criterion_main!(benches);
