//! Benchmarks for prompt-source rendering performance.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use promptweave::component::DEFAULT_REGISTRY;
use promptweave::models::NamedPromptBatchInput;
use promptweave::service::{PromptService, PromptServiceConfig};
use serde_json::Map;
use std::collections::HashMap;
use std::sync::OnceLock;

static SERVICE: OnceLock<PromptService> = OnceLock::new();

fn get_service() -> &'static PromptService {
    SERVICE.get_or_init(|| PromptService::new(PromptServiceConfig::default()).expect("failed to create PromptService"))
}

fn simple_prompt() -> String {
    r#"<Prompt name="greeting">
  <Task verb="summarize" subject="the attached notes" />
</Prompt>"#
        .to_string()
}

fn prompt_with_steps() -> String {
    r#"<Prompt name="plan" noSuccessCriteria>
  <Task verb="plan" subject="a database migration" />
  <Steps>
    <Step>Audit the existing schema</Step>
    <Step>Draft the migration script</Step>
    <Step>Run it against a staging copy</Step>
  </Steps>
</Prompt>"#
        .to_string()
}

fn generate_sources(count: usize) -> HashMap<String, String> {
    let mut sources = HashMap::with_capacity(count);
    for i in 0..count {
        sources.insert(
            format!("prompt{i}.prompt"),
            format!(
                r#"<Prompt name="p{i}"><Task verb="summarize" subject="item {i}" /></Prompt>"#
            ),
        );
    }
    sources
}

fn render_benchmarks(c: &mut Criterion) {
    let service = get_service();

    let content = simple_prompt();
    c.bench_function("simple_prompt", |b| {
        b.iter(|| {
            let mut sources = HashMap::new();
            sources.insert("test.prompt".to_string(), content.clone());
            let input = NamedPromptBatchInput { sources, inputs: Map::new() };
            black_box(service.render_batch_blocking(&input, &DEFAULT_REGISTRY).unwrap())
        })
    });

    let content = prompt_with_steps();
    c.bench_function("prompt_with_steps", |b| {
        b.iter(|| {
            let mut sources = HashMap::new();
            sources.insert("test.prompt".to_string(), content.clone());
            let input = NamedPromptBatchInput { sources, inputs: Map::new() };
            black_box(service.render_batch_blocking(&input, &DEFAULT_REGISTRY).unwrap())
        })
    });

    let mut group = c.benchmark_group("batch_size");
    for count in [1, 5, 10, 25].iter() {
        let sources = generate_sources(*count);
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, _| {
            b.iter(|| {
                let input = NamedPromptBatchInput { sources: sources.clone(), inputs: Map::new() };
                black_box(service.render_batch_blocking(&input, &DEFAULT_REGISTRY).unwrap())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, render_benchmarks);
criterion_main!(benches);
