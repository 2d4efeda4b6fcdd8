// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `understory_class_cascade` compilation and resolution.

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use serde_json::{Map, Value, json};

use understory_class_cascade::{ClassResolver, ComponentPath, OverrideTree};
use understory_class_config::BindingsFile;

/// A site-sized tree: `sections` containers, each overriding every leaf part
/// directly and under one nested container.
fn site_bindings(sections: usize, leaves: usize) -> BindingsFile {
    let mut tree = Map::new();
    for leaf in 0..leaves {
        tree.insert(
            format!("leaf-{leaf}"),
            json!({ "classes": [format!("leaf-{leaf}")] }),
        );
    }
    for section in 0..sections {
        let mut node = Map::new();
        let mut nested = Map::new();
        for leaf in 0..leaves {
            node.insert(
                format!("leaf-{leaf}"),
                json!({ "classes": { "add": [format!("in-section-{section}")] } }),
            );
            nested.insert(
                format!("leaf-{leaf}"),
                json!({ "classes": [format!("deep-{section}-{leaf}")] }),
            );
        }
        node.insert("panel".to_owned(), Value::Object(nested));
        tree.insert(format!("section-{section}"), Value::Object(node));
    }
    BindingsFile::from_value(json!({ "bindings": Value::Object(tree) }))
        .expect("generated bindings are valid")
}

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("class_cascade/compile");
    for sections in [4_usize, 32] {
        let file = site_bindings(sections, 16);
        let trees: Vec<OverrideTree> = file.trees().to_vec();
        group.bench_function(BenchmarkId::from_parameter(sections), |b| {
            b.iter(|| black_box(ClassResolver::from_trees(&trees)));
        });
    }
    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let resolver = site_bindings(32, 16).build_resolver();
    let deep: ComponentPath = ["page", "section-7", "grid", "panel", "cell"]
        .into_iter()
        .collect();
    let shallow = ComponentPath::root().child("section-3");
    let miss = ComponentPath::root().child("footer");

    let mut group = c.benchmark_group("class_cascade/resolve");

    group.bench_function("warm/deep", |b| {
        let _ = resolver.class_names_at("leaf-5", &deep);
        b.iter(|| black_box(resolver.class_names_at("leaf-5", &deep)));
    });

    group.bench_function("warm/shallow", |b| {
        let _ = resolver.class_names_at("leaf-5", &shallow);
        b.iter(|| black_box(resolver.class_names_at("leaf-5", &shallow)));
    });

    group.bench_function("cold/deep", |b| {
        b.iter_batched(
            || resolver.clear_cache(),
            |()| black_box(resolver.class_names_at("leaf-5", &deep)),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("cold/no_chain_match", |b| {
        b.iter_batched(
            || resolver.clear_cache(),
            |()| black_box(resolver.class_names_at("leaf-5", &miss)),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("unknown_part", |b| {
        b.iter(|| black_box(resolver.class_names_at("nonexistent", &deep)));
    });

    group.finish();
}

criterion_group!(benches, bench_compile, bench_resolve);
criterion_main!(benches);
