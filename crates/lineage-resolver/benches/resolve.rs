//! Resolution benchmarks
//!
//! Measures resolution cost as the distance between leaf and ancestor grows,
//! with every level renaming the propagated slot.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lineage_metadata::DeclarationTable;
use lineage_resolver::{DeclId, TypeResolver, TypeRef};

/// `Level0<T>`, `Level{n}<T{n}> extends Level{n-1}<List<T{n}>>`, `Leaf extends Level{depth}<String>`
fn renaming_chain(depth: usize) -> (DeclarationTable, DeclId, DeclId) {
    let mut builder = DeclarationTable::builder();
    let root = builder.declare("Level0", ["T0"], None);

    for level in 1..=depth {
        let slot = format!("T{}", level);
        builder.declare(
            format!("Level{}", level),
            [slot.clone()],
            Some(TypeRef::parameterized(
                format!("Level{}", level - 1),
                vec![TypeRef::parameterized("List", vec![TypeRef::variable(slot)])],
            )),
        );
    }

    let leaf = builder.declare(
        "Leaf",
        Vec::<String>::new(),
        Some(TypeRef::parameterized(
            format!("Level{}", depth),
            vec![TypeRef::concrete("String")],
        )),
    );

    let table = builder.build().expect("benchmark hierarchy is valid");
    (table, leaf, root)
}

fn bench_chain_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_chain_depth");

    for depth in [1usize, 8, 32, 128] {
        let (table, leaf, root) = renaming_chain(depth);
        let resolver = TypeResolver::new(&table);

        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, _| {
            b.iter(|| {
                resolver
                    .resolve_parameter(black_box(leaf), black_box(root), 0)
                    .expect("slot is bound")
            })
        });
    }

    group.finish();
}

fn bench_table_build(c: &mut Criterion) {
    c.bench_function("build_table_128_levels", |b| {
        b.iter(|| renaming_chain(black_box(128)))
    });
}

criterion_group!(benches, bench_chain_depth, bench_table_build);
criterion_main!(benches);
