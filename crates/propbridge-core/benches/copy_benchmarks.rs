//! Benchmarks for representative copies
//!
//! Copyright (c) 2025 Propbridge Team
//! Licensed under the Apache-2.0 license

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use propbridge_core::bean::{EnumType, PropertyType, Record, TypeDescriptor, Value};
use propbridge_core::copier::path;
use propbridge_core::schema::TypeRegistry;
use propbridge_core::{CopyPlan, Copier};
use serde_json::json;
use std::sync::Arc;

fn wide_type(name: &str, width: usize) -> Arc<TypeDescriptor> {
    (0..width)
        .fold(TypeDescriptor::builder(name), |builder, i| {
            builder.property(format!("field{}", i), PropertyType::String)
        })
        .build()
}

fn wide_record(ty: Arc<TypeDescriptor>, width: usize) -> Record {
    (0..width).fold(Record::new(ty), |record, i| {
        record.with(&format!("field{}", i), format!("value {}", i))
    })
}

fn bench_domain_to_dto(c: &mut Criterion) {
    let status = EnumType::new("Status", ["FIRST", "SECOND"]);
    let nested = TypeDescriptor::builder("NestedProp")
        .property("prop1", PropertyType::String)
        .build();
    let domain_type = TypeDescriptor::builder("Domain")
        .property("extraProp", PropertyType::String)
        .property("enumProp", PropertyType::Enum(status.clone()))
        .property("nestedProp", PropertyType::Bean(nested.clone()))
        .build();
    let dto_type = TypeDescriptor::builder("Dto")
        .property("extraProp", PropertyType::String)
        .property("enumProp", PropertyType::String)
        .property("prop1", PropertyType::String)
        .build();

    let domain = Record::new(domain_type)
        .with("extraProp", "x")
        .with("enumProp", status.value_of("SECOND"))
        .with(
            "nestedProp",
            Value::Bean(Box::new(Record::new(nested).with("prop1", "deep"))),
        );

    c.bench_function("domain_to_dto", |b| {
        b.iter(|| {
            Copier::new(Record::new(dto_type.clone()))
                .source(black_box(&domain))
                .map("nestedProp.prop1", "prop1")
                .execute()
        })
    });

    c.bench_function("resolve_nested_path", |b| {
        b.iter(|| path::resolve(black_box(&domain), black_box("nestedProp.prop1")))
    });
}

fn bench_wide_copy(c: &mut Criterion) {
    let mut group = c.benchmark_group("wide_copy");
    for width in [8usize, 64, 256] {
        let from = wide_record(wide_type("From", width), width);
        let to_type = wide_type("To", width);
        group.bench_with_input(BenchmarkId::from_parameter(width), &width, |b, _| {
            b.iter(|| {
                Copier::new(Record::new(to_type.clone()))
                    .source(black_box(&from))
                    .execute()
            })
        });
    }
    group.finish();
}

fn bench_plan_run(c: &mut Criterion) {
    let registry = TypeRegistry::from_json_str(
        r#"{
            "types": {
                "Person": [
                    { "name": "name", "type": "string" },
                    { "name": "email", "type": "string" }
                ],
                "Contact": [
                    { "name": "displayName", "type": "string" },
                    { "name": "email", "type": "string" }
                ]
            }
        }"#,
    )
    .unwrap();
    let plan = CopyPlan::from_json_str(
        r#"{
            "target": "Contact",
            "sources": [
                { "type": "Person", "mapping": { "name": "displayName" }, "converters": ["trim"] }
            ]
        }"#,
    )
    .unwrap();
    let docs = vec![json!({ "name": " Ada ", "email": "ada@example.com" })];

    c.bench_function("plan_run", |b| {
        b.iter(|| plan.run(black_box(&registry), None, black_box(&docs)))
    });
}

criterion_group!(benches, bench_domain_to_dto, bench_wide_copy, bench_plan_run);
criterion_main!(benches);
