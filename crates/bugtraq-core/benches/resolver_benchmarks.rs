use bugtraq_core::{BugtraqConfig, MemorySource};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn named_trackers(count: usize) -> (MemorySource, MemorySource) {
    let mut repo = MemorySource::new();
    let mut base = MemorySource::new();
    for i in 0..count {
        let name = format!("tracker{i}");
        // Half of the trackers only exist in the base file
        let target = if i % 2 == 0 { &mut repo } else { &mut base };
        target.set("bugtraq", Some(&name), "url", format!("https://issues/{i}/%BUGID%"));
        target.set("bugtraq", Some(&name), "logregex", "[A-Z]+-(\\d+)");
        base.set("bugtraq", Some(&name), "projects", "web, api, cli");
    }
    (repo, base)
}

fn benchmark_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");

    let anonymous = MemorySource::new()
        .with("bugtraq", None, "url", "https://issues/%BUGID%")
        .with("bugtraq", None, "logregex", "refs? #\\d+\n(\\d+)");
    group.bench_function("anonymous_two_line", |b| {
        b.iter(|| BugtraqConfig::read(black_box(&anonymous), None).unwrap());
    });

    let (repo, base) = named_trackers(50);
    group.bench_function("named_50_two_layers", |b| {
        b.iter(|| BugtraqConfig::read(black_box(&repo), Some(black_box(&base))).unwrap());
    });

    group.finish();
}

criterion_group!(benches, benchmark_resolve);
criterion_main!(benches);
