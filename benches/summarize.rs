use criterion::{Criterion, criterion_group, criterion_main};
use csv_summary::{
    dataset::Dataset,
    summary::{SummaryConfig, build_report},
};

fn generate_ads(rows: usize) -> Dataset {
    let headers = ["page_id", "ad_id", "spend", "impressions", "status"]
        .iter()
        .map(|h| h.to_string())
        .collect();
    let records = (0..rows).map(|i| {
        let status = match i % 3 {
            0 => "active",
            1 => "paused",
            _ => "archived",
        };
        let spend = if i % 17 == 0 {
            "n/a".to_string()
        } else {
            format!("{:.2}", (i % 250) as f64 * 1.75)
        };
        vec![
            format!("page-{}", i % 40),
            format!("ad-{}", i % 7),
            spend,
            ((i * 31) % 10_000).to_string(),
            status.to_string(),
        ]
    });
    Dataset::from_records(headers, records).expect("dataset")
}

fn bench_summarize(c: &mut Criterion) {
    let dataset = generate_ads(50_000);
    let overall = SummaryConfig::default();
    let grouped = SummaryConfig {
        group_by: Some(vec!["page_id".to_string(), "ad_id".to_string()]),
        top_n: 5,
    };

    let mut group = c.benchmark_group("summarize");
    group.sample_size(20);
    group.bench_function("overall", |b| {
        b.iter(|| build_report(&dataset, &overall).expect("report"))
    });
    group.bench_function("grouped_top5", |b| {
        b.iter(|| build_report(&dataset, &grouped).expect("report"))
    });
    group.finish();
}

criterion_group!(benches, bench_summarize);
criterion_main!(benches);
