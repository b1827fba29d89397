use criterion::{Criterion, black_box, criterion_group, criterion_main};
use infinistream_core::{
    OperatingMode, RenderCfg, ReportedMode, WidgetState, parse_update, render,
};

fn bench_render(c: &mut Criterion) {
    let cfg = RenderCfg::default();
    let states: Vec<WidgetState> = OperatingMode::ALL
        .into_iter()
        .map(ReportedMode::Known)
        .chain([ReportedMode::classify("DEFROST")])
        .enumerate()
        .map(|(i, mode)| WidgetState {
            mode,
            turbidity: i as f64 * 25.0,
        })
        .collect();

    c.bench_function("render_all_modes", |b| {
        b.iter(|| {
            for s in &states {
                black_box(render(black_box(s), &cfg));
            }
        })
    });
}

fn bench_parse(c: &mut Criterion) {
    let body = br#"{"mode":"SHOWER","turbidity":60}"#;
    c.bench_function("parse_update", |b| {
        b.iter(|| black_box(parse_update(black_box(body))))
    });
}

criterion_group!(benches, bench_render, bench_parse);
criterion_main!(benches);
