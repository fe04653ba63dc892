use bencher::{Target, TestCase};
use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use futures::executor::block_on;
use micro_router::BufferedResponse;
use std::hint::black_box;

fn create_test_cases() -> Vec<TestCase> {
    vec![
        TestCase::new("small_first", 8, Target::First),
        TestCase::new("small_last", 8, Target::Last),
        TestCase::new("small_missing", 8, Target::Missing),
        TestCase::new("large_first", 256, Target::First),
        TestCase::new("large_last", 256, Target::Last),
        TestCase::new("large_missing", 256, Target::Missing),
    ]
}

fn benchmark_dispatch(criterion: &mut Criterion) {
    let test_cases = create_test_cases();
    let mut group = criterion.benchmark_group("dispatch");

    for case in test_cases {
        let dispatcher = case.router().dispatcher();
        group.bench_with_input(BenchmarkId::from_parameter(case.name()), &case, |b, case| {
            b.iter_batched(
                || (case.request(), BufferedResponse::new()),
                |(req, mut res)| {
                    block_on(dispatcher.serve(req, &mut res)).expect("handlers in the bench never fail");
                    black_box(res);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn benchmark_compose(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("compose");

    for routes in [8, 256] {
        let child = TestCase::new("child", routes, Target::First).router();
        group.bench_with_input(BenchmarkId::from_parameter(routes), &child, |b, child| {
            b.iter_batched(
                || TestCase::new("parent", routes, Target::First).router(),
                |mut parent| black_box(parent.compose([child])),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(router, benchmark_dispatch, benchmark_compose);
criterion_main!(router);
