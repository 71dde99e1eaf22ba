use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use schoolgate::auth::{evaluate, read_session, CookieJar};
use schoolgate::config::CookieNames;
use schoolgate::Session;

fn bench_guard_decision(c: &mut Criterion) {
    let admin = Session::new(true, Some("ADMIN".to_string()));
    let anonymous = Session::logged_out();

    c.bench_function("guard_proceed", |b| {
        b.iter(|| evaluate(black_box("/admin/users"), black_box(&admin)))
    });

    c.bench_function("guard_redirect_login", |b| {
        b.iter(|| evaluate(black_box("/teacher/classes"), black_box(&anonymous)))
    });

    c.bench_function("guard_unmatched", |b| {
        b.iter(|| evaluate(black_box("/api/admin/users"), black_box(&admin)))
    });
}

fn bench_cookie_parsing(c: &mut Criterion) {
    let names = CookieNames::default();
    let header = "accessToken=eyJhbGciOiJIUzI1NiJ9.payload.sig; userRole=TEACHER; schoolgateClient=0b6f; theme=dark";

    c.bench_function("cookie_jar_parse", |b| {
        b.iter(|| CookieJar::parse(black_box(header)))
    });

    let jar = CookieJar::parse(header);
    c.bench_function("read_session", |b| {
        b.iter(|| read_session(black_box(&jar), black_box(&names)))
    });
}

criterion_group!(benches, bench_guard_decision, bench_cookie_parsing);
criterion_main!(benches);
