use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use micro_http_text::protocol::Message;
use micro_http_text::{build, parse};

const GET_REQUEST: &str = "GET /features?p1=v1&p2=v2 HTTP/1.1\r\n\
    Host: example.com\r\n\
    User-Agent: bench/1.0\r\n\
    Accept: */*\r\n\
    Cookie: session=38afes7a8; theme=dark\r\n\r\n";

const URL_ENCODED_REQUEST: &str = "POST /submit HTTP/1.1\r\n\
    Host: example.com\r\n\
    Content-Type: application/x-www-form-urlencoded\r\n\r\n\
    id=11&message=Hello%20World&tags=a&tags=b";

const MULTIPART_REQUEST: &str = "POST /profile HTTP/1.1\r\n\
    Host: example.com\r\n\
    Content-Type: multipart/form-data; boundary=XyZ\r\n\r\n\
    --XyZ\r\nContent-Disposition: form-data; name=\"firstName\"\r\n\r\nAda\r\n\
    --XyZ\r\nContent-Disposition: form-data; name=\"avatar\"; filename=\"a.txt\"\r\nContent-Type: text/plain\r\n\r\nhello\r\n\
    --XyZ--";

const CHUNKED_RESPONSE: &str = "HTTP/1.1 200 OK\r\n\
    Transfer-Encoding: chunked\r\n\
    Set-Cookie: a=1; Path=/\r\n\r\n\
    19\r\nThe quick brown fox jumps\r\n12\r\n over the lazy dog\r\n";

fn cases() -> [(&'static str, &'static str); 4] {
    [
        ("get_request", GET_REQUEST),
        ("url_encoded_request", URL_ENCODED_REQUEST),
        ("multipart_request", MULTIPART_REQUEST),
        ("chunked_response", CHUNKED_RESPONSE),
    ]
}

fn benchmark_parse(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("parse");

    for (name, raw) in cases() {
        group.throughput(Throughput::Bytes(raw.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), raw, |b, raw| {
            b.iter(|| black_box(parse(black_box(raw)).expect("input should be valid http message")));
        });
    }

    group.finish();
}

fn benchmark_build(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("build");

    for (name, raw) in cases() {
        let message: Message = parse(raw).expect("input should be valid http message");
        group.throughput(Throughput::Bytes(raw.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &message, |b, message| {
            b.iter(|| black_box(build(black_box(message)).expect("message should be buildable")));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_parse, benchmark_build);
criterion_main!(benches);
