use chrono::{Duration, NaiveDate};
use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use slirc_log::{LogFormat, Scanner};
use slirc_stats::{Ingestor, NewMessage, Stats};
use std::io::Cursor;

// Synthetic log shaped like a busy channel: a handful of speakers, a few
// joins and parts, and the odd URL.
fn synthetic_log(lines: usize) -> String {
    let nicks = ["dylan", "Aaron", "knivey", "Scott", "Knio"];
    let start = NaiveDate::from_ymd_opt(2013, 8, 7)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap();

    let mut log = String::new();
    for i in 0..lines {
        let stamp = (start + Duration::seconds(i as i64 * 17)).format("%Y-%m-%d %H:%M:%S");
        let nick = nicks[i % nicks.len()];
        match i % 20 {
            0 => log.push_str(&format!("{stamp}\t-->\t{nick} (u@h) has joined #deviate\n")),
            10 => log.push_str(&format!("{stamp}\t<--\t{nick} (u@h) has left #deviate (later)\n")),
            5 => log.push_str(&format!("{stamp}\t@{nick}\tsee https://zqz.ca/{i} for the log\n")),
            _ => log.push_str(&format!("{stamp}\t{nick}\tthe quick brown fox {i} jumps\n")),
        }
    }
    log
}

fn ingest_benchmark(c: &mut Criterion) {
    let log = synthetic_log(10_000);
    let scanner = Scanner::new("bench.log", "zqz", "#deviate", LogFormat::Weechat);

    let mut group = c.benchmark_group("ingest");
    group.throughput(Throughput::Bytes(log.len() as u64));

    group.bench_function("weechat_10k_lines", |b| {
        b.iter(|| {
            let mut stats = Stats::new();
            let report = Ingestor::new(&mut stats)
                .ingest_reader(&scanner, Cursor::new(log.as_bytes()))
                .unwrap();
            black_box(report)
        })
    });

    group.finish();
}

fn add_message_benchmark(c: &mut Criterion) {
    let at = NaiveDate::from_ymd_opt(2013, 8, 7)
        .and_then(|d| d.and_hms_opt(16, 50, 2))
        .unwrap();

    let mut group = c.benchmark_group("stats");
    group.throughput(Throughput::Elements(1));

    group.bench_function("add_chat_message", |b| {
        let mut stats = Stats::new();
        b.iter(|| {
            stats
                .add_message(black_box(NewMessage::msg(
                    "zqz",
                    "#deviate",
                    "dylan",
                    at,
                    "Hello world, see http://zqz.ca",
                )))
                .map(|m| m.id())
                .unwrap()
        })
    });

    group.finish();
}

criterion_group!(benches, ingest_benchmark, add_message_benchmark);
criterion_main!(benches);
