use std::thread;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use mtbuf::StreamBuffer;

const STREAM_TOTAL: usize = 1 << 20;
const CHUNK: usize = 4096;

fn bench_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("cycle");
    group.throughput(Throughput::Bytes(CHUNK as u64));
    group.bench_function("write_read_4kb", |b| {
        let buf = StreamBuffer::new(CHUNK);
        let data = vec![0xabu8; CHUNK];
        let mut out = vec![0u8; CHUNK];
        b.iter(|| {
            buf.write(&data).unwrap();
            buf.read(&mut out);
        });
    });
    group.finish();
}

fn bench_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("stream");
    group.throughput(Throughput::Bytes(STREAM_TOTAL as u64));
    // Capacity well below the total so the backpressure path is hot.
    group.bench_function("producer_consumer_1mb", |b| {
        b.iter(|| {
            let buf = StreamBuffer::new(64 * 1024);
            let writer = buf.clone();

            let producer = thread::spawn(move || {
                let chunk = vec![0x5au8; CHUNK];
                for _ in 0..STREAM_TOTAL / CHUNK {
                    writer.write(&chunk).unwrap();
                }
                writer.close();
            });

            let mut out = vec![0u8; CHUNK];
            let mut received = 0;
            loop {
                let n = buf.read(&mut out);
                received += n;
                if n < out.len() {
                    break;
                }
            }

            producer.join().unwrap();
            assert_eq!(received, STREAM_TOTAL);
        });
    });
    group.finish();
}

criterion_group!(benches, bench_cycle, bench_stream);
criterion_main!(benches);
