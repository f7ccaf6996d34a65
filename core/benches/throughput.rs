//! Throughput of the stream facades over the reference transforms.

use std::io::{Read, Write};

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use cryptostream_core::stream::{TransformReader, TransformWriter};
use cryptostream_core::transform::codecs::{Aes256CbcDecryptor, Aes256CbcEncryptor, Crc32Append, IdentityTransform};

const KEY: [u8; 32] = [0x42; 32];
const IV: [u8; 16] = [0x24; 16];
const PAYLOAD_LEN: usize = 1 << 20;

fn bench_write(c: &mut Criterion) {
    let payload = vec![0xA5u8; PAYLOAD_LEN];
    let mut group = c.benchmark_group("write");
    group.throughput(Throughput::Bytes(PAYLOAD_LEN as u64));

    for buffer_size in [256usize, 8192, 65536] {
        group.bench_with_input(BenchmarkId::new("identity", buffer_size), &buffer_size, |b, &size| {
            b.iter(|| {
                let mut w = TransformWriter::with_buffer_size(Vec::with_capacity(PAYLOAD_LEN), IdentityTransform::new(), size).unwrap();
                w.write_all(black_box(&payload)).unwrap();
                w.finish().unwrap()
            });
        });

        group.bench_with_input(BenchmarkId::new("crc32", buffer_size), &buffer_size, |b, &size| {
            b.iter(|| {
                let mut w = TransformWriter::with_buffer_size(Vec::with_capacity(PAYLOAD_LEN + 4), Crc32Append::new(), size).unwrap();
                w.write_all(black_box(&payload)).unwrap();
                w.finish().unwrap()
            });
        });

        group.bench_with_input(BenchmarkId::new("aes256-cbc", buffer_size), &buffer_size, |b, &size| {
            b.iter(|| {
                let enc = Aes256CbcEncryptor::new(&KEY, &IV).unwrap();
                let mut w = TransformWriter::with_buffer_size(Vec::with_capacity(PAYLOAD_LEN + 16), enc, size).unwrap();
                w.write_all(black_box(&payload)).unwrap();
                w.finish().unwrap()
            });
        });
    }

    group.finish();
}

fn bench_read(c: &mut Criterion) {
    let payload = vec![0x5Au8; PAYLOAD_LEN];
    let mut w = TransformWriter::new(Vec::new(), Aes256CbcEncryptor::new(&KEY, &IV).unwrap()).unwrap();
    w.write_all(&payload).unwrap();
    let ciphertext = w.finish().unwrap();

    let mut group = c.benchmark_group("read");
    group.throughput(Throughput::Bytes(PAYLOAD_LEN as u64));

    for buffer_size in [256usize, 8192, 65536] {
        group.bench_with_input(BenchmarkId::new("aes256-cbc", buffer_size), &buffer_size, |b, &size| {
            b.iter(|| {
                let dec = Aes256CbcDecryptor::new(&KEY, &IV).unwrap();
                let mut r = TransformReader::with_buffer_size(black_box(&ciphertext[..]), dec, size).unwrap();
                let mut out = Vec::with_capacity(PAYLOAD_LEN);
                r.read_to_end(&mut out).unwrap();
                out
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_write, bench_read);
criterion_main!(benches);
