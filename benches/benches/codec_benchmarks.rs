use std::{hint::black_box, io::Cursor};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nbtree::{
    nbt::encode::write_named_tag, read_tag, CompressionMode, Document, NamedTag, Tag,
    TagCompound, TagKind, TagList,
};

/// Дерево, похожее на типичный файл: вложенные Compound, списки и массивы.
fn sample_tree(entries: usize) -> NamedTag {
    let mut items = TagList::new(TagKind::Compound);
    for i in 0..entries {
        let mut c = TagCompound::new();
        c.insert("id", Tag::String(format!("item_{i}")));
        c.insert("count", Tag::Byte((i % 64) as i8));
        c.insert("damage", Tag::Short(i as i16));
        c.insert("pos", Tag::LongArray(vec![i as i64; 3]));
        items.push(Tag::Compound(c)).unwrap();
    }

    let mut root = TagCompound::new();
    root.insert("Items", Tag::List(items));
    root.insert("Heightmap", Tag::IntArray((0..256).collect()));
    root.insert("Blocks", Tag::ByteArray(vec![1; 4096]));
    root.insert("LastUpdate", Tag::Long(1_264_099_775_885));
    NamedTag::new("Level", root)
}

fn encode(root: &NamedTag) -> Vec<u8> {
    let mut buf = Vec::new();
    write_named_tag(&mut buf, root).unwrap();
    buf
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    for entries in [10usize, 100, 1000] {
        let bytes = encode(&sample_tree(entries));
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(entries), &bytes, |b, bytes| {
            b.iter(|| read_tag(&mut Cursor::new(black_box(bytes))).unwrap())
        });
    }
    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    for entries in [10usize, 100, 1000] {
        let tree = sample_tree(entries);
        group.bench_with_input(BenchmarkId::from_parameter(entries), &tree, |b, tree| {
            b.iter(|| encode(black_box(tree)))
        });
    }
    group.finish();
}

fn bench_document_modes(c: &mut Criterion) {
    let tree = sample_tree(200);
    let mut group = c.benchmark_group("document");
    for mode in [
        CompressionMode::Uncompressed,
        CompressionMode::Gzip,
        CompressionMode::Zlib,
    ] {
        let mut doc = Document::with_root(tree.name.clone(), tree.tag.clone());
        doc.set_compression(mode);
        let mut saved = Vec::new();
        doc.save(&mut saved).unwrap();

        group.bench_function(BenchmarkId::new("save", mode), |b| {
            b.iter(|| {
                let mut out = Vec::with_capacity(saved.len());
                doc.save(&mut out).unwrap();
                out
            })
        });
        group.bench_function(BenchmarkId::new("load", mode), |b| {
            b.iter(|| Document::from_reader(&mut Cursor::new(black_box(&saved))).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_decode, bench_encode, bench_document_modes);
criterion_main!(benches);
