use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use xmlkit::{decode, encode, parse, record};

const ENTRY_XML: &str = r#"<entry id="7" lang="en"><title>Release notes</title><score>4.75</score><tag>rust</tag><tag>xml</tag><tag>codec</tag><link href="https://example.org/a">first</link><link href="https://example.org/b"/></entry>"#;

record! {
    struct Entry as "entry" {
        id: u32 => attribute,
        lang: Option<String> => attribute,
        title: String => child,
        score: f64 => child,
        tag: Vec<String> => children,
        link: Vec<Link> => children,
    }
}

record! {
    struct Link {
        href: String => attribute,
        text: Option<String> => text,
    }
}

fn bench_decode(c: &mut Criterion) {
    let Ok(document) = parse(ENTRY_XML.as_bytes()) else {
        return;
    };
    c.bench_function("codec_decode_entry", |b| {
        b.iter(|| decode::<Entry>(black_box(&document)))
    });
}

fn bench_encode(c: &mut Criterion) {
    let Ok(entry) = parse(ENTRY_XML.as_bytes())
        .map_err(xmlkit::Error::from)
        .and_then(|document| Ok(decode::<Entry>(&document)?))
    else {
        return;
    };
    c.bench_function("codec_encode_entry", |b| {
        b.iter(|| encode(black_box(&entry)))
    });
}

criterion_group!(benches, bench_decode, bench_encode);
criterion_main!(benches);
