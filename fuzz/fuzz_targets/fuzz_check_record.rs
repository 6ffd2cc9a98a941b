#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use fieldcheck::shape::{Field, Kind, Record, Shape};
use fieldcheck::transform::Sanitizer;
use libfuzzer_sys::fuzz_target;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

#[derive(Serialize, Deserialize)]
struct Entry {
    #[serde(rename = "entry_label")]
    label: String,
    score: i64,
}

impl Record for Entry {
    fn shape() -> &'static Shape {
        static SHAPE: LazyLock<Shape> = LazyLock::new(|| {
            Shape::new("Entry")
                .field(
                    Field::new("label", Kind::Scalar)
                        .external("entry_label")
                        .rules("required,max=20")
                        .mods("trim"),
                )
                .field(Field::new("score", Kind::Scalar).rules("lte=100"))
        });
        &SHAPE
    }
}

#[derive(Serialize, Deserialize)]
struct Sample {
    title: String,
    count: i64,
    tags: Vec<String>,
    entries: Vec<Entry>,
    note: Option<String>,
}

impl Record for Sample {
    fn shape() -> &'static Shape {
        static SHAPE: LazyLock<Shape> = LazyLock::new(|| {
            Shape::new("Sample")
                .field(
                    Field::new("title", Kind::Scalar)
                        .rules("required,max=40")
                        .messages("required:sample.title.required")
                        .mods("trim,lcase"),
                )
                .field(Field::new("count", Kind::Scalar).rules("gte=0"))
                .field(
                    Field::new("tags", Kind::List(Box::new(Kind::Scalar)))
                        .rules("dive,required")
                        .mods("trim"),
                )
                .field(
                    Field::new("entries", Kind::List(Box::new(Kind::Struct(Entry::shape))))
                        .rules("dive"),
                )
                .field(
                    Field::new("note", Kind::Optional(Box::new(Kind::Scalar)))
                        .rules("omitnil,min=2"),
                )
        });
        &SHAPE
    }
}

/// Generate an arbitrary record from fuzzer bytes.
fn arbitrary_sample(u: &mut Unstructured<'_>) -> arbitrary::Result<Sample> {
    let mut tags = Vec::new();
    for _ in 0..u.int_in_range(0..=4)? {
        tags.push(String::arbitrary(u)?);
    }
    let mut entries = Vec::new();
    for _ in 0..u.int_in_range(0..=4)? {
        entries.push(Entry {
            label: String::arbitrary(u)?,
            score: i64::arbitrary(u)?,
        });
    }
    Ok(Sample {
        title: String::arbitrary(u)?,
        count: i64::arbitrary(u)?,
        tags,
        entries,
        note: Option::<String>::arbitrary(u)?,
    })
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let mut sample = match arbitrary_sample(&mut u) {
        Ok(s) => s,
        Err(_) => return,
    };

    // Every rule and directive above is registered, so neither pass may
    // report an infrastructure error, let alone panic.
    fieldcheck::check(&sample).expect("all rules registered");
    Sanitizer::new()
        .apply(&mut sample)
        .expect("all modifiers registered");
    fieldcheck::check(&sample).expect("all rules registered");
});
