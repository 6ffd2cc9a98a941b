#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use fieldcheck::path::{flatten, resolve};
use fieldcheck::shape::{Field, Kind, Shape};
use libfuzzer_sys::fuzz_target;
use std::sync::LazyLock;

static LEAF: LazyLock<Shape> = LazyLock::new(|| {
    Shape::new("Leaf").field(Field::new("name", Kind::Scalar).external("display_name"))
});

fn leaf_shape() -> &'static Shape {
    &LEAF
}

static ROOT: LazyLock<Shape> = LazyLock::new(|| {
    Shape::new("Root")
        .field(Field::new("core", Kind::Struct(leaf_shape)).transparent())
        .field(Field::new("veiled", Kind::Struct(leaf_shape)).suppressed())
        .field(Field::new("rows", Kind::List(Box::new(Kind::Struct(leaf_shape)))))
        .field(Field::new("title", Kind::Scalar))
});

fn root_shape() -> &'static Shape {
    &ROOT
}

/// Generate an arbitrary segment list from fuzzer bytes.
fn arbitrary_segments(u: &mut Unstructured<'_>) -> arbitrary::Result<Vec<String>> {
    let len = u.int_in_range(0..=6)?;
    let mut segments = Vec::with_capacity(len);
    for _ in 0..len {
        segments.push(String::arbitrary(u)?);
    }
    Ok(segments)
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);

    let struct_path = match arbitrary_segments(&mut u) {
        Ok(p) => p,
        Err(_) => return,
    };
    let name_path = match arbitrary_segments(&mut u) {
        Ok(p) => p,
        Err(_) => return,
    };

    let _ = resolve(root_shape(), &struct_path);

    let first = flatten(root_shape(), &struct_path, &name_path);
    let second = flatten(root_shape(), &struct_path, &name_path);
    assert_eq!(first, second, "flatten is not deterministic");
});
