// Projector tests
// Slice and split by merge-join over the encoded bytes.

use std::collections::HashMap;

use bytemap::{ByteMap, ByteMapRef, Error, Lookup, Value, build};

fn sample() -> Vec<(&'static str, Value)> {
    vec![
        ("bool", Value::Bool(true)),
        ("byte", Value::Byte(u8::MAX)),
        ("float32", Value::Float32(1.25)),
        ("int16", Value::Int16(i16::MAX)),
        ("int64", Value::Int64(-9)),
        ("nil", Value::Nil),
        ("string", Value::from("Hello World")),
        ("uint32", Value::UInt32(17)),
    ]
}

const SLICE_KEYS: [&str; 5] = ["int16", "aunknown", "byte", "nil", "string"];

fn abc() -> ByteMap {
    build([
        ("a", Value::Bool(true)),
        ("b", Value::Int16(5)),
        ("c", Value::from("hi")),
    ])
    .unwrap()
}

fn as_map(map: &ByteMap) -> HashMap<String, Value> {
    map.as_map().unwrap()
}

// =============================================================================
// Test 1: slice keeps only requested keys present in the source
// =============================================================================
#[test]
fn slice_selected_keys() {
    let map = build(sample()).unwrap();
    let sliced = map.slice(&SLICE_KEYS).unwrap();
    assert!(sliced.len() < map.len());

    let source: HashMap<_, _> = sample().into_iter().collect();
    for key in SLICE_KEYS {
        if key == "aunknown" {
            assert_eq!(sliced.lookup(key).unwrap(), Lookup::NotFound);
        } else if key == "nil" {
            assert_eq!(sliced.lookup(key).unwrap(), Lookup::FoundAbsent);
        } else {
            assert_eq!(sliced.get(key).unwrap().as_ref(), Some(&source[key]));
        }
    }
    assert_eq!(sliced.iter().count(), 4);
}

#[test]
fn slice_small_map() {
    let sliced = abc().slice(&["c", "a"]).unwrap();
    let expected: HashMap<String, Value> = [
        ("a".to_owned(), Value::Bool(true)),
        ("c".to_owned(), Value::from("hi")),
    ]
    .into_iter()
    .collect();
    assert_eq!(as_map(&sliced), expected);

    // Offsets rebased onto the new, shorter header.
    #[rustfmt::skip]
    let bytes: Vec<u8> = vec![
        1, 0, b'a', 1, 16, 0, 0, 0,
        1, 0, b'c', 13, 17, 0, 0, 0,
        1,
        2, 0, b'h', b'i',
    ];
    assert_eq!(sliced.as_bytes(), bytes.as_slice());
}

// =============================================================================
// Test 2: split partitions the map
// =============================================================================
#[test]
fn split_small_map() {
    let (matched, omitted) = abc().split(&["a"]).unwrap();
    assert_eq!(matched.as_bytes(), &[1, 0, b'a', 1, 8, 0, 0, 0, 1]);
    #[rustfmt::skip]
    let rest: Vec<u8> = vec![
        1, 0, b'b', 7, 16, 0, 0, 0,
        1, 0, b'c', 13, 18, 0, 0, 0,
        5, 0,
        2, 0, b'h', b'i',
    ];
    assert_eq!(omitted.as_bytes(), rest.as_slice());
    assert_eq!(omitted.get("b").unwrap(), Some(Value::Int16(5)));
}

#[test]
fn split_is_complete_and_disjoint() {
    let map = build(sample()).unwrap();
    let (matched, omitted) = map.split(&SLICE_KEYS).unwrap();
    let matched = as_map(&matched);
    let omitted = as_map(&omitted);

    assert!(matched.keys().all(|k| !omitted.contains_key(k)));
    let mut union = matched.clone();
    union.extend(omitted.clone());
    assert_eq!(union, as_map(&map));

    for key in omitted.keys() {
        assert!(!SLICE_KEYS.contains(&key.as_str()));
    }
}

// =============================================================================
// Test 3: selecting every key reproduces the content
// =============================================================================
#[test]
fn slice_all_keys_is_identity_on_content() {
    let map = build(sample()).unwrap();
    let keys: Vec<&str> = sample().iter().map(|(k, _)| *k).collect();
    let sliced = map.slice(&keys).unwrap();
    assert_eq!(as_map(&sliced), as_map(&map));
    assert_eq!(sliced, map);
}

// =============================================================================
// Test 4: projections are themselves projectable
// =============================================================================
#[test]
fn projection_is_closed() {
    let map = build(sample()).unwrap();
    let first = map.slice(&["byte", "int64", "string", "uint32"]).unwrap();
    let (second, rest) = first.split(&["string", "byte"]).unwrap();

    assert_eq!(second.get("string").unwrap(), Some(Value::from("Hello World")));
    assert_eq!(second.get("byte").unwrap(), Some(Value::Byte(u8::MAX)));
    assert_eq!(second.get("int64").unwrap(), None);
    assert_eq!(rest.get("int64").unwrap(), Some(Value::Int64(-9)));
    assert_eq!(rest.get("uint32").unwrap(), Some(Value::UInt32(17)));
}

// =============================================================================
// Test 5: degenerate requests
// =============================================================================
#[test]
fn slice_with_no_keys_is_empty() {
    let map = build(sample()).unwrap();
    let none: [&str; 0] = [];
    assert!(map.slice(&none).unwrap().is_empty());

    let (matched, omitted) = map.split(&none).unwrap();
    assert!(matched.is_empty());
    assert_eq!(omitted, map);
}

#[test]
fn slice_of_empty_map() {
    let empty = ByteMap::default();
    let sliced = empty.slice(&["unspecified"]).unwrap();
    assert!(sliced.as_map().unwrap().is_empty());
    let (matched, omitted) = empty.split(&["unspecified"]).unwrap();
    assert!(matched.is_empty() && omitted.is_empty());
}

#[test]
fn duplicate_and_unknown_requests() {
    let sliced = abc().slice(&["b", "b", "zz", "0"]).unwrap();
    assert_eq!(sliced.iter().count(), 1);
    assert_eq!(sliced.get("b").unwrap(), Some(Value::Int16(5)));
}

#[test]
fn nil_only_source() {
    let map = build([("x", Value::Nil), ("y", Value::Nil), ("z", Value::Nil)]).unwrap();
    let (matched, omitted) = map.split(&["y"]).unwrap();
    assert_eq!(matched.lookup("y").unwrap(), Lookup::FoundAbsent);
    assert_eq!(omitted.iter().count(), 2);
    assert_eq!(matched.len() + omitted.len(), map.len());
}

// =============================================================================
// Test 6: slice stops scanning after the last requested key
// =============================================================================
#[test]
fn slice_does_not_read_past_last_match() {
    let map = abc();
    let bytes = map.as_bytes();
    // Corrupt the tag of "c"; slicing "a" never reaches it.
    let mut damaged = bytes.to_vec();
    damaged[19] = 0xEE;
    let view = ByteMapRef::new(&damaged);
    assert_eq!(view.slice(&["a"]).unwrap().get("a").unwrap(), Some(Value::Bool(true)));
    assert!(matches!(view.split(&["a"]), Err(Error::CorruptEncoding(_))));
}
