use serde_json::json;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use transfold::{
    Collector, Error, compose, filtering, identity, mapping, source, taking, transduce,
};

#[test]
fn test_str_is_driven_by_character() {
    let out = transduce(identity(), Collector::Append, Vec::new(), "héllo").unwrap();
    assert_eq!(out, vec!['h', 'é', 'l', 'l', 'o']);
}

#[test]
fn test_owned_string_is_driven_by_character() {
    let xf = compose![
        filtering(|c: &char| !c.is_whitespace()),
        mapping(|c: char| c.to_ascii_uppercase())
    ];
    let out = transduce(xf, Collector::Append, String::new(), String::from("a b c")).unwrap();
    assert_eq!(out, "ABC");
}

#[test]
fn test_taking_from_str() {
    let out = transduce(taking(3), Collector::Append, String::new(), "abcdef").unwrap();
    assert_eq!(out, "abc");
}

#[test]
fn test_same_pipeline_over_string_and_vec() {
    let xf = compose![filtering(|c: &char| c.is_ascii_digit()), taking(2)];
    let from_str = transduce(&xf, Collector::Append, Vec::new(), "a1b2c3").unwrap();
    let chars = vec!['a', '1', 'b', '2', 'c', '3'];
    let from_vec = transduce(&xf, Collector::Append, Vec::new(), chars).unwrap();
    assert_eq!(from_str, from_vec);
    assert_eq!(from_str, vec!['1', '2']);
}

#[test]
fn test_slice_array_and_deque_sources() {
    let data = [1, 2, 3];
    let from_slice = transduce(identity(), Collector::Sum, 0, &data[..]).unwrap();
    let from_array = transduce(identity(), Collector::Sum, 0, data).unwrap();
    let deque = VecDeque::from(vec![1, 2, 3]);
    let from_deque = transduce(identity(), Collector::Sum, 0, deque).unwrap();
    assert_eq!(from_slice, 6);
    assert_eq!(from_array, 6);
    assert_eq!(from_deque, 6);
}

#[test]
fn test_range_and_option_sources() {
    assert_eq!(transduce(identity(), Collector::Sum, 0u64, 1..5u64).unwrap(), 10);
    assert_eq!(transduce(identity(), Collector::Sum, 1, Some(4)).unwrap(), 5);
    assert_eq!(transduce(identity(), Collector::Sum, 1, None::<i32>).unwrap(), 1);
}

#[test]
fn test_any_iterable_through_iter_adapter() {
    let mut scores = BTreeMap::new();
    scores.insert("a", 3);
    scores.insert("b", 5);
    let values = mapping(|(_, v): (&&str, &i32)| *v);
    let total = transduce(values, Collector::Sum, 0, source::iter(&scores)).unwrap();
    assert_eq!(total, 8);
}

#[test]
fn test_collecting_into_set() {
    let out = transduce(identity(), Collector::Append, BTreeSet::new(), vec![3, 1, 3, 2]).unwrap();
    assert_eq!(out.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
}

#[test]
fn test_json_array_source() {
    let out = transduce(
        filtering(|v: &serde_json::Value| v.is_number()),
        Collector::Append,
        json!([]),
        json!([1, "x", 2, null]),
    )
    .unwrap();
    assert_eq!(out, json!([1, 2]));
}

#[test]
fn test_json_string_source() {
    let out = transduce(taking(2), Collector::Append, json!(""), json!("xyz")).unwrap();
    assert_eq!(out, json!("xy"));
}

#[test]
fn test_json_scalar_source_is_rejected() {
    for (value, kind) in [
        (json!(1), "number"),
        (json!(true), "bool"),
        (json!(null), "null"),
        (json!({"k": 1}), "object"),
    ] {
        let err = transduce(identity(), Collector::Append, json!([]), value).unwrap_err();
        assert_eq!(err, Error::UnsupportedSourceKind { kind });
    }
}
