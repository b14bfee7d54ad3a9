//! End-to-end document tests.
//!
//! These exercise the public API only: building trees, encoding them, and
//! decoding the bytes back.

use nbtr::*;
use proptest::prelude::*;

fn arb_leaf() -> impl Strategy<Value = Tag> {
    prop_oneof![
        any::<u8>().prop_map(Tag::Byte),
        any::<i16>().prop_map(Tag::Short),
        any::<i32>().prop_map(Tag::Int),
        any::<i64>().prop_map(Tag::Long),
        (-1.0e6f32..1.0e6).prop_map(Tag::Float),
        (-1.0e12f64..1.0e12).prop_map(Tag::Double),
        "[a-z0-9 ]{0,12}".prop_map(|s| Tag::string(s).unwrap()),
        prop::collection::vec(any::<u8>(), 0..16)
            .prop_map(|b| Tag::ByteArray(ByteArrayTag::new(b).unwrap())),
        prop::collection::vec(any::<i32>(), 0..8)
            .prop_map(|v| Tag::IntArray(IntArrayTag::new(v).unwrap())),
    ]
}

fn compound_from(entries: Vec<(String, Tag)>) -> CompoundTag {
    let mut compound = CompoundTag::new();
    for (key, value) in entries {
        compound.insert(key, value).unwrap();
    }
    compound
}

/// Keeps only the elements matching the first element's kind.
fn list_from(items: Vec<Tag>) -> ListTag {
    let kind = items.first().map(Tag::kind).unwrap_or(TagKind::End);
    ListTag::with_items(kind, items.into_iter().filter(|t| t.kind() == kind)).unwrap()
}

fn arb_tag() -> impl Strategy<Value = Tag> {
    arb_leaf().prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(|items| Tag::List(list_from(items))),
            prop::collection::vec(("[a-z]{0,6}", inner), 0..6)
                .prop_map(|entries| Tag::Compound(compound_from(entries))),
        ]
    })
}

fn arb_document() -> impl Strategy<Value = (String, CompoundTag)> {
    (
        "[A-Za-z]{0,10}",
        prop::collection::vec(("[a-z]{0,6}", arb_tag()), 0..8).prop_map(compound_from),
    )
}

proptest! {
    #[test]
    fn round_trip_preserves_tree_and_name((name, root) in arb_document()) {
        let data = encode_to_bytes(&root, &name).unwrap();
        let (decoded_name, decoded) = decode_slice(&data).unwrap();
        prop_assert_eq!(&decoded_name, &name);
        prop_assert_eq!(&decoded, &root);

        // Insertion order survives, so re-encoding is byte-identical.
        let again = encode_to_bytes(&decoded, &decoded_name).unwrap();
        prop_assert_eq!(again, data);
    }

    #[test]
    fn truncated_documents_never_decode(
        (name, root) in arb_document(),
        cuts in prop::collection::vec(any::<prop::sample::Index>(), 1..16),
    ) {
        let data = encode_to_bytes(&root, &name).unwrap();
        for cut in cuts.iter().map(|i| i.index(data.len())) {
            let err = decode_slice(&data[..cut]).unwrap_err();
            prop_assert!(
                matches!(err, NbtError::Truncated(_) | NbtError::Format(_)),
                "cut at {} gave {:?}", cut, err
            );
        }
    }
}

#[test]
fn literal_scenario() {
    let mut root = CompoundTag::new();
    root.insert("a", Tag::int(42).unwrap()).unwrap();
    root.insert(
        "list",
        ListTag::with_items(TagKind::Byte, [Tag::byte(1).unwrap(), Tag::byte(2).unwrap()])
            .unwrap(),
    )
    .unwrap();

    let mut out = Vec::new();
    encode(&mut out, &root, "").unwrap();
    assert_eq!(
        out,
        [
            0x0A, 0x00, 0x00, 0x03, 0x00, 0x01, 0x61, 0x00, 0x00, 0x00, 0x2A, 0x09, 0x00, 0x04,
            0x6C, 0x69, 0x73, 0x74, 0x01, 0x00, 0x00, 0x00, 0x02, 0x01, 0x02, 0x00,
        ]
    );

    let (name, decoded) = decode(&out[..]).unwrap();
    assert_eq!(name, "");
    assert_eq!(decoded, root);
}

#[test]
fn failed_list_insert_leaves_length_unchanged() {
    let mut list = ListTag::with_items(TagKind::Byte, [Tag::Byte(1)]).unwrap();
    let err = list.push(Tag::int(7).unwrap()).unwrap_err();
    assert!(matches!(err, ValidationError::WrongElementKind { .. }));
    assert_eq!(list.len(), 1);
}

#[test]
fn mutate_decoded_tree_then_reencode() {
    let mut root = CompoundTag::new();
    root.insert("level", CompoundTag::new()).unwrap();
    let data = encode_to_bytes(&root, "world").unwrap();

    let (name, mut decoded) = decode_slice(&data).unwrap();
    let level = decoded
        .get_mut("level")
        .and_then(Tag::as_compound_mut)
        .unwrap();
    level.insert("seed", 1234i64).unwrap();
    level.insert("spawn", IntArrayTag::new(vec![0, 64, 0]).unwrap()).unwrap();

    let data = encode_to_bytes(&decoded, &name).unwrap();
    let (_, reread) = decode_slice(&data).unwrap();
    let level = reread.get("level").and_then(Tag::as_compound).unwrap();
    assert_eq!(level.get("seed"), Some(&Tag::Long(1234)));
    assert_eq!(
        level.get("spawn").and_then(Tag::as_int_array).map(IntArrayTag::as_slice),
        Some(&[0, 64, 0][..])
    );
}

#[test]
fn hundred_thousand_nested_compounds() {
    let depth = 100_000;
    let mut data = vec![0x0A, 0x00, 0x00];
    for _ in 0..depth {
        data.extend_from_slice(&[0x0A, 0x00, 0x00]);
    }
    data.extend(std::iter::repeat_n(0x00, depth + 1));

    let (_, root) = decode(&data[..]).unwrap();
    assert_eq!(encode_to_bytes(&root, "").unwrap(), data);

    let mut built = CompoundTag::new();
    for _ in 0..depth {
        let mut outer = CompoundTag::new();
        outer.insert("", built).unwrap();
        built = outer;
    }
    assert!(root == built);

    let copy = root.clone();
    assert!(copy == built);
}
