use std::cmp::Ordering;

use nova_scenelib::{
    display_path, BoundLocation, RelativeLocation, SceneError, TypeIndexLocation, TypePathEntry,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const PROPTEST_CASES: u32 = 256;

fn arb_relative_location() -> impl Strategy<Value = RelativeLocation> {
    // Small ranges so that equal components actually occur.
    prop_oneof![
        (0..4i32, -1..2i32).prop_map(|(offset, ty)| RelativeLocation::from_offset(offset, ty)),
        (0..4i32, -1..2i32).prop_map(|(index, ty)| RelativeLocation::from_index(index, ty)),
    ]
}

fn arb_step() -> impl Strategy<Value = (i32, i32)> {
    prop_oneof![
        Just((TypePathEntry::ARRAY_KIND, 0)),
        Just((TypePathEntry::INNER_TYPE_KIND, 0)),
        Just((TypePathEntry::WILDCARD_KIND, 0)),
        (0..=255i32).prop_map(|index| (TypePathEntry::TYPE_ARGUMENT_KIND, index)),
    ]
}

fn arb_encoding() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(arb_step(), 0..8)
        .prop_map(|steps| steps.into_iter().flat_map(|(kind, arg)| [kind, arg]).collect())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: PROPTEST_CASES, .. ProptestConfig::default() })]

    #[test]
    fn relative_location_order_agrees_with_eq(
        a in arb_relative_location(),
        b in arb_relative_location(),
        c in arb_relative_location(),
    ) {
        prop_assert_eq!(a == b, a.cmp(&b) == Ordering::Equal);
        prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        if a <= b && b <= c {
            prop_assert!(a <= c);
        }
    }

    #[test]
    fn type_path_binary_form_round_trips(encoding in arb_encoding()) {
        let path = TypePathEntry::from_binary(&encoding).unwrap();
        prop_assert_eq!(path.len() * 2, encoding.len());
        prop_assert_eq!(TypePathEntry::to_binary(&path), encoding);
    }
}

#[test]
fn odd_length_type_path_is_rejected() {
    let err = TypePathEntry::from_binary(&[0, 0, 3]).unwrap_err();
    assert!(matches!(err, SceneError::MalformedTypePath { .. }));
}

#[test]
fn unknown_step_kind_is_rejected() {
    assert!(TypePathEntry::from_binary(&[7, 0]).is_err());
    assert!(TypePathEntry::from_binary(&[0, 1]).is_err());
}

#[test]
fn textual_and_binary_forms_agree() {
    let path = TypePathEntry::parse_path("TYPE_ARGUMENT(1), ARRAY").unwrap();
    assert_eq!(TypePathEntry::to_binary(&path), vec![3, 1, 0, 0]);
    assert_eq!(display_path(&path), "[TYPE_ARGUMENT(1), ARRAY]");
}

#[test]
fn relative_locations_group_by_site() {
    let mut locations = vec![
        RelativeLocation::from_offset(8, 1),
        RelativeLocation::from_offset(4, -1),
        RelativeLocation::from_offset(8, 0),
    ];
    locations.sort();
    assert_eq!(
        locations,
        vec![
            RelativeLocation::from_offset(4, -1),
            RelativeLocation::from_offset(8, 0),
            RelativeLocation::from_offset(8, 1),
        ]
    );
    assert_eq!(locations[2].site(), RelativeLocation::from_offset(8, -1));
}

#[test]
fn supertype_and_bound_keys_render() {
    assert_eq!(TypeIndexLocation::SUPERCLASS.to_string(), "typeindex -1");
    assert_eq!(BoundLocation::type_parameter(0).to_string(), "bound 0 &-1");
}
