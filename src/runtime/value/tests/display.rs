//! Display forms of script values

use crate::runtime::value::{Color, ItemStack, Location, Value, Vector};

#[test]
fn test_vector_display() {
    assert_eq!(Vector::new(1.0, 2.5, 3.0).to_string(), "1,2.5,3");
}

#[test]
fn test_location_display_roundtrips_through_coercion() {
    use crate::runtime::host::SimHost;
    use crate::runtime::value::coerce;

    let host = SimHost::new();
    let loc = Location::with_direction("world", 1.0, 2.0, 3.0, 90.0, 10.0);
    let parsed = coerce::to_location(&Value::Str(loc.to_string()), &host).unwrap();
    assert_eq!(parsed, loc);
}

#[test]
fn test_color_display() {
    assert_eq!(Color::new(255, 0, 16).to_string(), "#ff0010");
}

#[test]
fn test_item_display() {
    let mut item = ItemStack::of("stone");
    item.amount = 4;
    assert_eq!(item.to_string(), "stonex4");
}

#[test]
fn test_unit_displays_empty() {
    assert_eq!(Value::Unit.to_string(), "");
}

#[test]
fn test_list_display() {
    let list = Value::List(vec![Value::Int(1), Value::Str("two".into())]);
    assert_eq!(list.to_string(), "[1, two]");
}
