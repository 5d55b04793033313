//! Argument builders
//!
//! The building blocks command grammars are assembled from. Every
//! helper returns a [`Deferred`]; parse-time token shape decides
//! whether the argument is an inline literal, a `&variable`, or a
//! nested `{ ... }` action, and the value is coerced at run time
//! through the registry in [`crate::runtime::value::coerce`].

use crate::frontend::{Deferred, ParseError, TokenReader};
use crate::runtime::value::coerce;
use crate::runtime::{
    Action, Color, EntityId, ItemStack, Location, Player, RuntimeError, Value, Vector,
};

/// One argument-position value, uncoerced
pub fn value() -> Deferred<Value> {
    Deferred::new(|reader| reader.parse_value())
}

/// Numeric argument as `f64`
pub fn double() -> Deferred<f64> {
    value().adapt(|_frame, v| {
        coerce::to_f64(&v).ok_or_else(|| RuntimeError::no_conversion("number", &v))
    })
}

/// Numeric argument as `f32`
pub fn float() -> Deferred<f32> {
    value().adapt(|_frame, v| {
        coerce::to_f32(&v).ok_or_else(|| RuntimeError::no_conversion("number", &v))
    })
}

/// Integer argument
pub fn int() -> Deferred<i64> {
    value().adapt(|_frame, v| {
        coerce::to_i64(&v).ok_or_else(|| RuntimeError::no_conversion("integer", &v))
    })
}

/// Textual argument; `Unit` does not coerce
pub fn text() -> Deferred<String> {
    value().adapt(|_frame, v| {
        coerce::to_text(&v).ok_or_else(|| RuntimeError::no_conversion("text", &v))
    })
}

/// Vector argument
pub fn vector() -> Deferred<Vector> {
    value().adapt(|frame, v| {
        coerce::to_vector(&v, frame.host().as_ref())
            .ok_or_else(|| RuntimeError::no_conversion("vector", &v))
    })
}

/// Location argument
pub fn location() -> Deferred<Location> {
    value().adapt(|frame, v| {
        coerce::to_location(&v, frame.host().as_ref())
            .ok_or_else(|| RuntimeError::no_conversion("location", &v))
    })
}

/// Color argument
pub fn color() -> Deferred<Color> {
    value().adapt(|frame, v| {
        coerce::to_color(&v, frame.host().as_ref())
            .ok_or_else(|| RuntimeError::no_conversion("color", &v))
    })
}

/// String-list argument
pub fn string_list() -> Deferred<Vec<String>> {
    value().adapt(|frame, v| {
        coerce::to_string_list(&v, frame.host().as_ref())
            .ok_or_else(|| RuntimeError::no_conversion("string list", &v))
    })
}

/// Entity argument
pub fn entity() -> Deferred<EntityId> {
    value().adapt(|frame, v| {
        coerce::to_entity(&v, frame.host().as_ref())
            .ok_or_else(|| RuntimeError::no_conversion("entity", &v))
    })
}

/// Player argument
pub fn player() -> Deferred<Player> {
    value().adapt(|frame, v| {
        coerce::to_player(&v, frame.host().as_ref())
            .ok_or_else(|| RuntimeError::no_conversion("player", &v))
    })
}

/// Item argument
pub fn item() -> Deferred<ItemStack> {
    value().adapt(|frame, v| {
        coerce::to_item(&v, frame.host().as_ref())
            .ok_or_else(|| RuntimeError::no_conversion("item", &v))
    })
}

/// Optional named argument: builds `then` only when the flag is next
pub fn flag<T: Send + 'static>(
    names: &'static [&'static str],
    then: Deferred<T>,
) -> Deferred<Option<T>> {
    then.optional(names)
}

/// [`flag`] with a default for the absent case
pub fn flag_or<T: Clone + Send + Sync + 'static>(
    names: &'static [&'static str],
    then: Deferred<T>,
    default: T,
) -> Deferred<T> {
    then.optional_or(names, default)
}

/// Build a freshly constructed deferred in place
pub(crate) fn built<T: Send + 'static>(
    mut deferred: Deferred<T>,
    reader: &mut TokenReader,
) -> Result<Action<T>, ParseError> {
    deferred.build(reader)
}
