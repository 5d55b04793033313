//! Built-in command conformance tests

use zhuque::runtime::{Location, Vector};
use zhuque::{Frame, ParseError, RuntimeError, ScriptCompiler, SimHost, Value};

async fn run(source: &str) -> Result<Value, RuntimeError> {
    let frame = Frame::root(SimHost::shared());
    ScriptCompiler::new()
        .compile(source)
        .unwrap()
        .run(&frame)
        .await
}

fn location(value: &Value) -> Location {
    match value {
        Value::Location(loc) => loc.clone(),
        other => panic!("expected location, got {other:?}"),
    }
}

mod loc_divide {
    use super::*;

    #[tokio::test]
    async fn object_form_divides_all_five_fields() {
        let value = run("loc div world,10,10,10 with world,2,2,2,2,2")
            .await
            .unwrap();
        assert_eq!(
            location(&value),
            Location::with_direction("world", 5.0, 5.0, 5.0, 0.0, 0.0)
        );
    }

    #[tokio::test]
    async fn positional_form_divides_each_axis_independently() {
        let value = run("loc div world,10,20,30,8,4 2 4 5").await.unwrap();
        let loc = location(&value);
        assert_eq!((loc.x, loc.y, loc.z), (5.0, 5.0, 6.0));
        // absent yaw/pitch divide by the identity
        assert_eq!((loc.yaw, loc.pitch), (8.0, 4.0));
    }

    #[tokio::test]
    async fn positional_form_with_direction_flags() {
        let value = run("loc div world,10,10,10,8,4 2 2 2 -yaw 2 -pitch 2")
            .await
            .unwrap();
        let loc = location(&value);
        assert_eq!((loc.yaw, loc.pitch), (4.0, 2.0));
    }

    #[tokio::test]
    async fn named_flag_form_touches_only_named_fields() {
        let value = run("loc div world,10,10,10,8,4 -x 2 -pitch 2").await.unwrap();
        let loc = location(&value);
        assert_eq!((loc.x, loc.y, loc.z), (5.0, 10.0, 10.0));
        assert_eq!((loc.yaw, loc.pitch), (8.0, 2.0));
    }

    #[tokio::test]
    async fn source_can_be_a_variable() {
        let value = run("set home to world,10,10,10 loc div &home with world,2,2,2,2,2")
            .await
            .unwrap();
        assert_eq!(location(&value).x, 5.0);
    }

    #[tokio::test]
    async fn negative_divisors_parse_positionally() {
        let value = run("loc div world,10,10,10 -2 2 2").await.unwrap();
        assert_eq!(location(&value).x, -5.0);
    }
}

mod loc_other_ops {
    use super::*;

    #[tokio::test]
    async fn add_object_form() {
        let value = run("loc add world,1,1,1 with world,1,2,3").await.unwrap();
        let loc = location(&value);
        assert_eq!((loc.x, loc.y, loc.z), (2.0, 3.0, 4.0));
    }

    #[tokio::test]
    async fn sub_named_flags_default_to_identity() {
        let value = run("loc sub world,5,5,5 -y 3").await.unwrap();
        let loc = location(&value);
        assert_eq!((loc.x, loc.y, loc.z), (5.0, 2.0, 5.0));
    }

    #[tokio::test]
    async fn mul_positional() {
        let value = run("loc mul world,2,3,4 2 2 2").await.unwrap();
        let loc = location(&value);
        assert_eq!((loc.x, loc.y, loc.z), (4.0, 6.0, 8.0));
    }

    #[test]
    fn unknown_sub_operation_fails_compilation() {
        let err = ScriptCompiler::new()
            .compile("loc teleport world,1,2,3")
            .unwrap_err();
        assert!(matches!(err, ParseError::UnknownCommand(name) if name == "loc teleport"));
    }
}

mod item_modify {
    use super::*;

    #[tokio::test]
    async fn applies_options_in_order() {
        let value = run("item modify stone -amount 3 -name 'Best Stone' -durability 7")
            .await
            .unwrap();
        let Value::Item(item) = value else {
            panic!("expected item");
        };
        assert_eq!(item.material, "stone");
        assert_eq!(item.amount, 3);
        assert_eq!(item.durability, 7);
        assert_eq!(item.display_name.as_deref(), Some("Best Stone"));
        assert_eq!(item.model, None);
    }

    #[tokio::test]
    async fn material_option_resolves_through_host() {
        let value = run("set m to iron_ingot item modify stone -mat &m")
            .await
            .unwrap();
        let Value::Item(item) = value else {
            panic!("expected item");
        };
        assert_eq!(item.material, "iron_ingot");
    }

    #[tokio::test]
    async fn unrecognized_material_keeps_the_type() {
        let value = run("item modify stone -mat unobtainium").await.unwrap();
        let Value::Item(item) = value else {
            panic!("expected item");
        };
        assert_eq!(item.material, "stone");
    }

    #[test]
    fn unknown_flag_fails_compilation() {
        let err = ScriptCompiler::new()
            .compile("item modify stone -bogus 1")
            .unwrap_err();
        assert!(matches!(err, ParseError::UnknownArgument(name) if name == "bogus"));
    }

    #[tokio::test]
    async fn unknown_item_source_fails_at_runtime() {
        let err = run("item modify 42 -amount 3").await.unwrap_err();
        assert!(matches!(err, RuntimeError::ConversionFailure { kind: "item", .. }));
    }
}

mod basics {
    use super::*;

    #[tokio::test]
    async fn vec_builds_from_numbers() {
        let value = run("vec 1 2 3.5").await.unwrap();
        assert_eq!(value, Value::Vector(Vector::new(1.0, 2.0, 3.5)));
    }

    #[tokio::test]
    async fn literal_takes_the_next_token_verbatim() {
        let value = run("literal -not-a-flag").await.unwrap();
        assert_eq!(value, Value::Str("-not-a-flag".into()));
    }

    #[tokio::test]
    async fn print_resolves_to_unit() {
        let value = run("print 'hello'").await.unwrap();
        assert_eq!(value, Value::Unit);
    }

    #[tokio::test]
    async fn set_requires_the_to_separator() {
        let err = ScriptCompiler::new().compile("set x 5").unwrap_err();
        assert!(matches!(err, ParseError::TokenMismatch { .. }));
    }
}
