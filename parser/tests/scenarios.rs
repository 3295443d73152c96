//! End-to-end parsing against the `my-option` schema.

use argbind_core::{FieldSchema, Schema, Value, ValueType};
use argbind_parser::{ArgError, ArgErrorKind, ParsedArgs, parse};
use expect_test::expect;

fn my_option() -> Schema {
    Schema::builder("my-option")
        .field(FieldSchema::flag(Some('f'), Some("foo")))
        .field(FieldSchema::counter(Some('v'), Some("verbose")))
        .field(
            FieldSchema::valued(Some('b'), Some("bar"), ValueType::Int)
                .with_default(Value::Int(123)),
        )
        .field(FieldSchema::valued(None, Some("qwer"), ValueType::String))
        .field(FieldSchema::positional("hahaha", ValueType::String))
        .field(FieldSchema::positional_list("asdf"))
        .build()
        .unwrap()
}

fn ok(tokens: &[&str]) -> ParsedArgs {
    parse(tokens, &my_option()).unwrap()
}

fn kind(tokens: &[&str]) -> ArgErrorKind {
    parse(tokens, &my_option()).unwrap_err().kind()
}

#[test]
fn test_separate_tokens() {
    let args = ok(&["--bar", "456", "-f", "-v", "-v", "--qwer", "abc", "haha", "A1", "A2"]);
    expect![[r#"<my-option foo=true verbose=2 bar=456 qwer="abc" hahaha="haha" asdf=["A1", "A2"]>"#]]
        .assert_eq(&args.to_string());
    assert!(args.flag("foo"));
    assert_eq!(args.count("verbose"), 2);
    assert_eq!(args.int("bar"), Some(456));
    assert_eq!(args.string("qwer"), Some("abc"));
    assert_eq!(args.string("hahaha"), Some("haha"));
    assert_eq!(args.list("asdf"), Some(&["A1".to_string(), "A2".to_string()][..]));
}

#[test]
fn test_clustered_tokens_match_separate_tokens() {
    let separate = ok(&["--bar", "456", "-f", "-v", "-v", "--qwer", "abc", "haha", "A1", "A2"]);
    let clustered = ok(&["-b456", "-vfv", "--qwer", "abc", "haha", "A1", "A2"]);
    assert_eq!(separate, clustered);
}

#[test]
fn test_absent_option_takes_default() {
    let args = ok(&["-vfv", "haha", "A1", "A2", "--qwer", "abc"]);
    expect![[r#"<my-option foo=true verbose=2 bar=123 qwer="abc" hahaha="haha" asdf=["A1", "A2"]>"#]]
        .assert_eq(&args.to_string());
    assert!(!args.is_present("bar"));
    assert!(args.is_present("qwer"));
}

#[test]
fn test_empty_positional_list() {
    let args = ok(&["-b456", "-vfv", "--qwer", "abc", "asdf"]);
    assert_eq!(args.string("hahaha"), Some("asdf"));
    assert_eq!(args.list("asdf"), Some(&[][..]));
}

#[test]
fn test_missing_positional() {
    let err = parse(&["-b456", "-vfv", "--qwer", "abc"], &my_option()).unwrap_err();
    assert_eq!(
        err,
        ArgError::MissingPositional {
            name: "hahaha".into()
        }
    );
}

#[test]
fn test_missing_value_at_end_of_stream() {
    assert_eq!(kind(&["-b456", "-vfv", "--qwer"]), ArgErrorKind::MissingValue);
    assert_eq!(
        kind(&["-vfv", "--qwer", "abc", "asdf", "--bar"]),
        ArgErrorKind::MissingValue
    );
}

#[test]
fn test_missing_required_option() {
    let err = parse(&["-b456", "-vfv", "asfd", "bbb"], &my_option()).unwrap_err();
    expect!["option `--qwer` is required"].assert_eq(&err.to_string());
}

#[test]
fn test_unknown_character_in_cluster() {
    let err = parse(&["-b456", "-vfvz", "--qwer", "abc", "asdf"], &my_option()).unwrap_err();
    assert_eq!(
        err,
        ArgError::UnknownOption {
            option: "-z".into()
        }
    );
}

#[test]
fn test_option_like_token_is_not_a_value() {
    let err = parse(&["-vfv", "--qwer", "abc", "asdf", "--bar", "-v"], &my_option()).unwrap_err();
    assert_eq!(
        err,
        ArgError::MissingValue {
            option: "--bar".into()
        }
    );
}

#[test]
fn test_option_like_token_is_not_a_value_for_short_option() {
    let err = parse(&["-vfv", "--qwer", "abc", "asdf", "-b", "-v"], &my_option()).unwrap_err();
    assert_eq!(
        err,
        ArgError::MissingValue {
            option: "-b".into()
        }
    );

    let err = parse(&["-vfb", "--qwer", "abc", "asdf"], &my_option()).unwrap_err();
    assert_eq!(
        err,
        ArgError::MissingValue {
            option: "-b".into()
        }
    );
}

#[test]
fn test_every_value_spelling_binds_the_same() {
    let base = ["--qwer", "abc", "pos"];
    for spelling in [
        &["--bar", "77"][..],
        &["--bar=77"],
        &["-b", "77"],
        &["-b77"],
    ] {
        let tokens: Vec<&str> = spelling.iter().chain(&base).copied().collect();
        assert_eq!(ok(&tokens).int("bar"), Some(77), "{tokens:?}");
    }
}

#[test]
fn test_cluster_splits_are_equivalent() {
    let expected = ok(&["-f", "-v", "-b", "9", "--qwer", "x", "p"]);
    for tokens in [
        &["-fvb9", "--qwer", "x", "p"][..],
        &["-fvb", "9", "--qwer", "x", "p"],
        &["-fv", "-b9", "--qwer", "x", "p"],
        &["-f", "-vb", "9", "--qwer", "x", "p"],
    ] {
        assert_eq!(ok(tokens), expected, "{tokens:?}");
    }
}

#[test]
fn test_counter_accumulates_across_clusters() {
    let args = ok(&["-vvv", "--verbose", "-fv", "--qwer", "q", "p"]);
    assert_eq!(args.count("verbose"), 5);
}

#[test]
fn test_positionals_keep_order_when_interleaved() {
    let args = ok(&["one", "-f", "two", "--qwer", "q", "three", "-v", "four"]);
    assert_eq!(args.string("hahaha"), Some("one"));
    assert_eq!(
        args.list("asdf"),
        Some(&["two".to_string(), "three".to_string(), "four".to_string()][..])
    );
}

#[test]
fn test_terminator_makes_dashed_tokens_positional() {
    let args = ok(&["--qwer", "q", "--", "-f", "--bar", "-"]);
    assert!(!args.flag("foo"));
    assert_eq!(args.int("bar"), Some(123));
    assert_eq!(args.string("hahaha"), Some("-f"));
    assert_eq!(
        args.list("asdf"),
        Some(&["--bar".to_string(), "-".to_string()][..])
    );
}

#[test]
fn test_negative_numbers_need_attached_form() {
    assert_eq!(
        kind(&["--bar", "-5", "--qwer", "q", "p"]),
        ArgErrorKind::MissingValue
    );
    assert_eq!(ok(&["--bar=-5", "--qwer", "q", "p"]).int("bar"), Some(-5));
    assert_eq!(ok(&["-b-5", "--qwer", "q", "p"]).int("bar"), Some(-5));
}

#[test]
fn test_flag_rejects_attached_value() {
    let err = parse(&["--foo=1", "--qwer", "q", "p"], &my_option()).unwrap_err();
    expect![[r#"option `--foo` does not take a value, got "1""#]].assert_eq(&err.to_string());
}

#[test]
fn test_invalid_integer() {
    let err = parse(&["-b", "abc", "--qwer", "q", "p"], &my_option()).unwrap_err();
    expect![[r#"invalid value "abc" for `-b`: invalid digit found in string"#]]
        .assert_eq(&err.to_string());
}

#[test]
fn test_scan_error_wins_over_later_missing_fields() {
    assert_eq!(kind(&["--nope"]), ArgErrorKind::UnknownOption);
    assert_eq!(kind(&["--bar"]), ArgErrorKind::MissingValue);
}

#[test]
fn test_no_abbreviated_long_options() {
    assert_eq!(
        kind(&["--verb", "--qwer", "q", "p"]),
        ArgErrorKind::UnknownOption
    );
}

#[test]
fn test_repeated_valued_option_last_wins() {
    let args = ok(&["--qwer", "first", "--qwer=second", "p"]);
    assert_eq!(args.string("qwer"), Some("second"));
}

#[test]
fn test_flag_is_idempotent() {
    assert_eq!(
        ok(&["-f", "--foo", "-ff", "--qwer", "q", "p"]),
        ok(&["-f", "--qwer", "q", "p"])
    );
}

#[test]
fn test_unexpected_positional_without_list() {
    let schema = Schema::builder("single")
        .field(FieldSchema::flag(Some('f'), None))
        .field(FieldSchema::positional("file", ValueType::String))
        .build()
        .unwrap();
    let err = parse(&["a", "-f", "b"], &schema).unwrap_err();
    assert_eq!(
        err,
        ArgError::UnexpectedPositional {
            token: "b".into()
        }
    );
}

#[test]
fn test_schema_without_positionals_rejects_any() {
    let schema = Schema::new("flags", vec![FieldSchema::flag(Some('q'), Some("quiet"))]).unwrap();
    assert_eq!(
        parse(&["x"], &schema).unwrap_err().kind(),
        ArgErrorKind::UnexpectedPositional
    );
    assert!(parse::<&str>(&[], &schema).unwrap().iter().all(|f| !f.explicit));
}

#[test]
fn test_shared_schema_across_threads() {
    let schema = my_option();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|n| {
                let schema = &schema;
                scope.spawn(move || {
                    let bar = n.to_string();
                    parse(&["-b", bar.as_str(), "--qwer", "q", "p"], schema)
                        .unwrap()
                        .int("bar")
                })
            })
            .collect();
        for (n, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), Some(n as i64));
        }
    });
}

#[test]
fn test_serialized_result() {
    let args = ok(&["-vb7", "--qwer", "q", "p"]);
    expect![[r#"{"foo":false,"verbose":1,"bar":7,"qwer":"q","hahaha":"p","asdf":[]}"#]]
        .assert_eq(&serde_json::to_string(&args).unwrap());
}
