use underscore_private::error::TransformError;
use underscore_private::options::{FactoryPath, TransformOptions};
use underscore_private::{transform, transform_code};

fn squash(code: &str) -> String {
    code.chars().filter(|c| !c.is_whitespace()).collect()
}

#[test]
fn test_default_options() {
    let options = TransformOptions::default();
    assert_eq!(options.factory, "Symbol.private");
    assert!(options.module);
    assert_eq!(options.max_suffix, 10_000);
    assert!(!options.verbose);
}

#[test]
fn test_factory_path() {
    let factory = FactoryPath::parse("Symbol.private").unwrap();
    assert_eq!(factory.object(), "Symbol");
    assert_eq!(factory.properties(), &["private".to_string()]);

    let factory = FactoryPath::parse("makePrivate").unwrap();
    assert_eq!(factory.object(), "makePrivate");
    assert!(factory.properties().is_empty());
}

#[test]
fn test_invalid_factory_path() {
    for path in ["", "Symbol.", ".private", "Symbol..private", "1abc", "Symbol.pri vate"] {
        assert_eq!(FactoryPath::parse(path), Err(TransformError::InvalidFactory(path.to_string())), "{:?}", path);
    }
}

#[test]
fn test_custom_factory() {
    let options = TransformOptions { factory: "$rt.tokens.make".to_string(), ..TransformOptions::default() };
    let output = transform("this._a;", &options).unwrap();

    assert!(squash(&output.code).starts_with("var_a=$rt.tokens.make('a');"), "{}", output.code);
}

#[test]
fn test_invalid_factory_fails_before_anything_else() {
    let options = TransformOptions { factory: "not a path".to_string(), ..TransformOptions::default() };
    let result = transform("this._a;", &options);

    assert_eq!(result, Err(TransformError::InvalidFactory("not a path".to_string())));
}

#[test]
fn test_script_mode() {
    let source = "with (o) { x._w; }";

    let options = TransformOptions { module: false, ..TransformOptions::default() };
    let script = transform(source, &options).unwrap();
    assert_eq!(script.private_names.len(), 1);
    assert!(squash(&script.code).contains("x[_w]"), "{}", script.code);
}

#[test]
fn test_verbose_does_not_change_output() {
    let source = "class A { _a = 1; _b() { return this._a; } }";
    let quiet = transform(source, &TransformOptions::default()).unwrap();
    let verbose = transform(source, &TransformOptions { verbose: true, ..TransformOptions::default() }).unwrap();

    assert_eq!(quiet, verbose);
}

#[test]
fn test_parse_error() {
    let result = transform("let = ;", &TransformOptions::default());

    match result {
        Err(TransformError::Parse(errors)) => assert!(!errors.is_empty()),
        other => panic!("Expected a parse error, got {:?}", other),
    }
}

#[test]
fn test_error_messages() {
    let err = TransformError::NameExhausted { name: "_foo".to_string(), attempts: 3 };
    assert_eq!(err.to_string(), "could not find a free binding name for `_foo` after 3 attempts");

    let err = TransformError::Parse(vec!["a".to_string(), "b".to_string()]);
    assert_eq!(err.to_string(), "failed to parse source: a; b");
}

#[test]
fn test_transform_code() {
    let result = transform_code("a._b; a._c; a._b;");

    assert!(!result.had_error);
    assert_eq!(result.error_message, None);
    assert_eq!(result.private_names, "_b,_c");
    assert!(squash(&result.transformed_code).contains("a[_b];a[_c];a[_b];"), "{}", result.transformed_code);
}

#[test]
fn test_transform_code_reports_errors() {
    let result = transform_code("let = ;");

    assert!(result.had_error);
    assert!(result.transformed_code.is_empty());
    assert!(result.private_names.is_empty());
    assert!(result.error_message.unwrap().starts_with("failed to parse source"));
}
