use dataconsole::*;

// Initialize logger for this integration test binary so `RUST_LOG` is honored.
#[ctor::ctor]
fn __init_test_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default()).is_test(true).try_init();
}

fn names_at_end(buffer: &str) -> Vec<String> {
    extract_names(buffer, buffer.len())
}

#[test]
fn test_simple_chain_is_split_on_dots() {
    assert_eq!(names_at_end("a.bb.ccc"), ["a", "bb", "ccc"]);
    assert_eq!(names_at_end("Requests"), ["Requests"]);
}

#[test]
fn test_call_arguments_are_dropped() {
    assert_eq!(
        names_at_end("Requests.indexRequests.index('index_name').ty"),
        ["Requests", "indexRequests", "index", "ty"]
    );
    assert_eq!(names_at_end("es.index('i').type('t').id"), ["es", "index", "type", "id"]);
    assert_eq!(names_at_end("f().g"), ["f", "g"]);
}

#[test]
fn test_nested_call_arguments_are_dropped() {
    assert_eq!(names_at_end("obj.f(g(x,y),z).m"), ["obj", "f", "m"]);
    assert_eq!(names_at_end("a.b(c(d(e(f)))).g"), ["a", "b", "g"]);
    assert_eq!(names_at_end("x.y(z.w(1).v()).u"), ["x", "y", "u"]);
}

#[test]
fn test_boundary_character_stops_the_scan() {
    assert_eq!(names_at_end("foo = bar.baz"), ["bar", "baz"]);
    assert_eq!(names_at_end("print(es.ind"), ["es", "ind"]);
    assert_eq!(names_at_end("let a = 1;\nRequests.ind"), ["Requests", "ind"]);
    assert_eq!(names_at_end("a+b"), ["b"]);
}

#[test]
fn test_empty_and_degenerate_input() {
    assert_eq!(extract_names("", 0), [""]);
    assert_eq!(extract_names(".", 1), ["", ""]);
    assert_eq!(names_at_end("foo "), [""]);
    assert_eq!(names_at_end("foo("), [""]);
    // a call that is not followed by a dot is a boundary like any other
    assert_eq!(names_at_end("foo.bar()"), [""]);
}

#[test]
fn test_separators_without_names_yield_empty_names() {
    assert_eq!(names_at_end(".b"), ["", "b"]);
    assert_eq!(names_at_end(" .b"), ["", "b"]);
    assert_eq!(names_at_end("a..b"), ["a", "", "b"]);
    assert_eq!(names_at_end("es."), ["es", ""]);
}

#[test]
fn test_text_after_the_cursor_is_ignored() {
    let buffer = "Requests.index";
    assert_eq!(extract_names(buffer, "Requests.".len()), ["Requests", ""]);
    assert_eq!(extract_names(buffer, 3), ["Req"]);
    assert_eq!(extract_names(buffer, 0), [""]);
}

#[test]
fn test_unbalanced_arguments_run_to_the_start() {
    assert_eq!(names_at_end("x)).y"), ["", "y"]);
    assert_eq!(names_at_end(").y"), ["", "y"]);
    assert_eq!(names_at_end("(x).y"), ["", "y"]);
}

#[test]
fn test_out_of_range_cursor_is_clamped() {
    assert_eq!(extract_names("a.b", 100), ["a", "b"]);
    // byte 2 falls inside 'é'
    assert_eq!(extract_names("aé", 2), ["a"]);
}

#[test]
fn test_unicode_and_dollar_identifiers() {
    assert_eq!(names_at_end("données.champ"), ["données", "champ"]);
    assert_eq!(names_at_end("$scope.x_1"), ["$scope", "x_1"]);
}

#[test]
fn test_extraction_is_repeatable() {
    let buffer = "Requests.indexRequests.index('index_name').ty";
    for cursor in 0..=buffer.len() {
        let first = extract_names(buffer, cursor);
        assert!(!first.is_empty());
        assert_eq!(first, extract_names(buffer, cursor));
    }
}
