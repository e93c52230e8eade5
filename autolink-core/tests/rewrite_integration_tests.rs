// autolink-core/tests/rewrite_integration_tests.rs
//! End-to-end rewriting tests: Markdown in, Markdown out, through the real
//! parser adapter and rule compiler.

use autolink_core::{
    compile_rules, parse_document, rewrite, rewrite_with_report, AutolinkConfig, LinkRule, Node,
    NodeKind, RuleSet,
};
use test_log::test;

const MM_LINK: &str = "[Mattermost](https://mattermost.com)";

fn rule_set(links: Vec<LinkRule>) -> RuleSet {
    let compiled = compile_rules(&links);
    assert!(compiled.is_clean(), "unexpected compile errors: {:?}", compiled.errors);
    compiled.rules
}

fn special_case_rules() -> RuleSet {
    rule_set(vec![
        LinkRule::new("(Mattermost)", MM_LINK),
        LinkRule::new("(Example)", "[Example](https://example.com)"),
        LinkRule::new("(foobar)", "fb"),
    ])
}

fn run(input: &str, rules: &RuleSet) -> String {
    let root = parse_document(input);
    rewrite(input, &root, rules)
}

#[test]
fn test_basic_substitution() {
    let rules = rule_set(vec![LinkRule::new("(Mattermost)", MM_LINK)]);
    assert_eq!(
        run("Welcome to Mattermost!", &rules),
        "Welcome to [Mattermost](https://mattermost.com)!"
    );
}

#[test]
fn test_special_cases() {
    let rules = special_case_rules();
    let cases: &[(&str, &str)] = &[
        ("hello ``` Mattermost ``` goodbye", "hello ``` Mattermost ``` goodbye"),
        ("hello\n```\nMattermost\n```\ngoodbye", "hello\n```\nMattermost\n```\ngoodbye"),
        (
            "Mattermost ``` Mattermost ``` goodbye",
            "[Mattermost](https://mattermost.com) ``` Mattermost ``` goodbye",
        ),
        (
            "``` Mattermost ``` Mattermost",
            "``` Mattermost ``` [Mattermost](https://mattermost.com)",
        ),
        (
            "Mattermost ``` Mattermost ```",
            "[Mattermost](https://mattermost.com) ``` Mattermost ```",
        ),
        (
            "Mattermost ``` Mattermost ```\n\n",
            "[Mattermost](https://mattermost.com) ``` Mattermost ```\n\n",
        ),
        ("hello ` Mattermost ` goodbye", "hello ` Mattermost ` goodbye"),
        ("hello\n`\nMattermost\n`\ngoodbye", "hello\n`\nMattermost\n`\ngoodbye"),
        (
            "Mattermost ` Mattermost ` goodbye",
            "[Mattermost](https://mattermost.com) ` Mattermost ` goodbye",
        ),
        (
            "` Mattermost ` Mattermost",
            "` Mattermost ` [Mattermost](https://mattermost.com)",
        ),
        (
            "Mattermost ` Mattermost `",
            "[Mattermost](https://mattermost.com) ` Mattermost `",
        ),
        (
            "Mattermost ` Mattermost `\n\n",
            "[Mattermost](https://mattermost.com) ` Mattermost `\n\n",
        ),
        (
            "hello ``` Mattermost ``` goodbye ` Mattermost ` end",
            "hello ``` Mattermost ``` goodbye ` Mattermost ` end",
        ),
        (
            "hello\n```\nMattermost\n```\ngoodbye ` Mattermost ` end",
            "hello\n```\nMattermost\n```\ngoodbye ` Mattermost ` end",
        ),
        (
            "Mattermost ``` Mattermost ``` goodbye ` Mattermost ` end",
            "[Mattermost](https://mattermost.com) ``` Mattermost ``` goodbye ` Mattermost ` end",
        ),
        (
            "```\n` Mattermost `\n```\nMattermost",
            "```\n` Mattermost `\n```\n[Mattermost](https://mattermost.com)",
        ),
        ("  Mattermost", "  [Mattermost](https://mattermost.com)"),
        ("    Mattermost", "    Mattermost"),
        (
            "    ```\nMattermost\n    ```",
            "    ```\n[Mattermost](https://mattermost.com)\n    ```",
        ),
        (
            "` ``` `\nMattermost\n` ``` `",
            "` ``` `\n[Mattermost](https://mattermost.com)\n` ``` `",
        ),
        (
            "Mattermost \n Mattermost",
            "[Mattermost](https://mattermost.com) \n [Mattermost](https://mattermost.com)",
        ),
        (
            "[Mattermost](https://mattermost.com)",
            "[Mattermost](https://mattermost.com)",
        ),
        (
            "[  Mattermost  ](https://mattermost.com)",
            "[  Mattermost  ](https://mattermost.com)",
        ),
        (
            "[  Mattermost  ][1]\n\n[1]: https://mattermost.com",
            "[  Mattermost  ][1]\n\n[1]: https://mattermost.com",
        ),
        (
            "![  Mattermost  ](https://mattermost.com/example.png)",
            "![  Mattermost  ](https://mattermost.com/example.png)",
        ),
        (
            "![  Mattermost  ][1]\n\n[1]: https://mattermost.com/example.png",
            "![  Mattermost  ][1]\n\n[1]: https://mattermost.com/example.png",
        ),
        (
            "foobar\nExample\nfoobar Mattermost",
            "fb\n[Example](https://example.com)\nfb [Mattermost](https://mattermost.com)",
        ),
        ("foobar", "fb"),
        ("foobarfoobar", "foobarfoobar"),
    ];

    for (input, expected) in cases {
        assert_eq!(&run(input, &rules), expected, "input: {:?}", input);
    }
}

#[test]
fn test_empty_rule_set_is_identity() {
    let rules = RuleSet::default();
    for input in [
        "",
        "plain",
        "Mattermost [Mattermost](https://mattermost.com)",
        "```\ncode\n```",
        "a\\*b &amp; c",
    ] {
        assert_eq!(run(input, &rules), input);
    }
}

#[test]
fn test_chaining_follows_configuration_order() {
    let forward = rule_set(vec![LinkRule::new("x", "xy"), LinkRule::new("xy", "z")]);
    assert_eq!(run("x", &forward), "z");

    let backward = rule_set(vec![LinkRule::new("xy", "z"), LinkRule::new("x", "xy")]);
    assert_eq!(run("x", &backward), "xy");
}

#[test]
fn test_independent_rules_in_one_span() {
    let rules = rule_set(vec![
        LinkRule::new("Rust", "[Rust](https://www.rust-lang.org)"),
        LinkRule::new("cargo", "[cargo](https://doc.rust-lang.org/cargo)"),
    ]);
    assert_eq!(
        run("Rust ships cargo.", &rules),
        "[Rust](https://www.rust-lang.org) ships [cargo](https://doc.rust-lang.org/cargo)."
    );
}

#[test]
fn test_offsets_survive_excluded_content_between_spans() {
    let rules = rule_set(vec![LinkRule::new("Mattermost", MM_LINK)]);
    let input = "Mattermost [Mattermost](https://x.example) and `Mattermost` then Mattermost";
    assert_eq!(
        run(input, &rules),
        "[Mattermost](https://mattermost.com) [Mattermost](https://x.example) and `Mattermost` then [Mattermost](https://mattermost.com)"
    );
}

#[test]
fn test_offsets_with_shrinking_replacements_and_multibyte_text() {
    let rules = rule_set(vec![LinkRule::new("Grüße", "Hi")]);
    let input = "Grüße *ünd* Grüße\n\n- Grüße\n- [Grüße](u) Grüße";
    assert_eq!(run(input, &rules), "Hi *ünd* Hi\n\n- Hi\n- [Grüße](u) Hi");
}

#[test]
fn test_emphasis_and_lists_are_rewritten() {
    let rules = rule_set(vec![LinkRule::new("Mattermost", MM_LINK)]);
    assert_eq!(
        run("**Mattermost** and _Mattermost_\n\n1. Mattermost", &rules),
        "**[Mattermost](https://mattermost.com)** and _[Mattermost](https://mattermost.com)_\n\n1. [Mattermost](https://mattermost.com)"
    );
}

#[test]
fn test_autolinks_and_html_are_left_alone() {
    let rules = rule_set(vec![LinkRule::new("example", "EXAMPLE")]);
    let input = "<https://example.com> <span title=\"example\">x</span> example";
    assert_eq!(
        run(input, &rules),
        "<https://example.com> <span title=\"example\">x</span> EXAMPLE"
    );
}

#[test]
fn test_underscored_identifiers_respect_boundaries() {
    let rules = rule_set(vec![LinkRule::new("foo", "FOO")]);
    assert_eq!(run("foo_bar foo bar_foo", &rules), "foo_bar FOO bar_foo");
}

#[test]
fn test_alternation_and_lazy_patterns_find_bounded_match() {
    let rules = rule_set(vec![
        LinkRule::new("Matter|Mattermost", MM_LINK),
        LinkRule::new(r"\d+|\d+px", "N"),
    ]);
    assert_eq!(
        run("Try Mattermost, `Mattermost` and width 10px.", &rules),
        "Try [Mattermost](https://mattermost.com), `Mattermost` and width N."
    );

    let lazy = rule_set(vec![LinkRule::new(r"Matter\w*?", "X")]);
    assert_eq!(run("Mattermost rocks", &lazy), "X rocks");
}

#[test]
fn test_capture_templates_through_config() {
    let yaml = r#"
links:
  - name: tickets
    pattern: 'MM-(\d+)'
    replacement: '[MM-$1](https://mattermost.atlassian.net/browse/MM-$1)'
    expand_captures: true
"#;
    let config = AutolinkConfig::from_yaml_str(yaml).unwrap();
    let rules = rule_set(config.links);
    assert_eq!(
        run("Fixed in MM-1234, see [MM-99](x).", &rules),
        "Fixed in [MM-1234](https://mattermost.atlassian.net/browse/MM-1234), see [MM-99](x)."
    );
}

fn corrupt_first_text(node: &mut Node, needle: &str) -> bool {
    if let NodeKind::PlainText { text, .. } = &mut node.kind {
        if text.contains(needle) {
            text.push('!');
            return true;
        }
    }
    node.children.iter_mut().any(|c| corrupt_first_text(c, needle))
}

#[test]
fn test_span_integrity_fault_is_contained() {
    let rules = rule_set(vec![LinkRule::new("Mattermost", MM_LINK)]);
    let input = "Mattermost one\n\nMattermost two\n\nMattermost three";
    let mut root = parse_document(input);
    assert!(corrupt_first_text(&mut root, "two"));

    let (out, report) = rewrite_with_report(input, &root, &rules);
    assert_eq!(
        out,
        "[Mattermost](https://mattermost.com) one\n\nMattermost two\n\n[Mattermost](https://mattermost.com) three"
    );
    assert_eq!(report.faults.len(), 1);
    assert_eq!(report.faults[0].expected, "Mattermost two!");
    assert_eq!(report.faults[0].found, "Mattermost two");
    assert_eq!(report.spans_rewritten, 2);
}
