/*
 * update_file.rs
 * Copyright (c) 2026 xmlsplice contributors
 *
 * Integration tests for path-based updates of arbitrary XML files.
 */

use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;
use xmlsplice::{
    FieldSet, LineEnding, PathSegment, SpliceConfig, update_file, update_text,
};

#[test]
fn test_whole_path_created_under_bare_root() {
    let segments = PathSegment::parse_path("a/b/c").unwrap();
    let fields = FieldSet::new().with("k", "v");
    let updated = update_text("<settings/>", &segments, &fields, &SpliceConfig::default()).unwrap();

    assert_eq!(updated.report.created, vec!["a", "b", "c"]);
    assert_eq!(updated.report.spliced.as_deref(), Some("a"));
    assert_eq!(
        updated.text,
        concat!(
            "<settings>\n",
            "    <a>\n",
            "        <b>\n",
            "            <c>\n",
            "                <k>v</k>\n",
            "            </c>\n",
            "        </b>\n",
            "    </a>\n",
            "</settings>",
        )
    );
}

#[test]
fn test_empty_field_set_creates_empty_target() {
    let segments = PathSegment::parse_path("servers").unwrap();
    let updated = update_text(
        "<settings>\n  <mirrors/>\n</settings>\n",
        &segments,
        &FieldSet::new(),
        &SpliceConfig::default().with_indent_unit("  "),
    )
    .unwrap();
    assert_eq!(
        updated.text,
        "<settings>\n  <mirrors/>\n  <servers/>\n</settings>\n"
    );
}

#[test]
fn test_comments_inside_root_survive() {
    let text = concat!(
        "<settings>\n",
        "  <!-- mirrors -->\n",
        "  <mirrors>\n",
        "    <mirror><id>m</id></mirror>   <!-- trailing -->\n",
        "  </mirrors>\n",
        "</settings>\n",
    );
    let segments = PathSegment::parse_path("mirrors/mirror").unwrap();
    let updated = update_text(
        text,
        &segments,
        &FieldSet::new().with("url", "https://repo.example.com"),
        &SpliceConfig::default().with_indent_unit("  "),
    )
    .unwrap();

    assert_eq!(
        updated.text,
        concat!(
            "<settings>\n",
            "  <!-- mirrors -->\n",
            "  <mirrors>\n",
            "    <mirror>\n",
            "      <id>m</id>\n",
            "      <url>https://repo.example.com</url>\n",
            "    </mirror>   <!-- trailing -->\n",
            "  </mirrors>\n",
            "</settings>\n",
        )
    );
}

#[test]
fn test_special_characters_are_escaped() {
    let segments = PathSegment::parse_path("opts").unwrap();
    let updated = update_text(
        "<c>\n</c>",
        &segments,
        &FieldSet::new().with("jvm", "-Xmx<1g> & more"),
        &SpliceConfig::default().with_indent_unit("  "),
    )
    .unwrap();
    assert_eq!(
        updated.text,
        "<c>\n  <opts>\n    <jvm>-Xmx&lt;1g&gt; &amp; more</jvm>\n  </opts>\n</c>"
    );

    let again = update_text(
        &updated.text,
        &segments,
        &FieldSet::new().with("jvm", "-Xmx<1g> & more"),
        &SpliceConfig::default().with_indent_unit("  "),
    )
    .unwrap();
    assert!(!again.report.changed);
}

#[test]
fn test_forced_line_ending() {
    let segments = PathSegment::parse_path("a").unwrap();
    let config = SpliceConfig::default()
        .with_indent_unit("  ")
        .with_line_ending(LineEnding::Crlf);
    let updated = update_text("<c>\n</c>", &segments, &FieldSet::new().with("x", 1), &config)
        .unwrap();
    assert_eq!(updated.text, "<c>\r\n  <a>\r\n    <x>1</x>\r\n  </a>\r\n</c>");
}

#[test]
fn test_update_file_round_trip_on_disk() {
    let temp = TempDir::new().expect("Failed to create temp directory");
    let path = temp.path().join("settings.xml");
    let original = "<?xml version=\"1.0\"?>\n<settings>\n    <offline>false</offline>\n</settings>\n";
    fs::write(&path, original).unwrap();

    let segments = PathSegment::parse_path("offline").unwrap();
    let report = update_file(&path, &segments, &FieldSet::new(), &SpliceConfig::default())
        .unwrap();
    assert!(!report.changed);
    assert_eq!(fs::read_to_string(&path).unwrap(), original);

    let segments = PathSegment::parse_path("proxies/proxy").unwrap();
    let fields = FieldSet::new().with("active", true).with("port", 8080);
    let report = update_file(&path, &segments, &fields, &SpliceConfig::default()).unwrap();
    assert!(report.changed);
    assert_eq!(report.created, vec!["proxies", "proxy"]);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        concat!(
            "<?xml version=\"1.0\"?>\n",
            "<settings>\n",
            "    <offline>false</offline>\n",
            "    <proxies>\n",
            "        <proxy>\n",
            "            <active>true</active>\n",
            "            <port>8080</port>\n",
            "        </proxy>\n",
            "    </proxies>\n",
            "</settings>\n",
        )
    );
}
