mod utils;

use simd_json::prelude::*;
use smaplink::{embed, extract, join_lines, CommentSyntax, EmbedOptions, Error, SourceMapJson};
use utils::{owned, read_file, read_lines};

#[test]
fn test_extract_bundle() {
    let extracted = extract(read_lines("tests/data/bundle.js"), "bundle.js.map").unwrap();

    assert_eq!(extracted.syntax, CommentSyntax::Line);
    insta::assert_snapshot!(join_lines(&extracted.lines), @r###"
    "use strict";
    const add=(a,b)=>a+b;console.log(add(1,2));
    //# sourceMappingURL=bundle.js.map
    "###);
    assert!(join_lines(&extracted.lines).ends_with("bundle.js.map\n"));

    let mut buf = read_file("tests/data/bundle.js.map");
    let mut expected = SourceMapJson::from_slice(&mut buf).unwrap();
    expected.strip_file();
    assert_eq!(extracted.map, expected);

    let sources = extracted.map.get("sources").unwrap();
    assert_eq!(sources.get_idx(0).and_then(|s| s.as_str()), Some("src/main.ts"));
}

#[test]
fn test_extract_css() {
    let extracted = extract(read_lines("tests/data/site.css"), "site.css.map").unwrap();

    assert_eq!(extracted.syntax, CommentSyntax::Block);
    assert_eq!(
        extracted.lines,
        owned(&["body{color:red}\n", "/*# sourceMappingURL=site.css.map */\n"])
    );
    assert_eq!(extracted.map.file(), None);
    assert_eq!(
        extracted.map.get("mappings").and_then(|m| m.as_str()),
        Some("AAAA,EACE,UAAU")
    );
}

#[test]
fn test_extract_end_to_end() {
    let mut buf =
        br#"{"version":3,"sources":["a.js"],"names":[],"mappings":"AAAA","file":"old.js"}"#
            .to_vec();
    let map = SourceMapJson::from_slice(&mut buf).unwrap();
    let mut expected = map.clone();
    expected.strip_file();

    let embedded = embed(owned(&["var x=1;"]), map, &EmbedOptions::default()).unwrap();
    let extracted = extract(embedded, "a.js.map").unwrap();

    assert_eq!(
        extracted.lines,
        owned(&["var x=1;\n", "//# sourceMappingURL=a.js.map\n"])
    );
    assert_eq!(extracted.map, expected);

    let pretty = extracted.map.to_pretty().unwrap();
    assert!(!pretty.contains("\"file\""), "{pretty}");
    assert!(pretty.ends_with('\n'));
}

#[test]
fn test_extract_twice_fails() {
    let extracted = extract(read_lines("tests/data/bundle.js"), "bundle.js.map").unwrap();
    assert!(matches!(
        extract(extracted.lines, "bundle.js.map"),
        Err(Error::NoSourceMap)
    ));
}

#[test]
fn test_extract_without_source_map() {
    assert!(matches!(
        extract(read_lines("tests/data/plain.js"), "plain.js.map"),
        Err(Error::NoSourceMap)
    ));
}

#[test]
fn test_embed_extract_inverse() {
    let extracted = extract(read_lines("tests/data/bundle.js"), "bundle.js.map").unwrap();
    let map = extracted.map.clone();

    let options = EmbedOptions::new().with_syntax(extracted.syntax);
    let embedded = embed(extracted.lines, extracted.map, &options).unwrap();
    let again = extract(embedded, "bundle.js.map").unwrap();
    assert_eq!(again.map, map);
}
