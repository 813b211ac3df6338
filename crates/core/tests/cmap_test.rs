//! Tests for embedded character maps.

use pdfsift_core::font::cmap::{CMap, CMapEntry, SharedCMap, parse_cmap};
use std::sync::Arc;
use std::thread;

fn single(from: &str, to: &str) -> CMapEntry {
    CMapEntry::Single {
        from: from.to_string(),
        to: to.to_string(),
    }
}

#[test]
fn test_range_bounds_inclusive() {
    let entry = CMapEntry::Range {
        begin: 0x10,
        end: 0x20,
        initial: 0x61,
    };
    assert!(!entry.has_mapping("0f"));
    assert!(entry.has_mapping("10"));
    assert!(entry.has_mapping("20"));
    assert!(!entry.has_mapping("21"));
    assert_eq!(entry.convert("0012"), "0063");
}

#[test]
fn test_unmapped_code_passes_through() {
    let mut cmap = CMap::new();
    cmap.append_entry(single("0001", "0041"));
    assert!(!cmap.has_mapping("0002"));
    assert_eq!(cmap.convert("0002"), "0002");
}

#[test]
fn test_insertion_order_decides_overlaps() {
    let mut cmap = CMap::new();
    cmap.append_entry(CMapEntry::Range {
        begin: 0,
        end: 0xffff,
        initial: 0,
    });
    cmap.append_entry(single("0041", "0061"));
    assert_eq!(cmap.convert("0041"), "0041");
}

#[test]
fn test_parse_cmap_ignores_text_outside_blocks() {
    let data = b"BT (0001 0002) Tj ET\n1 beginbfchar\n<0001> <0031>\nendbfchar\n<0002> <0032>\n";
    let mut cmap = CMap::new();
    parse_cmap(data, &mut cmap);
    assert_eq!(cmap.entries(), &[single("0001", "0031")]);
}

#[test]
fn test_parse_cmap_several_pairs_per_line() {
    let mut cmap = CMap::new();
    parse_cmap(b"beginbfchar\n<01> <41> <02> <42>\nendbfchar\n", &mut cmap);
    assert_eq!(cmap.len(), 2);
    assert_eq!(cmap.convert("02"), "42");
}

#[test]
fn test_parse_cmap_appends_to_existing() {
    let mut cmap = CMap::new();
    cmap.append_entry(single("aa", "bb"));
    parse_cmap(b"beginbfrange\n<00> <0f> <30>\nendbfrange\n", &mut cmap);
    assert_eq!(cmap.len(), 2);
    assert_eq!(cmap.convert("aa"), "bb");
    assert_eq!(cmap.convert("03"), "33");
}

#[test]
fn test_shared_cmap_concurrent_appends() {
    let shared = Arc::new(SharedCMap::new());
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                for i in 0..100 {
                    shared.append_entry(single(&format!("{t:02x}{i:02x}"), "0041"));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    let cmap = Arc::try_unwrap(shared).unwrap().into_inner();
    assert_eq!(cmap.len(), 800);
    assert!(cmap.has_mapping("0763"));
}
