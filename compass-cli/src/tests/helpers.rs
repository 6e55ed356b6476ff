//! Test helpers for writing provider payloads to disk.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

/// Two legacy coffee shop records: one independent and old, one chain.
pub(super) const COFFEE_PAYLOAD: &str = r#"{
  "results": [
    {
      "fsq_id": "cafe-1",
      "name": "Blue Door Coffee",
      "categories": [{ "name": "Coffee Shop" }],
      "distance": 300,
      "location": { "address": "118 Court St", "locality": "Brooklyn", "region": "NY" },
      "chains": [],
      "date_created": "2013-03-14T09:00:00Z",
      "social_media": { "instagram": "bluedoor", "twitter": "bluedoorbk" },
      "website": "https://bluedoor.example",
      "verified": true
    },
    {
      "fsq_id": "chain-1",
      "name": "Starbeans",
      "categories": [{ "name": "Coffee Shop" }],
      "distance": 150,
      "chains": [{ "id": "sb", "name": "Starbeans" }]
    }
  ]
}"#;

/// A bookstore plus a repeat of the independent coffee shop.
pub(super) const BOOKSTORE_PAYLOAD: &str = r#"[
  {
    "fsq_id": "books-1",
    "name": "Spine & Crown",
    "categories": [{ "name": "Bookstore" }],
    "date_created": "2022-05-01",
    "social_media": { "facebook_id": "spinecrown" }
  },
  {
    "fsq_id": "cafe-1",
    "name": "Blue Door Coffee",
    "categories": [{ "name": "Coffee Shop" }],
    "distance": 300
  },
  { "categories": [{ "name": "Bar" }] }
]"#;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write test file");
}

/// Temporary workspace rooted at a UTF-8 path.
pub(super) fn workspace() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}
