use std::fs;
use std::path::Path;

use tempfile::TempDir;

pub const INDEX_HTML: &str = "<!doctype html><html><body><div id=\"root\"></div></body></html>";
pub const APP_JS: &str = "console.log(\"hello\");";
pub const APP_CSS: &str = "body { margin: 0; }";

/// Conversation used across provider tests, as (role, content) pairs.
pub fn message_history_fixture() -> Vec<(&'static str, &'static str)> {
    return vec![
        ("user", "What is the capital of France?"),
        ("assistant", "The capital of France is Paris."),
        ("user", "And of Italy?"),
    ];
}

/// Creates a throwaway document root laid out like a built browser client.
///
/// ```text
/// index.html
/// foo.js
/// assets/app.css
/// assets/logo.bin
/// empty/
/// ```
pub fn document_root_fixture() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "index.html", INDEX_HTML.as_bytes());
    write(dir.path(), "foo.js", APP_JS.as_bytes());
    write(dir.path(), "assets/app.css", APP_CSS.as_bytes());
    write(dir.path(), "assets/logo.bin", &[0, 1, 2, 3]);
    fs::create_dir_all(dir.path().join("empty")).unwrap();

    return dir;
}

fn write(root: &Path, name: &str, contents: &[u8]) {
    let path = root.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}
