use krawl_core::{Config, IndexStore, SearchEngine, SearchOutcome, TermFrequency};
use krawl_indexer::{build_index, IndexingError, Indexer};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_html(dir: &Path, name: &str, body: &str) {
    let html = format!("<html><head><title>t</title></head><body>{body}</body></html>");
    fs::write(dir.join(name), html).unwrap();
}

fn hit_count(outcome: SearchOutcome) -> usize {
    match outcome {
        SearchOutcome::Ranked { results, .. } => results.len(),
        _ => 0,
    }
}

#[test]
fn profiles_html_and_skips_other_files() {
    let dir = tempdir().unwrap();
    write_html(dir.path(), "pets.html", "cat dog cat");
    fs::write(dir.path().join("notes.txt"), "cat dog cat").unwrap();
    fs::write(dir.path().join("README"), "cat").unwrap();

    let (index, report) = build_index(dir.path()).unwrap();
    assert_eq!(report.files_processed, 3);
    assert_eq!(report.documents_indexed, 1);
    assert_eq!(index.len(), 1);

    let doc = &index.documents[0];
    assert!(Path::new(&doc.path).is_absolute());
    assert!(doc.path.ends_with("pets.html"));
    assert_eq!(doc.terms, vec![TermFrequency::new("cat", 2), TermFrequency::new("dog", 1)]);
}

#[test]
fn walks_nested_directories_and_drops_empty_documents() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("a/b")).unwrap();
    write_html(&dir.path().join("a/b"), "deep.html", "nested words here");
    write_html(dir.path(), "blank.html", "a b c ! ?");

    let (index, report) = build_index(dir.path()).unwrap();
    assert_eq!(report.files_processed, 2);
    assert_eq!(index.len(), 1);
    assert!(index.documents[0].path.ends_with("deep.html"));
}

#[test]
fn rejects_missing_or_non_directory_root() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing");
    assert!(matches!(build_index(&missing), Err(IndexingError::RootNotFound { .. })));

    let file = dir.path().join("file.html");
    fs::write(&file, "<body>x</body>").unwrap();
    assert!(matches!(build_index(&file), Err(IndexingError::NotADirectory { .. })));
}

#[test]
fn failed_run_leaves_previous_index_untouched() {
    let dir = tempdir().unwrap();
    let index_file = dir.path().join("index.json");
    fs::write(&index_file, "previous").unwrap();

    let config = Config::default()
        .with_docs_root(dir.path().join("missing"))
        .with_index_file(&index_file);
    assert!(Indexer::new(&config).run().is_err());
    assert_eq!(fs::read_to_string(&index_file).unwrap(), "previous");
}

#[test]
fn index_then_search_ranks_higher_frequency_first() {
    let docs = tempdir().unwrap();
    let out = tempdir().unwrap();
    write_html(docs.path(), "doc1.html", "alpha beta");
    write_html(docs.path(), "doc2.html", "alpha alpha");

    let config = Config::default()
        .with_docs_root(docs.path())
        .with_index_file(out.path().join("index.json"));
    let report = Indexer::new(&config).run().unwrap();
    assert_eq!(report.documents_indexed, 2);

    let engine = SearchEngine::open(&IndexStore::new(&config), &config).unwrap();
    let SearchOutcome::Ranked { results, total_hits } = engine.search("alpha") else {
        panic!("expected ranked results");
    };
    assert_eq!(total_hits, 2);
    assert!(results[0].path.ends_with("doc2.html"));
    assert!(results[1].path.ends_with("doc1.html"));
    assert!(results[0].score >= results[1].score);
    assert!((results[0].score - 2.0 / 2.0).abs() < 1e-12);
    assert!((results[1].score - 1.0 / 2.0).abs() < 1e-12);

    assert_eq!(engine.search("gamma"), SearchOutcome::NoResults);
}

#[test]
fn inline_markup_counts_as_one_word() {
    let dir = tempdir().unwrap();
    let body = "<p>H<sub>2</sub>O is <b>Rust</b>acean water, H<sub>2</sub>O</p>";
    write_html(dir.path(), "chem.html", body);

    let (index, _) = build_index(dir.path()).unwrap();
    let terms = &index.documents[0].terms;
    assert!(terms.contains(&TermFrequency::new("h2o", 2)));
    assert!(terms.contains(&TermFrequency::new("rustacean", 1)));
    assert!(!terms.iter().any(|tf| tf.term == "acean"));
}

#[cfg(unix)]
mod unix {
    use super::*;
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;
    use std::os::unix::fs::PermissionsExt;

    fn set_mode(path: &Path, mode: u32) {
        fs::set_permissions(path, fs::Permissions::from_mode(mode)).unwrap();
    }

    #[test]
    fn non_utf8_paths_that_collide_are_indexed_once() {
        let docs = tempdir().unwrap();
        let out = tempdir().unwrap();
        for name in [&b"d\xff"[..], &b"d\xfe"[..]] {
            let dir = docs.path().join(OsStr::from_bytes(name));
            if fs::create_dir(&dir).is_err() {
                // filesystem only accepts UTF-8 names
                return;
            }
            write_html(&dir, "a.html", "cat dog");
        }
        let latin1 = docs.path().join(OsStr::from_bytes(b"caf\xe9.html"));
        fs::write(&latin1, "<body>latin one</body>").unwrap();

        let config = Config::default()
            .with_docs_root(docs.path())
            .with_index_file(out.path().join("index.json"));
        let report = Indexer::new(&config).run().unwrap();
        assert_eq!(report.files_processed, 3);
        assert_eq!(report.documents_indexed, 2);

        let engine = SearchEngine::open(&IndexStore::new(&config), &config).unwrap();
        assert_eq!(hit_count(engine.search("cat")), 1);
        assert_eq!(hit_count(engine.search("latin")), 1);
    }

    #[test]
    fn unreadable_file_is_skipped_and_walk_continues() {
        let dir = tempdir().unwrap();
        write_html(dir.path(), "locked.html", "secret words");
        write_html(dir.path(), "open.html", "public words");
        let locked = dir.path().join("locked.html");
        set_mode(&locked, 0o000);
        if fs::read(&locked).is_ok() {
            // running with privileges that ignore file modes
            set_mode(&locked, 0o644);
            return;
        }

        let (index, report) = build_index(dir.path()).unwrap();
        set_mode(&locked, 0o644);

        assert_eq!(report.files_processed, 2);
        assert_eq!(index.len(), 1);
        assert!(index.documents[0].path.ends_with("open.html"));
    }

    #[test]
    fn unreadable_directory_aborts_without_writing() {
        let docs = tempdir().unwrap();
        let out = tempdir().unwrap();
        write_html(docs.path(), "ok.html", "fine words");
        let sub = docs.path().join("private");
        fs::create_dir(&sub).unwrap();
        write_html(&sub, "inner.html", "hidden words");
        set_mode(&sub, 0o000);
        if fs::read_dir(&sub).is_ok() {
            set_mode(&sub, 0o755);
            return;
        }

        let config = Config::default()
            .with_docs_root(docs.path())
            .with_index_file(out.path().join("index.json"));
        let result = Indexer::new(&config).run();
        set_mode(&sub, 0o755);

        assert!(matches!(result, Err(IndexingError::Walk(_))));
        assert!(!out.path().join("index.json").exists());
    }
}
