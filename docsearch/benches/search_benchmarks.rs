use criterion::{black_box, criterion_group, criterion_main, Criterion};
use docsearch::{
    history::{add_entry, format_entry},
    CompiledPattern, Direction, FileStore, MemoryStore, OptionSet, SearchSession,
    SearchSettings, SettingsStore, TextBuffer,
};
use tempfile::tempdir;

fn create_document(lines: usize) -> String {
    let mut text = String::new();
    for j in 0..lines {
        text.push_str(&format!(
            "Line {} TODO: fix bug {} FIXME: optimize line {} NOTE: important task {}\n",
            j, j, j, j
        ));
    }
    text
}

fn bench_find_matches(c: &mut Criterion) {
    let text = create_document(5_000);
    let patterns = [
        ("literal", "TODO", OptionSet::literal()),
        ("regex", r"TODO:.*\d+", OptionSet::default()),
        ("groups", r"FIXME: (\w+) line (\d+)", OptionSet::default()),
        ("whole_word", "bug", OptionSet::default().with_whole_word(true)),
    ];

    let mut group = c.benchmark_group("Find Matches");
    for (name, query, options) in patterns {
        let pattern = CompiledPattern::compile(query, options).unwrap();
        group.bench_function(name, |b| {
            b.iter(|| black_box(pattern.find_matches(black_box(&text))));
        });
    }
    group.finish();
}

fn bench_document_scaling(c: &mut Criterion) {
    let pattern = CompiledPattern::compile("TODO", OptionSet::default()).unwrap();

    let mut group = c.benchmark_group("Document Scaling");
    for lines in [100, 1_000, 10_000] {
        let text = create_document(lines);
        group.bench_function(format!("lines_{}", lines), |b| {
            b.iter(|| black_box(pattern.match_count(&text)));
        });
    }
    group.finish();
}

fn bench_replace(c: &mut Criterion) {
    let text = create_document(2_000);
    let pattern = CompiledPattern::compile(r"NOTE: (\w+)", OptionSet::default()).unwrap();

    let mut group = c.benchmark_group("Replace");
    group.bench_function("replace_all", |b| {
        b.iter(|| black_box(pattern.replace_all(&text, "DONE: $1")));
    });
    group.bench_function("replace_one_middle", |b| {
        b.iter(|| black_box(pattern.replace_one(&text, "DONE: $1", 1_000)));
    });
    group.finish();
}

fn bench_session_navigation(c: &mut Criterion) {
    let store = MemoryStore::default();
    let mut buffer = TextBuffer::new(create_document(2_000));
    let mut session = SearchSession::new();
    session.open(false, &store);
    session.set_query("FIXME");

    c.bench_function("navigate_forward", |b| {
        b.iter(|| black_box(session.navigate(&mut buffer, Direction::Forward)));
    });
}

fn bench_history(c: &mut Criterion) {
    let mut group = c.benchmark_group("History");

    group.bench_function("add_full_list", |b| {
        let mut history = Vec::new();
        for i in 0..20 {
            history = add_entry(&history, format_entry(&format!("q{}", i), "", OptionSet::default()), 20);
        }
        b.iter(|| {
            let entry = format_entry("q5", "", OptionSet::default());
            black_box(add_entry(&history, entry, 20))
        });
    });

    let dir = tempdir().unwrap();
    let settings = SearchSettings {
        history_path: Some(dir.path().join("history.json")),
        ..SearchSettings::default()
    };
    let mut store = FileStore::open(settings).unwrap();
    group.bench_function("save_to_file", |b| {
        b.iter(|| {
            let history = add_entry(
                store.search_history(),
                format_entry("bench", "", OptionSet::default()),
                20,
            );
            store.save_search_history(history).unwrap();
        });
    });
    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = bench_find_matches, bench_document_scaling,
              bench_replace, bench_session_navigation, bench_history
}

criterion_main!(benches);
