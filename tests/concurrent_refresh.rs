use namelist::engine::{ListRegistry, RefreshOutcome};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

// Each generation has its own size, so every rewrite is detected.
fn generation(n: usize) -> String {
    (0..=n).map(|i| format!("gen{}-name{}.example\n", n, i)).collect()
}

fn write_generation(path: &Path, n: usize) {
    fs::write(path, generation(n)).unwrap();
}

#[test]
fn test_readers_never_see_half_published_state() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("list.txt");
    write_generation(&path, 0);

    let registry = Arc::new(ListRegistry::new([path.clone()], Duration::from_secs(1)));
    registry.refresh_all();

    let done = Arc::new(AtomicBool::new(false));
    let mut readers = Vec::new();
    for _ in 0..4 {
        let registry = registry.clone();
        let done = done.clone();
        readers.push(thread::spawn(move || {
            while !done.load(Ordering::Relaxed) {
                let item = registry.item(0).unwrap();
                let names = item.names();

                // Every published set is a complete generation...
                let n = names.len() - 1;
                for i in 0..=n {
                    assert!(names.contains(&format!("gen{}-name{}.example", n, i)));
                }
                // ...paired with the size of the content it came from.
                assert_eq!(item.stamp().size(), generation(n).len() as u64);
            }
        }));
    }

    for n in 1..50 {
        write_generation(&path, n);
        assert_eq!(
            registry.refresh_one(0),
            Some(RefreshOutcome::Reloaded { names: n + 1 })
        );
    }

    done.store(true, Ordering::Relaxed);
    for reader in readers {
        reader.join().unwrap();
    }

    assert_eq!(registry.names(0).unwrap().len(), 50);
}

#[test]
fn test_old_snapshot_is_stable() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("list.txt");
    write_generation(&path, 2);

    let registry = ListRegistry::new([path.clone()], Duration::from_secs(1));
    registry.refresh_all();
    let held = registry.names(0).unwrap();

    write_generation(&path, 5);
    registry.refresh_all();

    assert_eq!(held.len(), 3);
    assert!(held.contains("gen2-name0.example"));
    assert_eq!(registry.names(0).unwrap().len(), 6);
}
