//! First-use initialization under contention.

use std::sync::{Arc, Barrier};
use std::thread;

use validation::{Validator, validatable};

struct Label {
    text: String,
}

validatable!(Label {
    text => "required,stringContains=ok",
});

const THREADS: usize = 16;

#[test]
fn concurrent_first_calls_see_full_registry() {
    let validator = Arc::new(Validator::new());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let validator = Arc::clone(&validator);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let label = Label {
                    text: if i % 2 == 0 { "ok".into() } else { "bad".into() },
                };
                (i, validator.try_validate(&label))
            })
        })
        .collect();

    for handle in handles {
        let (i, result) = handle.join().unwrap();
        if i % 2 == 0 {
            assert!(result.is_ok(), "thread {i}: {result:?}");
        } else {
            let err = result.unwrap_err();
            assert!(!err.is_config(), "thread {i} saw a partial registry: {err}");
            assert!(err.as_invalid().unwrap().has_failure("text", "stringContains"));
        }
    }

    assert!(validator.is_initialized());
}

#[test]
fn concurrent_get_returns_one_registry() {
    let validator = Arc::new(Validator::new());
    let barrier = Arc::new(Barrier::new(THREADS));

    let addresses: Vec<usize> = (0..THREADS)
        .map(|_| {
            let validator = Arc::clone(&validator);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let registry = validator.get();
                assert!(registry.contains("dateAfter"));
                assert!(registry.contains("dateBefore"));
                assert!(registry.contains("stringContains"));
                std::ptr::from_ref(registry) as usize
            })
        })
        .collect::<Vec<_>>()
        .into_iter()
        .map(|h| h.join().unwrap())
        .collect();

    assert!(addresses.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn default_instance_is_shared_across_threads() {
    let handles: Vec<_> = (0..THREADS)
        .map(|_| thread::spawn(|| validation::validate(&Label { text: "ok".into() })))
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap().is_ok());
    }
}
