use bookledger_core::{Catalog, InventoryError, Ledger};
use proptest::prelude::*;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Barrier};
use std::thread;

const TITLES: [&str; 4] = ["Emma", "Dune", "Ulysses", "Beloved"];

#[derive(Debug, Clone)]
enum Command {
    Add(usize, i64),
    Remove(usize),
    Borrow(usize),
    Return(usize),
}

fn command_strategy() -> impl Strategy<Value = Command> {
    prop_oneof![
        (0..TITLES.len(), 0i64..6).prop_map(|(title, id)| Command::Add(title, id)),
        (0..TITLES.len()).prop_map(Command::Remove),
        (0..TITLES.len()).prop_map(Command::Borrow),
        (0..TITLES.len()).prop_map(Command::Return),
    ]
}

fn apply(catalog: &Catalog, ledger: &Ledger, command: &Command) -> Result<(), InventoryError> {
    match command {
        Command::Add(title, id) => catalog.add(TITLES[*title], "author", *id).map(|_| ()),
        Command::Remove(title) => catalog.remove(TITLES[*title]).map(|_| ()),
        Command::Borrow(title) => ledger.borrow(TITLES[*title]).map(|_| ()),
        Command::Return(title) => ledger.return_book(TITLES[*title]).map(|_| ()),
    }
}

fn assert_exclusive(catalog: &Catalog, ledger: &Ledger, known: &HashSet<&str>) {
    for title in TITLES {
        let available = catalog.contains(title);
        let borrowed = ledger.is_borrowed(title);
        assert!(!(available && borrowed), "{title} held by both collections");
        assert_eq!(
            available || borrowed,
            known.contains(title),
            "{title} presence does not match command history"
        );
    }
}

proptest! {
    #[test]
    fn every_known_title_lives_in_exactly_one_collection(
        commands in proptest::collection::vec(command_strategy(), 1..60)
    ) {
        let catalog = Catalog::new();
        let ledger = Ledger::new(&catalog);
        let mut known = HashSet::new();

        for command in &commands {
            let outcome = apply(&catalog, &ledger, command);
            match (command, &outcome) {
                (Command::Add(title, _), Ok(())) => {
                    known.insert(TITLES[*title]);
                }
                (Command::Remove(title), Ok(())) => {
                    known.remove(TITLES[*title]);
                }
                _ => {}
            }
            assert_exclusive(&catalog, &ledger, &known);

            let mut ids = HashSet::new();
            for record in catalog.list().into_iter().chain(ledger.list()) {
                prop_assert!(ids.insert(record.id), "id {} held twice", record.id);
            }
        }
    }

    #[test]
    fn borrow_return_round_trip_preserves_record(
        author in "[a-zA-Z ]{0,12}",
        id in any::<i64>(),
    ) {
        let catalog = Catalog::new();
        let ledger = Ledger::new(&catalog);
        let original = catalog.add("Round Trip", author, id).unwrap();

        ledger.borrow("Round Trip").unwrap();
        ledger.return_book("Round Trip").unwrap();

        prop_assert_eq!(catalog.get("Round Trip").unwrap(), original);
        prop_assert!(ledger.is_empty());
    }
}

#[test]
fn concurrent_borrows_of_one_title_succeed_exactly_once() {
    let catalog = Catalog::new();
    catalog.add("Contested", "A", 1).unwrap();
    let workers = 8;
    let barrier = Arc::new(Barrier::new(workers));

    let handles: Vec<_> = (0..workers)
        .map(|_| {
            let ledger = Ledger::new(&catalog);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                ledger.borrow("Contested").is_ok()
            })
        })
        .collect();

    let successes = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .filter(|ok| *ok)
        .count();

    assert_eq!(successes, 1);
    assert!(!catalog.contains("Contested"));
    assert!(Ledger::new(&catalog).is_borrowed("Contested"));
}

#[test]
fn observers_never_see_a_title_in_both_or_neither_during_transfers() {
    let catalog = Catalog::new();
    for (id, title) in TITLES.iter().enumerate() {
        catalog.add(*title, "A", id as i64).unwrap();
    }

    let movers: Vec<_> = TITLES
        .iter()
        .map(|title| {
            let ledger = Ledger::new(&catalog);
            let title = title.to_string();
            thread::spawn(move || {
                for _ in 0..500 {
                    ledger.borrow(&title).unwrap();
                    ledger.return_book(&title).unwrap();
                }
            })
        })
        .collect();

    let observer = {
        let catalog = catalog.clone();
        thread::spawn(move || {
            for _ in 0..500 {
                let snapshot = catalog.snapshot();
                let mut seen: BTreeMap<String, usize> = BTreeMap::new();
                for record in snapshot.available.iter().chain(snapshot.on_loan.iter()) {
                    *seen.entry(record.title.clone()).or_default() += 1;
                }
                assert_eq!(seen.len(), TITLES.len());
                assert!(seen.values().all(|count| *count == 1));
            }
        })
    };

    for mover in movers {
        mover.join().unwrap();
    }
    observer.join().unwrap();

    assert_eq!(catalog.len(), TITLES.len());
}
