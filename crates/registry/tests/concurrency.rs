use std::sync::Arc;
use std::thread;

use pretty_assertions::assert_eq;
use stagehand_registry::{Candidate, Record, Shared, SharedRegistry, Value, args, methods};

#[derive(Debug, Default, Record)]
#[record(methods)]
pub struct Tally {
	pub count: u64,
}

#[methods]
impl Tally {
	pub fn bump(&mut self) -> u64 {
		self.count += 1;
		self.count
	}
}

#[test]
fn concurrent_imports_all_land() {
	let shared = Arc::new(SharedRegistry::default());
	let workers: Vec<_> = (0..8)
		.map(|i| {
			let shared = Arc::clone(&shared);
			thread::spawn(move || {
				shared
					.import([Candidate::named_function(format!("tally::{i}"), Shared::<Tally>::default)])
					.unwrap();
			})
		})
		.collect();
	for worker in workers {
		worker.join().unwrap();
	}

	let snapshot = shared.load();
	assert_eq!(snapshot.len(), 8);
	assert!((0..8).all(|i| snapshot.contains(&format!("tally::{i}"))));
}

#[test]
fn handle_calls_from_many_threads() {
	let shared = SharedRegistry::default();
	shared.import([Candidate::record::<Tally>()]).unwrap();
	let handle = shared
		.load()
		.construct(&Tally::type_info().key(), args![])
		.unwrap();

	thread::scope(|scope| {
		for _ in 0..4 {
			scope.spawn(|| {
				for _ in 0..25 {
					handle.call("bump", args![]).unwrap();
				}
			});
		}
	});

	assert_eq!(handle.get("count"), Some(Value::Uint(100)));
}
