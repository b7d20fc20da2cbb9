//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `devroster_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use devroster_core::db::open_db_in_memory;
use devroster_core::SqliteDeveloperRepository;

fn main() {
    println!("devroster_core version={}", devroster_core::core_version());

    // Opening an in-memory store and constructing a repository exercises
    // the migration path end to end without touching the filesystem.
    match open_db_in_memory().map_err(|err| err.to_string()).and_then(|conn| {
        SqliteDeveloperRepository::try_new(&conn)
            .map(|_| ())
            .map_err(|err| err.to_string())
    }) {
        Ok(()) => println!("devroster_core store=ready"),
        Err(err) => {
            eprintln!("devroster_core store=error detail={err}");
            std::process::exit(1);
        }
    }
}
