//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `makerplan_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    // Tiny probe validating core crate wiring independently from the
    // interactive client.
    println!("makerplan_core ping={}", makerplan_core::ping());
    println!("makerplan_core version={}", makerplan_core::core_version());
    println!(
        "makerplan_core schema_version={}",
        makerplan_core::db::migrations::latest_version()
    );
}
