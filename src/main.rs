//! Generate GoogleMock classes and GoogleTest typed-test stubs from C++ declarations.
//!
//! Binary crate entry point. All CLI logic is in the `cli` module.

// Use mimalloc as global allocator, matching the rest of our tools.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod cli;

fn main() {
    cli::run();
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
