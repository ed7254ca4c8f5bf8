//! Spec file loading.
mod loader;

#[cfg(test)]
mod tests;

pub use loader::load_spec_file;
