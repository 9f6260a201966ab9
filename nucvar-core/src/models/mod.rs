pub mod range;

// re-export for cleaner imports
pub use self::range::Range;
