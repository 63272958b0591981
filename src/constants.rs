// Constants for the .cat front end

/// File extension (without the dot) accepted for source files
pub const SOURCE_EXTENSION: &str = "cat";

/// File extension (without the dot) required for token and diagnostics tables
pub const TABLE_EXTENSION: &str = "csv";

/// A decimal literal with at least this many fractional digits lexes as `Double`
/// instead of `Float`
pub const DOUBLE_MIN_FRACTION_DIGITS: usize = 8;

/// Deepest block nesting the parser will recurse into before skipping the block
pub const MAX_NESTING_DEPTH: usize = 64;
