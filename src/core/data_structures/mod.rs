/*!
 * Data Structures
 *
 * Specialized data structures shared across the guard:
 * - Inline strings for identity and tag names
 */

mod inline_string;

pub use inline_string::InlineString;
