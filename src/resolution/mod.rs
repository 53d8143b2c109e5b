/*!
 * Title resolution.
 *
 * - `similarity`: Jaro similarity between titles
 * - `transliteration`: Cyrillic to Latin romanization for last-resort queries
 * - `resolver`: the ordered search-variant algorithm
 */

pub mod resolver;
pub mod similarity;
pub mod transliteration;

pub use resolver::{SearchVariant, TitleResolver};
pub use similarity::{similarity, DEFAULT_SIMILARITY_THRESHOLD};
pub use transliteration::transliterate;
