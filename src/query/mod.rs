pub mod executor;
pub mod parser;

pub use executor::{SearchOutcome, Searchable, Searcher, WordSplit};
pub use parser::{parse_query, SearchQuery};
