// Provider implementations - bridge API clients with the NewsSource trait
pub mod newsapi;

pub use newsapi::NewsApiProvider;
