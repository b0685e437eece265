#![no_main]

use deckstate::{load_from_query, QueryParameterLoader};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: &str| {
    let doc = load_from_query(input);
    assert!(doc.validate().is_ok());
    assert!(doc.flags().unwrap_or(0) <= 0b1111);

    // Адрес тоже никогда не приводит к ошибке.
    let _ = QueryParameterLoader::from_url(input).load();
});
