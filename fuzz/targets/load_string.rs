#![no_main]

use deckstate::{load_from_string, save_to_string};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|text: &str| {
    // Произвольный ввод даёт документ или ошибку, но не панику.
    if let Ok(doc) = load_from_string(text) {
        // Успешно загруженный документ переживает повторное сохранение.
        let again = load_from_string(&save_to_string(&doc)).expect("re-saved document must load");
        assert_eq!(again, doc);
    }
});
