#![no_main]

use arbitrary::Arbitrary;
use deckstate::{CodecConfig, PaddingPolicy, TextTranscoder};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct TranscoderInput {
    data: Vec<u8>,
    level: u8,
    strip_padding: bool,
}

fuzz_target!(|input: TranscoderInput| {
    let config = CodecConfig {
        compression_level: u32::from(input.level % 10),
        padding: if input.strip_padding {
            PaddingPolicy::Strip
        } else {
            PaddingPolicy::Keep
        },
        ..CodecConfig::default()
    };
    let t = TextTranscoder::new(&config);
    let text = t.to_text(&input.data);
    let decoded = t.from_text(&text).expect("own output must decode");
    assert_eq!(decoded, input.data);
});
