//! Property-based tests for the decoders and stores
//!
//! Every decoder must reject malformed input with an error, never a panic,
//! and must honour its output length contract.

mod common;

use common::{huffman_encode, identity_dictionary, words};
use proptest::prelude::*;
use wolfdata::graphics::{Picture, PictureSize};
use wolfdata::pages::{decode_sprite, decode_texture};
use wolfdata::{
    carmack_expand, huffman_expand, rlew_expand, Edition, GraphicsLayout, GraphicsStore,
    MapStore, NodeTable, PageDialect, PageLayout, PageStore,
};

proptest! {
    #[test]
    fn test_huffman_never_exceeds_length(
        data in prop::collection::vec(any::<u8>(), 1..300),
        cut in any::<prop::sample::Index>(),
        extra in 0usize..16,
        short in any::<bool>()
    ) {
        // identity codes are one byte per symbol, so a cut at byte k decodes k symbols
        let table = NodeTable::from_dictionary(&identity_dictionary()).unwrap();
        let packed = huffman_encode(&data);
        let kept = cut.index(packed.len() + 1);
        let room = if short { kept / 2 } else { data.len() + extra };

        let mut out = vec![0u8; room];
        let written = table.expand_into(&packed[..kept], &mut out).unwrap();
        prop_assert!(written <= out.len());
        prop_assert_eq!(written, kept.min(room));
        prop_assert_eq!(&out[..written], &data[..written]);
        prop_assert!(out[written..].iter().all(|&b| b == 0));

        let full = huffman_expand(&packed, data.len(), &identity_dictionary()).unwrap();
        prop_assert_eq!(full, data.clone());
        let padded = table.expand(&packed[..kept], data.len() + extra).unwrap();
        prop_assert_eq!(&padded[..kept], &data[..kept]);
        prop_assert!(padded[kept..].iter().all(|&b| b == 0));
    }
}

proptest! {
    #[test]
    fn test_huffman_complete_input_fills_exactly(data in prop::collection::vec(any::<u8>(), 0..300)) {
        let table = NodeTable::from_dictionary(&identity_dictionary()).unwrap();
        let packed = huffman_encode(&data);
        let mut out = vec![0u8; data.len()];
        let written = table.expand_into(&packed, &mut out).unwrap();
        prop_assert_eq!(written, data.len());
        prop_assert_eq!(out, data);
    }
}

proptest! {
    #[test]
    fn test_carmack_never_panics(data in prop::collection::vec(any::<u8>(), 0..400)) {
        if let Ok(out) = carmack_expand(&data) {
            let declared = u16::from_le_bytes([data[0], data[1]]) as usize;
            prop_assert_eq!(out.len(), declared);
        }
    }
}

proptest! {
    #[test]
    fn test_carmack_literals_pass_through(ws in prop::collection::vec(0u16..0xA700, 0..100)) {
        // high bytes below 0xA7 never form a pointer token
        let body = words(&ws);
        let mut data = (body.len() as u16).to_le_bytes().to_vec();
        data.extend_from_slice(&body);
        prop_assert_eq!(carmack_expand(&data).unwrap(), body);
    }
}

proptest! {
    #[test]
    fn test_rlew_exact_length(
        tag in any::<u16>(),
        data in prop::collection::vec(any::<u8>(), 0..200),
        length in 0usize..400
    ) {
        match rlew_expand(tag, length, &data) {
            Ok(out) => prop_assert_eq!(out.len(), length),
            Err(e) => {
                let is_exhausted = matches!(e, wolfdata::WolfError::RunLengthExhausted { .. });
                prop_assert!(is_exhausted);
            }
        }
    }
}

proptest! {
    #[test]
    fn test_rlew_without_tag_is_identity(ws in prop::collection::vec(1u16.., 0..100)) {
        let data = words(&ws);
        prop_assert_eq!(rlew_expand(0, data.len(), &data).unwrap(), data);
    }
}

proptest! {
    #[test]
    fn test_deinterleave_formula(
        quarter in 1usize..8,
        height in 1usize..8,
        seed in any::<u8>()
    ) {
        let width = quarter * 4;
        let data: Vec<u8> = (0..width * height).map(|i| (i as u8).wrapping_add(seed)).collect();
        let size = PictureSize { width: width as u16, height: height as u16 };
        let picture = Picture::deinterleave(&data, size).unwrap();
        for y in 0..height {
            for x in 0..width {
                let src = y * quarter + x / 4 + (x % 4) * quarter * height;
                prop_assert_eq!(picture.pixel(x, y), data[src]);
            }
        }
    }
}

proptest! {
    #[test]
    fn test_shape_decoders_never_panic(data in prop::collection::vec(any::<u8>(), 0..600)) {
        let _ = decode_sprite(&data, 64, 64);
        let _ = decode_sprite(&data, 8, 8);
        let _ = decode_texture(&data, 16, 16);
    }
}

proptest! {
    #[test]
    fn test_stores_never_panic(
        head in prop::collection::vec(any::<u8>(), 0..64),
        data in prop::collection::vec(any::<u8>(), 0..512)
    ) {
        let layout = GraphicsLayout::for_edition(Edition::Shareware);
        let _ = GraphicsStore::from_bytes(&head, &identity_dictionary(), &data, layout);
        let _ = PageStore::from_bytes(&data, PageLayout::default());
        let _ = PageStore::from_bytes(&data, PageLayout::with_dialect(PageDialect::OffsetDelta));
        let _ = MapStore::from_bytes(&head, &data, None);
    }
}
