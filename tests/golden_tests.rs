//! Golden byte vectors for the three decoders
//!
//! Vectors are written as hex so the token boundaries stay readable.

mod common;

use common::{huffman_encode, identity_dictionary};
use wolfdata::{carmack_expand, huffman_expand, rlew_expand, NodeTable, WolfError};

fn bytes(hex_str: &str) -> Vec<u8> {
    hex::decode(hex_str.replace(' ', "")).unwrap()
}

#[test]
fn test_carmack_all_token_kinds() {
    // length 14 | two literals | near copy 2 words from 2 back |
    // far copy 1 word from word 1 | near escape | far escape
    let input = bytes("0e00 3412 7856 02a702 01a80100 00a742 00a899");
    let expected = bytes("3412 7856 3412 7856 7856 42a7 99a8");
    assert_eq!(carmack_expand(&input).unwrap(), expected);
}

#[test]
fn test_carmack_overlapping_near_copy() {
    let input = bytes("0800 4142 03a701");
    assert_eq!(carmack_expand(&input).unwrap(), b"ABABABAB");
}

#[test]
fn test_carmack_bad_references() {
    // near distance of zero
    assert!(matches!(
        carmack_expand(&bytes("0400 3412 01a700")),
        Err(WolfError::InvalidDistance { .. })
    ));
    // far reference at the cursor
    assert!(matches!(
        carmack_expand(&bytes("0400 3412 01a80100")),
        Err(WolfError::InvalidDistance { .. })
    ));
    // copy running past the declared length
    assert!(matches!(
        carmack_expand(&bytes("0400 3412 02a701")),
        Err(WolfError::BufferOverflow { .. })
    ));
    // input ends early
    assert!(matches!(
        carmack_expand(&bytes("0600 3412")),
        Err(WolfError::UnexpectedEof)
    ));
}

#[test]
fn test_rlew_boundaries() {
    let input = bytes("1111 cdab 0300 2222");
    assert_eq!(rlew_expand(0xABCD, 6, &input).unwrap(), bytes("1111 2222 2222"));
    assert_eq!(
        rlew_expand(0xABCD, 8, &input).unwrap(),
        bytes("1111 2222 2222 2222")
    );
    assert_eq!(rlew_expand(0xABCD, 3, &input).unwrap(), bytes("1111 22"));
    assert!(matches!(
        rlew_expand(0xABCD, 10, &input),
        Err(WolfError::RunLengthExhausted {
            written: 8,
            expected: 10
        })
    ));
}

#[test]
fn test_huffman_identity_tree() {
    let dictionary = identity_dictionary();
    let plain = b"WOLF3D\x00\xff";
    let packed = huffman_encode(plain);
    assert_eq!(packed.len(), plain.len());
    assert_eq!(huffman_expand(&packed, plain.len(), &dictionary).unwrap(), plain);

    // short input leaves the tail zero-filled
    let table = NodeTable::from_dictionary(&dictionary).unwrap();
    let out = table.expand(&packed[..3], 6).unwrap();
    assert_eq!(out, b"WOL\0\0\0");

    // requested length caps the output
    assert_eq!(table.expand(&packed, 2).unwrap(), b"WO");
}
