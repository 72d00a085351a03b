//! Per-object pack header
//!
//! The first byte holds the continuation flag (bit 7), the type code
//! (bits 4-6) and the low four bits of the content size. Each following byte
//! holds the next seven size bits, least significant group first, with bit 7
//! set while more bytes follow.

use crate::artifacts::objects::object_type::ObjectType;

const CONTINUATION: u8 = 0x80;
const FIRST_SIZE_BITS: u32 = 4;
const SIZE_BITS: u32 = 7;

pub fn encode(object_type: ObjectType, size: usize) -> Vec<u8> {
    let mut header = Vec::with_capacity(4);
    let mut byte = (object_type.pack_code() << FIRST_SIZE_BITS) | (size & 0x0f) as u8;
    let mut remaining = size >> FIRST_SIZE_BITS;

    while remaining > 0 {
        header.push(byte | CONTINUATION);
        byte = (remaining & 0x7f) as u8;
        remaining >>= SIZE_BITS;
    }
    header.push(byte);

    header
}
