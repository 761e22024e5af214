//! Classic 5x7 glcd glyphs, printable ASCII `' '..='~'`
//!
//! The glyphs are stored the way most controllers of this family like them, one byte per
//! column with the top row in the LSB. Both fonts are turned into row major bitmaps when
//! compiling.

use super::{CharDescriptor, Font};

const FIRST: u8 = b' ';
const LAST: u8 = b'~';
const GLYPHS: usize = (LAST - FIRST) as usize + 1;

/// Columns of every glyph, bit 0 is the top row
const COLUMNS: [[u8; 5]; GLYPHS] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // space
    [0x00, 0x00, 0x5F, 0x00, 0x00], // !
    [0x00, 0x07, 0x00, 0x07, 0x00], // "
    [0x14, 0x7F, 0x14, 0x7F, 0x14], // #
    [0x24, 0x2A, 0x7F, 0x2A, 0x12], // $
    [0x23, 0x13, 0x08, 0x64, 0x62], // %
    [0x36, 0x49, 0x55, 0x22, 0x50], // &
    [0x00, 0x05, 0x03, 0x00, 0x00], // quote
    [0x00, 0x1C, 0x22, 0x41, 0x00], // (
    [0x00, 0x41, 0x22, 0x1C, 0x00], // )
    [0x08, 0x2A, 0x1C, 0x2A, 0x08], // *
    [0x08, 0x08, 0x3E, 0x08, 0x08], // +
    [0x00, 0x50, 0x30, 0x00, 0x00], // ,
    [0x08, 0x08, 0x08, 0x08, 0x08], // -
    [0x00, 0x60, 0x60, 0x00, 0x00], // .
    [0x20, 0x10, 0x08, 0x04, 0x02], // /
    [0x3E, 0x51, 0x49, 0x45, 0x3E], // 0
    [0x00, 0x42, 0x7F, 0x40, 0x00], // 1
    [0x42, 0x61, 0x51, 0x49, 0x46], // 2
    [0x21, 0x41, 0x45, 0x4B, 0x31], // 3
    [0x18, 0x14, 0x12, 0x7F, 0x10], // 4
    [0x27, 0x45, 0x45, 0x45, 0x39], // 5
    [0x3C, 0x4A, 0x49, 0x49, 0x30], // 6
    [0x01, 0x71, 0x09, 0x05, 0x03], // 7
    [0x36, 0x49, 0x49, 0x49, 0x36], // 8
    [0x06, 0x49, 0x49, 0x29, 0x1E], // 9
    [0x00, 0x36, 0x36, 0x00, 0x00], // :
    [0x00, 0x56, 0x36, 0x00, 0x00], // ;
    [0x00, 0x08, 0x14, 0x22, 0x41], // <
    [0x14, 0x14, 0x14, 0x14, 0x14], // =
    [0x41, 0x22, 0x14, 0x08, 0x00], // >
    [0x02, 0x01, 0x51, 0x09, 0x06], // ?
    [0x32, 0x49, 0x79, 0x41, 0x3E], // @
    [0x7E, 0x11, 0x11, 0x11, 0x7E], // A
    [0x7F, 0x49, 0x49, 0x49, 0x36], // B
    [0x3E, 0x41, 0x41, 0x41, 0x22], // C
    [0x7F, 0x41, 0x41, 0x22, 0x1C], // D
    [0x7F, 0x49, 0x49, 0x49, 0x41], // E
    [0x7F, 0x09, 0x09, 0x01, 0x01], // F
    [0x3E, 0x41, 0x41, 0x51, 0x32], // G
    [0x7F, 0x08, 0x08, 0x08, 0x7F], // H
    [0x00, 0x41, 0x7F, 0x41, 0x00], // I
    [0x20, 0x40, 0x41, 0x3F, 0x01], // J
    [0x7F, 0x08, 0x14, 0x22, 0x41], // K
    [0x7F, 0x40, 0x40, 0x40, 0x40], // L
    [0x7F, 0x02, 0x04, 0x02, 0x7F], // M
    [0x7F, 0x04, 0x08, 0x10, 0x7F], // N
    [0x3E, 0x41, 0x41, 0x41, 0x3E], // O
    [0x7F, 0x09, 0x09, 0x09, 0x06], // P
    [0x3E, 0x41, 0x51, 0x21, 0x5E], // Q
    [0x7F, 0x09, 0x19, 0x29, 0x46], // R
    [0x46, 0x49, 0x49, 0x49, 0x31], // S
    [0x01, 0x01, 0x7F, 0x01, 0x01], // T
    [0x3F, 0x40, 0x40, 0x40, 0x3F], // U
    [0x1F, 0x20, 0x40, 0x20, 0x1F], // V
    [0x7F, 0x20, 0x18, 0x20, 0x7F], // W
    [0x63, 0x14, 0x08, 0x14, 0x63], // X
    [0x03, 0x04, 0x78, 0x04, 0x03], // Y
    [0x61, 0x51, 0x49, 0x45, 0x43], // Z
    [0x00, 0x00, 0x7F, 0x41, 0x41], // [
    [0x02, 0x04, 0x08, 0x10, 0x20], // backslash
    [0x41, 0x41, 0x7F, 0x00, 0x00], // ]
    [0x04, 0x02, 0x01, 0x02, 0x04], // ^
    [0x40, 0x40, 0x40, 0x40, 0x40], // _
    [0x00, 0x01, 0x02, 0x04, 0x00], // `
    [0x20, 0x54, 0x54, 0x54, 0x78], // a
    [0x7F, 0x48, 0x44, 0x44, 0x38], // b
    [0x38, 0x44, 0x44, 0x44, 0x20], // c
    [0x38, 0x44, 0x44, 0x48, 0x7F], // d
    [0x38, 0x54, 0x54, 0x54, 0x18], // e
    [0x08, 0x7E, 0x09, 0x01, 0x02], // f
    [0x0C, 0x52, 0x52, 0x52, 0x3E], // g
    [0x7F, 0x08, 0x04, 0x04, 0x78], // h
    [0x00, 0x44, 0x7D, 0x40, 0x00], // i
    [0x20, 0x40, 0x44, 0x3D, 0x00], // j
    [0x7F, 0x10, 0x28, 0x44, 0x00], // k
    [0x00, 0x41, 0x7F, 0x40, 0x00], // l
    [0x7C, 0x04, 0x18, 0x04, 0x78], // m
    [0x7C, 0x08, 0x04, 0x04, 0x78], // n
    [0x38, 0x44, 0x44, 0x44, 0x38], // o
    [0x7C, 0x14, 0x14, 0x14, 0x08], // p
    [0x08, 0x14, 0x14, 0x18, 0x7C], // q
    [0x7C, 0x08, 0x04, 0x04, 0x08], // r
    [0x48, 0x54, 0x54, 0x54, 0x20], // s
    [0x04, 0x3F, 0x44, 0x40, 0x20], // t
    [0x3C, 0x40, 0x40, 0x20, 0x7C], // u
    [0x1C, 0x20, 0x40, 0x20, 0x1C], // v
    [0x3C, 0x40, 0x30, 0x40, 0x3C], // w
    [0x44, 0x28, 0x10, 0x28, 0x44], // x
    [0x0C, 0x50, 0x50, 0x50, 0x3C], // y
    [0x44, 0x64, 0x54, 0x4C, 0x44], // z
    [0x00, 0x08, 0x36, 0x41, 0x00], // {
    [0x00, 0x00, 0x7F, 0x00, 0x00], // |
    [0x00, 0x41, 0x36, 0x08, 0x00], // }
    [0x10, 0x08, 0x08, 0x10, 0x08], // ~
];

/// Bytes per glyph of [`GLCD_5X7`]: 8 rows of one byte
const SMALL_STRIDE: usize = 8;
/// Bytes per glyph of [`GLCD_10X14`]: 14 rows of two bytes
const LARGE_STRIDE: usize = 28;

const fn descriptors(width: u8, stride: usize) -> [CharDescriptor; GLYPHS] {
    let mut table = [CharDescriptor {
        width: 0,
        offset: 0,
    }; GLYPHS];
    let mut i = 0;
    while i < GLYPHS {
        table[i] = CharDescriptor {
            width,
            offset: (i * stride) as u16,
        };
        i += 1;
    }
    table
}

/// Transposes the columns into rows, MSB is the leftmost pixel
const fn small_bitmap() -> [u8; GLYPHS * SMALL_STRIDE] {
    let mut bitmap = [0u8; GLYPHS * SMALL_STRIDE];
    let mut glyph = 0;
    while glyph < GLYPHS {
        let mut row = 0;
        while row < 8 {
            let mut line = 0u8;
            let mut col = 0;
            while col < 5 {
                if (COLUMNS[glyph][col] >> row) & 1 != 0 {
                    line |= 0x80 >> col;
                }
                col += 1;
            }
            bitmap[glyph * SMALL_STRIDE + row] = line;
            row += 1;
        }
        glyph += 1;
    }
    bitmap
}

/// Same glyphs scaled by two in both directions, the blank 8th row is dropped
const fn large_bitmap() -> [u8; GLYPHS * LARGE_STRIDE] {
    let mut bitmap = [0u8; GLYPHS * LARGE_STRIDE];
    let mut glyph = 0;
    while glyph < GLYPHS {
        let mut row = 0;
        while row < 14 {
            let mut col = 0;
            while col < 10 {
                if (COLUMNS[glyph][col / 2] >> (row / 2)) & 1 != 0 {
                    bitmap[glyph * LARGE_STRIDE + row * 2 + col / 8] |= 0x80 >> (col % 8);
                }
                col += 1;
            }
            row += 1;
        }
        glyph += 1;
    }
    bitmap
}

static SMALL_DESCRIPTORS: [CharDescriptor; GLYPHS] = descriptors(5, SMALL_STRIDE);
static SMALL_BITMAP: [u8; GLYPHS * SMALL_STRIDE] = small_bitmap();
static LARGE_DESCRIPTORS: [CharDescriptor; GLYPHS] = descriptors(10, LARGE_STRIDE);
static LARGE_BITMAP: [u8; GLYPHS * LARGE_STRIDE] = large_bitmap();

/// 5x7 pixel glyphs in an 8 row cell, one pixel between characters
pub static GLCD_5X7: Font = Font {
    height: 8,
    spacing: 1,
    char_start: FIRST,
    char_end: LAST,
    descriptors: &SMALL_DESCRIPTORS,
    bitmap: &SMALL_BITMAP,
};

/// [`GLCD_5X7`] at twice the size
pub static GLCD_10X14: Font = Font {
    height: 14,
    spacing: 2,
    char_start: FIRST,
    char_end: LAST,
    descriptors: &LARGE_DESCRIPTORS,
    bitmap: &LARGE_BITMAP,
};
