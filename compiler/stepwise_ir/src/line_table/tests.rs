use super::*;
use proptest::prelude::*;

#[test]
fn line_starts() {
    let table = LineOffsetTable::build("ab\ncd\n\nef");
    assert_eq!(table.line_count(), 4);
    assert_eq!(table.line_start_offset(1), Some(0));
    assert_eq!(table.line_start_offset(2), Some(3));
    assert_eq!(table.line_start_offset(3), Some(6));
    assert_eq!(table.line_start_offset(4), Some(7));
    assert_eq!(table.line_start_offset(5), None);
    assert_eq!(table.line_start_offset(0), None);
}

#[test]
fn position_zero_based_column() {
    let source = "var x = 1;\n  y += 1;";
    let table = LineOffsetTable::build(source);
    assert_eq!(table.position(source, 0), LinePosition::new(1, 0));
    assert_eq!(table.position(source, 4), LinePosition::new(1, 4));
    // The newline itself still belongs to line 1.
    assert_eq!(table.position(source, 10), LinePosition::new(1, 10));
    assert_eq!(table.position(source, 13), LinePosition::new(2, 2));
}

#[test]
fn position_past_end_clamps() {
    let source = "ab\ncd";
    let table = LineOffsetTable::build(source);
    assert_eq!(table.position(source, 999), LinePosition::new(2, 2));
}

#[test]
fn position_counts_characters() {
    let source = "é = 1";
    let table = LineOffsetTable::build(source);
    // 'é' is two bytes, one column.
    assert_eq!(table.position(source, 2), LinePosition::new(1, 1));
}

#[test]
fn offset_of_clamps_column() {
    let source = "ab\ncd";
    let table = LineOffsetTable::build(source);
    assert_eq!(table.offset_of(source, LinePosition::new(1, 50)), 2);
    assert_eq!(table.offset_of(source, LinePosition::new(2, 1)), 4);
    assert_eq!(table.offset_of(source, LinePosition::new(9, 0)), 5);
}

proptest! {
    #[test]
    fn offset_position_roundtrip_on_char_boundaries(source in "[a-z \n]{0,64}", pick in 0usize..65) {
        let table = LineOffsetTable::build(&source);
        let offset = pick.min(source.len()) as u32;
        let pos = table.position(&source, offset);
        prop_assert_eq!(table.offset_of(&source, pos), offset);
    }
}
