//! A1 reference grammar and shape tests

use cellmap::core::reference::{column_letters, normalize_ref, ReferenceParser};

#[test]
fn test_parse_cell_roundtrip() {
    let parser = ReferenceParser::new();
    for letters in ["A", "B", "Z", "AA", "AZ", "ZZ", "AAA", "ZZZ"] {
        for row in [1u32, 5, 42, 9_999_999] {
            let input = format!("{letters}{row}");
            let cell = parser.parse_cell(&input).unwrap();
            assert_eq!(cell.letters(), letters);
            assert_eq!(cell.row(), row);
            assert_eq!(column_letters(cell.col()), letters);
            assert_eq!(cell.to_string(), input);
        }
    }
}

#[test]
fn test_column_encoding_landmarks() {
    let parser = ReferenceParser::new();
    assert_eq!(parser.parse_cell("A1").unwrap().col(), 1);
    assert_eq!(parser.parse_cell("Z1").unwrap().col(), 26);
    assert_eq!(parser.parse_cell("AA1").unwrap().col(), 27);
    assert_eq!(parser.parse_cell("AZ1").unwrap().col(), 52);
}

#[test]
fn test_parse_cell_rejections() {
    let parser = ReferenceParser::new();
    for bad in [
        "", "b5", "B 5", " B5", "B5 ", "B05", "B0", "5B", "B", "5", "B5:", "AAAA1",
        "A12345678", "A-1", "B5X", "$B$5",
    ] {
        assert!(parser.parse_cell(bad).is_err(), "should reject {bad:?}");
    }
}

#[test]
fn test_normalization_then_parse() {
    let parser = ReferenceParser::new();
    let cell = parser.parse_cell(&normalize_ref("  b5 ")).unwrap();
    assert_eq!(cell.to_string(), "B5");
}

#[test]
fn test_parse_range_both_orders() {
    let parser = ReferenceParser::new();
    let ascending = parser.parse_range("C10:C29").unwrap();
    let descending = parser.parse_range("C29:C10").unwrap();

    // Corners stay exactly as given.
    assert_eq!(ascending.start().to_string(), "C10");
    assert_eq!(descending.start().to_string(), "C29");

    // Shape is order-independent.
    let shape = ascending.shape();
    assert_eq!(shape, descending.shape());
    assert_eq!(shape.row_span, 20);
    assert_eq!(shape.col_span, 1);
    assert_eq!(shape.cell_count, 20);
}

#[test]
fn test_parse_range_rejections() {
    let parser = ReferenceParser::new();
    for bad in ["", "C10", "C10:C20:C30", "C10:", ":C29", "C10-C29", "c10:C29"] {
        assert!(parser.parse_range(bad).is_err(), "should reject {bad:?}");
    }
}

#[test]
fn test_single_row_range_shape() {
    let parser = ReferenceParser::new();
    let shape = parser.parse_range("B2:E2").unwrap().shape();
    assert_eq!(shape.row_span, 1);
    assert_eq!(shape.col_span, 4);
    assert_eq!(shape.cell_count, 4);
    assert!(shape.is_one_dimensional());
}

#[test]
fn test_two_dimensional_shape() {
    let parser = ReferenceParser::new();
    let shape = parser.parse_range("A1:C10").unwrap().shape();
    assert_eq!(shape.row_span, 10);
    assert_eq!(shape.col_span, 3);
    assert_eq!(shape.cell_count, 30);
    assert!(!shape.is_one_dimensional());
}
