use super::remap::remap_selection;
use super::snapshot::SelectionRange;

fn range(start: usize, end: usize) -> SelectionRange {
    SelectionRange::new(start, end)
}

#[test]
fn selection_before_the_needle_is_unchanged() {
    let result = remap_selection(range(0, 3), range(5, 8), range(5, 10));
    assert_eq!(result, range(0, 3));
}

#[test]
fn selection_touching_the_needle_start_is_unchanged() {
    let result = remap_selection(range(2, 4), range(4, 6), range(4, 9));
    assert_eq!(result, range(2, 4));
}

#[test]
fn selection_after_the_needle_shifts_by_the_length_delta() {
    let shrunk = remap_selection(range(10, 12), range(2, 4), range(2, 3));
    assert_eq!(shrunk, range(9, 11));

    let grown = remap_selection(range(10, 12), range(2, 4), range(2, 7));
    assert_eq!(grown, range(13, 15));
}

#[test]
fn selection_ending_inside_the_needle_clamps_to_its_start() {
    let result = remap_selection(range(1, 6), range(4, 8), range(4, 9));
    assert_eq!(result, range(1, 4));
}

#[test]
fn selection_spanning_the_needle_keeps_both_sides() {
    let result = remap_selection(range(2, 10), range(4, 8), range(4, 9));
    assert_eq!(result, range(2, 11));
}

#[test]
fn selection_inside_the_needle_collapses_to_the_replacement_end() {
    let result = remap_selection(range(5, 6), range(4, 8), range(4, 7));
    assert_eq!(result, range(7, 7));
}

#[test]
fn selection_spanning_the_needle_end_clamps_its_start() {
    let result = remap_selection(range(6, 10), range(4, 8), range(4, 6));
    assert_eq!(result, range(6, 8));
}

#[test]
fn never_returns_an_inverted_range() {
    for (needle, replacement) in [
        (range(4, 8), range(4, 4)),
        (range(4, 8), range(4, 6)),
        (range(4, 8), range(4, 12)),
        (range(0, 0), range(0, 5)),
    ] {
        for start in 0..14 {
            for end in start..14 {
                let result = remap_selection(range(start, end), needle, replacement);
                assert!(
                    result.start <= result.end,
                    "inverted result for selection ({start}, {end})"
                );
            }
        }
    }
}

#[test]
fn empty_needle_at_the_cursor_shifts_trailing_bounds() {
    // Inserting five characters at offset 3.
    let result = remap_selection(range(5, 7), range(3, 3), range(3, 8));
    assert_eq!(result, range(10, 12));
}
