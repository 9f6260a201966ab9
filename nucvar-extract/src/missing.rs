use nucvar_core::Range;

/// Maximal runs of `symbol` in `seq`, as half-open ranges.
pub fn find_symbol_ranges(seq: &[u8], symbol: u8) -> Vec<Range> {
    let mut ranges = Vec::new();
    let mut begin: Option<usize> = None;

    for (pos, &b) in seq.iter().enumerate() {
        match (b == symbol, begin) {
            (true, None) => begin = Some(pos),
            (false, Some(start)) => {
                ranges.push(Range::new(start, pos));
                begin = None;
            }
            _ => {}
        }
    }
    if let Some(start) = begin {
        ranges.push(Range::new(start, seq.len()));
    }

    ranges
}
