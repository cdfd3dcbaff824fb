/// Whether two adjacent words need a separating space when rebuilt into a
/// line. Scripts without word spacing (CJK, kana) are joined directly.
pub(super) fn needs_space(left: &str, right: &str) -> bool {
    let last = left.chars().rev().find(|ch| !ch.is_whitespace());
    let first = right.chars().find(|ch| !ch.is_whitespace());
    match (last, first) {
        (Some(a), Some(b)) => !(is_unspaced_script(a) && is_unspaced_script(b)),
        _ => false,
    }
}

fn is_unspaced_script(ch: char) -> bool {
    matches!(
        ch as u32,
        0x4E00..=0x9FFF | 0x3040..=0x30FF | 0x31F0..=0x31FF | 0x3400..=0x4DBF | 0x3000..=0x303F
    )
}
