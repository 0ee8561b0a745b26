/// Tamil Unicode block
const TAMIL_BLOCK: std::ops::RangeInclusive<char> = '\u{0B80}'..='\u{0BFF}';

/// Share of alphabetic characters that belong to the Tamil block
pub fn tamil_script_ratio(text: &str) -> f32 {
    let mut letters = 0usize;
    let mut tamil = 0usize;
    for c in text.chars() {
        if TAMIL_BLOCK.contains(&c) {
            tamil += 1;
            letters += 1;
        } else if c.is_alphabetic() {
            letters += 1;
        }
    }
    if letters == 0 {
        return 0.0;
    }
    tamil as f32 / letters as f32
}

/// True when most letters are written in Tamil script
pub fn is_tamil_script(text: &str) -> bool {
    tamil_script_ratio(text) >= 0.5
}
