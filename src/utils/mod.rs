const TITLE_PREVIEW_CHARS: usize = 40;

pub fn format_number(num: u64) -> String {
    let num_str = num.to_string();
    let chars: Vec<char> = num_str.chars().collect();
    let mut result = String::new();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i).is_multiple_of(3) {
            result.push(',');
        }
        result.push(*c);
    }

    result
}

/// Short label for progress output, e.g. `video v12 "Keynote..."`.
pub fn describe_item(kind: &str, oid: &str, title: &str) -> String {
    let preview: String = title.chars().take(TITLE_PREVIEW_CHARS).collect();
    let ellipsis = if title.chars().count() > TITLE_PREVIEW_CHARS {
        "..."
    } else {
        ""
    };
    format!("{} {} \"{}{}\"", kind, oid, preview, ellipsis)
}
