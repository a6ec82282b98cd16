/// Character-level scanner for the uploaded roster text.
///
/// The grammar is deliberately permissive: a `"` opens a quoted field in
/// which `""` is a literal quote and commas/newlines are ordinary
/// characters; an unterminated quote simply runs to end-of-input and
/// whatever accumulated is emitted. Fields are trimmed after extraction and
/// rows that are entirely empty after trimming are dropped.

/// Split raw text into ordered rows of trimmed field strings.
pub fn tokenize(text: &str) -> Vec<Vec<String>> {
    // Exports routinely prefix the header with a UTF-8 BOM
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    // Doubled quote is one literal quote
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(ch);
            }
        } else {
            match ch {
                '"' => in_quotes = true,
                ',' => flush_field(&mut row, &mut field),
                '\n' => {
                    flush_field(&mut row, &mut field);
                    flush_row(&mut rows, &mut row);
                }
                // \r is consumed so \r\n never yields an empty extra row
                '\r' => {}
                _ => field.push(ch),
            }
        }
    }

    // Flush any trailing field/row exactly as if it had been terminated
    flush_field(&mut row, &mut field);
    flush_row(&mut rows, &mut row);

    rows
}

fn flush_field(row: &mut Vec<String>, field: &mut String) {
    row.push(field.trim().to_string());
    field.clear();
}

fn flush_row(rows: &mut Vec<Vec<String>>, row: &mut Vec<String>) {
    let drained: Vec<String> = std::mem::take(row);
    if drained.iter().any(|f| !f.is_empty()) {
        rows.push(drained);
    }
}
